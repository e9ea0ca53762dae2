//! Map data loader.
//!
//! Map files hold a [`MapDefinition`]: glyph rows, a legend and optional
//! explicit spawn lists. Validation happens in [`GameMap::from_definition`].

use std::path::Path;

use game_core::{GameMap, MapDefinition};

use crate::loaders::{LoadResult, read_file};

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<GameMap> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load map {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<GameMap> {
        let definition: MapDefinition = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;
        Ok(GameMap::from_definition(definition)?)
    }
}
