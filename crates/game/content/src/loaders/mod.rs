//! Content loaders for reading game data from files.
//!
//! RON is used for structured content (maps, items, monsters, tables) and
//! TOML for the tunable game configuration.

pub mod config;
pub mod factory;
pub mod item;
pub mod map;
pub mod monsters;
pub mod tables;

pub use config::ConfigLoader;
pub use factory::{ContentFactory, GameContent};
pub use item::{ItemCatalog, ItemLoader};
pub use map::MapLoader;
pub use monsters::{MonsterCatalog, MonsterLoader};
pub use tables::{Tables, TablesLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
