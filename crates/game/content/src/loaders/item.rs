//! Item catalog loader.

use std::path::Path;

use game_core::Item;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<Item>,
}

impl ItemCatalog {
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Looks up an item by name, failing with a descriptive error.
    pub fn require(&self, name: &str) -> LoadResult<Item> {
        self.get(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Unknown item referenced: {}", name))
    }
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut names = std::collections::HashSet::new();
        if let Some(duplicate) = catalog
            .items
            .iter()
            .find(|item| !names.insert(item.name.as_str()))
        {
            anyhow::bail!("Duplicate item in catalog: {}", duplicate.name);
        }
        Ok(catalog)
    }
}
