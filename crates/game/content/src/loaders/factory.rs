//! Content factory for building a whole game's content from data files.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, GameMap, LootTables, ShopItem};

use crate::loaders::{
    ConfigLoader, ItemCatalog, ItemLoader, LoadResult, MapLoader, MonsterCatalog, MonsterLoader,
    Tables, TablesLoader,
};

/// Everything a session needs to start.
#[derive(Debug, Clone)]
pub struct GameContent {
    pub config: GameConfig,
    pub items: ItemCatalog,
    pub monsters: MonsterCatalog,
    pub loot: LootTables,
    pub shop_stock: Vec<ShopItem>,
    pub world: GameMap,
    pub town: GameMap,
    /// Dungeon maps keyed by the entrance id declared on the world map.
    pub dungeons: Vec<(String, GameMap)>,
}

impl GameContent {
    pub fn dungeon(&self, id: &str) -> Option<&GameMap> {
        self.dungeons
            .iter()
            .find(|(candidate, _)| candidate == id)
            .map(|(_, map)| map)
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// ├── monsters.ron
/// ├── tables.ron
/// └── maps/
///     ├── world.ron
///     ├── town.ron
///     └── <dungeon id>.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, defaulting when absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load_or_default(&self.data_dir.join("config.toml"))
    }

    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load monster templates from `monsters.ron`. A missing file means every
    /// kind uses its built-in stats.
    pub fn load_monsters(&self) -> LoadResult<MonsterCatalog> {
        let path = self.data_dir.join("monsters.ron");
        if path.exists() {
            MonsterLoader::load(&path)
        } else {
            Ok(MonsterCatalog::default())
        }
    }

    pub fn load_tables(&self, items: &ItemCatalog) -> LoadResult<Tables> {
        TablesLoader::load(&self.data_dir.join("tables.ron"), items)
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<GameMap> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Loads every file and each dungeon referenced from the world map.
    pub fn load_all(&self) -> LoadResult<GameContent> {
        let config = self.load_config()?;
        let items = self.load_items()?;
        let monsters = self.load_monsters()?;
        let Tables { loot, shop_stock } = self.load_tables(&items)?;
        let world = self.load_map("world")?;
        let town = self.load_map("town")?;

        let mut dungeons = Vec::new();
        for entrance in world.dungeons() {
            if dungeons.iter().any(|(id, _)| id == &entrance.id) {
                continue;
            }
            dungeons.push((entrance.id.clone(), self.load_map(&entrance.id)?));
        }

        Ok(GameContent {
            config,
            items,
            monsters,
            loot,
            shop_stock,
            world,
            town,
            dungeons,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_items_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert!(factory.load_items().is_err());
        assert!(factory.load_monsters().unwrap().monsters.is_empty());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
    }
}
