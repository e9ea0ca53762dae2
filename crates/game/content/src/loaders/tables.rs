//! Loot and shop tables loader.
//!
//! Tables reference items by catalog name, so they are resolved against an
//! [`ItemCatalog`] at load time.

use std::path::Path;

use game_core::{Item, LootEntry, LootTable, LootTables, MonsterKind, ShopItem};
use serde::{Deserialize, Serialize};

use crate::loaders::{ItemCatalog, LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LootTableRon {
    #[serde(default)]
    entries: Vec<(String, u8)>,
    #[serde(default)]
    gold: Option<(u32, u32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShopEntryRon {
    item: String,
    #[serde(default)]
    quantity: u32,
    #[serde(default)]
    infinite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TablesRon {
    #[serde(default)]
    loot: Vec<(MonsterKind, LootTableRon)>,
    #[serde(default)]
    chest_pool: Vec<String>,
    #[serde(default)]
    shop: Vec<ShopEntryRon>,
}

/// Resolved tables ready for the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub loot: LootTables,
    pub shop_stock: Vec<ShopItem>,
}

/// Loader for loot and shop tables from RON files.
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path, items: &ItemCatalog) -> LoadResult<Tables> {
        let content = read_file(path)?;
        Self::parse(&content, items)
    }

    pub fn parse(content: &str, items: &ItemCatalog) -> LoadResult<Tables> {
        let data: TablesRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables RON: {}", e))?;

        let mut monsters = Vec::with_capacity(data.loot.len());
        for (kind, table) in data.loot {
            let mut entries = Vec::with_capacity(table.entries.len());
            for (name, chance_percent) in table.entries {
                if chance_percent > 100 {
                    anyhow::bail!("Loot chance for {} on {} exceeds 100%", name, kind);
                }
                entries.push(LootEntry {
                    item: items.require(&name)?,
                    chance_percent,
                });
            }
            monsters.push((
                kind,
                LootTable {
                    entries,
                    gold: table.gold,
                },
            ));
        }

        let chest_pool = data
            .chest_pool
            .iter()
            .map(|name| items.require(name))
            .collect::<LoadResult<Vec<Item>>>()?;

        let shop_stock = data
            .shop
            .into_iter()
            .map(|entry| {
                Ok(ShopItem {
                    item: items.require(&entry.item)?,
                    quantity: entry.quantity,
                    infinite: entry.infinite,
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(Tables {
            loot: LootTables {
                monsters,
                chest_pool,
            },
            shop_stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ItemCatalog {
        ItemCatalog {
            items: vec![Item::town_portal(), Item::weapon("Iron Sword", 5, 50)],
        }
    }

    #[test]
    fn resolves_item_names() {
        let tables = TablesLoader::parse(
            r#"(
                loot: [(pooka, (entries: [("Town Portal", 25)], gold: Some((5, 15))))],
                chest_pool: ["Iron Sword"],
                shop: [(item: "Town Portal", infinite: true)],
            )"#,
            &catalog(),
        )
        .unwrap();

        let pooka = tables.loot.for_monster(MonsterKind::Pooka).unwrap();
        assert!(pooka.entries[0].item.is_town_portal());
        assert_eq!(pooka.gold, Some((5, 15)));
        assert_eq!(tables.loot.chest_pool[0].name, "Iron Sword");
        assert!(tables.shop_stock[0].infinite);
    }

    #[test]
    fn unknown_item_fails() {
        let result = TablesLoader::parse(r#"(chest_pool: ["Vorpal Blade"])"#, &catalog());
        assert!(result.is_err());
    }

    #[test]
    fn chance_over_hundred_fails() {
        let result = TablesLoader::parse(
            r#"(loot: [(selkie, (entries: [("Iron Sword", 120)]))])"#,
            &catalog(),
        );
        assert!(result.is_err());
    }
}
