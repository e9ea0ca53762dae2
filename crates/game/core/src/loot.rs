//! Chests, items lying on the ground and random loot.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::entity::MonsterKind;
use crate::grid::Position;
use crate::item::Item;

/// A closed chest holding one item until opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chest {
    pub position: Position,
    item: Option<Item>,
}

impl Chest {
    pub fn new(position: Position, item: Item) -> Self {
        Self {
            position,
            item: Some(item),
        }
    }

    pub fn is_opened(&self) -> bool {
        self.item.is_none()
    }

    /// Takes the contents. Opening twice yields nothing.
    pub fn open(&mut self) -> Option<Item> {
        self.item.take()
    }
}

/// An item waiting to be picked up by stepping onto its tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroundItem {
    pub position: Position,
    pub item: Item,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: Item,
    /// Drop chance in whole percent, 0..=100.
    pub chance_percent: u8,
}

/// Per-monster drop table.
///
/// Entries are rolled in order and the first hit drops; the optional gold
/// range always yields a gold pile when set.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootTable {
    #[cfg_attr(feature = "serde", serde(default))]
    pub entries: Vec<LootEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: Option<(u32, u32)>,
}

impl LootTable {
    pub fn roll(&self, rng: &mut impl Rng) -> Vec<Item> {
        let mut drops = Vec::new();
        if let Some((low, high)) = self.gold {
            let amount = rng.gen_range(low.min(high)..=high.max(low));
            if amount > 0 {
                drops.push(Item::gold_pile(amount));
            }
        }
        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| rng.gen_range(0..100u8) < entry.chance_percent)
        {
            drops.push(entry.item.clone());
        }
        drops
    }
}

/// Loot tables keyed by monster kind plus the pool chests draw from.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LootTables {
    pub monsters: Vec<(MonsterKind, LootTable)>,
    pub chest_pool: Vec<Item>,
}

impl LootTables {
    pub fn for_monster(&self, kind: MonsterKind) -> Option<&LootTable> {
        self.monsters
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, table)| table)
    }

    /// Random item for a freshly spawned chest.
    pub fn chest_item(&self, rng: &mut impl Rng) -> Option<Item> {
        self.chest_pool.choose(rng).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn chest_opens_once() {
        let mut chest = Chest::new(Position::new(1, 1), Item::town_portal());
        assert!(!chest.is_opened());
        assert!(chest.open().is_some());
        assert!(chest.is_opened());
        assert!(chest.open().is_none());
    }

    #[test]
    fn certain_drop_always_drops_first_entry() {
        let table = LootTable {
            entries: vec![
                LootEntry {
                    item: Item::town_portal(),
                    chance_percent: 100,
                },
                LootEntry {
                    item: Item::consumable("Health Potion", 30),
                    chance_percent: 100,
                },
            ],
            gold: None,
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let drops = table.roll(&mut rng);
            assert_eq!(drops.len(), 1);
            assert!(drops[0].is_town_portal());
        }
    }

    #[test]
    fn zero_chance_never_drops() {
        let table = LootTable {
            entries: vec![LootEntry {
                item: Item::town_portal(),
                chance_percent: 0,
            }],
            gold: Some((5, 10)),
        };
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let drops = table.roll(&mut rng);
            assert_eq!(drops.len(), 1);
            let amount = drops[0].gold_amount().unwrap();
            assert!((5..=10).contains(&amount));
        }
    }

    #[test]
    fn chest_pool_draws_from_pool() {
        let tables = LootTables {
            monsters: vec![(MonsterKind::Pooka, LootTable::default())],
            chest_pool: vec![Item::town_portal()],
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert!(tables.chest_item(&mut rng).unwrap().is_town_portal());
        assert!(tables.for_monster(MonsterKind::Pooka).is_some());
        assert!(tables.for_monster(MonsterKind::Selkie).is_none());
        assert!(LootTables::default().chest_item(&mut rng).is_none());
    }
}
