//! Map-scoped entities: monsters, chests and items on the ground.
//!
//! Everything here is rebuilt whenever the current map changes. Kills and
//! opened chests are remembered per map so re-entering a map does not bring
//! them back; the record is wiped on restart.
use std::collections::{HashMap, HashSet};

use game_content::MonsterCatalog;
use game_core::{
    Chest, Damageable, EntityId, GameMap, GroundItem, InventoryError, Item, LootTables, Monster,
    MonsterKind, Position, Positioned, Warrior, pixel_distance_squared,
};
use rand::Rng;

use crate::dungeon::MapId;

/// Outcome of stepping onto a ground item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pickup {
    Gold(u32),
    Item(String),
    /// The item stays on the ground.
    InventoryFull,
}

impl Pickup {
    pub fn message(&self) -> String {
        match self {
            Pickup::Gold(amount) => format!("Picked up {} gold!", amount),
            Pickup::Item(name) => format!("Picked up {}!", name),
            Pickup::InventoryFull => "Inventory is full!".to_string(),
        }
    }
}

/// A monster removed after dying, with what it left behind.
#[derive(Debug)]
pub struct Fallen {
    pub monster: Monster,
    pub position: Position,
    pub drops: Vec<Item>,
}

#[derive(Debug, Default)]
pub struct MapEntities {
    monsters: Vec<Monster>,
    /// Spawn tile per monster, the key under which kills are remembered.
    origins: HashMap<EntityId, Position>,
    chests: Vec<Chest>,
    ground_items: Vec<GroundItem>,
    next_id: u32,
    killed: HashSet<(MapId, MonsterKind, Position)>,
    opened: HashSet<(MapId, Position)>,
}

impl MapEntities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all entities with those of `map`, skipping anything killed or
    /// opened earlier. Town never holds monsters or chests.
    pub fn populate(
        &mut self,
        map_id: &MapId,
        map: &GameMap,
        monsters: &MonsterCatalog,
        loot: &LootTables,
        tile_size: i32,
        rng: &mut impl Rng,
    ) {
        self.clear();
        if *map_id == MapId::Town {
            return;
        }

        for spawn in map.monster_spawns() {
            if self
                .killed
                .contains(&(map_id.clone(), spawn.kind, spawn.position))
            {
                continue;
            }
            self.next_id += 1;
            let id = EntityId(self.next_id);
            let template = monsters.template(spawn.kind);
            self.monsters
                .push(Monster::new(id, &template, spawn.position, tile_size));
            self.origins.insert(id, spawn.position);
        }

        for &position in map.chest_spawns() {
            if self.opened.contains(&(map_id.clone(), position)) {
                continue;
            }
            match loot.chest_item(rng) {
                Some(item) => self.chests.push(Chest::new(position, item)),
                None => tracing::warn!("Chest pool is empty, chest at {} skipped", position),
            }
        }

        tracing::debug!(
            "Populated {}: {} monster(s), {} chest(s)",
            map_id,
            self.monsters.len(),
            self.chests.len()
        );
    }

    pub fn clear(&mut self) {
        self.monsters.clear();
        self.origins.clear();
        self.chests.clear();
        self.ground_items.clear();
    }

    /// Forgets kills and opened chests.
    pub fn reset_tracking(&mut self) {
        self.killed.clear();
        self.opened.clear();
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn monsters_mut(&mut self) -> &mut [Monster] {
        &mut self.monsters
    }

    pub fn chests(&self) -> &[Chest] {
        &self.chests
    }

    pub fn ground_items(&self) -> &[GroundItem] {
        &self.ground_items
    }

    /// A live monster occupies `position`.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.monsters
            .iter()
            .any(|monster| monster.is_alive() && monster.position() == position)
    }

    /// Index of the closest live monster to `from`.
    pub fn nearest_alive_monster(&self, from: Position, tile_size: i32) -> Option<usize> {
        self.monsters
            .iter()
            .enumerate()
            .filter(|(_, monster)| monster.is_alive())
            .min_by_key(|(_, monster)| pixel_distance_squared(from, monster.position(), tile_size))
            .map(|(index, _)| index)
    }

    /// Opens the unopened chest at `position`, if any, and returns its item.
    pub fn open_chest_at(&mut self, map_id: &MapId, position: Position) -> Option<Item> {
        let index = self
            .chests
            .iter()
            .position(|chest| !chest.is_opened() && chest.position == position)?;
        let mut chest = self.chests.remove(index);
        self.opened.insert((map_id.clone(), position));
        chest.open()
    }

    pub fn drop_item(&mut self, position: Position, item: Item) {
        self.ground_items.push(GroundItem { position, item });
    }

    /// Picks up the first ground item at the warrior's tile. Gold goes to the
    /// purse; anything else must fit in the inventory.
    pub fn pickup_at(&mut self, warrior: &mut Warrior) -> Option<Pickup> {
        let position = warrior.position();
        let index = self
            .ground_items
            .iter()
            .position(|ground| ground.position == position)?;

        if let Some(amount) = self.ground_items[index].item.gold_amount() {
            self.ground_items.remove(index);
            warrior.gold = warrior.gold.saturating_add(amount);
            return Some(Pickup::Gold(amount));
        }

        let ground = self.ground_items.remove(index);
        let name = ground.item.name.clone();
        match warrior.add_item(ground.item) {
            Ok(_) => Some(Pickup::Item(name)),
            Err(InventoryError::InventoryFull(item)) => {
                self.ground_items.insert(index, GroundItem { position, item });
                Some(Pickup::InventoryFull)
            }
            Err(err) => {
                tracing::warn!("Pickup of {} failed: {}", name, err);
                None
            }
        }
    }

    /// Removes dead monsters, remembering them as killed on `map_id`, and
    /// rolls their loot.
    pub fn remove_dead(
        &mut self,
        map_id: &MapId,
        loot: &LootTables,
        rng: &mut impl Rng,
    ) -> Vec<Fallen> {
        let mut fallen = Vec::new();
        let mut index = 0;
        while index < self.monsters.len() {
            if self.monsters[index].is_alive() {
                index += 1;
                continue;
            }
            let monster = self.monsters.remove(index);
            let position = monster.position();
            if let Some(origin) = self.origins.remove(&monster.id()) {
                self.killed.insert((map_id.clone(), monster.kind(), origin));
            }
            let drops = loot
                .for_monster(monster.kind())
                .map(|table| table.roll(rng))
                .unwrap_or_default();
            fallen.push(Fallen {
                monster,
                position,
                drops,
            });
        }
        fallen
    }
}
