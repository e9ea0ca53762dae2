//! Pure rules for a grid-based action RPG.
//!
//! `game-core` defines the grid, the entity model, combat, inventory, maps,
//! loot, the shop, experience and skills. It performs no I/O and no
//! logging; the `runtime` crate drives these types frame by frame and
//! `game-content` builds them from data files.
pub mod ai;
pub mod combat;
pub mod config;
pub mod entity;
pub mod error;
pub mod experience;
pub mod grid;
pub mod inventory;
pub mod item;
pub mod loot;
pub mod map;
pub mod shop;
pub mod skills;

pub use ai::{MonsterAction, MonsterContext};
pub use combat::{
    AttackOutcome, AttackReport, MIN_DAMAGE, calculate_damage, resolve_attack, resolve_strike,
};
pub use config::GameConfig;
pub use entity::{
    AttackCooldown, BrainKind, CooldownAttacker, Damageable, EntityId, Health, LifeState, Monster,
    MonsterKind, MonsterTemplate, Movable, MoveOutcome, Positioned, Strike, Warrior,
};
pub use error::{ErrorSeverity, GameError};
pub use experience::Experience;
pub use grid::{
    Direction, MapBounds, PixelPosition, PixelRange, Position, manhattan_distance,
    pixel_distance_squared, screen_offset, to_grid, to_pixel, within_range,
};
pub use inventory::{Inventory, InventoryError, Placement, Slot};
pub use item::{EquipSlot, Item, ItemBonuses, ItemEffect, ItemType};
pub use loot::{Chest, GroundItem, LootEntry, LootTable, LootTables};
pub use map::{DungeonEntrance, GameMap, LegendEntry, MapDefinition, MapError, Marker, MonsterSpawn, Tile};
pub use shop::{Shop, ShopError, ShopItem};
pub use skills::{SkillBook, SkillError, SkillId, SkillKind};
