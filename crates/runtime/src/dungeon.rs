//! Map ownership and transitions between the world, the town and dungeons.
//!
//! [`DungeonManager`] holds every loaded map and knows which one is current.
//! Markers are indexed by [`GameMap`] at load time, so all the `check_*`
//! predicates here are lookups against the current map. Moving the warrior
//! and switching maps happen together in [`DungeonManager::check_and_handle_transition`];
//! respawning map-scoped entities is left to the session.
use std::collections::HashMap;
use std::fmt;

use game_content::GameContent;
use game_core::{
    Damageable, DungeonEntrance, GameMap, Item, Marker, Position, Positioned, Warrior,
    manhattan_distance,
};

use crate::error::{Result, RuntimeError};

/// Identifies one of the loaded maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapId {
    World,
    Town,
    Dungeon(String),
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapId::World => write!(f, "world"),
            MapId::Town => write!(f, "town"),
            MapId::Dungeon(id) => write!(f, "{}", id),
        }
    }
}

/// A map switch performed by [`DungeonManager::check_and_handle_transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    ExitedTown { to: Position },
    ExitedDungeon { to: Position },
    EnteredTown { to: Position },
    EnteredDungeon { id: String, name: String, to: Position },
}

impl Transition {
    pub fn destination(&self) -> Position {
        match self {
            Transition::ExitedTown { to }
            | Transition::ExitedDungeon { to }
            | Transition::EnteredTown { to }
            | Transition::EnteredDungeon { to, .. } => *to,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Transition::ExitedTown { .. } | Transition::ExitedDungeon { .. } => {
                "You return to the world map.".to_string()
            }
            Transition::EnteredTown { .. } => "You enter the town!".to_string(),
            Transition::EnteredDungeon { name, .. } => format!("You enter the {}!", name),
        }
    }
}

/// Result of standing on the library tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryVisit {
    Granted(usize),
    /// The library only supplies warriors with no portals left.
    AlreadyHolding(usize),
    NoSpace,
}

impl LibraryVisit {
    pub fn message(&self) -> String {
        match self {
            LibraryVisit::Granted(1) => "The librarian hands you a town portal!".to_string(),
            LibraryVisit::Granted(count) => {
                format!("The librarian hands you {} town portals!", count)
            }
            LibraryVisit::AlreadyHolding(count) => format!(
                "The librarian smiles: you still carry {} portal(s).",
                count
            ),
            LibraryVisit::NoSpace => "Your backpack has no room for portal scrolls!".to_string(),
        }
    }
}

pub struct DungeonManager {
    world: GameMap,
    town: GameMap,
    dungeons: HashMap<String, GameMap>,
    current: MapId,
    /// World tile the warrior entered town from.
    town_return: Option<Position>,
    /// World tile the warrior entered the current dungeon from.
    dungeon_return: Option<Position>,
    town_entrance: Option<Position>,
}

impl DungeonManager {
    pub fn new(world: GameMap, town: GameMap, dungeons: Vec<(String, GameMap)>) -> Self {
        let town_entrance = world.first_marker(Marker::TownEntrance);
        let dungeons: HashMap<_, _> = dungeons.into_iter().collect();
        for entrance in world.dungeons() {
            if !dungeons.contains_key(&entrance.id) {
                tracing::warn!(
                    "Dungeon entrance {} at {} has no loaded map and will be ignored",
                    entrance.id,
                    entrance.position
                );
            }
        }
        Self {
            world,
            town,
            dungeons,
            current: MapId::World,
            town_return: None,
            dungeon_return: None,
            town_entrance,
        }
    }

    pub fn from_content(content: &GameContent) -> Self {
        Self::new(
            content.world.clone(),
            content.town.clone(),
            content.dungeons.clone(),
        )
    }

    pub fn current_map_id(&self) -> &MapId {
        &self.current
    }

    pub fn current_map(&self) -> &GameMap {
        // `current` only ever names a loaded map.
        self.map(&self.current).unwrap_or(&self.world)
    }

    pub fn map(&self, id: &MapId) -> Option<&GameMap> {
        match id {
            MapId::World => Some(&self.world),
            MapId::Town => Some(&self.town),
            MapId::Dungeon(id) => self.dungeons.get(id),
        }
    }

    pub fn world(&self) -> &GameMap {
        &self.world
    }

    pub fn town(&self) -> &GameMap {
        &self.town
    }

    pub fn is_in_town(&self) -> bool {
        self.current == MapId::Town
    }

    pub fn is_in_dungeon(&self) -> bool {
        matches!(self.current, MapId::Dungeon(_))
    }

    pub fn town_return_location(&self) -> Option<Position> {
        self.town_return
    }

    /// Switches maps without any return bookkeeping and yields the new map's
    /// spawn point. Used by portals, which track their own return anchor.
    pub fn switch_to(&mut self, id: MapId) -> Option<Position> {
        let spawn = self.map(&id)?.spawn_point();
        tracing::info!("Switching map {} -> {}", self.current, id);
        self.current = id;
        Some(spawn)
    }

    /// Records `from` as the return location and moves to town.
    pub fn enter_town(&mut self, from: Position) -> Position {
        self.town_return = Some(from);
        self.current = MapId::Town;
        self.town.spawn_point()
    }

    /// Leaves town for the world beside the recorded entrance, preferring
    /// the tile east of it, so the entrance does not fire again.
    pub fn exit_town(&mut self) -> Option<Position> {
        if !self.is_in_town() {
            return None;
        }
        self.current = MapId::World;
        let anchor = self.town_return.take().or(self.town_entrance);
        Some(match anchor {
            Some(anchor) => self.world.landing_beside(anchor),
            None => {
                tracing::warn!("No town entrance recorded, returning to the world spawn");
                self.world.spawn_point()
            }
        })
    }

    pub fn enter_dungeon(&mut self, id: &str, from: Position) -> Result<Position> {
        let spawn = self
            .dungeons
            .get(id)
            .map(GameMap::spawn_point)
            .ok_or_else(|| RuntimeError::UnknownDungeon { id: id.to_string() })?;
        self.dungeon_return = Some(from);
        self.current = MapId::Dungeon(id.to_string());
        Ok(spawn)
    }

    /// Returns to the world at the tile the dungeon was entered from.
    pub fn exit_dungeon(&mut self) -> Option<Position> {
        let MapId::Dungeon(id) = &self.current else {
            return None;
        };
        let fallback = self
            .world
            .dungeons()
            .iter()
            .find(|entrance| &entrance.id == id)
            .map(|entrance| entrance.position);
        self.current = MapId::World;
        Some(
            self.dungeon_return
                .take()
                .or(fallback)
                .unwrap_or_else(|| self.world.spawn_point()),
        )
    }

    /// Loaded dungeon whose entrance is at `position` on the world map.
    pub fn get_dungeon_at(&self, position: Position) -> Option<&DungeonEntrance> {
        if self.current != MapId::World {
            return None;
        }
        self.world
            .dungeon_at(position)
            .filter(|entrance| self.dungeons.contains_key(&entrance.id))
    }

    pub fn check_for_exit(&self, position: Position) -> bool {
        self.is_in_dungeon()
            && self
                .current_map()
                .has_marker_at(Marker::DungeonExit, position)
    }

    pub fn check_for_town_entrance(&self, position: Position) -> bool {
        self.current == MapId::World && self.world.has_marker_at(Marker::TownEntrance, position)
    }

    pub fn check_for_town_exit(&self, position: Position) -> bool {
        self.is_in_town() && self.town.has_marker_at(Marker::TownExit, position)
    }

    /// Performs at most one transition for the warrior's tile, checked in the
    /// order town exit, dungeon exit, town entrance, dungeon entrance.
    pub fn check_and_handle_transition(&mut self, warrior: &mut Warrior) -> Option<Transition> {
        let at = warrior.position();

        let transition = if self.check_for_town_exit(at) {
            Transition::ExitedTown {
                to: self.exit_town()?,
            }
        } else if self.check_for_exit(at) {
            Transition::ExitedDungeon {
                to: self.exit_dungeon()?,
            }
        } else if self.check_for_town_entrance(at) {
            Transition::EnteredTown {
                to: self.enter_town(at),
            }
        } else if let Some(entrance) = self.get_dungeon_at(at).cloned() {
            let to = self.enter_dungeon(&entrance.id, at).ok()?;
            Transition::EnteredDungeon {
                id: entrance.id,
                name: entrance.name,
                to,
            }
        } else {
            return None;
        };

        warrior.set_position(transition.destination());
        tracing::info!(
            "Transition {:?}: now on {} at {}",
            transition,
            self.current,
            warrior.position()
        );
        Some(transition)
    }

    /// Within one tile (Manhattan) of the town shop.
    pub fn is_near_shop(&self, position: Position) -> bool {
        self.is_in_town()
            && self
                .town
                .marker_positions(Marker::Shop)
                .iter()
                .any(|shop| manhattan_distance(*shop, position) <= 1)
    }

    /// Hands out up to `grant_limit` copies of `portal` when the warrior
    /// stands on the library with no portals. `None` when not on the library.
    pub fn visit_library(
        &self,
        warrior: &mut Warrior,
        grant_limit: usize,
        portal: &Item,
    ) -> Option<LibraryVisit> {
        if !self.is_in_town() || !self.town.has_marker_at(Marker::Library, warrior.position()) {
            return None;
        }

        let held = warrior.count_town_portals();
        if held > 0 {
            return Some(LibraryVisit::AlreadyHolding(held));
        }
        let free = warrior.inventory().free_backpack_slots();
        if free == 0 {
            return Some(LibraryVisit::NoSpace);
        }

        let mut granted = 0;
        for _ in 0..grant_limit.min(free) {
            if warrior.add_item(portal.clone()).is_err() {
                break;
            }
            granted += 1;
        }
        tracing::info!("Library granted {} town portal(s)", granted);
        Some(LibraryVisit::Granted(granted))
    }

    /// Restores full health on the temple tile. True when healing happened.
    pub fn visit_temple(&self, warrior: &mut Warrior) -> bool {
        if !self.is_in_town()
            || !self.town.has_marker_at(Marker::Temple, warrior.position())
            || warrior.health().is_full()
        {
            return false;
        }
        let restored = warrior.health_mut().restore();
        tracing::info!("Temple restored {} health", restored);
        restored > 0
    }

    /// Back to the world with no recorded return locations.
    pub fn reset(&mut self) {
        self.current = MapId::World;
        self.town_return = None;
        self.dungeon_return = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_content::{ContentFactory, bundled_data_dir};
    use game_core::{GameConfig, LegendEntry, MapDefinition};

    fn manager() -> DungeonManager {
        let content = ContentFactory::new(bundled_data_dir()).load_all().unwrap();
        DungeonManager::from_content(&content)
    }

    fn warrior_at(position: Position) -> Warrior {
        Warrior::new(&GameConfig::default(), position)
    }

    #[test]
    fn town_exit_lands_one_tile_east_of_entrance() {
        let mut dungeon = manager();
        let spawn = dungeon.enter_town(Position::new(8, 5));
        assert_eq!(spawn, dungeon.town().spawn_point());
        assert!(dungeon.is_in_town());

        assert_eq!(dungeon.exit_town(), Some(Position::new(9, 5)));
        assert_eq!(dungeon.current_map_id(), &MapId::World);
        assert_eq!(dungeon.exit_town(), None);
    }

    fn walled_map(name: &str, rows: &[&str]) -> GameMap {
        let entry = |name: &str, passable: bool, marker: Option<Marker>| LegendEntry {
            name: name.into(),
            passable,
            marker,
        };
        GameMap::from_definition(MapDefinition {
            name: name.into(),
            rows: rows.iter().map(|row| row.to_string()).collect(),
            legend: vec![
                ('#', entry("wall", false, None)),
                ('.', entry("grass", true, None)),
                ('S', entry("spawn", true, Some(Marker::SpawnPoint))),
                ('T', entry("town", true, Some(Marker::TownEntrance))),
                ('X', entry("gate", true, Some(Marker::TownExit))),
            ],
            spawn_point: None,
            monsters: Vec::new(),
            chests: Vec::new(),
            dungeons: Vec::new(),
        })
        .unwrap()
    }

    #[test]
    fn town_exit_avoids_a_wall_east_of_the_entrance() {
        let world = walled_map("world", &["#####", "#S.T#", "#...#", "#####"]);
        let town = walled_map("town", &["#####", "#S.X#", "#####"]);
        let mut dungeon = DungeonManager::new(world, town, Vec::new());

        dungeon.enter_town(Position::new(3, 1));
        let landing = dungeon.exit_town().unwrap();
        assert_eq!(landing, Position::new(3, 2));
        assert!(dungeon.world().is_passable(landing));
    }

    #[test]
    fn town_exit_without_record_uses_cached_entrance() {
        let mut dungeon = manager();
        dungeon.switch_to(MapId::Town);
        assert_eq!(dungeon.exit_town(), Some(Position::new(9, 5)));
    }

    #[test]
    fn dungeon_round_trip_returns_to_entrance() {
        let mut dungeon = manager();
        let entrance = Position::new(14, 7);
        assert_eq!(dungeon.get_dungeon_at(entrance).unwrap().id, "crypt");

        let spawn = dungeon.enter_dungeon("crypt", entrance).unwrap();
        assert!(dungeon.is_in_dungeon());
        assert_eq!(spawn, dungeon.current_map().spawn_point());
        assert!(dungeon.get_dungeon_at(entrance).is_none());

        assert_eq!(dungeon.exit_dungeon(), Some(entrance));
        assert_eq!(dungeon.exit_dungeon(), None);
    }

    #[test]
    fn unknown_dungeon_is_an_error() {
        let mut dungeon = manager();
        let err = dungeon.enter_dungeon("nowhere", Position::ORIGIN).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownDungeon { .. }));
        assert_eq!(dungeon.current_map_id(), &MapId::World);
    }

    #[test]
    fn transition_moves_warrior_into_town_and_back() {
        let mut dungeon = manager();
        let mut warrior = warrior_at(Position::new(8, 5));

        let entered = dungeon.check_and_handle_transition(&mut warrior).unwrap();
        assert_eq!(entered.message(), "You enter the town!");
        assert_eq!(warrior.position(), dungeon.town().spawn_point());

        let gate = dungeon.town().first_marker(Marker::TownExit).unwrap();
        warrior.set_position(gate);
        let exited = dungeon.check_and_handle_transition(&mut warrior).unwrap();
        assert_eq!(exited, Transition::ExitedTown { to: Position::new(9, 5) });
        assert_eq!(warrior.position(), Position::new(9, 5));

        assert!(dungeon.check_and_handle_transition(&mut warrior).is_none());
    }

    #[test]
    fn entering_dungeon_names_it() {
        let mut dungeon = manager();
        let mut warrior = warrior_at(Position::new(14, 7));
        let transition = dungeon.check_and_handle_transition(&mut warrior).unwrap();
        assert_eq!(transition.message(), "You enter the Crypt of the Dullahan!");
    }

    #[test]
    fn library_grants_at_most_free_slots() {
        let mut dungeon = manager();
        dungeon.switch_to(MapId::Town);
        let library = dungeon.town().first_marker(Marker::Library).unwrap();

        let mut warrior = Warrior::new(&GameConfig::with_backpack_slots(3), library);
        warrior.add_item(Item::misc("Shamrock", 10)).unwrap();
        warrior.add_item(Item::misc("Pebble", 1)).unwrap();

        let visit = dungeon.visit_library(&mut warrior, 3, &Item::town_portal());
        assert_eq!(visit, Some(LibraryVisit::Granted(1)));
        assert_eq!(warrior.count_town_portals(), 1);
        assert_eq!(warrior.inventory().free_backpack_slots(), 0);

        let again = dungeon.visit_library(&mut warrior, 3, &Item::town_portal());
        assert_eq!(again, Some(LibraryVisit::AlreadyHolding(1)));
    }

    #[test]
    fn library_refuses_without_space_and_off_tile() {
        let mut dungeon = manager();
        dungeon.switch_to(MapId::Town);
        let library = dungeon.town().first_marker(Marker::Library).unwrap();

        let mut full = Warrior::new(&GameConfig::with_backpack_slots(1), library);
        full.add_item(Item::misc("Pebble", 1)).unwrap();
        assert_eq!(
            dungeon.visit_library(&mut full, 3, &Item::town_portal()),
            Some(LibraryVisit::NoSpace)
        );

        let mut elsewhere = warrior_at(dungeon.town().spawn_point());
        assert_eq!(
            dungeon.visit_library(&mut elsewhere, 3, &Item::town_portal()),
            None
        );
    }

    #[test]
    fn temple_heals_only_when_hurt() {
        let mut dungeon = manager();
        dungeon.switch_to(MapId::Town);
        let temple = dungeon.town().first_marker(Marker::Temple).unwrap();
        let mut warrior = warrior_at(temple);

        assert!(!dungeon.visit_temple(&mut warrior));
        warrior.take_damage(40);
        assert!(dungeon.visit_temple(&mut warrior));
        assert!(warrior.health().is_full());
    }

    #[test]
    fn shop_proximity_is_manhattan_one_in_town() {
        let mut dungeon = manager();
        let shop = dungeon.town().first_marker(Marker::Shop).unwrap();
        assert!(!dungeon.is_near_shop(shop));

        dungeon.switch_to(MapId::Town);
        assert!(dungeon.is_near_shop(shop));
        assert!(dungeon.is_near_shop(shop.offset(0, 1)));
        assert!(!dungeon.is_near_shop(shop.offset(1, 1)));
    }
}
