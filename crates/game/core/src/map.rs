//! Tile maps built from character-grid definitions.
//!
//! A [`MapDefinition`] is the data-file shape: rows of glyphs plus a legend.
//! [`GameMap::from_definition`] validates it once and indexes every marker so
//! transition checks are plain lookups afterwards.

use std::collections::HashMap;

use crate::entity::MonsterKind;
use crate::error::{ErrorSeverity, GameError};
use crate::grid::{Direction, MapBounds, Position};

/// Special meaning attached to a legend glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    SpawnPoint,
    TownEntrance,
    TownExit,
    DungeonExit,
    Library,
    Shop,
    Temple,
    MonsterSpawn(MonsterKind),
    ChestSpawn,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegendEntry {
    pub name: String,
    pub passable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub marker: Option<Marker>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterSpawn {
    pub kind: MonsterKind,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonEntrance {
    pub id: String,
    pub name: String,
    pub position: Position,
}

/// Serializable map layout.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDefinition {
    pub name: String,
    pub rows: Vec<String>,
    pub legend: Vec<(char, LegendEntry)>,
    /// Overrides any `SpawnPoint` glyph.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spawn_point: Option<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub monsters: Vec<MonsterSpawn>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub chests: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dungeons: Vec<DungeonEntrance>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map {map} has no rows")]
    Empty { map: String },

    #[error("map {map} row {row} has width {found}, expected {expected}")]
    RaggedRow {
        map: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("map {map} uses glyph {glyph:?} at {position} with no legend entry")]
    UnknownGlyph {
        map: String,
        glyph: char,
        position: Position,
    },

    #[error("map {map} has no spawn point")]
    MissingSpawnPoint { map: String },

    #[error("map {map}: {what} at {position} lies outside the map")]
    OutOfBounds {
        map: String,
        what: &'static str,
        position: Position,
    },

    #[error("map {map}: spawn point {position} is not passable")]
    SpawnImpassable { map: String, position: Position },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "MAP_EMPTY",
            Self::RaggedRow { .. } => "MAP_RAGGED_ROW",
            Self::UnknownGlyph { .. } => "MAP_UNKNOWN_GLYPH",
            Self::MissingSpawnPoint { .. } => "MAP_MISSING_SPAWN",
            Self::OutOfBounds { .. } => "MAP_OUT_OF_BOUNDS",
            Self::SpawnImpassable { .. } => "MAP_SPAWN_IMPASSABLE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub glyph: char,
    pub passable: bool,
    pub marker: Option<Marker>,
}

/// Validated, indexed map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameMap {
    name: String,
    bounds: MapBounds,
    tiles: Vec<Tile>,
    spawn_point: Position,
    markers: HashMap<Marker, Vec<Position>>,
    monster_spawns: Vec<MonsterSpawn>,
    chest_spawns: Vec<Position>,
    dungeons: Vec<DungeonEntrance>,
}

impl GameMap {
    pub fn from_definition(definition: MapDefinition) -> Result<Self, MapError> {
        let map = definition.name.clone();
        let width = definition
            .rows
            .first()
            .map(|row| row.chars().count())
            .ok_or_else(|| MapError::Empty { map: map.clone() })?;
        let height = definition.rows.len();
        let bounds = MapBounds::new(width as u32, height as u32);
        let legend: HashMap<char, LegendEntry> = definition.legend.into_iter().collect();

        let mut tiles = Vec::with_capacity(bounds.area());
        let mut markers: HashMap<Marker, Vec<Position>> = HashMap::new();
        let mut monster_spawns = Vec::new();
        let mut chest_spawns = Vec::new();

        for (y, row) in definition.rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    map,
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                let entry = legend.get(&glyph).ok_or_else(|| MapError::UnknownGlyph {
                    map: map.clone(),
                    glyph,
                    position,
                })?;
                match entry.marker {
                    Some(Marker::MonsterSpawn(kind)) => {
                        monster_spawns.push(MonsterSpawn { kind, position })
                    }
                    Some(Marker::ChestSpawn) => chest_spawns.push(position),
                    Some(marker) => markers.entry(marker).or_default().push(position),
                    None => {}
                }
                tiles.push(Tile {
                    glyph,
                    passable: entry.passable,
                    marker: entry.marker,
                });
            }
        }

        monster_spawns.extend(definition.monsters);
        chest_spawns.extend(definition.chests);

        let spawn_point = definition
            .spawn_point
            .or_else(|| {
                markers
                    .get(&Marker::SpawnPoint)
                    .and_then(|positions| positions.first().copied())
            })
            .ok_or_else(|| MapError::MissingSpawnPoint { map: map.clone() })?;

        let game_map = Self {
            name: map,
            bounds,
            tiles,
            spawn_point,
            markers,
            monster_spawns,
            chest_spawns,
            dungeons: definition.dungeons,
        };
        game_map.validate()?;
        Ok(game_map)
    }

    fn validate(&self) -> Result<(), MapError> {
        let outside = |what: &'static str, position: Position| MapError::OutOfBounds {
            map: self.name.clone(),
            what,
            position,
        };

        if !self.bounds.contains(self.spawn_point) {
            return Err(outside("spawn point", self.spawn_point));
        }
        if !self.is_passable(self.spawn_point) {
            return Err(MapError::SpawnImpassable {
                map: self.name.clone(),
                position: self.spawn_point,
            });
        }
        if let Some(spawn) = self
            .monster_spawns
            .iter()
            .find(|spawn| !self.bounds.contains(spawn.position))
        {
            return Err(outside("monster spawn", spawn.position));
        }
        if let Some(chest) = self
            .chest_spawns
            .iter()
            .find(|chest| !self.bounds.contains(**chest))
        {
            return Err(outside("chest", *chest));
        }
        if let Some(dungeon) = self
            .dungeons
            .iter()
            .find(|dungeon| !self.bounds.contains(dungeon.position))
        {
            return Err(outside("dungeon entrance", dungeon.position));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    pub fn spawn_point(&self) -> Position {
        self.spawn_point
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        if !self.bounds.contains(position) {
            return None;
        }
        let index = position.y as usize * self.bounds.width as usize + position.x as usize;
        self.tiles.get(index)
    }

    /// Out-of-bounds positions are never passable.
    pub fn is_passable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(|tile| tile.passable)
    }

    pub fn marker_positions(&self, marker: Marker) -> &[Position] {
        self.markers.get(&marker).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first_marker(&self, marker: Marker) -> Option<Position> {
        self.marker_positions(marker).first().copied()
    }

    pub fn has_marker_at(&self, marker: Marker, position: Position) -> bool {
        self.marker_positions(marker).contains(&position)
    }

    pub fn monster_spawns(&self) -> &[MonsterSpawn] {
        &self.monster_spawns
    }

    pub fn chest_spawns(&self) -> &[Position] {
        &self.chest_spawns
    }

    pub fn dungeons(&self) -> &[DungeonEntrance] {
        &self.dungeons
    }

    pub fn dungeon_at(&self, position: Position) -> Option<&DungeonEntrance> {
        self.dungeons
            .iter()
            .find(|dungeon| dungeon.position == position)
    }

    /// Tile to put an arriving entity next to `anchor`: east when passable,
    /// else the first passable neighbour, else `anchor` itself.
    pub fn landing_beside(&self, anchor: Position) -> Position {
        std::iter::once(Direction::East)
            .chain(Direction::ALL)
            .map(|direction| anchor.step(direction))
            .find(|&position| self.is_passable(position))
            .unwrap_or(anchor)
    }
}
