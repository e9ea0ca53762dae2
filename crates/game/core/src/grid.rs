//! Tile/pixel coordinate conversion, bounds and distance metrics.
//!
//! Positions are tile coordinates with `+y` pointing down the screen. Ranges
//! are measured as the Euclidean distance between tile centres in pixels, so
//! a diagonal neighbour is roughly 1.41 tiles away and falls outside a
//! one-tile melee range.

use std::fmt;

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring tile in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Top-left pixel coordinate of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct PixelPosition {
    pub x: i32,
    pub y: i32,
}

impl PixelPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

pub fn to_pixel(position: Position, tile_size: i32) -> PixelPosition {
    PixelPosition::new(position.x * tile_size, position.y * tile_size)
}

/// Floor division, so pixels left of or above the origin map to negative tiles.
pub fn to_grid(pixel: PixelPosition, tile_size: i32) -> Position {
    Position::new(
        pixel.x.div_euclid(tile_size),
        pixel.y.div_euclid(tile_size),
    )
}

/// Screen position of a tile once the camera offset is applied.
pub fn screen_offset(position: Position, camera: Position, tile_size: i32) -> PixelPosition {
    PixelPosition::new(
        (position.x - camera.x) * tile_size,
        (position.y - camera.y) * tile_size,
    )
}

/// Map extent in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapBounds {
    pub width: u32,
    pub height: u32,
}

impl MapBounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn clamp(&self, position: Position) -> Position {
        Position::new(
            position.x.clamp(0, (self.width as i32 - 1).max(0)),
            position.y.clamp(0, (self.height as i32 - 1).max(0)),
        )
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Cardinal movement direction. North is up the screen (`-y`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Direction that moves one step along `dx` (horizontal) if non-zero.
    pub fn horizontal(dx: i32) -> Option<Self> {
        match dx.signum() {
            1 => Some(Direction::East),
            -1 => Some(Direction::West),
            _ => None,
        }
    }

    /// Direction that moves one step along `dy` (vertical) if non-zero.
    pub fn vertical(dy: i32) -> Option<Self> {
        match dy.signum() {
            1 => Some(Direction::South),
            -1 => Some(Direction::North),
            _ => None,
        }
    }
}

/// Distance expressed in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRange(pub u32);

impl PixelRange {
    pub const fn tiles(tiles: u32, tile_size: i32) -> Self {
        Self(tiles * tile_size as u32)
    }

    pub const fn pixels(self) -> u32 {
        self.0
    }
}

/// Squared Euclidean distance between two tile centres, in pixels.
pub fn pixel_distance_squared(a: Position, b: Position, tile_size: i32) -> u64 {
    let dx = i64::from(a.x - b.x) * i64::from(tile_size);
    let dy = i64::from(a.y - b.y) * i64::from(tile_size);
    (dx * dx + dy * dy) as u64
}

/// True when `b` lies within `range` of `a`, compared without floating point.
pub fn within_range(a: Position, b: Position, range: PixelRange, tile_size: i32) -> bool {
    let range = u64::from(range.0);
    pixel_distance_squared(a, b, tile_size) <= range * range
}

pub fn manhattan_distance(a: Position, b: Position) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
