//! Viewport tracking and draw requests for the renderer.
use game_core::{MapBounds, MonsterKind, PixelPosition, Position, screen_offset};

/// What to draw at a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Warrior,
    Monster(MonsterKind),
    Chest,
    GroundItem,
    /// Field-side portal or, with `returning`, the town-side return portal.
    Portal { returning: bool },
}

/// One sprite at a camera-relative pixel offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRequest {
    pub kind: DrawKind,
    pub grid: Position,
    pub screen: PixelPosition,
}

/// Follows a target while keeping the viewport inside the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    offset: Position,
    viewport: MapBounds,
    map: MapBounds,
}

impl Camera {
    pub fn new(viewport: MapBounds, map: MapBounds) -> Self {
        Self {
            offset: Position::ORIGIN,
            viewport,
            map,
        }
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    pub fn viewport(&self) -> MapBounds {
        self.viewport
    }

    /// Switches to a new map and resets the offset.
    pub fn set_map(&mut self, map: MapBounds) {
        self.map = map;
        self.offset = Position::ORIGIN;
    }

    /// Centres on `target`, clamped so the view never leaves the map. A map
    /// smaller than the viewport pins the offset to the origin.
    pub fn follow(&mut self, target: Position) {
        let axis = |target: i32, view: u32, map: u32| {
            let max = (map as i32 - view as i32).max(0);
            (target - view as i32 / 2).clamp(0, max)
        };
        self.offset = Position::new(
            axis(target.x, self.viewport.width, self.map.width),
            axis(target.y, self.viewport.height, self.map.height),
        );
    }

    pub fn is_visible(&self, position: Position) -> bool {
        let relative = Position::new(position.x - self.offset.x, position.y - self.offset.y);
        self.viewport.contains(relative)
    }

    /// Draw request for `grid`, or `None` when it is off screen.
    pub fn request(&self, kind: DrawKind, grid: Position, tile_size: i32) -> Option<DrawRequest> {
        self.is_visible(grid).then(|| DrawRequest {
            kind,
            grid,
            screen: screen_offset(grid, self.offset, tile_size),
        })
    }
}
