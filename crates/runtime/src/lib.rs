//! Session orchestration for the grid action RPG.
//!
//! `runtime` drives the pure rules from `game-core` one tick at a time and
//! owns everything with a lifetime longer than a single call: the current
//! game mode, the loaded maps, the entities living on the current map and the
//! event queue read by the presentation layer.
//!
//! Modules are organized by responsibility:
//! - [`state_manager`] holds the mode machine, toasts and portals
//! - [`dungeon`] owns the maps and performs map transitions
//! - [`entities`] tracks monsters, chests and ground items of the current map
//! - [`session`] wires them into a [`Session`] and runs turns
//! - [`camera`], [`events`] and [`input`] are the renderer and input seams
pub mod camera;
pub mod config;
pub mod dungeon;
pub mod entities;
pub mod error;
pub mod events;
pub mod input;
pub mod session;
pub mod state_manager;

pub use camera::{Camera, DrawKind, DrawRequest};
pub use config::SessionConfig;
pub use dungeon::{DungeonManager, LibraryVisit, MapId, Transition};
pub use entities::{Fallen, MapEntities, Pickup};
pub use error::{Result, RuntimeError, StateError};
pub use events::{EventQueue, GameEvent, VisualEffect};
pub use input::{Intent, ParseIntentError};
pub use session::{PlayerAction, Session};
pub use state_manager::{GameMode, GameStateManager, PortalAnchor, PortalResult, Toast};
