//! Top-level game mode machine, message toasts and the town-portal lifecycle.
//!
//! Allowed mode transitions:
//!
//! ```text
//! Playing   -> Inventory | Shop (near the shop) | Skills | GameOver
//! Inventory -> the mode it was opened from      | GameOver
//! Shop      -> Inventory | Playing              | GameOver
//! Skills    -> Playing                          | GameOver
//! GameOver  -> GameOver (no-op), Playing only through reset()
//! ```
//!
//! Any other request fails with [`StateError::InvalidTransition`] and leaves
//! the mode untouched.
use std::time::Duration;

use game_core::{GameConfig, Position, Positioned, Warrior};

use crate::dungeon::{DungeonManager, MapId};
use crate::error::StateError;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum GameMode {
    Playing,
    Inventory,
    Shop,
    Skills,
    GameOver,
}

/// The message currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    text: String,
    remaining: Duration,
}

impl Toast {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }
}

/// A portal end: which map and which tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalAnchor {
    pub map: MapId,
    pub position: Position,
}

/// Success flag plus the message to show the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalResult {
    pub success: bool,
    pub message: String,
}

impl PortalResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn refused(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

const PORTAL_SETTLING: &str = "The portal magic has not settled yet!";

#[derive(Debug, Clone)]
pub struct GameStateManager {
    mode: GameMode,
    previous_mode: GameMode,
    message: Option<Toast>,
    message_duration: Duration,
    /// Portal left behind in the field.
    active_portal: Option<PortalAnchor>,
    /// Portal standing at the town spawn.
    return_portal: Option<PortalAnchor>,
    portal_return_location: Option<PortalAnchor>,
    portal_cooldown: Duration,
    portal_cooldown_duration: Duration,
}

impl GameStateManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            mode: GameMode::Playing,
            previous_mode: GameMode::Playing,
            message: None,
            message_duration: config.message_duration(),
            active_portal: None,
            return_portal: None,
            portal_return_location: None,
            portal_cooldown: Duration::ZERO,
            portal_cooldown_duration: config.portal_cooldown(),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn previous_mode(&self) -> GameMode {
        self.previous_mode
    }

    pub fn can_transition(&self, to: GameMode, near_shop: bool) -> bool {
        use GameMode::*;
        match (self.mode, to) {
            (_, GameOver) => true,
            (GameOver, _) => false,
            (Playing | Shop, Inventory) => true,
            (Inventory, target) => target == self.previous_mode,
            (Playing, Shop) => near_shop,
            (Shop, Playing) | (Playing, Skills) | (Skills, Playing) => true,
            _ => false,
        }
    }

    /// Requests a mode switch. Returns the mode that was left.
    pub fn transition_to(&mut self, to: GameMode, near_shop: bool) -> Result<GameMode, StateError> {
        if !self.can_transition(to, near_shop) {
            let err = StateError::InvalidTransition {
                from: self.mode,
                to,
            };
            tracing::warn!("{}", err);
            return Err(err);
        }
        if to == GameMode::GameOver {
            return Ok(self.game_over());
        }
        if to == GameMode::Inventory {
            self.previous_mode = self.mode;
        }
        Ok(self.force_mode(to))
    }

    pub fn open_inventory(&mut self) -> Result<GameMode, StateError> {
        self.transition_to(GameMode::Inventory, false)
    }

    /// Returns from the inventory to whichever mode opened it.
    pub fn close_inventory(&mut self) -> Result<GameMode, StateError> {
        if self.mode != GameMode::Inventory {
            return Err(StateError::InvalidTransition {
                from: self.mode,
                to: self.previous_mode,
            });
        }
        self.transition_to(self.previous_mode, false)
    }

    pub fn open_shop(&mut self, near_shop: bool) -> Result<GameMode, StateError> {
        self.transition_to(GameMode::Shop, near_shop)
    }

    pub fn close_shop(&mut self) -> Result<GameMode, StateError> {
        if self.mode != GameMode::Shop {
            return Err(StateError::InvalidTransition {
                from: self.mode,
                to: GameMode::Playing,
            });
        }
        self.transition_to(GameMode::Playing, false)
    }

    pub fn toggle_skills(&mut self) -> Result<GameMode, StateError> {
        let to = if self.mode == GameMode::Skills {
            GameMode::Playing
        } else {
            GameMode::Skills
        };
        self.transition_to(to, false)
    }

    /// Enters game over from any mode and closes every portal.
    pub fn game_over(&mut self) -> GameMode {
        self.close_portals();
        self.force_mode(GameMode::GameOver)
    }

    fn force_mode(&mut self, mode: GameMode) -> GameMode {
        let from = std::mem::replace(&mut self.mode, mode);
        if from != mode {
            tracing::info!("Game mode {} -> {}", from, mode);
        }
        from
    }

    /// Replaces any current toast and restarts its countdown.
    pub fn show_message(&mut self, text: impl Into<String>) {
        self.message = Some(Toast {
            text: text.into(),
            remaining: self.message_duration,
        });
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(Toast::text)
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.message.as_ref()
    }

    /// Advances the toast and portal timers by real elapsed time.
    pub fn update(&mut self, elapsed: Duration) {
        if let Some(toast) = &mut self.message {
            toast.remaining = toast.remaining.saturating_sub(elapsed);
            if toast.remaining.is_zero() {
                self.message = None;
            }
        }
        self.portal_cooldown = self.portal_cooldown.saturating_sub(elapsed);
    }

    pub fn portal_cooldown(&self) -> Duration {
        self.portal_cooldown
    }

    pub fn portal_ready(&self) -> bool {
        self.portal_cooldown.is_zero()
    }

    pub fn active_portal(&self) -> Option<&PortalAnchor> {
        self.active_portal.as_ref()
    }

    pub fn return_portal(&self) -> Option<&PortalAnchor> {
        self.return_portal.as_ref()
    }

    pub fn portal_return_location(&self) -> Option<&PortalAnchor> {
        self.portal_return_location.as_ref()
    }

    pub fn close_portals(&mut self) {
        self.active_portal = None;
        self.return_portal = None;
        self.portal_return_location = None;
    }

    /// Consumes a town portal and sends the warrior to town, leaving a portal
    /// behind and a return portal at the town spawn.
    pub fn use_town_portal(
        &mut self,
        warrior: &mut Warrior,
        dungeon: &mut DungeonManager,
    ) -> PortalResult {
        let held = warrior.count_town_portals();
        if held == 0 {
            return PortalResult::refused("No town portals in inventory!");
        }
        if !self.portal_ready() {
            return PortalResult::refused(PORTAL_SETTLING);
        }
        if warrior.consume_town_portal().is_none() {
            return PortalResult::refused("No town portals in inventory!");
        }

        self.close_portals();
        let origin = PortalAnchor {
            map: dungeon.current_map_id().clone(),
            position: warrior.position(),
        };
        self.portal_return_location = Some(origin.clone());
        self.active_portal = Some(origin);

        let spawn = dungeon.town().spawn_point();
        let landing = dungeon.town().landing_beside(spawn);
        dungeon.switch_to(MapId::Town);
        self.return_portal = Some(PortalAnchor {
            map: MapId::Town,
            position: spawn,
        });
        warrior.set_position(landing);

        self.force_mode(GameMode::Playing);
        self.portal_cooldown = self.portal_cooldown_duration;
        tracing::info!("Town portal used, {} left", held - 1);
        PortalResult::ok("You enter the portal and arrive in town!")
    }

    /// Sends the warrior back to where the town portal was opened.
    pub fn use_return_portal(
        &mut self,
        warrior: &mut Warrior,
        dungeon: &mut DungeonManager,
    ) -> PortalResult {
        let target = match (&self.return_portal, &self.portal_return_location) {
            (Some(_), Some(target)) => target.clone(),
            _ => return PortalResult::refused("No return portal available!"),
        };
        if !self.portal_ready() {
            return PortalResult::refused(PORTAL_SETTLING);
        }
        if dungeon.switch_to(target.map.clone()).is_none() {
            return PortalResult::refused("The portal flickers and fades.");
        }

        warrior.set_position(target.position);
        self.force_mode(GameMode::Playing);
        self.portal_cooldown = self.portal_cooldown_duration;
        self.close_portals();
        tracing::info!("Returned through portal to {} at {}", target.map, target.position);
        PortalResult::ok("You return through the portal!")
    }

    /// The warrior stands on the return portal and it is ready to use.
    pub fn check_return_portal_collision(&self, warrior: &Warrior, map: &MapId) -> bool {
        self.portal_ready()
            && self
                .return_portal
                .as_ref()
                .is_some_and(|portal| &portal.map == map && portal.position == warrior.position())
    }

    /// Restart: back to Playing with no toast, portals or cooldown.
    pub fn reset(&mut self) {
        self.force_mode(GameMode::Playing);
        self.previous_mode = GameMode::Playing;
        self.message = None;
        self.portal_cooldown = Duration::ZERO;
        self.close_portals();
    }
}
