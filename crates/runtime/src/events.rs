//! Events produced for the presentation layer.
//!
//! The runtime never draws. Everything a renderer or HUD needs to react to
//! is pushed onto the [`EventQueue`] and drained once per frame.
use std::collections::VecDeque;
use std::time::Duration;

use game_core::{EntityId, Position, SkillId};

use crate::dungeon::MapId;
use crate::state_manager::GameMode;

/// Short-lived visual flourish anchored to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualEffect {
    /// Library glow while portals are handed out.
    PortalGift { at: Position },
    /// Temple glow after a full heal.
    Healing { at: Position },
    /// Impact flash on a landed attack.
    Hit { at: Position },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Toast(String),
    VisualEffect {
        effect: VisualEffect,
        duration: Duration,
    },
    EntityDamaged {
        entity: EntityId,
        amount: u32,
        remaining: u32,
    },
    EntityDied {
        entity: EntityId,
        position: Position,
    },
    MapChanged {
        map: MapId,
    },
    ModeChanged {
        from: GameMode,
        to: GameMode,
    },
    ItemPickedUp {
        item: String,
    },
    LevelUp {
        level: u32,
    },
    SkillLearned {
        skill: SkillId,
    },
}

/// FIFO of events awaiting the renderer.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    /// Takes every pending event in emission order.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
