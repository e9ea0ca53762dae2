//! Entity model shared by the warrior and monsters.
//!
//! Shared behaviour is split into capability traits:
//! - [`Positioned`]: grid position and facing
//! - [`Damageable`]: health meter with a terminal dead state
//! - [`CooldownAttacker`]: turn-counted attack cooldown and attack stats
//!
//! [`Movable`] is blanket-implemented for anything positioned and damageable.

mod monster;
mod warrior;

use std::fmt;

pub use monster::{BrainKind, Monster, MonsterKind, MonsterTemplate};
pub use warrior::{Strike, Warrior};

use crate::combat::apply_damage;
use crate::grid::{Direction, MapBounds, PixelRange, Position};

/// Unique identifier for any entity tracked in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the warrior.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Integer health meter. Never exceeds `maximum`; zero is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    current: u32,
    maximum: u32,
}

impl Health {
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// Subtracts `amount`, floored at zero. Returns the health actually lost.
    pub fn damage(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = apply_damage(self.current, amount);
        before - self.current
    }

    /// Restores up to `amount`. A depleted meter stays depleted.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.is_depleted() {
            return 0;
        }
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current - before
    }

    pub fn restore(&mut self) -> u32 {
        self.heal(self.maximum)
    }

    /// Changes the maximum, clamping current health to it.
    pub fn set_maximum(&mut self, maximum: u32) {
        self.maximum = maximum;
        self.current = self.current.min(maximum);
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

/// Turn-counted attack gate.
///
/// The counter starts at the threshold so a fresh entity may attack on its
/// first turn. Each turn start increments it; attacking resets it to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackCooldown {
    threshold: u32,
    turns_since_attack: u32,
}

impl AttackCooldown {
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold,
            turns_since_attack: threshold,
        }
    }

    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    pub const fn turns_since_attack(&self) -> u32 {
        self.turns_since_attack
    }

    pub fn tick(&mut self) {
        self.turns_since_attack = self.turns_since_attack.saturating_add(1);
    }

    pub const fn is_ready(&self) -> bool {
        self.turns_since_attack >= self.threshold
    }

    pub fn reset(&mut self) {
        self.turns_since_attack = 0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeState {
    Alive,
    Dead,
}

/// Result of a single-step movement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(Position),
    /// Destination rejected by the collision check.
    Blocked,
    OutOfBounds,
    /// Dead entities never move.
    Dead,
}

impl MoveOutcome {
    pub fn moved(self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }
}

pub trait Positioned {
    fn position(&self) -> Position;
    fn set_position(&mut self, position: Position);
    fn facing(&self) -> Direction;
    fn face(&mut self, direction: Direction);
}

pub trait Damageable {
    fn health(&self) -> &Health;
    fn health_mut(&mut self) -> &mut Health;

    /// Flat damage reduction applied by the combat resolver.
    fn defense(&self) -> u32 {
        0
    }

    /// Percentage shaved off incoming attack power before defense.
    fn damage_reduction_percent(&self) -> u32 {
        0
    }

    fn is_alive(&self) -> bool {
        !self.health().is_depleted()
    }

    fn life_state(&self) -> LifeState {
        if self.is_alive() {
            LifeState::Alive
        } else {
            LifeState::Dead
        }
    }

    /// Applies damage; a no-op returning 0 once dead.
    fn take_damage(&mut self, amount: u32) -> u32 {
        self.health_mut().damage(amount)
    }

    fn heal(&mut self, amount: u32) -> u32 {
        self.health_mut().heal(amount)
    }
}

pub trait CooldownAttacker: Positioned + Damageable {
    fn cooldown(&self) -> &AttackCooldown;
    fn cooldown_mut(&mut self) -> &mut AttackCooldown;
    fn attack_power(&self) -> u32;
    fn attack_range(&self) -> PixelRange;

    fn on_turn_start(&mut self) {
        self.cooldown_mut().tick();
    }

    fn can_attack(&self) -> bool {
        self.is_alive() && self.cooldown().is_ready()
    }
}

pub trait Movable: Positioned + Damageable {
    /// Moves one tile in `direction` unless the destination is out of
    /// `bounds` or `is_blocked` rejects it. Facing updates either way.
    fn move_by(
        &mut self,
        direction: Direction,
        bounds: MapBounds,
        is_blocked: impl Fn(Position) -> bool,
    ) -> MoveOutcome {
        if !self.is_alive() {
            return MoveOutcome::Dead;
        }
        self.face(direction);
        let destination = self.position().step(direction);
        if !bounds.contains(destination) {
            return MoveOutcome::OutOfBounds;
        }
        if is_blocked(destination) {
            return MoveOutcome::Blocked;
        }
        self.set_position(destination);
        MoveOutcome::Moved(destination)
    }
}

impl<T: Positioned + Damageable + ?Sized> Movable for T {}
