use std::fmt;

use crate::ai::{self, MonsterAction, MonsterBrain, MonsterContext};
use crate::grid::{Direction, PixelRange, Position};

use super::{AttackCooldown, CooldownAttacker, Damageable, EntityId, Health, Positioned};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MonsterKind {
    Banshee,
    CatSi,
    Changeling,
    Clurichaun,
    Dullahan,
    FearGorta,
    Leprechaun,
    Merrow,
    Pooka,
    Selkie,
}

impl MonsterKind {
    /// Name shown in messages ("cat si", "fear gorta").
    pub fn display_name(self) -> String {
        self.as_ref().replace('_', " ")
    }

    /// Built-in stat block used when content does not override it.
    pub fn default_template(self) -> MonsterTemplate {
        let (max_health, attack, chase_range_tiles, attack_range_tiles, xp_value) = match self {
            MonsterKind::Banshee => (60, 12, 6, 2, 30),
            MonsterKind::CatSi => (65, 16, 5, 1, 35),
            MonsterKind::Changeling => (50, 14, 4, 1, 25),
            MonsterKind::Clurichaun => (45, 9, 3, 1, 20),
            MonsterKind::Dullahan => (120, 20, 8, 1, 80),
            MonsterKind::FearGorta => (55, 13, 6, 1, 30),
            MonsterKind::Leprechaun => (40, 8, 4, 1, 15),
            MonsterKind::Merrow => (75, 11, 5, 1, 40),
            MonsterKind::Pooka => (100, 15, 7, 1, 60),
            MonsterKind::Selkie => (70, 10, 5, 1, 35),
        };
        MonsterTemplate {
            kind: self,
            max_health,
            attack,
            defense: 0,
            attack_cooldown: MonsterTemplate::DEFAULT_ATTACK_COOLDOWN,
            chase_range_tiles,
            attack_range_tiles,
            xp_value,
            brain: BrainKind::Chaser,
        }
    }
}

/// Which decision strategy a monster runs each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrainKind {
    /// Closes in when the target is within chase range.
    #[default]
    Chaser,
    /// Attacks in range but never leaves its post.
    Stationary,
}

/// Stat block a monster is spawned from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub kind: MonsterKind,
    pub max_health: u32,
    pub attack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: u32,
    #[cfg_attr(
        feature = "serde",
        serde(default = "MonsterTemplate::default_attack_cooldown")
    )]
    pub attack_cooldown: u32,
    pub chase_range_tiles: u32,
    pub attack_range_tiles: u32,
    pub xp_value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub brain: BrainKind,
}

impl MonsterTemplate {
    pub const DEFAULT_ATTACK_COOLDOWN: u32 = 1;

    #[cfg(feature = "serde")]
    fn default_attack_cooldown() -> u32 {
        Self::DEFAULT_ATTACK_COOLDOWN
    }
}

/// A hostile, map-scoped entity.
pub struct Monster {
    id: EntityId,
    kind: MonsterKind,
    position: Position,
    facing: Direction,
    health: Health,
    attack: u32,
    defense: u32,
    cooldown: AttackCooldown,
    chase_range: PixelRange,
    attack_range: PixelRange,
    xp_value: u32,
    brain: Box<MonsterBrain>,
}

impl Monster {
    pub fn new(id: EntityId, template: &MonsterTemplate, position: Position, tile_size: i32) -> Self {
        Self {
            id,
            kind: template.kind,
            position,
            facing: Direction::South,
            health: Health::full(template.max_health),
            attack: template.attack,
            defense: template.defense,
            cooldown: AttackCooldown::new(template.attack_cooldown),
            chase_range: PixelRange::tiles(template.chase_range_tiles, tile_size),
            attack_range: PixelRange::tiles(template.attack_range_tiles, tile_size),
            xp_value: template.xp_value,
            brain: ai::brain_for(template.brain),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> MonsterKind {
        self.kind
    }

    pub fn chase_range(&self) -> PixelRange {
        self.chase_range
    }

    pub fn xp_value(&self) -> u32 {
        self.xp_value
    }

    /// Runs this monster's brain and returns the chosen action.
    pub fn decide(&self, ctx: &mut MonsterContext) -> MonsterAction {
        if !self.is_alive() {
            return MonsterAction::Wait;
        }
        self.brain.tick(ctx);
        ctx.decision.unwrap_or(MonsterAction::Wait)
    }
}

impl fmt::Debug for Monster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monster")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("position", &self.position)
            .field("health", &self.health)
            .field("cooldown", &self.cooldown)
            .finish_non_exhaustive()
    }
}

impl Positioned for Monster {
    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn facing(&self) -> Direction {
        self.facing
    }

    fn face(&mut self, direction: Direction) {
        self.facing = direction;
    }
}

impl Damageable for Monster {
    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn defense(&self) -> u32 {
        self.defense
    }
}

impl CooldownAttacker for Monster {
    fn cooldown(&self) -> &AttackCooldown {
        &self.cooldown
    }

    fn cooldown_mut(&mut self) -> &mut AttackCooldown {
        &mut self.cooldown
    }

    fn attack_power(&self) -> u32 {
        self.attack
    }

    fn attack_range(&self) -> PixelRange {
        self.attack_range
    }
}
