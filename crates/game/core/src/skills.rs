//! Warrior skills: a five-tier tree of active strikes and passive traits.
//!
//! Each tier unlocks one level after the previous (tier 1 at level 2) and
//! holds one active and one passive skill. Learning costs a skill point.
//! At most one learned active skill is selected at a time; using it starts
//! a real-time cooldown that [`SkillBook::tick`] counts down.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SkillKind {
    Active,
    Passive,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkillId {
    PowerStrike,
    BattleHardened,
    ShieldBash,
    IronSkin,
    Whirlwind,
    VampiricStrikes,
    Cleave,
    BerserkerRage,
    Earthsplitter,
    LastStand,
}

impl SkillId {
    pub const fn tier(self) -> u32 {
        match self {
            Self::PowerStrike | Self::BattleHardened => 1,
            Self::ShieldBash | Self::IronSkin => 2,
            Self::Whirlwind | Self::VampiricStrikes => 3,
            Self::Cleave | Self::BerserkerRage => 4,
            Self::Earthsplitter | Self::LastStand => 5,
        }
    }

    /// Character level at which the tier opens.
    pub const fn required_level(self) -> u32 {
        self.tier() + 1
    }

    pub const fn kind(self) -> SkillKind {
        match self {
            Self::PowerStrike
            | Self::ShieldBash
            | Self::Whirlwind
            | Self::Cleave
            | Self::Earthsplitter => SkillKind::Active,
            _ => SkillKind::Passive,
        }
    }

    pub fn is_active(self) -> bool {
        self.kind() == SkillKind::Active
    }

    /// Zero for passives.
    pub const fn cooldown(self) -> Duration {
        let seconds = match self {
            Self::PowerStrike => 6,
            Self::ShieldBash => 10,
            Self::Whirlwind => 15,
            Self::Cleave => 20,
            Self::Earthsplitter => 25,
            _ => 0,
        };
        Duration::from_secs(seconds)
    }

    /// Damage scaling of an active strike, in percent of effective attack.
    pub const fn damage_percent(self) -> u32 {
        match self {
            Self::PowerStrike => 150,
            Self::ShieldBash => 75,
            Self::Cleave => 200,
            Self::Earthsplitter => 250,
            _ => 100,
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PowerStrike => "Power Strike",
            Self::BattleHardened => "Battle Hardened",
            Self::ShieldBash => "Shield Bash",
            Self::IronSkin => "Iron Skin",
            Self::Whirlwind => "Whirlwind",
            Self::VampiricStrikes => "Vampiric Strikes",
            Self::Cleave => "Cleave",
            Self::BerserkerRage => "Berserker Rage",
            Self::Earthsplitter => "Earthsplitter",
            Self::LastStand => "Last Stand",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::PowerStrike => "Deliver a mighty blow that deals 150% weapon damage",
            Self::BattleHardened => "+10% critical hit chance when health exceeds 75%",
            Self::ShieldBash => "Bash the enemy for 75% damage",
            Self::IronSkin => "Reduce all incoming damage by 10%",
            Self::Whirlwind => "Spin attack for 100% damage",
            Self::VampiricStrikes => "Heal for 15% of damage dealt",
            Self::Cleave => "Powerful strike dealing 200% damage",
            Self::BerserkerRage => "+25% attack damage when below 50% health",
            Self::Earthsplitter => "Shockwave strike dealing 250% damage",
            Self::LastStand => "Below 20% health, recover 30% of max HP once per life",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error("{} is already learned", .skill.display_name())]
    AlreadyLearned { skill: SkillId },

    #[error("{} requires level {required}", .skill.display_name())]
    LevelTooLow { skill: SkillId, required: u32 },

    #[error("no skill points to spend")]
    NoSkillPoints,

    #[error("{} has not been learned", .skill.display_name())]
    NotLearned { skill: SkillId },

    #[error("{} is a passive skill", .skill.display_name())]
    NotActive { skill: SkillId },
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LevelTooLow { .. } | Self::NoSkillPoints => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyLearned { .. } => "SKILL_ALREADY_LEARNED",
            Self::LevelTooLow { .. } => "SKILL_LEVEL_TOO_LOW",
            Self::NoSkillPoints => "SKILL_NO_POINTS",
            Self::NotLearned { .. } => "SKILL_NOT_LEARNED",
            Self::NotActive { .. } => "SKILL_NOT_ACTIVE",
        }
    }
}

/// Learned skills, the selected active skill and its cooldown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillBook {
    learned: BTreeSet<SkillId>,
    active: Option<SkillId>,
    cooldown_remaining: Duration,
    last_stand_used: bool,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn knows(&self, skill: SkillId) -> bool {
        self.learned.contains(&skill)
    }

    pub fn learned(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.learned.iter().copied()
    }

    /// Adds `skill` when `level` opens its tier and a point is available.
    /// Spending the point is left to the caller.
    pub fn learn(&mut self, skill: SkillId, level: u32, points: u32) -> Result<(), SkillError> {
        if self.knows(skill) {
            return Err(SkillError::AlreadyLearned { skill });
        }
        if level < skill.required_level() {
            return Err(SkillError::LevelTooLow {
                skill,
                required: skill.required_level(),
            });
        }
        if points == 0 {
            return Err(SkillError::NoSkillPoints);
        }
        self.learned.insert(skill);
        Ok(())
    }

    pub fn active(&self) -> Option<SkillId> {
        self.active
    }

    /// Selects the active skill, or clears the selection with `None`.
    pub fn set_active(&mut self, skill: Option<SkillId>) -> Result<(), SkillError> {
        if let Some(skill) = skill {
            if !self.knows(skill) {
                return Err(SkillError::NotLearned { skill });
            }
            if !skill.is_active() {
                return Err(SkillError::NotActive { skill });
            }
        }
        self.active = skill;
        Ok(())
    }

    pub fn cooldown_remaining(&self) -> Duration {
        self.cooldown_remaining
    }

    /// The selected skill if it is off cooldown.
    pub fn ready_active(&self) -> Option<SkillId> {
        self.active.filter(|_| self.cooldown_remaining.is_zero())
    }

    pub fn start_cooldown(&mut self, skill: SkillId) {
        self.cooldown_remaining = skill.cooldown();
    }

    pub fn tick(&mut self, elapsed: Duration) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(elapsed);
    }

    pub fn last_stand_used(&self) -> bool {
        self.last_stand_used
    }

    pub fn mark_last_stand(&mut self) {
        self.last_stand_used = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_tier_has_one_active_and_one_passive() {
        for tier in 1..=5 {
            let kinds: Vec<_> = SkillId::iter()
                .filter(|skill| skill.tier() == tier)
                .map(SkillId::kind)
                .collect();
            assert_eq!(kinds.len(), 2, "tier {}", tier);
            assert!(kinds.contains(&SkillKind::Active));
            assert!(kinds.contains(&SkillKind::Passive));
        }
    }

    #[test]
    fn skill_names_parse_from_snake_case() {
        assert_eq!("power_strike".parse(), Ok(SkillId::PowerStrike));
        assert_eq!("Iron_Skin".parse(), Ok(SkillId::IronSkin));
        assert_eq!(SkillId::LastStand.to_string(), "last_stand");
    }

    #[test]
    fn learning_is_gated_by_level() {
        let mut book = SkillBook::new();
        assert_eq!(
            book.learn(SkillId::Whirlwind, 3, 2),
            Err(SkillError::LevelTooLow {
                skill: SkillId::Whirlwind,
                required: 4
            })
        );
        assert_eq!(book.learn(SkillId::PowerStrike, 2, 0), Err(SkillError::NoSkillPoints));
        assert!(book.learn(SkillId::PowerStrike, 2, 1).is_ok());
        assert_eq!(
            book.learn(SkillId::PowerStrike, 2, 1),
            Err(SkillError::AlreadyLearned {
                skill: SkillId::PowerStrike
            })
        );
    }

    #[test]
    fn only_learned_active_skills_can_be_selected() {
        let mut book = SkillBook::new();
        assert_eq!(
            book.set_active(Some(SkillId::PowerStrike)),
            Err(SkillError::NotLearned {
                skill: SkillId::PowerStrike
            })
        );
        book.learn(SkillId::BattleHardened, 2, 1).unwrap();
        assert_eq!(
            book.set_active(Some(SkillId::BattleHardened)),
            Err(SkillError::NotActive {
                skill: SkillId::BattleHardened
            })
        );
        book.learn(SkillId::PowerStrike, 2, 1).unwrap();
        book.set_active(Some(SkillId::PowerStrike)).unwrap();
        assert_eq!(book.active(), Some(SkillId::PowerStrike));
        book.set_active(None).unwrap();
        assert_eq!(book.active(), None);
    }

    #[test]
    fn cooldown_blocks_the_active_skill_until_it_runs_out() {
        let mut book = SkillBook::new();
        book.learn(SkillId::PowerStrike, 2, 1).unwrap();
        book.set_active(Some(SkillId::PowerStrike)).unwrap();
        assert_eq!(book.ready_active(), Some(SkillId::PowerStrike));

        book.start_cooldown(SkillId::PowerStrike);
        assert_eq!(book.ready_active(), None);
        book.tick(Duration::from_secs(5));
        assert_eq!(book.ready_active(), None);
        book.tick(Duration::from_secs(2));
        assert_eq!(book.cooldown_remaining(), Duration::ZERO);
        assert_eq!(book.ready_active(), Some(SkillId::PowerStrike));
    }

    #[test]
    fn skill_errors_carry_codes() {
        assert_eq!(SkillError::NoSkillPoints.error_code(), "SKILL_NO_POINTS");
        assert_eq!(
            SkillError::LevelTooLow {
                skill: SkillId::Cleave,
                required: 5
            }
            .to_string(),
            "Cleave requires level 5"
        );
    }
}
