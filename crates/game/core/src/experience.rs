//! Experience points and character levels.

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Experience {
    level: u32,
    xp: u32,
    skill_points: u32,
}

impl Experience {
    pub const fn new() -> Self {
        Self {
            level: 1,
            xp: 0,
            skill_points: 0,
        }
    }

    pub const fn level(&self) -> u32 {
        self.level
    }

    pub const fn xp(&self) -> u32 {
        self.xp
    }

    /// Unspent points. One is awarded per level gained.
    pub const fn skill_points(&self) -> u32 {
        self.skill_points
    }

    /// Takes one point. False when none are left.
    pub fn spend_skill_point(&mut self) -> bool {
        if self.skill_points == 0 {
            return false;
        }
        self.skill_points -= 1;
        true
    }

    pub const fn is_max_level(&self) -> bool {
        self.level >= GameConfig::MAX_LEVEL
    }

    /// Total XP needed for the next level, or `None` at the level cap.
    pub fn next_threshold(&self) -> Option<u32> {
        GameConfig::LEVEL_THRESHOLDS.get(self.level as usize).copied()
    }

    /// Adds experience and returns how many levels were gained.
    ///
    /// Several levels may be gained at once. XP stops accruing at the cap.
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        if self.is_max_level() {
            return 0;
        }
        self.xp = self.xp.saturating_add(amount);

        let mut gained = 0;
        while let Some(threshold) = self.next_threshold() {
            if self.xp < threshold {
                break;
            }
            self.level += 1;
            self.skill_points += 1;
            gained += 1;
        }
        gained
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}
