use std::time::Duration;

/// Game configuration constants and tunable parameters.
///
/// Every field has a default, so a TOML file only needs to list the values it
/// overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Edge length of one tile in pixels. Ranges and draw offsets scale with it.
    pub tile_size: i32,
    /// Number of backpack slots in every inventory.
    pub backpack_slots: usize,

    pub warrior_max_health: u32,
    pub warrior_attack: u32,
    /// Turn starts required between two warrior attacks.
    pub warrior_attack_cooldown: u32,
    pub warrior_attack_range_tiles: u32,
    /// Maximum health gained per level.
    pub hp_per_level: u32,

    /// How long a toast stays visible, in milliseconds.
    pub message_duration_ms: u64,
    /// Lockout after any portal teleport, in milliseconds.
    pub portal_cooldown_ms: u64,
    /// Upper bound on town portals handed out by the library per visit.
    pub library_portal_grant: usize,
    pub portal_gift_effect_ms: u64,
    pub healing_effect_ms: u64,

    /// Visible area in tiles, used by the camera.
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const MAX_LEVEL: u32 = 5;
    /// Total experience required to reach level `index + 1`.
    pub const LEVEL_THRESHOLDS: [u32; Self::MAX_LEVEL as usize] = [0, 100, 250, 500, 1000];

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TILE_SIZE: i32 = 50;
    pub const DEFAULT_BACKPACK_SLOTS: usize = 13;
    pub const DEFAULT_WARRIOR_MAX_HEALTH: u32 = 100;
    pub const DEFAULT_WARRIOR_ATTACK: u32 = 15;
    pub const DEFAULT_WARRIOR_ATTACK_COOLDOWN: u32 = 1;
    pub const DEFAULT_WARRIOR_ATTACK_RANGE_TILES: u32 = 1;
    pub const DEFAULT_HP_PER_LEVEL: u32 = 20;
    pub const DEFAULT_MESSAGE_DURATION_MS: u64 = 3000;
    pub const DEFAULT_PORTAL_COOLDOWN_MS: u64 = 500;
    pub const DEFAULT_LIBRARY_PORTAL_GRANT: usize = 3;
    pub const DEFAULT_PORTAL_GIFT_EFFECT_MS: u64 = 1500;
    pub const DEFAULT_HEALING_EFFECT_MS: u64 = 1000;
    pub const DEFAULT_VIEWPORT_WIDTH: u32 = 16;
    pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 12;

    pub fn new() -> Self {
        Self {
            tile_size: Self::DEFAULT_TILE_SIZE,
            backpack_slots: Self::DEFAULT_BACKPACK_SLOTS,
            warrior_max_health: Self::DEFAULT_WARRIOR_MAX_HEALTH,
            warrior_attack: Self::DEFAULT_WARRIOR_ATTACK,
            warrior_attack_cooldown: Self::DEFAULT_WARRIOR_ATTACK_COOLDOWN,
            warrior_attack_range_tiles: Self::DEFAULT_WARRIOR_ATTACK_RANGE_TILES,
            hp_per_level: Self::DEFAULT_HP_PER_LEVEL,
            message_duration_ms: Self::DEFAULT_MESSAGE_DURATION_MS,
            portal_cooldown_ms: Self::DEFAULT_PORTAL_COOLDOWN_MS,
            library_portal_grant: Self::DEFAULT_LIBRARY_PORTAL_GRANT,
            portal_gift_effect_ms: Self::DEFAULT_PORTAL_GIFT_EFFECT_MS,
            healing_effect_ms: Self::DEFAULT_HEALING_EFFECT_MS,
            viewport_width: Self::DEFAULT_VIEWPORT_WIDTH,
            viewport_height: Self::DEFAULT_VIEWPORT_HEIGHT,
        }
    }

    pub fn with_backpack_slots(backpack_slots: usize) -> Self {
        Self {
            backpack_slots,
            ..Self::new()
        }
    }

    pub fn message_duration(&self) -> Duration {
        Duration::from_millis(self.message_duration_ms)
    }

    pub fn portal_cooldown(&self) -> Duration {
        Duration::from_millis(self.portal_cooldown_ms)
    }

    pub fn portal_gift_effect(&self) -> Duration {
        Duration::from_millis(self.portal_gift_effect_ms)
    }

    pub fn healing_effect(&self) -> Duration {
        Duration::from_millis(self.healing_effect_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canonical_values() {
        let config = GameConfig::default();
        assert_eq!(config.tile_size, 50);
        assert_eq!(config.backpack_slots, 13);
        assert_eq!(config.message_duration(), Duration::from_secs(3));
        assert_eq!(config.portal_cooldown(), Duration::from_millis(500));
        assert_eq!(config.library_portal_grant, 3);
    }

    #[test]
    fn level_thresholds_are_increasing() {
        let thresholds = GameConfig::LEVEL_THRESHOLDS;
        assert!(thresholds.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
