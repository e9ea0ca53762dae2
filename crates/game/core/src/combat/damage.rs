//! Damage calculation and application.

/// Every landed hit deals at least this much damage.
pub const MIN_DAMAGE: u32 = 1;

/// Calculate damage from an attack.
///
/// ```text
/// damage = max(attack - defense, MIN_DAMAGE)
/// ```
pub fn calculate_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(MIN_DAMAGE)
}

/// Apply damage to current HP, clamped to 0.
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
