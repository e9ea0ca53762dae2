//! Attack resolution between two entities.

use crate::entity::{CooldownAttacker, Damageable, Positioned};
use crate::grid::within_range;

use super::damage::calculate_damage;

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The attack landed.
    Hit(AttackReport),
    /// Attacker is dead or its cooldown has not elapsed. Nothing changes.
    OnCooldown,
    /// Defender is further away than the attacker's range.
    OutOfRange,
    /// Defender was already dead.
    TargetDead,
}

impl AttackOutcome {
    pub fn report(self) -> Option<AttackReport> {
        match self {
            AttackOutcome::Hit(report) => Some(report),
            _ => None,
        }
    }
}

/// Details of a landed hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackReport {
    pub damage: u32,
    pub remaining_health: u32,
    /// True when this hit brought the defender to zero.
    pub killed: bool,
}

/// Resolve one attack at the attacker's own attack power.
///
/// On a hit the defender takes `calculate_damage(attack, defense)` and the
/// attacker's cooldown resets. Every other outcome leaves both sides untouched.
pub fn resolve_attack<A, D>(attacker: &mut A, defender: &mut D, tile_size: i32) -> AttackOutcome
where
    A: CooldownAttacker + ?Sized,
    D: Damageable + Positioned + ?Sized,
{
    let power = attacker.attack_power();
    resolve_strike(attacker, defender, tile_size, power)
}

/// Resolve one attack at an explicit attack power.
///
/// The defender's damage reduction scales `power` down before defense is
/// subtracted.
pub fn resolve_strike<A, D>(
    attacker: &mut A,
    defender: &mut D,
    tile_size: i32,
    power: u32,
) -> AttackOutcome
where
    A: CooldownAttacker + ?Sized,
    D: Damageable + Positioned + ?Sized,
{
    if !attacker.can_attack() {
        return AttackOutcome::OnCooldown;
    }
    if !defender.is_alive() {
        return AttackOutcome::TargetDead;
    }
    if !within_range(
        attacker.position(),
        defender.position(),
        attacker.attack_range(),
        tile_size,
    ) {
        return AttackOutcome::OutOfRange;
    }

    let reduction = defender.damage_reduction_percent().min(100);
    let power = power.saturating_mul(100 - reduction) / 100;
    let damage = calculate_damage(power, defender.defense());
    defender.take_damage(damage);
    attacker.cooldown_mut().reset();

    AttackOutcome::Hit(AttackReport {
        damage,
        remaining_health: defender.health().current(),
        killed: !defender.is_alive(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entity::{EntityId, Monster, MonsterKind, Warrior};
    use crate::grid::Position;
    use crate::item::Item;

    const TILE: i32 = 50;

    fn warrior_at(x: i32, y: i32) -> Warrior {
        Warrior::new(&GameConfig::default(), Position::new(x, y))
    }

    fn monster_at(kind: MonsterKind, x: i32, y: i32) -> Monster {
        Monster::new(EntityId(1), &kind.default_template(), Position::new(x, y), TILE)
    }

    #[test]
    fn warrior_hits_adjacent_monster() {
        let mut warrior = warrior_at(4, 4);
        let mut monster = monster_at(MonsterKind::Leprechaun, 5, 4);

        let outcome = resolve_attack(&mut warrior, &mut monster, TILE);
        assert_eq!(
            outcome,
            AttackOutcome::Hit(AttackReport {
                damage: 15,
                remaining_health: 25,
                killed: false
            })
        );
        assert!(!warrior.can_attack());
    }

    #[test]
    fn attack_on_cooldown_is_a_no_op() {
        let mut warrior = warrior_at(4, 4);
        let mut monster = monster_at(MonsterKind::Leprechaun, 5, 4);
        resolve_attack(&mut warrior, &mut monster, TILE);

        assert_eq!(resolve_attack(&mut warrior, &mut monster, TILE), AttackOutcome::OnCooldown);
        assert_eq!(monster.health().current(), 25);

        warrior.on_turn_start();
        assert!(resolve_attack(&mut warrior, &mut monster, TILE).report().is_some());
    }

    #[test]
    fn diagonal_target_is_out_of_melee_range() {
        let mut warrior = warrior_at(4, 4);
        let mut monster = monster_at(MonsterKind::Leprechaun, 5, 5);
        assert_eq!(resolve_attack(&mut warrior, &mut monster, TILE), AttackOutcome::OutOfRange);
        assert!(warrior.can_attack());
    }

    #[test]
    fn banshee_reaches_two_tiles() {
        let mut banshee = monster_at(MonsterKind::Banshee, 4, 2);
        let mut warrior = warrior_at(4, 4);
        let report = resolve_attack(&mut banshee, &mut warrior, TILE).report();
        assert_eq!(report.map(|r| r.damage), Some(12));
    }

    #[test]
    fn armor_is_floored_at_minimum_damage() {
        let mut leprechaun = monster_at(MonsterKind::Leprechaun, 4, 3);
        let mut warrior = warrior_at(4, 4);
        warrior.add_item(Item::armor("Dragon Plate", 30, 500)).unwrap();

        let report = resolve_attack(&mut leprechaun, &mut warrior, TILE).report();
        assert_eq!(report.map(|r| r.damage), Some(1));
        assert_eq!(warrior.health().current(), 99);
    }

    #[test]
    fn killing_blow_is_reported_and_corpse_ignored() {
        let mut warrior = warrior_at(4, 4);
        let mut monster = monster_at(MonsterKind::Leprechaun, 4, 5);
        monster.take_damage(30);

        let report = resolve_attack(&mut warrior, &mut monster, TILE).report();
        assert_eq!(report.map(|r| r.killed), Some(true));
        assert_eq!(monster.health().current(), 0);

        warrior.on_turn_start();
        assert_eq!(resolve_attack(&mut warrior, &mut monster, TILE), AttackOutcome::TargetDead);
    }

    #[test]
    fn both_sides_may_trade_hits_in_one_tick() {
        let mut warrior = warrior_at(4, 4);
        let mut monster = monster_at(MonsterKind::Pooka, 4, 5);
        assert!(resolve_attack(&mut warrior, &mut monster, TILE).report().is_some());
        assert!(resolve_attack(&mut monster, &mut warrior, TILE).report().is_some());
        assert_eq!(warrior.health().current(), 85);
        assert_eq!(monster.health().current(), 85);
    }
}
