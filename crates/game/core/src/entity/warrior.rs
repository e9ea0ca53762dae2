use std::time::Duration;

use rand::Rng;

use crate::config::GameConfig;
use crate::experience::Experience;
use crate::grid::{Direction, PixelRange, Position};
use crate::inventory::{Inventory, InventoryError, Placement};
use crate::item::{EquipSlot, Item};
use crate::skills::{SkillBook, SkillError, SkillId};

use super::{AttackCooldown, CooldownAttacker, Damageable, Health, Positioned};

/// The player character.
///
/// Attack and maximum health are derived from base stats, level and the
/// equipped items; defense comes entirely from equipment. Learned passive
/// skills modify attack, incoming damage and healing on top of that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warrior {
    position: Position,
    facing: Direction,
    health: Health,
    base_max_health: u32,
    base_attack: u32,
    hp_per_level: u32,
    cooldown: AttackCooldown,
    attack_range: PixelRange,
    inventory: Inventory,
    experience: Experience,
    skills: SkillBook,
    pub gold: u32,
}

/// A warrior attack chosen before it is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strike {
    pub power: u32,
    /// Active skill driving the strike, if it was ready.
    pub skill: Option<SkillId>,
    pub critical: bool,
}

impl Warrior {
    pub fn new(config: &GameConfig, position: Position) -> Self {
        Self {
            position,
            facing: Direction::South,
            health: Health::full(config.warrior_max_health),
            base_max_health: config.warrior_max_health,
            base_attack: config.warrior_attack,
            hp_per_level: config.hp_per_level,
            cooldown: AttackCooldown::new(config.warrior_attack_cooldown),
            attack_range: PixelRange::tiles(config.warrior_attack_range_tiles, config.tile_size),
            inventory: Inventory::new(config.backpack_slots),
            experience: Experience::new(),
            skills: SkillBook::new(),
            gold: 0,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn experience(&self) -> &Experience {
        &self.experience
    }

    pub fn skills(&self) -> &SkillBook {
        &self.skills
    }

    /// Base and equipment attack, raised by a quarter under Berserker Rage
    /// while below half health.
    pub fn effective_attack(&self) -> u32 {
        let attack = self.base_attack + self.inventory.total_attack_bonus();
        if self.skills.knows(SkillId::BerserkerRage)
            && self.health.current() * 2 < self.health.maximum()
        {
            attack * 5 / 4
        } else {
            attack
        }
    }

    /// Critical hit chance in percent.
    pub fn crit_chance_percent(&self) -> u32 {
        if self.skills.knows(SkillId::BattleHardened)
            && self.health.current() * 4 > self.health.maximum() * 3
        {
            10
        } else {
            0
        }
    }

    /// Learns `skill`, spending one skill point.
    pub fn learn_skill(&mut self, skill: SkillId) -> Result<(), SkillError> {
        self.skills.learn(
            skill,
            self.experience.level(),
            self.experience.skill_points(),
        )?;
        self.experience.spend_skill_point();
        Ok(())
    }

    pub fn select_skill(&mut self, skill: Option<SkillId>) -> Result<(), SkillError> {
        self.skills.set_active(skill)
    }

    pub fn tick_skills(&mut self, elapsed: Duration) {
        self.skills.tick(elapsed);
    }

    /// Picks the power of the next attack. The selected active skill is used
    /// when `use_skill` is set and it is off cooldown; otherwise this is a
    /// basic attack. The crit roll only draws from `rng` when the chance is
    /// non-zero.
    pub fn prepare_strike(&self, use_skill: bool, rng: &mut impl Rng) -> Strike {
        let skill = if use_skill { self.skills.ready_active() } else { None };
        let percent = skill.map_or(100, SkillId::damage_percent);
        let mut power = self.effective_attack() * percent / 100;

        let chance = self.crit_chance_percent();
        let critical = chance > 0 && rng.gen_range(0..100) < chance;
        if critical {
            power = power * 3 / 2;
        }
        Strike {
            power,
            skill,
            critical,
        }
    }

    /// Bookkeeping once `strike` has landed for `damage`: the skill cooldown
    /// starts and Vampiric Strikes heals. Returns the health restored.
    pub fn land_strike(&mut self, strike: &Strike, damage: u32) -> u32 {
        if let Some(skill) = strike.skill {
            self.skills.start_cooldown(skill);
        }
        if self.skills.knows(SkillId::VampiricStrikes) {
            self.health.heal(damage * 15 / 100)
        } else {
            0
        }
    }

    pub fn max_health(&self) -> u32 {
        let level_bonus = (self.experience.level() - 1) * self.hp_per_level;
        self.base_max_health + level_bonus + self.inventory.total_health_bonus()
    }

    fn refresh_max_health(&mut self) {
        let maximum = self.max_health();
        self.health.set_maximum(maximum);
    }

    /// Stores an item, re-deriving max health if it was auto-equipped.
    pub fn add_item(&mut self, item: Item) -> Result<Placement, InventoryError> {
        let placement = self.inventory.add_item(item)?;
        self.refresh_max_health();
        Ok(placement)
    }

    pub fn equip_from_backpack(&mut self, index: usize) -> Result<EquipSlot, InventoryError> {
        let slot = self.inventory.equip_from_backpack(index)?;
        self.refresh_max_health();
        Ok(slot)
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Result<usize, InventoryError> {
        let index = self.inventory.unequip(slot)?;
        self.refresh_max_health();
        Ok(index)
    }

    pub fn take_from_backpack(&mut self, index: usize) -> Result<Item, InventoryError> {
        self.inventory.take_from_backpack(index)
    }

    pub fn count_town_portals(&self) -> usize {
        self.inventory.count_town_portals()
    }

    pub fn consume_town_portal(&mut self) -> Option<Item> {
        self.inventory.consume_town_portal()
    }

    /// Awards experience. Each level gained raises max health and fully heals.
    pub fn gain_experience(&mut self, xp: u32) -> u32 {
        let gained = self.experience.add_xp(xp);
        if gained > 0 {
            self.refresh_max_health();
            self.health.restore();
        }
        gained
    }
}

impl Positioned for Warrior {
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

impl Damageable for Warrior {
    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn defense(&self) -> u32 {
        self.inventory.total_defense_bonus()
    }

    fn damage_reduction_percent(&self) -> u32 {
        if self.skills.knows(SkillId::IronSkin) { 10 } else { 0 }
    }

    /// Last Stand fires once per life when a hit leaves the warrior alive at
    /// or below a fifth of max health, restoring 30% of it.
    fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = self.health.damage(amount);
        let health = self.health;
        if self.skills.knows(SkillId::LastStand)
            && !self.skills.last_stand_used()
            && !health.is_depleted()
            && health.current() * 5 <= health.maximum()
        {
            self.health.heal(health.maximum() * 3 / 10);
            self.skills.mark_last_stand();
        }
        lost
    }
}

impl CooldownAttacker for Warrior {
    fn cooldown(&self) -> &AttackCooldown {
        &self.cooldown
    }

    fn cooldown_mut(&mut self) -> &mut AttackCooldown {
        &mut self.cooldown
    }

    fn attack_power(&self) -> u32 {
        self.effective_attack()
    }

    fn attack_range(&self) -> PixelRange {
        self.attack_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemBonuses;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn warrior() -> Warrior {
        Warrior::new(&GameConfig::default(), Position::new(3, 3))
    }

    #[test]
    fn fresh_warrior_uses_config_stats() {
        let warrior = warrior();
        assert_eq!(warrior.health().current(), 100);
        assert_eq!(warrior.effective_attack(), 15);
        assert_eq!(warrior.defense(), 0);
        assert!(warrior.can_attack());
    }

    #[test]
    fn equipment_raises_attack_and_defense() {
        let mut warrior = warrior();
        warrior.add_item(Item::weapon("Iron Sword", 5, 50)).unwrap();
        warrior.add_item(Item::armor("Leather Armor", 3, 30)).unwrap();
        assert_eq!(warrior.effective_attack(), 20);
        assert_eq!(warrior.defense(), 3);
    }

    #[test]
    fn health_bonus_follows_equipment() {
        let mut warrior = warrior();
        let charm = Item::armor("Troll Hide", 1, 40).with_bonuses(ItemBonuses {
            defense: 1,
            health: 25,
            ..ItemBonuses::NONE
        });
        warrior.add_item(charm).unwrap();
        assert_eq!(warrior.max_health(), 125);
        assert_eq!(warrior.health().maximum(), 125);
        assert_eq!(warrior.health().current(), 100);

        warrior.unequip(EquipSlot::Armor).unwrap();
        assert_eq!(warrior.health().maximum(), 100);
    }

    #[test]
    fn level_up_raises_max_health_and_heals() {
        let mut warrior = warrior();
        warrior.take_damage(60);
        assert_eq!(warrior.gain_experience(100), 1);
        assert_eq!(warrior.health().maximum(), 120);
        assert_eq!(warrior.health().current(), 120);
    }

    #[test]
    fn learning_spends_a_skill_point() {
        let mut warrior = warrior();
        assert_eq!(
            warrior.learn_skill(SkillId::PowerStrike),
            Err(SkillError::LevelTooLow {
                skill: SkillId::PowerStrike,
                required: 2
            })
        );
        warrior.gain_experience(100);
        warrior.learn_skill(SkillId::PowerStrike).unwrap();
        assert_eq!(warrior.experience().skill_points(), 0);
        assert_eq!(
            warrior.learn_skill(SkillId::BattleHardened),
            Err(SkillError::NoSkillPoints)
        );
    }

    #[test]
    fn power_strike_scales_damage_then_cools_down() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut warrior = warrior();
        warrior.gain_experience(100);
        warrior.learn_skill(SkillId::PowerStrike).unwrap();
        warrior.select_skill(Some(SkillId::PowerStrike)).unwrap();

        let strike = warrior.prepare_strike(true, &mut rng);
        assert_eq!(strike.power, 22);
        assert_eq!(strike.skill, Some(SkillId::PowerStrike));
        warrior.land_strike(&strike, 22);

        let strike = warrior.prepare_strike(true, &mut rng);
        assert_eq!((strike.power, strike.skill), (15, None));
        warrior.tick_skills(Duration::from_secs(6));
        assert_eq!(warrior.prepare_strike(true, &mut rng).skill, Some(SkillId::PowerStrike));
        assert_eq!(warrior.prepare_strike(false, &mut rng).skill, None);
    }

    #[test]
    fn berserker_rage_needs_low_health() {
        let mut warrior = warrior();
        warrior.gain_experience(1000);
        warrior.learn_skill(SkillId::BerserkerRage).unwrap();
        assert_eq!(warrior.effective_attack(), 15);
        let maximum = warrior.health().maximum();
        warrior.take_damage(maximum / 2 + 1);
        assert_eq!(warrior.effective_attack(), 18);
    }

    #[test]
    fn battle_hardened_crits_only_when_healthy() {
        let mut warrior = warrior();
        warrior.gain_experience(100);
        warrior.learn_skill(SkillId::BattleHardened).unwrap();
        assert_eq!(warrior.crit_chance_percent(), 10);
        warrior.take_damage(40);
        assert_eq!(warrior.crit_chance_percent(), 0);
    }

    #[test]
    fn iron_skin_and_vampiric_strikes() {
        let mut warrior = warrior();
        warrior.gain_experience(500);
        warrior.learn_skill(SkillId::IronSkin).unwrap();
        warrior.learn_skill(SkillId::VampiricStrikes).unwrap();
        assert_eq!(warrior.damage_reduction_percent(), 10);

        warrior.take_damage(50);
        let strike = Strike {
            power: 15,
            skill: None,
            critical: false,
        };
        assert_eq!(warrior.land_strike(&strike, 20), 3);
    }

    #[test]
    fn last_stand_fires_once() {
        let mut warrior = warrior();
        warrior.gain_experience(1000);
        warrior.learn_skill(SkillId::LastStand).unwrap();
        let maximum = warrior.health().maximum();
        assert_eq!(maximum, 180);

        warrior.take_damage(150);
        assert_eq!(warrior.health().current(), 30 + 54);
        assert!(warrior.skills().last_stand_used());

        warrior.take_damage(60);
        assert_eq!(warrior.health().current(), 24);
    }

    #[test]
    fn attacking_requires_cooldown_turn() {
        let mut warrior = warrior();
        warrior.cooldown_mut().reset();
        assert!(!warrior.can_attack());
        warrior.on_turn_start();
        assert!(warrior.can_attack());
    }
}
