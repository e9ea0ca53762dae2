//! One turn of play.
//!
//! Turn order: cooldowns tick for everyone, the warrior acts, a successful
//! step runs the tile triggers (transitions, return portal, town services,
//! chests, pickups), dead monsters drop their loot, then every live monster
//! runs its brain.
use std::time::Duration;

use game_core::{
    AttackOutcome, AttackReport, CooldownAttacker, Damageable, Direction, EntityId, MonsterAction,
    MonsterContext, Movable, Position, Positioned, resolve_attack, resolve_strike,
};

use super::Session;
use crate::dungeon::LibraryVisit;
use crate::entities::{Fallen, Pickup};
use crate::events::{EventQueue, GameEvent, VisualEffect};
use crate::state_manager::GameMode;

const HIT_FLASH: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Move(Direction),
    /// Strike the closest live monster.
    Attack,
    /// Like `Attack`, but with the selected active skill when it is ready.
    SkillAttack,
}

impl Session {
    pub(crate) fn process_turn(&mut self, action: PlayerAction) {
        if !self.warrior.is_alive() {
            return;
        }
        self.start_turn();

        let moved = match action {
            PlayerAction::Move(direction) => self.move_warrior(direction),
            PlayerAction::Attack => {
                self.warrior_attack(false);
                false
            }
            PlayerAction::SkillAttack => {
                self.warrior_attack(true);
                false
            }
        };
        // A map change ends the turn; the old map's monsters are gone.
        if moved && self.run_tile_triggers() {
            return;
        }

        self.collect_fallen();
        self.monster_turns();

        if !self.warrior.is_alive() && self.state.mode() != GameMode::GameOver {
            self.state.game_over();
            tracing::info!("Warrior fell on {}", self.dungeon.current_map_id());
            self.toast("You have fallen! Restart to try again.");
        }
    }

    fn start_turn(&mut self) {
        self.warrior.on_turn_start();
        for monster in self.entities.monsters_mut() {
            if monster.is_alive() {
                monster.on_turn_start();
            }
        }
    }

    fn move_warrior(&mut self, direction: Direction) -> bool {
        let map = self.dungeon.current_map();
        let entities = &self.entities;
        let outcome = self.warrior.move_by(direction, map.bounds(), |position| {
            !map.is_passable(position) || entities.is_occupied(position)
        });
        tracing::debug!("Warrior move {:?}: {:?}", direction, outcome);
        outcome.moved()
    }

    fn warrior_attack(&mut self, use_skill: bool) {
        let tile_size = self.config.tile_size;
        let Some(index) = self
            .entities
            .nearest_alive_monster(self.warrior.position(), tile_size)
        else {
            tracing::debug!("Nothing to attack");
            return;
        };

        let strike = self.warrior.prepare_strike(use_skill, &mut self.rng);
        let monster = &mut self.entities.monsters_mut()[index];
        let report = match resolve_strike(&mut self.warrior, monster, tile_size, strike.power) {
            AttackOutcome::Hit(report) => report,
            outcome => {
                tracing::debug!("Warrior attack: {:?}", outcome);
                return;
            }
        };
        let (entity, position) = (monster.id(), monster.position());
        push_hit(&mut self.events, entity, position, report);

        let healed = self.warrior.land_strike(&strike, report.damage);
        tracing::debug!("Warrior strike {:?} healed {}", strike, healed);
        let mut flourish = Vec::new();
        if let Some(skill) = strike.skill {
            flourish.push(format!("{}!", skill.display_name()));
        }
        if strike.critical {
            flourish.push("Critical hit!".to_string());
        }
        if healed > 0 {
            flourish.push(format!("You drain {} HP.", healed));
        }
        if !flourish.is_empty() {
            self.toast(flourish.join(" "));
        }
    }

    /// Runs everything that happens on arrival at a tile. True when the
    /// warrior left the current map.
    fn run_tile_triggers(&mut self) -> bool {
        if let Some(transition) = self.dungeon.check_and_handle_transition(&mut self.warrior) {
            tracing::info!("Transition: {:?}", transition);
            self.on_map_changed();
            self.toast(transition.message());
            return true;
        }

        if self
            .state
            .check_return_portal_collision(&self.warrior, self.dungeon.current_map_id())
        {
            let result = self
                .state
                .use_return_portal(&mut self.warrior, &mut self.dungeon);
            if result.success {
                self.on_map_changed();
                self.toast(result.message);
                return true;
            }
            self.toast(result.message);
        }

        self.visit_town_services();

        let position = self.warrior.position();
        let map_id = self.dungeon.current_map_id().clone();
        if let Some(item) = self.entities.open_chest_at(&map_id, position) {
            self.toast(format!("You open the chest. Inside you find a {}!", item.name));
            self.entities.drop_item(position, item);
        }

        if let Some(pickup) = self.entities.pickup_at(&mut self.warrior) {
            match &pickup {
                Pickup::Gold(amount) => self.events.push(GameEvent::ItemPickedUp {
                    item: format!("{} gold", amount),
                }),
                Pickup::Item(name) => self.events.push(GameEvent::ItemPickedUp { item: name.clone() }),
                Pickup::InventoryFull => {}
            }
            self.toast(pickup.message());
        }
        false
    }

    fn visit_town_services(&mut self) {
        let position = self.warrior.position();
        let grant_limit = self.config.library_portal_grant;
        if let Some(visit) = self
            .dungeon
            .visit_library(&mut self.warrior, grant_limit, &self.portal_item)
        {
            if matches!(visit, LibraryVisit::Granted(granted) if granted > 0) {
                self.events.push(GameEvent::VisualEffect {
                    effect: VisualEffect::PortalGift { at: position },
                    duration: self.config.portal_gift_effect(),
                });
            }
            self.toast(visit.message());
        }

        if self.dungeon.visit_temple(&mut self.warrior) {
            self.events.push(GameEvent::VisualEffect {
                effect: VisualEffect::Healing { at: position },
                duration: self.config.healing_effect(),
            });
            self.toast("The temple's divine power restores your health!");
        }
    }

    /// Clears dead monsters, scattering loot on their tiles and paying out
    /// experience.
    fn collect_fallen(&mut self) {
        let map_id = self.dungeon.current_map_id().clone();
        let fallen = self.entities.remove_dead(&map_id, &self.loot, &mut self.rng);

        for Fallen {
            monster,
            position,
            drops,
        } in fallen
        {
            let xp = monster.xp_value();
            let levels = self.warrior.gain_experience(xp);
            let kind = monster.kind().display_name();

            let names = drops
                .iter()
                .map(|item| item.name.as_str())
                .collect::<Vec<_>>()
                .join(" and ");
            let mut message = if names.is_empty() {
                format!("The {} is slain! (+{} XP)", kind, xp)
            } else {
                format!("The {} drops a {}! (+{} XP)", kind, names, xp)
            };
            if levels > 0 {
                let level = self.warrior.experience().level();
                tracing::info!("Warrior reached level {}", level);
                self.events.push(GameEvent::LevelUp { level });
                message = format!("Level Up! Now level {}! {}", level, message);
            }

            for item in drops {
                self.entities.drop_item(position, item);
            }
            self.toast(message);
        }
    }

    fn monster_turns(&mut self) {
        let tile_size = self.config.tile_size;
        let map = self.dungeon.current_map();
        let bounds = map.bounds();

        for index in 0..self.entities.monsters().len() {
            if !self.warrior.is_alive() {
                break;
            }
            let monsters = self.entities.monsters();
            if !monsters[index].is_alive() {
                continue;
            }

            let target = self.warrior.position();
            let mut ctx = MonsterContext::new(&monsters[index], target, true, tile_size, |position| {
                map.is_passable(position)
                    && position != target
                    && !monsters
                        .iter()
                        .enumerate()
                        .any(|(other, m)| other != index && m.is_alive() && m.position() == position)
            });
            let action = monsters[index].decide(&mut ctx);

            let monster = &mut self.entities.monsters_mut()[index];
            match action {
                MonsterAction::Attack => match resolve_attack(monster, &mut self.warrior, tile_size) {
                    AttackOutcome::Hit(report) => {
                        tracing::debug!("{:?} hits the warrior for {}", monster, report.damage);
                        push_hit(&mut self.events, EntityId::PLAYER, target, report);
                    }
                    outcome => tracing::debug!("{:?} attack: {:?}", monster, outcome),
                },
                MonsterAction::Step(direction) => {
                    monster.move_by(direction, bounds, |_| !ctx.is_open(direction));
                }
                MonsterAction::Wait => {}
            }
        }
    }
}

fn push_hit(events: &mut EventQueue, entity: EntityId, position: Position, report: AttackReport) {
    events.push(GameEvent::EntityDamaged {
        entity,
        amount: report.damage,
        remaining: report.remaining_health,
    });
    events.push(GameEvent::VisualEffect {
        effect: VisualEffect::Hit { at: position },
        duration: HIT_FLASH,
    });
    if report.killed {
        events.push(GameEvent::EntityDied { entity, position });
    }
}
