//! End-to-end flows through `Session` on the bundled content.
use std::time::Duration;

use game_content::{ContentFactory, bundled_data_dir};
use game_core::{Damageable, Direction, Item, MonsterKind, Position, Positioned, SkillId};
use runtime::{GameEvent, GameMode, Intent, MapId, Session, SessionConfig};

fn session() -> Session {
    let content = ContentFactory::new(bundled_data_dir())
        .load_all()
        .expect("bundled content loads");
    Session::new(content, 42)
}

fn place(session: &mut Session, x: i32, y: i32) {
    session.warrior_mut().set_position(Position::new(x, y));
}

fn step(session: &mut Session, direction: Direction) {
    session.handle_intent(Intent::Move(direction));
}

fn toasts(events: &[GameEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::Toast(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Walks into town from the tile north of the world entrance.
fn enter_town(session: &mut Session) {
    place(session, 8, 4);
    step(session, Direction::South);
    assert_eq!(session.dungeon().current_map_id(), &MapId::Town);
}

#[test]
fn starts_on_the_world_spawn() {
    let mut session = session();
    assert_eq!(session.mode(), GameMode::Playing);
    assert_eq!(session.dungeon().current_map_id(), &MapId::World);
    assert_eq!(session.warrior().position(), Position::new(1, 1));
    assert!(!session.entities().monsters().is_empty());

    let events = session.drain_events();
    assert!(events.contains(&GameEvent::MapChanged { map: MapId::World }));
}

#[test]
fn town_portal_without_portals_fails() {
    let mut session = session();
    session.handle_intent(Intent::UseTownPortal);

    assert_eq!(session.dungeon().current_map_id(), &MapId::World);
    assert!(session.state().active_portal().is_none());
    assert_eq!(session.state().message(), Some("No town portals in inventory!"));
}

#[test]
fn town_portal_from_the_field_and_back() {
    let mut session = session();
    session.warrior_mut().add_item(Item::town_portal()).unwrap();

    session.handle_intent(Intent::UseTownPortal);
    assert_eq!(session.dungeon().current_map_id(), &MapId::Town);
    assert_eq!(session.warrior().count_town_portals(), 0);
    assert_eq!(session.warrior().position(), Position::new(6, 7));
    assert!(session.state().portal_cooldown() > Duration::ZERO);
    let origin = session.state().portal_return_location().unwrap();
    assert_eq!(origin.map, MapId::World);
    assert_eq!(origin.position, Position::new(1, 1));
    assert!(session.entities().monsters().is_empty());

    // The return portal sits on the town spawn.
    session.update(Duration::from_secs(1));
    step(&mut session, Direction::West);
    assert_eq!(session.dungeon().current_map_id(), &MapId::World);
    assert_eq!(session.warrior().position(), Position::new(1, 1));
    assert!(session.state().return_portal().is_none());
    assert!(session.state().active_portal().is_none());
}

#[test]
fn town_portal_works_inside_town_too() {
    let mut session = session();
    enter_town(&mut session);
    let arrival = session.warrior().position();
    session.warrior_mut().add_item(Item::town_portal()).unwrap();

    session.handle_intent(Intent::UseTownPortal);
    assert_eq!(session.warrior().count_town_portals(), 0);
    assert_eq!(session.dungeon().current_map_id(), &MapId::Town);
    let origin = session.state().portal_return_location().unwrap();
    assert_eq!(origin.map, MapId::Town);
    assert_eq!(origin.position, arrival);
    assert_eq!(session.warrior().position(), Position::new(6, 7));
    assert_eq!(
        session.state().message(),
        Some("You enter the portal and arrive in town!")
    );
}

#[test]
fn library_grants_only_what_fits() {
    let mut session = session();
    enter_town(&mut session);
    let capacity = session.warrior().inventory().capacity();
    for _ in 0..capacity - 1 {
        session.warrior_mut().add_item(Item::misc("Pebble", 1)).unwrap();
    }

    place(&mut session, 2, 5);
    step(&mut session, Direction::South);
    assert_eq!(session.warrior().count_town_portals(), 1);
    assert_eq!(session.warrior().inventory().free_backpack_slots(), 0);

    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(event, GameEvent::VisualEffect { .. })));
}

#[test]
fn temple_heals_a_wounded_warrior() {
    let mut session = session();
    enter_town(&mut session);
    session.warrior_mut().take_damage(40);

    place(&mut session, 8, 2);
    step(&mut session, Direction::North);
    assert!(session.warrior().health().is_full());
    assert_eq!(
        session.state().message(),
        Some("The temple's divine power restores your health!")
    );
}

#[test]
fn leaving_town_lands_east_of_the_entrance() {
    let mut session = session();
    enter_town(&mut session);
    place(&mut session, 5, 7);
    step(&mut session, Direction::South);

    assert_eq!(session.dungeon().current_map_id(), &MapId::World);
    assert_eq!(session.warrior().position(), Position::new(9, 5));
}

#[test]
fn dungeon_round_trip_returns_to_the_entrance() {
    let mut session = session();
    place(&mut session, 14, 6);
    step(&mut session, Direction::South);
    assert_eq!(
        session.dungeon().current_map_id(),
        &MapId::Dungeon("crypt".to_string())
    );
    assert_eq!(session.warrior().position(), Position::new(1, 1));
    assert!(
        session
            .entities()
            .monsters()
            .iter()
            .any(|monster| monster.kind() == MonsterKind::Dullahan)
    );

    place(&mut session, 1, 4);
    step(&mut session, Direction::South);
    assert_eq!(session.dungeon().current_map_id(), &MapId::World);
    assert_eq!(session.warrior().position(), Position::new(14, 7));
}

#[test]
fn shop_opens_only_next_to_the_merchant() {
    let mut session = session();
    session.handle_intent(Intent::Interact);
    assert_eq!(session.mode(), GameMode::Playing);
    assert_eq!(session.state().message(), Some("No shop nearby!"));

    enter_town(&mut session);
    place(&mut session, 4, 4);
    session.drain_events();
    session.handle_intent(Intent::Interact);
    assert_eq!(session.mode(), GameMode::Shop);
    assert!(session.drain_events().contains(&GameEvent::ModeChanged {
        from: GameMode::Playing,
        to: GameMode::Shop,
    }));

    session.warrior_mut().gold = 60;
    session.handle_intent(Intent::Buy(0));
    assert_eq!(session.warrior().gold, 10);
    assert_eq!(session.warrior().count_town_portals(), 1);

    session.handle_intent(Intent::Buy(0));
    assert_eq!(session.warrior().count_town_portals(), 1);
    assert!(session.state().message().unwrap().starts_with("Not enough gold"));

    session.handle_intent(Intent::CloseShop);
    assert_eq!(session.mode(), GameMode::Playing);
}

#[test]
fn modes_ignore_out_of_place_intents() {
    let mut session = session();
    session.handle_intent(Intent::CloseShop);
    assert_eq!(session.mode(), GameMode::Playing);

    session.handle_intent(Intent::ToggleInventory);
    assert_eq!(session.mode(), GameMode::Inventory);

    let before = session.warrior().position();
    session.handle_intent(Intent::Move(Direction::East));
    session.handle_intent(Intent::Buy(0));
    assert_eq!(session.warrior().position(), before);
    assert_eq!(session.mode(), GameMode::Inventory);

    session.handle_intent(Intent::ToggleInventory);
    assert_eq!(session.mode(), GameMode::Playing);

    session.handle_intent(Intent::ToggleSkills);
    assert_eq!(session.mode(), GameMode::Skills);
    session.handle_intent(Intent::ToggleInventory);
    assert_eq!(session.mode(), GameMode::Skills);
    session.handle_intent(Intent::ToggleSkills);
    assert_eq!(session.mode(), GameMode::Playing);
}

#[test]
fn killing_a_monster_pays_out_and_stays_dead() {
    let mut session = session();
    place(&mut session, 4, 6);
    let leprechauns = |session: &Session| {
        session
            .entities()
            .monsters()
            .iter()
            .filter(|monster| monster.kind() == MonsterKind::Leprechaun)
            .count()
    };
    assert_eq!(leprechauns(&session), 1);

    for _ in 0..3 {
        session.handle_intent(Intent::Attack);
    }
    assert_eq!(leprechauns(&session), 0);
    assert_eq!(session.warrior().experience().xp(), 15);
    assert!(
        session
            .entities()
            .ground_items()
            .iter()
            .any(|ground| ground.position == Position::new(4, 7))
    );
    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(event, GameEvent::EntityDied { .. })));
    assert!(toasts(&events).iter().any(|text| text.starts_with("The leprechaun drops a")));

    step(&mut session, Direction::South);
    assert!(session.warrior().gold >= 10);

    // Leaving and re-entering the world does not bring it back.
    enter_town(&mut session);
    place(&mut session, 5, 7);
    step(&mut session, Direction::South);
    assert_eq!(session.dungeon().current_map_id(), &MapId::World);
    assert_eq!(leprechauns(&session), 0);
}

#[test]
fn learned_skill_strikes_harder_then_cools_down() {
    let mut session = session();
    session.warrior_mut().gain_experience(100);

    session.handle_intent(Intent::LearnSkill(SkillId::PowerStrike));
    assert!(!session.warrior().skills().knows(SkillId::PowerStrike));

    session.handle_intent(Intent::ToggleSkills);
    session.handle_intent(Intent::LearnSkill(SkillId::Cleave));
    assert_eq!(session.state().message(), Some("Cleave requires level 5!"));
    session.handle_intent(Intent::LearnSkill(SkillId::PowerStrike));
    session.handle_intent(Intent::SelectSkill(Some(SkillId::PowerStrike)));
    assert_eq!(session.warrior().experience().skill_points(), 0);
    assert_eq!(session.warrior().skills().active(), Some(SkillId::PowerStrike));
    assert!(
        session
            .drain_events()
            .contains(&GameEvent::SkillLearned { skill: SkillId::PowerStrike })
    );
    session.handle_intent(Intent::ToggleSkills);

    place(&mut session, 4, 6);
    let leprechaun_health = |session: &Session| {
        session
            .entities()
            .monsters()
            .iter()
            .find(|monster| monster.kind() == MonsterKind::Leprechaun)
            .map(|monster| monster.health().current())
    };
    session.handle_intent(Intent::SkillAttack);
    assert_eq!(leprechaun_health(&session), Some(18));
    assert_eq!(session.state().message(), Some("Power Strike!"));

    // Still cooling down: a plain hit.
    session.handle_intent(Intent::SkillAttack);
    assert_eq!(leprechaun_health(&session), Some(3));

    session.update(Duration::from_secs(6));
    assert_eq!(session.warrior().skills().cooldown_remaining(), Duration::ZERO);
}

#[test]
fn chests_open_once_and_fill_the_inventory() {
    let mut session = session();
    let chests = session.entities().chests().len();
    place(&mut session, 3, 3);
    step(&mut session, Direction::South);

    assert_eq!(session.entities().chests().len(), chests - 1);
    assert_eq!(session.warrior().inventory().item_count(), 1);
    assert!(
        toasts(&session.drain_events())
            .iter()
            .any(|text| text.starts_with("You open the chest."))
    );

    enter_town(&mut session);
    place(&mut session, 5, 7);
    step(&mut session, Direction::South);
    assert_eq!(session.entities().chests().len(), chests - 1);
}

#[test]
fn death_ends_the_game_until_restart() {
    let mut session = session();
    session.warrior_mut().take_damage(99);
    place(&mut session, 4, 6);

    session.handle_intent(Intent::Attack);
    assert!(!session.warrior().is_alive());
    assert_eq!(session.mode(), GameMode::GameOver);

    session.handle_intent(Intent::Move(Direction::North));
    assert_eq!(session.warrior().position(), Position::new(4, 6));

    session.handle_intent(Intent::Restart);
    assert_eq!(session.mode(), GameMode::Playing);
    assert!(session.warrior().health().is_full());
    assert_eq!(session.warrior().position(), Position::new(1, 1));
    assert_eq!(session.dungeon().current_map_id(), &MapId::World);
}

#[test]
fn load_reports_missing_content() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig {
        data_dir: dir.path().to_path_buf(),
        seed: Some(1),
    };
    let err = Session::load(&config).err().expect("empty directory has no items");
    assert!(matches!(err, runtime::RuntimeError::Content { .. }));
}

#[test]
fn draw_requests_put_the_warrior_last() {
    let session = session();
    let requests = session.draw_requests();
    let last = requests.last().unwrap();
    assert_eq!(last.kind, runtime::DrawKind::Warrior);
    assert_eq!(last.grid, Position::new(1, 1));
}
