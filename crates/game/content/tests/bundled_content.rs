use game_content::{ContentFactory, bundled_data_dir};
use game_core::{Marker, MonsterKind, Position};

#[test]
fn bundled_content_loads() {
    let content = ContentFactory::new(bundled_data_dir())
        .load_all()
        .expect("bundled data should load");

    assert_eq!(content.config.backpack_slots, 13);
    assert!(content.items.get("Town Portal").unwrap().is_town_portal());
    assert!(!content.shop_stock.is_empty());
    assert!(!content.loot.chest_pool.is_empty());
    assert!(content.dungeon("crypt").is_some());
    assert_eq!(
        content.monsters.template(MonsterKind::Dullahan).defense,
        3
    );
}

#[test]
fn town_layout_places_buildings() {
    let content = ContentFactory::new(bundled_data_dir()).load_all().unwrap();
    let town = &content.town;

    assert_eq!(town.first_marker(Marker::Library), Some(Position::new(2, 6)));
    assert_eq!(town.first_marker(Marker::Shop), Some(Position::new(4, 3)));
    assert_eq!(town.first_marker(Marker::Temple), Some(Position::new(8, 1)));
    assert!(town.first_marker(Marker::TownExit).is_some());
    assert!(town.monster_spawns().is_empty());
}

#[test]
fn world_entrances_are_walkable() {
    let content = ContentFactory::new(bundled_data_dir()).load_all().unwrap();
    let world = &content.world;

    let entrance = world.first_marker(Marker::TownEntrance).unwrap();
    assert_eq!(entrance, Position::new(8, 5));
    assert!(world.is_passable(Position::new(entrance.x + 1, entrance.y)));

    let crypt = world.dungeon_at(Position::new(14, 7)).unwrap();
    assert_eq!(crypt.id, "crypt");
    assert!(
        content
            .dungeon("crypt")
            .unwrap()
            .first_marker(Marker::DungeonExit)
            .is_some()
    );
}
