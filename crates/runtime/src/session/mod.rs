//! The explicit game context.
//!
//! A [`Session`] owns every piece of mutable game state and is the only
//! thing a front end talks to: feed it [`Intent`]s, call [`Session::update`]
//! once per frame, then drain its events and draw requests.
mod turn;

use std::fmt::Display;
use std::time::Duration;

use game_content::{ContentFactory, GameContent, MonsterCatalog};
use game_core::{
    Damageable, GameConfig, Item, LootTables, MapBounds, Positioned, Shop, ShopItem, SkillId,
    Warrior,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use turn::PlayerAction;

use crate::camera::{Camera, DrawKind, DrawRequest};
use crate::config::SessionConfig;
use crate::dungeon::DungeonManager;
use crate::entities::MapEntities;
use crate::error::{Result, RuntimeError};
use crate::events::{EventQueue, GameEvent};
use crate::input::Intent;
use crate::state_manager::{GameMode, GameStateManager};

pub struct Session {
    config: GameConfig,
    monsters: MonsterCatalog,
    loot: LootTables,
    /// Shop stock as loaded, restored on restart.
    initial_stock: Vec<ShopItem>,
    /// Item handed out by the library.
    portal_item: Item,
    state: GameStateManager,
    dungeon: DungeonManager,
    entities: MapEntities,
    warrior: Warrior,
    shop: Shop,
    camera: Camera,
    events: EventQueue,
    rng: StdRng,
}

impl Session {
    pub fn new(content: GameContent, seed: u64) -> Self {
        let GameContent {
            config,
            items,
            monsters,
            loot,
            shop_stock,
            world,
            town,
            dungeons,
        } = content;

        let portal_item = items
            .get(Item::TOWN_PORTAL)
            .cloned()
            .unwrap_or_else(Item::town_portal);
        let dungeon = DungeonManager::new(world, town, dungeons);
        let warrior = Warrior::new(&config, dungeon.world().spawn_point());
        let camera = Camera::new(
            MapBounds::new(config.viewport_width, config.viewport_height),
            dungeon.world().bounds(),
        );

        let mut session = Self {
            state: GameStateManager::new(&config),
            shop: Shop::new(shop_stock.clone()),
            initial_stock: shop_stock,
            config,
            monsters,
            loot,
            portal_item,
            dungeon,
            entities: MapEntities::new(),
            warrior,
            camera,
            events: EventQueue::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        session.on_map_changed();
        session
    }

    /// Loads content from `config.data_dir` and starts a session.
    pub fn load(config: &SessionConfig) -> Result<Self> {
        let content = ContentFactory::new(config.data_dir.clone())
            .load_all()
            .map_err(|source| RuntimeError::Content {
                path: config.data_dir.clone(),
                source,
            })?;
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(
            "Loaded content from {} (seed {})",
            config.data_dir.display(),
            seed
        );
        Ok(Self::new(content, seed))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn warrior(&self) -> &Warrior {
        &self.warrior
    }

    /// Direct access for scripted setups and tooling.
    pub fn warrior_mut(&mut self) -> &mut Warrior {
        &mut self.warrior
    }

    pub fn state(&self) -> &GameStateManager {
        &self.state
    }

    pub fn dungeon(&self) -> &DungeonManager {
        &self.dungeon
    }

    pub fn entities(&self) -> &MapEntities {
        &self.entities
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode()
    }

    /// Takes every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Routes an intent according to the current mode. Intents that make no
    /// sense in the current mode are ignored.
    pub fn handle_intent(&mut self, intent: Intent) {
        let before = self.state.mode();
        tracing::debug!("Intent {:?} in {} mode", intent, before);

        // Rejected mode switches are logged by the state manager.
        match (before, intent) {
            (GameMode::GameOver, Intent::Restart) => self.restart(),
            (GameMode::Playing, Intent::Move(direction)) => {
                self.process_turn(PlayerAction::Move(direction))
            }
            (GameMode::Playing, Intent::Attack) => self.process_turn(PlayerAction::Attack),
            (GameMode::Playing, Intent::SkillAttack) => {
                self.process_turn(PlayerAction::SkillAttack)
            }
            (GameMode::Playing, Intent::Interact) => self.interact(),
            (GameMode::Playing, Intent::UseTownPortal) => self.use_town_portal(),
            (GameMode::Inventory, Intent::ToggleInventory) => {
                let _ = self.state.close_inventory();
            }
            (GameMode::Playing | GameMode::Shop, Intent::ToggleInventory) => {
                let _ = self.state.open_inventory();
            }
            (GameMode::Playing | GameMode::Skills, Intent::ToggleSkills) => {
                let _ = self.state.toggle_skills();
            }
            (GameMode::Skills, Intent::LearnSkill(skill)) => self.learn_skill(skill),
            (GameMode::Skills, Intent::SelectSkill(skill)) => self.select_skill(skill),
            (GameMode::Inventory, Intent::EquipFromBackpack(index)) => self.equip(index),
            (GameMode::Shop, Intent::Buy(index)) => self.buy(index),
            (GameMode::Shop, Intent::Sell(index)) => self.sell(index),
            (GameMode::Shop, Intent::CloseShop) => {
                let _ = self.state.close_shop();
            }
            (mode, intent) => tracing::debug!("Ignoring {:?} in {} mode", intent, mode),
        }

        let after = self.state.mode();
        if before != after {
            self.events.push(GameEvent::ModeChanged {
                from: before,
                to: after,
            });
        }
    }

    /// Advances real-time timers and re-centres the camera.
    pub fn update(&mut self, elapsed: Duration) {
        self.state.update(elapsed);
        self.warrior.tick_skills(elapsed);
        self.camera.follow(self.warrior.position());
    }

    /// Fresh warrior on the world map with every kill and chest forgotten.
    pub fn restart(&mut self) {
        self.dungeon.reset();
        self.entities.reset_tracking();
        self.warrior = Warrior::new(&self.config, self.dungeon.world().spawn_point());
        self.shop = Shop::new(self.initial_stock.clone());
        self.state.reset();
        self.on_map_changed();
        tracing::info!("Session restarted");
    }

    /// Everything visible this frame, portals first and the warrior last.
    pub fn draw_requests(&self) -> Vec<DrawRequest> {
        let tile = self.config.tile_size;
        let map = self.dungeon.current_map_id();
        let mut requests = Vec::new();

        let portals = [
            (self.state.active_portal(), false),
            (self.state.return_portal(), true),
        ];
        for (anchor, returning) in portals {
            if let Some(anchor) = anchor.filter(|anchor| &anchor.map == map) {
                requests.extend(self.camera.request(
                    DrawKind::Portal { returning },
                    anchor.position,
                    tile,
                ));
            }
        }
        for chest in self.entities.chests().iter().filter(|c| !c.is_opened()) {
            requests.extend(self.camera.request(DrawKind::Chest, chest.position, tile));
        }
        for ground in self.entities.ground_items() {
            requests.extend(
                self.camera
                    .request(DrawKind::GroundItem, ground.position, tile),
            );
        }
        for monster in self.entities.monsters().iter().filter(|m| m.is_alive()) {
            requests.extend(self.camera.request(
                DrawKind::Monster(monster.kind()),
                monster.position(),
                tile,
            ));
        }
        requests.extend(
            self.camera
                .request(DrawKind::Warrior, self.warrior.position(), tile),
        );
        requests
    }

    fn toast(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!("Toast: {}", text);
        self.state.show_message(text.clone());
        self.events.push(GameEvent::Toast(text));
    }

    /// Rebuilds map-scoped entities and the camera for the current map.
    fn on_map_changed(&mut self) {
        let map_id = self.dungeon.current_map_id().clone();
        let map = self.dungeon.current_map();
        self.entities.populate(
            &map_id,
            map,
            &self.monsters,
            &self.loot,
            self.config.tile_size,
            &mut self.rng,
        );
        self.camera.set_map(map.bounds());
        self.camera.follow(self.warrior.position());
        self.events.push(GameEvent::MapChanged { map: map_id });
    }

    fn interact(&mut self) {
        if self.dungeon.is_near_shop(self.warrior.position()) {
            let _ = self.state.open_shop(true);
        } else {
            self.toast("No shop nearby!");
        }
    }

    fn use_town_portal(&mut self) {
        let result = self
            .state
            .use_town_portal(&mut self.warrior, &mut self.dungeon);
        if result.success {
            self.on_map_changed();
        }
        self.toast(result.message);
    }

    fn learn_skill(&mut self, skill: SkillId) {
        match self.warrior.learn_skill(skill) {
            Ok(()) => {
                tracing::info!("Warrior learned {}", skill);
                self.events.push(GameEvent::SkillLearned { skill });
                self.toast(format!("You learned {}!", skill.display_name()));
            }
            Err(err) => self.toast(refusal(&err)),
        }
    }

    fn select_skill(&mut self, skill: Option<SkillId>) {
        match (self.warrior.select_skill(skill), skill) {
            (Ok(()), Some(skill)) => self.toast(format!("{} is ready.", skill.display_name())),
            (Ok(()), None) => self.toast("Back to basic attacks."),
            (Err(err), _) => self.toast(refusal(&err)),
        }
    }

    fn equip(&mut self, index: usize) {
        let name = self
            .warrior
            .inventory()
            .backpack_item(index)
            .map(|item| item.name.clone());
        match (self.warrior.equip_from_backpack(index), name) {
            (Ok(_), Some(name)) => self.toast(format!("You equip the {}.", name)),
            (Ok(_), None) => {}
            (Err(err), _) => self.toast(refusal(&err)),
        }
    }

    fn buy(&mut self, index: usize) {
        match self.shop.buy(index, &mut self.warrior) {
            Ok((name, _)) => self.toast(format!("You bought the {}!", name)),
            Err(err) => self.toast(refusal(&err)),
        }
    }

    fn sell(&mut self, index: usize) {
        match self.shop.sell(index, &mut self.warrior) {
            Ok((name, price)) => self.toast(format!("You sold the {} for {} gold.", name, price)),
            Err(err) => self.toast(refusal(&err)),
        }
    }
}

/// Error text as a sentence for the toast line.
fn refusal(err: &impl Display) -> String {
    let text = err.to_string();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!("{}{}!", first.to_uppercase(), chars.as_str()),
        None => text,
    }
}
