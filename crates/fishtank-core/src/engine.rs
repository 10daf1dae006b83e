//! Game engine - main entry point for running the simulation

use fishtank_logic::area::Area;
use fishtank_logic::upgrades::UpgradeKind;
use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::*;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::input::{InputEvent, UiMode};
use crate::layout;
use crate::persistence::{self, SaveError};
use crate::snapshot::{self, RenderSnapshot};
use crate::systems::*;

/// Main game engine
pub struct GameEngine {
    /// ECS world containing every fish
    pub world: World,
    /// The player aggregate
    pub player: Player,
    config: GameConfig,
    /// Area currently shown
    area: Area,
    /// Free-swimming fish of the last spawning area visited
    pool: FishPool,
    ui_mode: UiMode,
    running: bool,
    rng: StdRng,

    // Simulated milliseconds since the engine started
    clock_ms: f64,
    last_auto_collect: f64,
    last_breeding: f64,
}

impl GameEngine {
    /// Create a new game with an entropy-seeded RNG
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a new game with a deterministic RNG
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let player = Player::new(&config);
        let mut engine = Self {
            world: World::new(),
            player,
            config,
            area: Area::STARTING,
            pool: FishPool::new(Area::STARTING),
            ui_mode: UiMode::Normal,
            running: true,
            rng,
            clock_ms: 0.0,
            last_auto_collect: 0.0,
            last_breeding: 0.0,
        };
        engine.respawn_pool();
        engine
    }

    /// Discard all progress and start over in the starting area.
    pub fn reset(&mut self) {
        self.world = World::new();
        self.player = Player::new(&self.config);
        self.area = Area::STARTING;
        self.pool = FishPool::new(Area::STARTING);
        self.ui_mode = UiMode::Normal;
        self.reset_timers();
        self.respawn_pool();
    }

    /// Advance the simulation by `delta_ms` of wall-clock time.
    ///
    /// Shops are modal: while one is open the clock keeps running but no
    /// system updates, so overdue timers fire once on the first tick after
    /// the shop closes.
    pub fn tick(&mut self, delta_ms: f64) {
        self.clock_ms += delta_ms.max(0.0);
        if self.ui_mode.is_shop() {
            return;
        }

        // Auto-collect runs in every area, drawing from the current pool
        if self.player.upgrade_level(UpgradeKind::AutoCollector) > 0
            && self.clock_ms - self.last_auto_collect >= self.player.auto_collect_interval
        {
            self.auto_collect();
            self.last_auto_collect = self.clock_ms;
        }

        let bounds = self.config.play_area();
        let sprite = self.config.base_sprite();
        if self.area.is_tank() {
            movement_system(&mut self.world, &bounds, sprite, Location::Tank);

            if self.clock_ms - self.last_breeding >= self.player.breeding_interval {
                self.breed();
                self.last_breeding = self.clock_ms;
            }
        } else {
            movement_system(&mut self.world, &bounds, sprite, Location::Pool);
        }
    }

    /// Route one input event through the UI state machine.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                log::info!("Quit requested");
                self.running = false;
            }
            InputEvent::Click { x, y } => match self.ui_mode {
                UiMode::Normal => self.click_play_view(x, y),
                UiMode::AreaShop => self.click_area_shop(x, y),
                UiMode::UpgradeShop => self.click_upgrade_shop(x, y),
                UiMode::CosmeticsShop => self.click_cosmetics_shop(x, y),
            },
        }
    }

    fn click_play_view(&mut self, x: f32, y: f32) {
        if layout::world_map_button(&self.config).contains(x, y) {
            self.ui_mode = UiMode::AreaShop;
            return;
        }
        if layout::cosmetics_button(&self.config).contains(x, y) {
            self.ui_mode = UiMode::CosmeticsShop;
            return;
        }
        if layout::upgrades_button(&self.config).contains(x, y) {
            self.ui_mode = UiMode::UpgradeShop;
            return;
        }

        let slot = layout::hit_row(
            |i| layout::storage_slot(&self.config, i),
            self.player.stored_fish.len(),
            x,
            y,
        )
        .map(|i| self.player.stored_fish[i]);

        if self.area.is_tank() {
            if let Some(fish) = slot {
                let _ = self.move_to_tank(fish);
                return;
            }
            let clicked = self
                .fish_at(&self.player.tank_fish, x, y)
                .into_iter()
                .next();
            if let Some(fish) = clicked {
                if self.player.cosmetics_inventory.is_empty() {
                    let _ = self.move_to_storage(fish);
                } else {
                    let _ = self.apply_cosmetic(fish);
                }
            }
        } else {
            for fish in self.fish_at(&self.pool.members, x, y) {
                let _ = self.collect(fish);
            }
            if let Some(fish) = slot {
                let _ = self.sell(fish);
            }
        }
    }

    fn click_area_shop(&mut self, x: f32, y: f32) {
        let row = layout::hit_row(|i| layout::area_row(&self.config, i), Area::ALL.len(), x, y);
        if let Some(area) = row.and_then(Area::from_index) {
            if self.player.is_unlocked(area) {
                let _ = self.travel(area);
            } else {
                let _ = self.unlock_area(area);
            }
        }
        self.ui_mode = UiMode::Normal;
    }

    fn click_upgrade_shop(&mut self, x: f32, y: f32) {
        let kinds: Vec<UpgradeKind> = self.player.upgrades.keys().copied().collect();
        match layout::hit_row(|i| layout::shop_row(&self.config, i), kinds.len(), x, y) {
            Some(i) => {
                let _ = self.purchase_upgrade(kinds[i]);
            }
            None => self.ui_mode = UiMode::Normal,
        }
    }

    fn click_cosmetics_shop(&mut self, x: f32, y: f32) {
        let count = self.config.cosmetics.len();
        match layout::hit_row(|i| layout::shop_row(&self.config, i), count, x, y) {
            Some(i) => {
                let id = self.config.cosmetics[i].id;
                let _ = self.buy_cosmetic(id);
            }
            None => self.ui_mode = UiMode::Normal,
        }
    }

    /// Fish among `candidates` whose sprite contains the point, in list order.
    fn fish_at(&self, candidates: &[Entity], x: f32, y: f32) -> Vec<Entity> {
        let base = self.config.base_sprite();
        candidates
            .iter()
            .copied()
            .filter(|&entity| {
                let Ok(fish) = self.world.get::<&Fish>(entity) else {
                    return false;
                };
                let Ok(pos) = self.world.get::<&Position>(entity) else {
                    return false;
                };
                layout::fish_rect(*pos, fish.sprite_size(base)).contains(x, y)
            })
            .collect()
    }

    /// Collect a pool fish by hand.
    pub fn collect(&mut self, fish: Entity) -> Result<CollectOutcome, GameError> {
        collect_fish(
            &mut self.world,
            &mut self.player,
            &mut self.pool,
            &self.config,
            fish,
            CollectSource::Manual,
            &mut self.rng,
        )
    }

    /// Collect one random pool fish, as the Auto-Collector does.
    pub fn auto_collect(&mut self) -> Option<CollectOutcome> {
        auto_collect(
            &mut self.world,
            &mut self.player,
            &mut self.pool,
            &self.config,
            &mut self.rng,
        )
    }

    pub fn sell(&mut self, fish: Entity) -> Result<u64, GameError> {
        sell_fish(&mut self.world, &mut self.player, fish)
    }

    pub fn move_to_tank(&mut self, fish: Entity) -> Result<(), GameError> {
        move_to_tank(
            &mut self.world,
            &mut self.player,
            &self.config,
            self.area,
            fish,
            &mut self.rng,
        )
    }

    pub fn move_to_storage(&mut self, fish: Entity) -> Result<(), GameError> {
        move_to_storage(&mut self.world, &mut self.player, self.area, fish)
    }

    pub fn purchase_upgrade(&mut self, kind: UpgradeKind) -> Result<u64, GameError> {
        purchase_upgrade(&mut self.player, kind, &mut self.rng)
    }

    pub fn buy_cosmetic(&mut self, id: u32) -> Result<(), GameError> {
        buy_cosmetic(&mut self.player, &self.config, id)
    }

    pub fn apply_cosmetic(&mut self, fish: Entity) -> Result<(), GameError> {
        apply_cosmetic(&mut self.world, &mut self.player, &self.config, fish)
    }

    pub fn unlock_area(&mut self, area: Area) -> Result<u64, GameError> {
        unlock_area(&mut self.player, area)
    }

    /// Switch the active area. Entering the Tank keeps the current pool;
    /// entering a spawning area replaces it.
    pub fn travel(&mut self, area: Area) -> Result<(), GameError> {
        if !self.player.is_unlocked(area) {
            self.player.add_message(format!("{} is locked!", area));
            return Err(GameError::AreaLocked { area });
        }

        self.area = area;
        if !area.is_tank() {
            self.pool.refill(
                &mut self.world,
                &self.config,
                area,
                self.player.fish_size_multiplier,
                &mut self.rng,
            );
        }
        self.player.add_message(format!("Moved to {}!", area));
        log::info!("Moved to {}", area);
        Ok(())
    }

    /// Run one breeding attempt in the tank, regardless of the timer.
    pub fn breed(&mut self) -> BreedOutcome {
        breed(&mut self.world, &mut self.player, &self.config, &mut self.rng)
    }

    /// Replace the pool with fresh fish from the pool's area.
    pub fn respawn_pool(&mut self) {
        let area = self.pool.area;
        self.pool.refill(
            &mut self.world,
            &self.config,
            area,
            self.player.fish_size_multiplier,
            &mut self.rng,
        );
    }

    /// Build the frame the presentation layer draws.
    pub fn snapshot(&self) -> RenderSnapshot {
        snapshot::capture(
            &self.world,
            &self.player,
            &self.config,
            self.area,
            &self.pool,
            self.ui_mode,
        )
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn area(&self) -> Area {
        self.area
    }

    pub fn pool(&self) -> &FishPool {
        &self.pool
    }

    pub fn ui_mode(&self) -> UiMode {
        self.ui_mode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Simulated milliseconds since the engine started
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    fn reset_timers(&mut self) {
        self.last_auto_collect = self.clock_ms;
        self.last_breeding = self.clock_ms;
    }

    /// Save game state to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_game(writer, &self.world, &self.player, self.area, &self.pool)
    }

    /// Load game state from a reader. On error the current state is kept.
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let loaded = persistence::load_game(reader)?;

        self.world = loaded.world;
        self.player = loaded.player;
        self.player.normalize(&self.config);
        self.area = if self.player.is_unlocked(loaded.area) {
            loaded.area
        } else {
            Area::STARTING
        };
        self.pool = FishPool::new(loaded.pool_area);
        self.ui_mode = UiMode::Normal;

        // Timers restart from the load time
        self.reset_timers();
        self.respawn_pool();

        log::info!(
            "Loaded game: level {}, {} coins, area {}",
            self.player.level(),
            self.player.coins,
            self.area
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishtank_logic::pattern::Pattern;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 42)
    }

    fn spawn_stored(engine: &mut GameEngine, pattern: Pattern) -> Entity {
        let fish = engine.world.spawn((
            Fish::new(Rgb::ORANGE, pattern, 1.0),
            Position::default(),
            Velocity::new(1.0, 0.0),
            Location::Storage,
        ));
        engine.player.stored_fish.push(fish);
        fish
    }

    fn click_center(engine: &mut GameEngine, rect: layout::Rect) {
        let (x, y) = rect.center();
        engine.handle_input(InputEvent::click(x, y));
    }

    #[test]
    fn test_new_engine() {
        let engine = engine();
        assert!(engine.is_running());
        assert_eq!(engine.area(), Area::Pond);
        assert_eq!(engine.pool().len(), 50);
        assert_eq!(engine.world.len(), 50);
        assert_eq!(engine.ui_mode(), UiMode::Normal);
    }

    #[test]
    fn test_quit_stops_engine() {
        let mut engine = engine();
        engine.handle_input(InputEvent::Quit);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_click_collects_fish_under_cursor() {
        let mut engine = engine();
        let target = engine.pool().members[0];
        let pos = *engine.world.get::<&Position>(target).unwrap();

        engine.handle_input(InputEvent::click(pos.x + 1.0, pos.y + 1.0));

        assert!(!engine.pool().contains(target));
        assert!(engine.player.coins >= 1);
        assert_eq!(engine.player.coins, engine.player.collected_fish.len() as u64);
    }

    #[test]
    fn test_auto_collect_needs_upgrade() {
        let mut engine = engine();
        for _ in 0..10 {
            engine.tick(1000.0);
        }
        assert_eq!(engine.player.coins, 0);

        engine.player.coins = 100;
        engine.purchase_upgrade(UpgradeKind::AutoCollector).unwrap();
        let interval = engine.player.auto_collect_interval;
        engine.tick(interval);
        assert_eq!(engine.player.collected_fish.len(), 1);
    }

    #[test]
    fn test_breeding_only_in_tank() {
        let mut engine = engine();
        engine.player.breeding_interval = 5000.0;
        for pattern in [Pattern::Plain, Pattern::Rainbow] {
            let fish = spawn_stored(&mut engine, pattern);
            engine.player.stored_fish.retain(|&e| e != fish);
            engine.player.tank_fish.push(fish);
        }

        engine.tick(10_000.0);
        assert_eq!(engine.player.tank_fish.len(), 2);

        engine.travel(Area::Tank).unwrap();
        engine.tick(1.0);
        assert_eq!(engine.player.tank_fish.len(), 3);
        assert_eq!(engine.player.messages.last(), Some("A new baby fish was born!"));
    }

    #[test]
    fn test_sidebar_buttons_open_shops() {
        let mut engine = engine();
        let config = engine.config().clone();

        click_center(&mut engine, layout::upgrades_button(&config));
        assert_eq!(engine.ui_mode(), UiMode::UpgradeShop);
        engine.handle_input(InputEvent::click(5.0, 5.0));
        assert_eq!(engine.ui_mode(), UiMode::Normal);

        click_center(&mut engine, layout::cosmetics_button(&config));
        assert_eq!(engine.ui_mode(), UiMode::CosmeticsShop);
        engine.handle_input(InputEvent::click(5.0, 5.0));

        click_center(&mut engine, layout::world_map_button(&config));
        assert_eq!(engine.ui_mode(), UiMode::AreaShop);
    }

    #[test]
    fn test_area_shop_unlock_then_travel() {
        let mut engine = engine();
        let config = engine.config().clone();
        engine.player.coins = 20;

        // Locked row: buys the area, stays in Pond, closes the shop
        engine.ui_mode = UiMode::AreaShop;
        click_center(&mut engine, layout::area_row(&config, 1));
        assert!(engine.player.is_unlocked(Area::Lake));
        assert_eq!(engine.area(), Area::Pond);
        assert_eq!(engine.player.coins, 0);
        assert_eq!(engine.ui_mode(), UiMode::Normal);

        engine.ui_mode = UiMode::AreaShop;
        click_center(&mut engine, layout::area_row(&config, 1));
        assert_eq!(engine.area(), Area::Lake);
        assert_eq!(engine.pool().area, Area::Lake);
        assert_eq!(engine.player.messages.last(), Some("Moved to Lake!"));
    }

    #[test]
    fn test_tank_keeps_pool() {
        let mut engine = engine();
        let before = engine.pool().members.clone();

        engine.travel(Area::Tank).unwrap();

        assert_eq!(engine.area(), Area::Tank);
        assert_eq!(engine.pool().members, before);
        assert_eq!(engine.pool().area, Area::Pond);
    }

    #[test]
    fn test_travel_to_locked_area_refused() {
        let mut engine = engine();
        assert_eq!(
            engine.travel(Area::Ocean),
            Err(GameError::AreaLocked { area: Area::Ocean })
        );
        assert_eq!(engine.area(), Area::Pond);
    }

    #[test]
    fn test_storage_slot_click_sells_outside_tank() {
        let mut engine = engine();
        let config = engine.config().clone();
        let fish = spawn_stored(&mut engine, Pattern::Spotted);

        click_center(&mut engine, layout::storage_slot(&config, 0));

        assert!(engine.player.stored_fish.is_empty());
        assert!(!engine.world.contains(fish));
        assert_eq!(engine.player.coins, 15);
    }

    #[test]
    fn test_wrapped_storage_slot_is_clickable() {
        let mut engine = engine();
        let config = engine.config().clone();
        engine.player.storage_capacity = 35;
        let fish: Vec<_> = (0..35)
            .map(|_| spawn_stored(&mut engine, Pattern::Spotted))
            .collect();

        click_center(&mut engine, layout::storage_slot(&config, 30));

        assert_eq!(engine.ui_mode(), UiMode::Normal);
        assert_eq!(engine.player.stored_fish.len(), 34);
        assert!(!engine.world.contains(fish[30]));
        assert_eq!(engine.player.coins, 15);
    }

    #[test]
    fn test_storage_slot_click_moves_to_tank_inside_tank() {
        let mut engine = engine();
        let config = engine.config().clone();
        let fish = spawn_stored(&mut engine, Pattern::Striped);
        engine.travel(Area::Tank).unwrap();

        click_center(&mut engine, layout::storage_slot(&config, 0));

        assert!(engine.player.stored_fish.is_empty());
        assert_eq!(engine.player.tank_fish, vec![fish]);
        assert_eq!(*engine.world.get::<&Location>(fish).unwrap(), Location::Tank);
        assert_eq!(engine.player.coins, 0);
    }

    #[test]
    fn test_shop_pauses_simulation() {
        let mut engine = engine();
        engine.player.coins = 100;
        engine.purchase_upgrade(UpgradeKind::AutoCollector).unwrap();
        engine.ui_mode = UiMode::UpgradeShop;

        engine.tick(5000.0);
        assert!(engine.player.collected_fish.is_empty());

        engine.ui_mode = UiMode::Normal;
        engine.tick(1.0);
        assert_eq!(engine.player.collected_fish.len(), 1);
    }

    #[test]
    fn test_reset_clears_progress() {
        let mut engine = engine();
        engine.player.coins = 500;
        spawn_stored(&mut engine, Pattern::Plain);
        engine.travel(Area::Tank).unwrap();

        engine.reset();

        assert_eq!(engine.player.coins, 0);
        assert!(engine.player.stored_fish.is_empty());
        assert_eq!(engine.area(), Area::Pond);
        assert_eq!(engine.world.len(), 50);
    }
}
