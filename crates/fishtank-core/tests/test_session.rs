//! End-to-end session tests driving the engine through its public API.

use fishtank_core::layout;
use fishtank_core::persistence::{self, SessionStart};
use fishtank_core::prelude::*;
use fishtank_core::systems::BreedOutcome;
use fishtank_logic::upgrades::{AUTO_COLLECT_FLOOR_MS, BREEDING_FLOOR_MS, MAX_LEVEL};

fn engine(seed: u64) -> GameEngine {
    GameEngine::with_seed(GameConfig::default(), seed)
}

fn click(engine: &mut GameEngine, rect: layout::Rect) {
    let (x, y) = rect.center();
    engine.handle_input(InputEvent::click(x, y));
}

/// Collect pool fish until one lands in storage.
fn catch_until_stored(engine: &mut GameEngine) -> hecs::Entity {
    engine.player.luck_multiplier = 40.0; // store chance clamps to 1.0
    let fish = engine.pool().members[0];
    engine.collect(fish).unwrap();
    fish
}

#[test]
fn purchase_debits_floor_and_raises_cost() {
    let mut engine = engine(1);
    engine.player.coins = 1_000;
    let before = engine.player.upgrade(UpgradeKind::BiggerFish).unwrap().clone();

    engine.purchase_upgrade(UpgradeKind::BiggerFish).unwrap();
    let after = engine.player.upgrade(UpgradeKind::BiggerFish).unwrap();

    assert_eq!(engine.player.coins, 1_000 - before.cost.floor() as u64);
    assert_eq!(after.level, before.level + 1);
    assert!(after.cost > before.cost);
}

#[test]
fn collected_fish_are_never_duplicated() {
    let mut engine = engine(2);
    engine.player.luck_multiplier = 8.0;

    for _ in 0..200 {
        let fish = engine.pool().members[0];
        engine.collect(fish).unwrap();

        assert!(engine.player.stored_fish.len() <= engine.player.storage_capacity);
        for stored in &engine.player.stored_fish {
            assert!(!engine.pool().contains(*stored));
            assert!(!engine.player.tank_fish.contains(stored));
        }
    }

    assert_eq!(engine.player.collected_fish.len(), 200);
    assert_eq!(engine.player.coins, 200);
    assert_eq!(engine.player.stored_fish.len(), engine.player.storage_capacity);
    let kept = engine.player.collected_fish.iter().filter(|r| r.stored).count();
    assert_eq!(kept, engine.player.storage_capacity);
}

#[test]
fn pool_refills_when_emptied() {
    let config = GameConfig {
        pool_size: 3,
        ..Default::default()
    };
    let mut engine = GameEngine::with_seed(config, 3);

    for _ in 0..3 {
        let fish = engine.pool().members[0];
        engine.collect(fish).unwrap();
    }

    assert_eq!(engine.pool().len(), 3);
    assert_eq!(engine.pool().area, Area::Pond);
}

#[test]
fn selling_spotted_fish_yields_fifteen() {
    let mut engine = engine(4);
    let fish = catch_until_stored(&mut engine);
    if let Ok(mut data) = engine.world.get::<&mut Fish>(fish) {
        data.pattern = Pattern::Spotted;
    }
    let coins = engine.player.coins;

    assert_eq!(engine.sell(fish), Ok(15));
    assert_eq!(engine.player.coins, coins + 15);
    assert!(engine.player.stored_fish.is_empty());

    // Selling again is refused without side effects
    assert_eq!(engine.sell(fish), Err(GameError::InvalidSelection));
    assert_eq!(engine.player.coins, coins + 15);
}

#[test]
fn breeding_two_parents() {
    let mut engine = engine(5);
    engine.travel(Area::Tank).unwrap();
    for pattern in [Pattern::Plain, Pattern::Rainbow] {
        let fish = catch_until_stored(&mut engine);
        if let Ok(mut data) = engine.world.get::<&mut Fish>(fish) {
            data.pattern = pattern;
        }
        engine.move_to_tank(fish).unwrap();
    }
    let colors: Vec<Rgb> = engine
        .player
        .tank_fish
        .iter()
        .map(|&e| engine.world.get::<&Fish>(e).unwrap().color)
        .collect();

    let BreedOutcome::Born(child) = engine.breed() else {
        panic!("two tank fish should breed");
    };

    assert_eq!(engine.player.tank_fish.len(), 3);
    let child = engine.world.get::<&Fish>(child).unwrap();
    assert!(matches!(child.pattern, Pattern::Plain | Pattern::Rainbow));
    assert!(colors.contains(&child.color));
}

#[test]
fn corrupt_save_starts_fresh_player() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("savegame.bin");
    std::fs::write(&path, [1u8, 2, 3, 4, 5, 6, 7]).unwrap();

    let mut engine = engine(6);
    assert_eq!(persistence::resume(&mut engine, &path), SessionStart::Corrupted);

    assert_eq!(engine.player.level(), 1);
    assert_eq!(engine.player.coins, 0);
    assert_eq!(engine.area(), Area::Pond);
    assert_eq!(engine.player.unlocked_list(), vec![Area::Pond]);
}

#[test]
fn maxed_interval_upgrades_hit_floors() {
    let mut engine = engine(7);
    engine.player.coins = u64::MAX / 4;

    for _ in 0..MAX_LEVEL {
        engine.purchase_upgrade(UpgradeKind::AutoCollector).unwrap();
        engine.purchase_upgrade(UpgradeKind::IncreasedBreeding).unwrap();
    }
    assert_eq!(
        engine.purchase_upgrade(UpgradeKind::AutoCollector),
        Err(GameError::MaxLevel)
    );

    assert!(engine.player.auto_collect_interval >= AUTO_COLLECT_FLOOR_MS);
    assert!(engine.player.breeding_interval >= BREEDING_FLOOR_MS);
}

#[test]
fn large_experience_grant_levels_repeatedly() {
    let mut engine = engine(8);
    engine.player.add_experience(1110);

    assert_eq!(engine.player.level(), 4);
    assert_eq!(engine.player.experience(), 0);
    assert_eq!(engine.player.experience_needed(), 10_000);
    assert!(engine.player.messages.contains("You've reached level 4!"));
}

#[test]
fn upgrade_shop_flow_through_input() {
    let mut engine = engine(9);
    let config = engine.config().clone();
    engine.player.coins = 100;

    click(&mut engine, layout::upgrades_button(&config));
    assert_eq!(engine.ui_mode(), UiMode::UpgradeShop);

    // Row 0 is the Auto-Collector; the shop stays open after a purchase
    click(&mut engine, layout::shop_row(&config, 0));
    assert_eq!(engine.player.upgrade_level(UpgradeKind::AutoCollector), 1);
    assert_eq!(engine.player.coins, 0);
    assert_eq!(engine.ui_mode(), UiMode::UpgradeShop);

    // Second purchase is unaffordable
    click(&mut engine, layout::shop_row(&config, 0));
    assert_eq!(engine.player.messages.last(), Some("Cannot purchase upgrade."));

    engine.handle_input(InputEvent::click(10.0, 10.0));
    assert_eq!(engine.ui_mode(), UiMode::Normal);

    // With the collector bought, ticking collects on its own
    let interval = engine.player.auto_collect_interval;
    engine.tick(interval);
    assert_eq!(engine.player.collected_fish.len(), 1);
}

#[test]
fn cosmetic_bought_in_shop_lands_on_tank_fish() {
    let mut engine = engine(10);
    let config = engine.config().clone();
    let fish = catch_until_stored(&mut engine);
    engine.player.coins = 30;
    engine.travel(Area::Tank).unwrap();
    engine.move_to_tank(fish).unwrap();

    click(&mut engine, layout::cosmetics_button(&config));
    click(&mut engine, layout::shop_row(&config, 0));
    assert_eq!(engine.player.cosmetics_inventory.len(), 1);
    engine.handle_input(InputEvent::click(10.0, 10.0));

    let pos = *engine.world.get::<&Position>(fish).unwrap();
    engine.handle_input(InputEvent::click(pos.x + 2.0, pos.y + 2.0));

    assert!(engine.player.cosmetics_inventory.is_empty());
    assert_eq!(engine.world.get::<&Fish>(fish).unwrap().cosmetics.len(), 1);
    assert_eq!(engine.player.tank_fish, vec![fish]);

    // With nothing left to apply, a click sends the fish back to storage
    engine.handle_input(InputEvent::click(pos.x + 2.0, pos.y + 2.0));
    assert!(engine.player.tank_fish.is_empty());
    assert_eq!(engine.player.stored_fish, vec![fish]);
}

#[test]
fn session_survives_quit_save_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("savegame.bin");

    let mut first = engine(11);
    assert_eq!(persistence::resume(&mut first, &path), SessionStart::NewGame);
    for _ in 0..30 {
        let fish = first.pool().members[0];
        first.collect(fish).unwrap();
    }
    first.handle_input(InputEvent::Quit);
    assert!(!first.is_running());
    persistence::save_to_path(&first, &path).unwrap();

    let mut second = engine(12);
    assert_eq!(persistence::resume(&mut second, &path), SessionStart::Loaded);
    assert_eq!(second.player.coins, 30);
    assert_eq!(second.player.level(), first.player.level());
    assert_eq!(second.player.collected_fish.len(), 30);
    assert_eq!(second.pool().len(), 50);
    assert!(second.is_running());
}
