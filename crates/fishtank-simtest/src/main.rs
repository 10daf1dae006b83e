//! Fishtank Headless Session Harness
//!
//! Drives the game engine with scripted input events and frame ticks.
//! Runs entirely in-process: no window, no audio, no rendering.
//!
//! Usage:
//!   cargo run -p fishtank-simtest
//!   cargo run -p fishtank-simtest -- --verbose
//!   cargo run -p fishtank-simtest -- --ticks 3600 --save /tmp/fishtank.bin --config tuning.json

use std::path::PathBuf;

use clap::Parser;

use fishtank_core::layout;
use fishtank_core::persistence::{self, SessionStart};
use fishtank_core::prelude::*;
use fishtank_core::systems::BreedOutcome;
use fishtank_logic::upgrades::{AUTO_COLLECT_FLOOR_MS, BREEDING_FLOOR_MS};

/// One 60 FPS frame
const FRAME_MS: f64 = 1000.0 / 60.0;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Parser)]
#[command(name = "fishtank-simtest")]
#[command(about = "Headless session harness for Fishtank")]
struct Options {
    /// Print every result and debug-level logs
    #[arg(long)]
    verbose: bool,
    /// Frames to run in the idle check
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Save file used by the persistence check
    #[arg(long = "save", value_name = "PATH", default_value_os_t = default_save_path())]
    save_path: PathBuf,
    /// JSON file with config overrides
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
}

fn default_save_path() -> PathBuf {
    std::env::temp_dir().join("fishtank-simtest.bin")
}

fn main() {
    let options = Options::parse();

    let default_level = if options.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &options.config_path {
        Some(path) => match GameConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        None => GameConfig::default(),
    };

    println!("=== Fishtank Session Harness ===\n");

    let mut results = Vec::new();

    // 1. Collection by clicking
    results.extend(validate_collection(&config, options.verbose));

    // 2. Shops driven through the UI
    results.extend(validate_shops(&config, options.verbose));

    // 3. Tank transfers and breeding
    results.extend(validate_tank(&config, options.verbose));

    // 4. Long idle run
    results.extend(validate_idle_run(&config, options.ticks, options.verbose));

    // 5. Quit, save, reload
    results.extend(validate_persistence(&config, &options));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn click(engine: &mut GameEngine, rect: layout::Rect) {
    let (x, y) = rect.center();
    engine.handle_input(InputEvent::click(x, y));
}

fn close_shop(engine: &mut GameEngine) {
    engine.handle_input(InputEvent::click(5.0, 5.0));
}

/// Click on the first pool fish until one is kept in storage.
fn catch_one(engine: &mut GameEngine, attempts: usize) -> Option<hecs::Entity> {
    let luck = engine.player.luck_multiplier;
    engine.player.luck_multiplier = 1.0 / 0.025;
    let mut kept = None;
    for _ in 0..attempts {
        let stored_before = engine.player.stored_fish.len();
        let Some(&fish) = engine.pool().members.first() else {
            break;
        };
        if engine.collect(fish).is_ok() && engine.player.stored_fish.len() > stored_before {
            kept = Some(fish);
            break;
        }
    }
    engine.player.luck_multiplier = luck;
    kept
}

// ── 1. Collection ───────────────────────────────────────────────────────

fn validate_collection(config: &GameConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Collection ---");
    let mut results = Vec::new();
    let mut engine = GameEngine::with_seed(config.clone(), 1);

    let pool_before = engine.pool().len();
    let mut clicks = 0;
    for _ in 0..25 {
        let Some(&fish) = engine.pool().members.first() else {
            break;
        };
        let Ok(pos) = engine.world.get::<&Position>(fish).map(|p| *p) else {
            continue;
        };
        engine.handle_input(InputEvent::click(pos.x + 1.0, pos.y + 1.0));
        clicks += 1;
    }

    let collected = engine.player.collected_fish.len();
    results.push(TestResult {
        name: "collect_by_click".into(),
        passed: collected >= clicks,
        detail: format!("{} clicks collected {} fish", clicks, collected),
    });

    results.push(TestResult {
        name: "collect_rewards".into(),
        passed: engine.player.coins == collected as u64,
        detail: format!("{} coins for {} fish", engine.player.coins, collected),
    });

    let in_pool = engine
        .player
        .stored_fish
        .iter()
        .filter(|&&e| engine.pool().contains(e))
        .count();
    results.push(TestResult {
        name: "collect_no_duplicates".into(),
        passed: in_pool == 0,
        detail: format!("{} stored fish still in the pool", in_pool),
    });

    let pool_ok = !engine.pool().is_empty() && engine.pool().len() <= config.pool_size;
    results.push(TestResult {
        name: "collect_pool_bounded".into(),
        passed: pool_ok,
        detail: format!("pool {} -> {}", pool_before, engine.pool().len()),
    });

    if verbose {
        println!(
            "  Level {} ({}/{} exp)",
            engine.player.level(),
            engine.player.experience(),
            engine.player.experience_needed()
        );
    }

    results
}

// ── 2. Shops ────────────────────────────────────────────────────────────

fn validate_shops(config: &GameConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Shops ---");
    let mut results = Vec::new();
    let mut engine = GameEngine::with_seed(config.clone(), 2);

    // Upgrade shop: buy the Auto-Collector with exactly enough coins
    let cost = engine
        .player
        .upgrade(UpgradeKind::AutoCollector)
        .map(|u| u.debit())
        .unwrap_or(0);
    engine.player.coins = cost;
    click(&mut engine, layout::upgrades_button(config));
    click(&mut engine, layout::shop_row(config, 0));
    let level = engine.player.upgrade_level(UpgradeKind::AutoCollector);
    results.push(TestResult {
        name: "shop_upgrade_purchase".into(),
        passed: level == 1 && engine.player.coins == 0,
        detail: format!("level {} coins left {}", level, engine.player.coins),
    });

    click(&mut engine, layout::shop_row(config, 0));
    results.push(TestResult {
        name: "shop_upgrade_refused".into(),
        passed: engine.player.messages.last() == Some("Cannot purchase upgrade."),
        detail: format!("{:?}", engine.player.messages.last()),
    });
    close_shop(&mut engine);

    // Area shop: first click unlocks, second click travels
    engine.player.coins = 20;
    click(&mut engine, layout::world_map_button(config));
    click(&mut engine, layout::area_row(config, Area::Lake.index()));
    let unlocked = engine.player.is_unlocked(Area::Lake) && engine.area() == Area::Pond;
    click(&mut engine, layout::world_map_button(config));
    click(&mut engine, layout::area_row(config, Area::Lake.index()));
    results.push(TestResult {
        name: "shop_area_unlock_and_travel".into(),
        passed: unlocked && engine.area() == Area::Lake && engine.ui_mode() == UiMode::Normal,
        detail: format!("unlocked={} now in {}", unlocked, engine.area()),
    });

    // Cosmetics shop
    engine.player.coins = 30;
    click(&mut engine, layout::cosmetics_button(config));
    click(&mut engine, layout::shop_row(config, 0));
    close_shop(&mut engine);
    results.push(TestResult {
        name: "shop_cosmetic_purchase".into(),
        passed: engine.player.cosmetics_inventory.len() == 1,
        detail: format!("{} cosmetics owned", engine.player.cosmetics_inventory.len()),
    });

    results
}

// ── 3. Tank ─────────────────────────────────────────────────────────────

fn validate_tank(config: &GameConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Tank & Breeding ---");
    let mut results = Vec::new();
    let mut engine = GameEngine::with_seed(config.clone(), 3);

    let parents: Vec<_> = (0..2).filter_map(|_| catch_one(&mut engine, 10)).collect();
    click(&mut engine, layout::world_map_button(config));
    click(&mut engine, layout::area_row(config, Area::Tank.index()));

    // Storage slot clicks move fish into the tank; slot 0 shifts each time
    for _ in &parents {
        click(&mut engine, layout::storage_slot(config, 0));
    }
    results.push(TestResult {
        name: "tank_transfer".into(),
        passed: engine.player.tank_fish.len() == 2 && engine.player.stored_fish.is_empty(),
        detail: format!(
            "tank {} storage {}",
            engine.player.tank_fish.len(),
            engine.player.stored_fish.len()
        ),
    });

    let born = matches!(engine.breed(), BreedOutcome::Born(_));
    results.push(TestResult {
        name: "tank_breed".into(),
        passed: born && engine.player.tank_fish.len() == 3,
        detail: format!("tank population {}", engine.player.tank_fish.len()),
    });

    // Timer-driven breeding inside the tank
    let interval = engine.player.breeding_interval;
    let frames = (interval / FRAME_MS).ceil() as u32 + 1;
    for _ in 0..frames {
        engine.tick(FRAME_MS);
    }
    results.push(TestResult {
        name: "tank_timer_breeds".into(),
        passed: engine.player.tank_fish.len() >= 4,
        detail: format!(
            "{} frames, population {}",
            frames,
            engine.player.tank_fish.len()
        ),
    });

    if verbose {
        for sprite in engine.snapshot().fish {
            println!(
                "  {:>8} fish at ({:.0}, {:.0}) heading {:.0}°",
                sprite.pattern, sprite.position.x, sprite.position.y, sprite.heading
            );
        }
    }

    results
}

// ── 4. Idle run ─────────────────────────────────────────────────────────

fn validate_idle_run(config: &GameConfig, ticks: u32, verbose: bool) -> Vec<TestResult> {
    println!("--- Idle Run ({} frames) ---", ticks);
    let mut results = Vec::new();
    let mut engine = GameEngine::with_seed(config.clone(), 4);

    engine.player.coins = 1_000_000;
    for kind in [UpgradeKind::AutoCollector, UpgradeKind::IncreasedBreeding] {
        while engine.purchase_upgrade(kind).is_ok() {}
    }
    engine.player.coins = 0;

    results.push(TestResult {
        name: "idle_interval_floors".into(),
        passed: engine.player.auto_collect_interval >= AUTO_COLLECT_FLOOR_MS
            && engine.player.breeding_interval >= BREEDING_FLOOR_MS,
        detail: format!(
            "auto {:.0}ms breeding {:.0}ms",
            engine.player.auto_collect_interval, engine.player.breeding_interval
        ),
    });

    for _ in 0..ticks {
        engine.tick(FRAME_MS);
    }

    // Timers are checked once per frame, so each period rounds up to whole frames
    let period = (engine.player.auto_collect_interval / FRAME_MS).ceil() as usize;
    let low = ticks as usize / (period + 1);
    let high = ticks as usize / period.max(1) + 1;
    let collected = engine.player.collected_fish.len();
    results.push(TestResult {
        name: "idle_auto_collect_rate".into(),
        passed: (low..=high).contains(&collected),
        detail: format!("{} collected, {}..={} expected", collected, low, high),
    });

    let bounds = config.play_area();
    let snapshot = engine.snapshot();
    let escaped = snapshot
        .fish
        .iter()
        .filter(|f| {
            f.position.x + f.size.0 < bounds.left - 5.0
                || f.position.x > bounds.right + 5.0
                || f.position.y + f.size.1 < bounds.top - 5.0
                || f.position.y > bounds.bottom + 5.0
        })
        .count();
    results.push(TestResult {
        name: "idle_fish_in_bounds".into(),
        passed: escaped == 0,
        detail: format!("{} of {} fish outside the play area", escaped, snapshot.fish.len()),
    });

    if verbose {
        match serde_json::to_string_pretty(&snapshot.sidebar) {
            Ok(json) => println!("{}", json),
            Err(e) => println!("  snapshot not serializable: {}", e),
        }
    }

    results
}

// ── 5. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(config: &GameConfig, options: &Options) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();
    let path = &options.save_path;

    let mut first = GameEngine::new(config.clone());
    let start = persistence::resume(&mut first, path);
    log::info!("Session start: {:?}", start);
    for _ in 0..40 {
        let Some(&fish) = first.pool().members.first() else {
            break;
        };
        let _ = first.collect(fish);
    }
    let kept = catch_one(&mut first, 10);

    first.handle_input(InputEvent::Quit);
    if let Err(e) = persistence::save_to_path(&first, path) {
        eprintln!("error: failed to save {}: {}", path.display(), e);
        std::process::exit(1);
    }

    let mut second = GameEngine::new(config.clone());
    let reload = persistence::resume(&mut second, path);
    results.push(TestResult {
        name: "persist_reload".into(),
        passed: reload == SessionStart::Loaded,
        detail: format!("{:?}", reload),
    });

    results.push(TestResult {
        name: "persist_player".into(),
        passed: second.player.coins == first.player.coins
            && second.player.progression == first.player.progression,
        detail: format!(
            "coins {} -> {}, level {} -> {}",
            first.player.coins,
            second.player.coins,
            first.player.level(),
            second.player.level()
        ),
    });

    results.push(TestResult {
        name: "persist_storage".into(),
        passed: kept.is_none()
            || second.player.stored_fish.len() == first.player.stored_fish.len(),
        detail: format!("{} stored fish", second.player.stored_fish.len()),
    });

    results.push(TestResult {
        name: "persist_messages".into(),
        passed: second.player.messages.last() == Some("Game Loaded!"),
        detail: format!("{:?}", second.player.messages.last()),
    });

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = Options::try_parse_from(["fishtank-simtest"]).unwrap();
        assert!(!options.verbose);
        assert_eq!(options.ticks, 600);
        assert_eq!(options.save_path, default_save_path());
        assert!(options.config_path.is_none());
    }

    #[test]
    fn test_options_with_values() {
        let options = Options::try_parse_from([
            "fishtank-simtest",
            "--verbose",
            "--ticks",
            "3600",
            "--save",
            "/tmp/fishtank.bin",
            "--config",
            "tuning.json",
        ])
        .unwrap();
        assert!(options.verbose);
        assert_eq!(options.ticks, 3600);
        assert_eq!(options.save_path, PathBuf::from("/tmp/fishtank.bin"));
        assert_eq!(options.config_path, Some(PathBuf::from("tuning.json")));
    }

    #[test]
    fn test_options_reject_bad_ticks() {
        assert!(Options::try_parse_from(["fishtank-simtest", "--ticks", "many"]).is_err());
        assert!(Options::try_parse_from(["fishtank-simtest", "--frames", "10"]).is_err());
    }
}
