//! Integration tests for the economy rules working together.
//!
//! Exercises: Progression → Upgrade purchases → interval floors
//! → area unlock costs → serde shape of persisted rule types.
//!
//! All tests are pure logic with fixed inputs.

use fishtank_logic::area::{unlock_cost, Area, AreaTable};
use fishtank_logic::economy::{sell_value, store_probability};
use fishtank_logic::pattern::Pattern;
use fishtank_logic::progression::Progression;
use fishtank_logic::upgrades::{
    shrink_interval, Upgrade, UpgradeKind, AUTO_COLLECT_FLOOR_MS, BREEDING_FLOOR_MS,
    COST_GROWTH_RANGE, INTERVAL_SHRINK_RANGE, MAX_LEVEL,
};

// ── Progression ────────────────────────────────────────────────────────

#[test]
fn experience_grant_is_split_invariant() {
    for total in [0u64, 1, 9, 10, 25, 109, 110, 1110, 5000, 12_345] {
        let mut once = Progression::new();
        once.add_experience(total);

        let mut piecewise = Progression::new();
        for _ in 0..total {
            piecewise.add_experience(1);
        }

        assert_eq!(once, piecewise, "grant of {} diverged", total);
        assert!(once.experience < once.experience_needed);
    }
}

// ── Upgrades ───────────────────────────────────────────────────────────

#[test]
fn full_upgrade_ladder_keeps_cost_rising() {
    for kind in UpgradeKind::ALL {
        let mut up = Upgrade::new(kind, kind.base_cost());
        let mut coins = 1_000_000u64;
        for step in 0..MAX_LEVEL {
            let before_cost = up.cost;
            let before_coins = coins;
            // Alternate between the extremes of the growth range.
            let growth = if step % 2 == 0 {
                COST_GROWTH_RANGE.0
            } else {
                COST_GROWTH_RANGE.1
            };
            let debit = up.purchase(coins, growth).unwrap();
            coins -= debit;

            assert_eq!(before_coins - coins, before_cost.floor() as u64);
            assert_eq!(up.level, step + 1);
            assert!(up.cost > before_cost);
        }
        assert!(up.is_maxed());
    }
}

#[test]
fn intervals_never_cross_floors() {
    let mut auto = 1000.0;
    let mut breed = 30_000.0;
    for _ in 0..MAX_LEVEL * 3 {
        let next_auto = shrink_interval(auto, INTERVAL_SHRINK_RANGE.0, AUTO_COLLECT_FLOOR_MS);
        let next_breed = shrink_interval(breed, INTERVAL_SHRINK_RANGE.0, BREEDING_FLOOR_MS);
        assert!(next_auto <= auto);
        assert!(next_breed <= breed);
        assert!(next_auto >= AUTO_COLLECT_FLOOR_MS);
        assert!(next_breed >= BREEDING_FLOOR_MS);
        auto = next_auto;
        breed = next_breed;
    }
}

// ── Areas & selling ────────────────────────────────────────────────────

#[test]
fn unlocking_every_area_costs_one_fifty() {
    let total: u64 = Area::ALL
        .iter()
        .filter(|a| !a.is_tank() && **a != Area::STARTING)
        .map(|a| unlock_cost(a.index()))
        .sum();
    assert_eq!(total, 20 + 30 + 40 + 50);
}

#[test]
fn richer_areas_sell_for_more_on_average() {
    let table = AreaTable::default();
    let avg = |area: Area| {
        let patterns = table.patterns_for(area);
        patterns.iter().map(|p| sell_value(*p)).sum::<u64>() as f64 / patterns.len() as f64
    };
    assert!(avg(Area::Pond) < avg(Area::Lake));
    assert!(avg(Area::River) < avg(Area::Ocean));
    assert_eq!(avg(Area::Ocean), 15.0);
}

#[test]
fn luck_eventually_guarantees_storage() {
    assert!(store_probability(1.0) < 1.0);
    assert_eq!(store_probability(40.0), 1.0);
}

// ── Serialized shapes ──────────────────────────────────────────────────

#[test]
fn rule_types_roundtrip_through_json() {
    let up = Upgrade::new(UpgradeKind::IncreasedStorage, 75.0);
    let json = serde_json::to_string(&up).unwrap();
    let back: Upgrade = serde_json::from_str(&json).unwrap();
    assert_eq!(back, up);

    let table: AreaTable = serde_json::from_str(r#"{ "pond": ["Striped"] }"#).unwrap();
    assert_eq!(table.patterns_for(Area::Pond), &[Pattern::Striped]);
    assert_eq!(table.patterns_for(Area::Ocean).len(), 5);
}
