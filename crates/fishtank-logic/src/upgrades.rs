//! Upgrades: leveled, escalating-cost modifiers to economy parameters.
//!
//! Each of the five upgrade kinds can be bought up to [`MAX_LEVEL`] times.
//! A purchase debits the floored cost, bumps the level, and inflates the cost
//! by a random factor in [`COST_GROWTH_RANGE`]. The factor is sampled by the
//! caller so these rules stay deterministic.
//!
//! ```
//! use fishtank_logic::upgrades::{Upgrade, UpgradeKind};
//!
//! let mut up = Upgrade::new(UpgradeKind::BiggerFish, 50.0);
//! let debit = up.purchase(120, 1.7).unwrap();
//! assert_eq!(debit, 50);
//! assert_eq!(up.level, 1);
//! assert!((up.cost - 85.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Maximum level any upgrade can reach.
pub const MAX_LEVEL: u32 = 5;

/// Range the cost is multiplied by after each purchase.
pub const COST_GROWTH_RANGE: (f64, f64) = (1.65, 1.75);

/// Range a timer interval is multiplied by after a speed-up purchase.
pub const INTERVAL_SHRINK_RANGE: (f64, f64) = (0.65, 0.75);

/// Auto-collect never fires more often than this (ms).
pub const AUTO_COLLECT_FLOOR_MS: f64 = 200.0;

/// Breeding never fires more often than this (ms).
pub const BREEDING_FLOOR_MS: f64 = 5000.0;

/// Fish size gained per Bigger Fish level.
pub const SIZE_STEP: f64 = 0.1;

/// Storage slots gained per Increased Storage level.
pub const STORAGE_STEP: usize = 5;

/// Luck gained per Luck Upgrade level.
pub const LUCK_STEP: f64 = 0.05;

/// The fixed set of upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeKind {
    AutoCollector,
    BiggerFish,
    IncreasedStorage,
    IncreasedBreeding,
    Luck,
}

impl UpgradeKind {
    /// Shop order.
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::AutoCollector,
        UpgradeKind::BiggerFish,
        UpgradeKind::IncreasedStorage,
        UpgradeKind::IncreasedBreeding,
        UpgradeKind::Luck,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UpgradeKind::AutoCollector => "Auto-Collector",
            UpgradeKind::BiggerFish => "Bigger Fish",
            UpgradeKind::IncreasedStorage => "Increased Storage",
            UpgradeKind::IncreasedBreeding => "Increased Breeding",
            UpgradeKind::Luck => "Luck Upgrade",
        }
    }

    /// Starting cost before any purchase.
    pub fn base_cost(self) -> f64 {
        match self {
            UpgradeKind::AutoCollector => 100.0,
            UpgradeKind::BiggerFish => 50.0,
            UpgradeKind::IncreasedStorage => 75.0,
            UpgradeKind::IncreasedBreeding => 80.0,
            UpgradeKind::Luck => 60.0,
        }
    }

    /// Whether buying this upgrade shrinks a timer interval.
    pub fn shrinks_interval(self) -> bool {
        matches!(
            self,
            UpgradeKind::AutoCollector | UpgradeKind::IncreasedBreeding
        )
    }
}

impl std::fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a purchase was refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PurchaseRefusal {
    /// Already at [`MAX_LEVEL`].
    MaxLevel,
    /// Not enough coins for the current cost.
    InsufficientFunds { cost: f64, available: u64 },
}

/// A leveled upgrade owned by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub kind: UpgradeKind,
    pub cost: f64,
    pub level: u32,
    pub max_level: u32,
}

impl Upgrade {
    pub fn new(kind: UpgradeKind, cost: f64) -> Self {
        Self {
            kind,
            cost,
            level: 0,
            max_level: MAX_LEVEL,
        }
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }

    /// Coins that a purchase would debit right now.
    pub fn debit(&self) -> u64 {
        self.cost.floor().max(0.0) as u64
    }

    pub fn check(&self, coins: u64) -> Result<(), PurchaseRefusal> {
        if self.is_maxed() {
            return Err(PurchaseRefusal::MaxLevel);
        }
        if (coins as f64) < self.cost {
            return Err(PurchaseRefusal::InsufficientFunds {
                cost: self.cost,
                available: coins,
            });
        }
        Ok(())
    }

    /// Buy one level. Returns the coins to debit; the caller applies the
    /// effect. `growth` is the sampled cost factor.
    pub fn purchase(&mut self, coins: u64, growth: f64) -> Result<u64, PurchaseRefusal> {
        self.check(coins)?;
        let debit = self.debit();
        self.level += 1;
        self.cost *= growth;
        Ok(debit)
    }
}

/// Shrink a timer interval by `factor`, never going below `floor`.
pub fn shrink_interval(current_ms: f64, factor: f64, floor_ms: f64) -> f64 {
    (current_ms * factor).max(floor_ms)
}

/// Clamp a sampled factor into `range`, guarding against callers handing in
/// values from the wrong distribution.
pub fn clamp_factor(factor: f64, range: (f64, f64)) -> f64 {
    factor.clamp(range.0, range.1)
}
