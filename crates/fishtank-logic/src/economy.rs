//! Coin and storage-chance rules.

use crate::pattern::Pattern;

/// Coins and experience granted per collected fish.
pub const COLLECT_REWARD: u64 = 1;

/// Stored fish sell for this multiple of their base value.
pub const SELL_MULTIPLIER: u64 = 5;

/// Chance (before luck) that a collected fish is kept in storage.
pub const BASE_STORE_CHANCE: f64 = 0.025;

/// Coins earned by selling a fish of `pattern`.
pub fn sell_value(pattern: Pattern) -> u64 {
    pattern.base_value() as u64 * SELL_MULTIPLIER
}

/// Probability that a collected fish is kept, clamped to `[0, 1]`.
pub fn store_probability(luck_multiplier: f64) -> f64 {
    (BASE_STORE_CHANCE * luck_multiplier).clamp(0.0, 1.0)
}

/// Whether a uniform roll in `[0, 1)` keeps the fish.
pub fn roll_keeps(roll: f64, luck_multiplier: f64) -> bool {
    roll < store_probability(luck_multiplier)
}
