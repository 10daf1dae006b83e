//! Experience and level progression.
//!
//! Experience accumulates until it reaches the current threshold, at which
//! point the threshold is consumed, the level rises, and the threshold grows
//! tenfold. A single large grant can cross several thresholds.

use serde::{Deserialize, Serialize};

/// Threshold for the first level-up.
pub const STARTING_THRESHOLD: u64 = 10;

/// Threshold multiplier applied on every level-up.
pub const THRESHOLD_GROWTH: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub experience: u64,
    pub experience_needed: u64,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_needed: STARTING_THRESHOLD,
        }
    }
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant experience and normalize. Returns every level reached, in order.
    pub fn add_experience(&mut self, amount: u64) -> Vec<u32> {
        self.experience = self.experience.saturating_add(amount);
        let mut reached = Vec::new();
        while self.experience >= self.experience_needed {
            self.experience -= self.experience_needed;
            self.level += 1;
            self.experience_needed = self.experience_needed.saturating_mul(THRESHOLD_GROWTH);
            reached.push(self.level);
        }
        reached
    }

    /// Fraction of the way to the next level (0.0–1.0).
    pub fn progress(&self) -> f32 {
        if self.experience_needed == 0 {
            return 0.0;
        }
        (self.experience as f64 / self.experience_needed as f64) as f32
    }
}
