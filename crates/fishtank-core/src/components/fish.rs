//! Fish component and collection history records.

use fishtank_logic::area::Area;
use fishtank_logic::cosmetics::AppliedCosmetic;
use fishtank_logic::economy;
use fishtank_logic::pattern::Pattern;
use serde::{Deserialize, Serialize};

use super::Rgb;

/// Core fish data. Position, velocity, and location are separate components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    pub color: Rgb,
    pub pattern: Pattern,
    /// Sprite scale, always >= 1.0
    pub size_multiplier: f32,
    /// Applied cosmetics, in application order
    pub cosmetics: Vec<AppliedCosmetic>,
}

impl Fish {
    pub fn new(color: Rgb, pattern: Pattern, size_multiplier: f32) -> Self {
        Self {
            color,
            pattern,
            size_multiplier: size_multiplier.max(1.0),
            cosmetics: Vec::new(),
        }
    }

    pub fn with_cosmetics(mut self, cosmetics: Vec<AppliedCosmetic>) -> Self {
        self.cosmetics = cosmetics;
        self
    }

    pub fn base_value(&self) -> u32 {
        self.pattern.base_value()
    }

    pub fn sell_value(&self) -> u64 {
        economy::sell_value(self.pattern)
    }

    /// Sprite size for a base sprite of `(width, height)`.
    pub fn sprite_size(&self, base: (f32, f32)) -> (f32, f32) {
        (base.0 * self.size_multiplier, base.1 * self.size_multiplier)
    }
}

/// Append-only record of a collected fish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchRecord {
    pub color: Rgb,
    pub pattern: Pattern,
    pub area: Area,
    /// True if the fish went to storage instead of being released
    pub stored: bool,
}
