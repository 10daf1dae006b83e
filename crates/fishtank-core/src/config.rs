//! Game configuration, fixed at engine construction.
//!
//! Defaults reproduce the classic 1920×1080 layout. A JSON file can override
//! any subset of fields; missing fields keep their defaults.

use std::collections::BTreeMap;
use std::path::Path;

use fishtank_logic::area::AreaTable;
use fishtank_logic::cosmetics::{self, CosmeticSpec};
use fishtank_logic::upgrades::UpgradeKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::{PlayArea, Rgb};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen width in pixels
    pub width: f32,
    /// Screen height in pixels
    pub height: f32,
    /// Width of each sidebar panel
    pub sidebar_width: f32,
    /// Fish may not swim left of this x
    pub left_margin: f32,
    /// Fish may not swim within this distance of the right edge
    pub right_margin: f32,
    /// Unscaled fish sprite size
    pub fish_width: f32,
    pub fish_height: f32,
    /// Fish per pool refill
    pub pool_size: usize,
    pub palette: Vec<Rgb>,
    pub areas: AreaTable,
    /// Base upgrade costs; missing kinds use the built-in table
    pub upgrade_costs: BTreeMap<UpgradeKind, f64>,
    pub cosmetics: Vec<CosmeticSpec>,
    pub storage_capacity: usize,
    /// Breeding stops once the tank holds this many fish
    pub tank_capacity: usize,
    pub auto_collect_interval_ms: f64,
    pub breeding_interval_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            sidebar_width: 220.0,
            left_margin: 220.0,
            right_margin: 320.0,
            fish_width: 60.0,
            fish_height: 30.0,
            pool_size: 50,
            palette: vec![
                Rgb::RED,
                Rgb::GREEN,
                Rgb::BLUE,
                Rgb::ORANGE,
                Rgb::PINK,
                Rgb::CYAN,
                Rgb::MAGENTA,
                Rgb::BROWN,
                Rgb::GRAY,
                Rgb::YELLOW,
                Rgb::PURPLE,
            ],
            areas: AreaTable::default(),
            upgrade_costs: UpgradeKind::ALL
                .iter()
                .map(|&k| (k, k.base_cost()))
                .collect(),
            cosmetics: cosmetics::default_catalog(),
            storage_capacity: 10,
            tank_capacity: 100,
            auto_collect_interval_ms: 1000.0,
            breeding_interval_ms: 30_000.0,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn upgrade_cost(&self, kind: UpgradeKind) -> f64 {
        self.upgrade_costs
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.base_cost())
    }

    pub fn base_sprite(&self) -> (f32, f32) {
        (self.fish_width, self.fish_height)
    }

    /// Band the fish swim in, excluding the sidebars.
    pub fn play_area(&self) -> PlayArea {
        PlayArea {
            left: self.left_margin,
            right: self.width - self.right_margin,
            top: 0.0,
            bottom: self.height,
        }
    }

    pub fn cosmetic(&self, id: u32) -> Option<&CosmeticSpec> {
        cosmetics::find(&self.cosmetics, id)
    }
}
