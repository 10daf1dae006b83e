//! Screen layout used for hit-testing clicks.
//!
//! The engine owns the hit-test geometry so that input routing is
//! deterministic and testable without a window. Rectangles are derived from
//! [`GameConfig`] dimensions.

use serde::{Deserialize, Serialize};

use crate::components::Position;
use crate::config::GameConfig;

/// Height of each sidebar button
pub const BUTTON_HEIGHT: f32 = 220.0;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Bottom of the right sidebar: opens the area shop.
pub fn world_map_button(config: &GameConfig) -> Rect {
    Rect::new(
        config.width - config.sidebar_width,
        config.height - BUTTON_HEIGHT,
        config.sidebar_width,
        BUTTON_HEIGHT,
    )
}

/// Left sidebar, above the upgrades button: opens the cosmetics shop.
pub fn cosmetics_button(config: &GameConfig) -> Rect {
    Rect::new(
        0.0,
        config.height - 2.0 * BUTTON_HEIGHT,
        config.sidebar_width,
        BUTTON_HEIGHT,
    )
}

/// Bottom of the left sidebar: opens the upgrade shop.
pub fn upgrades_button(config: &GameConfig) -> Rect {
    Rect::new(
        0.0,
        config.height - BUTTON_HEIGHT,
        config.sidebar_width,
        BUTTON_HEIGHT,
    )
}

/// Top of the first storage slot
const SLOT_TOP: f32 = 150.0;
/// Slot size and the stride between neighbouring slots
const SLOT_SIZE: (f32, f32) = (40.0, 30.0);
const SLOT_STRIDE: (f32, f32) = (50.0, 40.0);

/// Storage slots that fit in one column above the world-map button.
pub fn storage_rows(config: &GameConfig) -> usize {
    let room = config.height - BUTTON_HEIGHT - SLOT_TOP - SLOT_SIZE.1;
    ((room / SLOT_STRIDE.1).floor() as usize + 1).max(1)
}

/// Storage slot `index` in the right sidebar. Slots fill a column top to
/// bottom, then wrap into the next column to the right.
pub fn storage_slot(config: &GameConfig, index: usize) -> Rect {
    let rows = storage_rows(config);
    let (column, row) = (index / rows, index % rows);
    Rect::new(
        config.width - config.sidebar_width + 10.0 + column as f32 * SLOT_STRIDE.0,
        SLOT_TOP + row as f32 * SLOT_STRIDE.1,
        SLOT_SIZE.0,
        SLOT_SIZE.1,
    )
}

/// Row `index` of the area shop.
pub fn area_row(config: &GameConfig, index: usize) -> Rect {
    Rect::new(config.width / 2.0 - 100.0, 100.0 + index as f32 * 60.0, 200.0, 50.0)
}

/// Row `index` of the upgrade and cosmetics shops.
pub fn shop_row(config: &GameConfig, index: usize) -> Rect {
    Rect::new(config.width / 2.0 - 150.0, 100.0 + index as f32 * 70.0, 300.0, 60.0)
}

/// Sprite rectangle of a fish at `position` with sprite `size`.
pub fn fish_rect(position: Position, size: (f32, f32)) -> Rect {
    Rect::new(position.x, position.y, size.0, size.1)
}

/// First row among `count` whose rectangle contains the point.
pub fn hit_row(rows: impl Fn(usize) -> Rect, count: usize, x: f32, y: f32) -> Option<usize> {
    (0..count).find(|&i| rows(i).contains(x, y))
}
