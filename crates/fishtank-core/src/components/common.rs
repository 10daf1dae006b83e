//! Common components shared by every fish.

use serde::{Deserialize, Serialize};

/// RGB colour triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
    pub const PINK: Rgb = Rgb(255, 192, 203);
    pub const CYAN: Rgb = Rgb(0, 255, 255);
    pub const MAGENTA: Rgb = Rgb(255, 0, 255);
    pub const BROWN: Rgb = Rgb(165, 42, 42);
    pub const GRAY: Rgb = Rgb(190, 190, 190);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const PURPLE: Rgb = Rgb(160, 32, 240);
}

/// Top-left corner of a fish sprite in screen space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Per-tick displacement
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Velocity {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn is_static(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Heading in degrees, rotated so 0 points up (sprite convention).
    pub fn heading_degrees(&self) -> f32 {
        self.dy.atan2(self.dx).to_degrees() + 90.0
    }
}

/// Where a fish currently lives. Exactly one per fish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Free-swimming in the active area's pool
    Pool,
    /// Held in the player's bounded storage
    Storage,
    /// Swimming in the player's tank
    Tank,
}

/// Movement band for fish, excluding the sidebars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl PlayArea {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}
