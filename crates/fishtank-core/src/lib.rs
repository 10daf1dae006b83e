//! Fishtank Core - Idle Fish Collector Simulation Engine
//!
//! The simulation core of a single-player idle game: players tap fish to
//! earn coins and experience, buy upgrades that automate collection, unlock
//! new areas, and breed fish in a dedicated tank.
//!
//! # Architecture
//!
//! Fish live in an ECS world via `hecs`:
//! - **Entities**: fish, addressed by stable `hecs::Entity` handles
//! - **Components**: pure data ([`Fish`](components::Fish), positions, velocities, location)
//! - **Systems**: logic that moves, collects, sells, and breeds fish
//!
//! The [`Player`](components::Player) aggregate is an engine-level resource
//! that owns the ordered storage and tank handle lists. Moving a fish between
//! the pool, storage, and tank relocates its handle; it is never copied.
//!
//! The presentation layer feeds [`InputEvent`](input::InputEvent)s and frame
//! ticks in, and reads back a [`RenderSnapshot`](snapshot::RenderSnapshot).
//!
//! # Example
//!
//! ```rust,no_run
//! use fishtank_core::prelude::*;
//!
//! let mut engine = GameEngine::new(GameConfig::default());
//!
//! while engine.is_running() {
//!     engine.tick(1000.0 / 60.0); // 60 FPS
//!     let _frame = engine.snapshot();
//! #   break;
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod input;
pub mod layout;
pub mod persistence;
pub mod snapshot;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::GameConfig;
    pub use crate::engine::GameEngine;
    pub use crate::error::GameError;
    pub use crate::input::{InputEvent, UiMode};
    pub use fishtank_logic::area::Area;
    pub use fishtank_logic::pattern::Pattern;
    pub use fishtank_logic::upgrades::UpgradeKind;
}
