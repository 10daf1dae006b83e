//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to fish entities.
//! They have no behavior - that lives in systems.

mod common;
mod fish;
mod player;

pub use common::*;
pub use fish::*;
pub use player::*;
