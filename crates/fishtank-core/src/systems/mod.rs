//! Systems - logic that operates on fish components and the player

mod breeding;
mod collection;
mod movement;
mod shop;

pub use breeding::*;
pub use collection::*;
pub use movement::*;
pub use shop::*;
