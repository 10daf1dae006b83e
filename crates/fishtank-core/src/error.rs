//! Recoverable gameplay errors.
//!
//! None of these are fatal. Every engine operation that fails has already
//! pushed a player-visible message and left the state untouched.

use fishtank_logic::area::Area;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("not enough coins: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("capacity of {capacity} reached")]
    CapacityExceeded { capacity: usize },
    #[error("selection is no longer present")]
    InvalidSelection,
    #[error("upgrade is already at max level")]
    MaxLevel,
    #[error("action not available in {area}")]
    WrongArea { area: Area },
    #[error("{area} is locked")]
    AreaLocked { area: Area },
    #[error("no cosmetics to apply")]
    NothingToApply,
}
