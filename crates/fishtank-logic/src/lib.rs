//! Pure game rules for Fishtank.
//!
//! This crate contains the rules of the idle fish-collecting game that are
//! independent of the ECS world, the random source, and any storage device.
//! Functions take plain data (plus already-sampled random factors) and return
//! results, making them unit-testable and deterministic.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`area`] | Ordered zones, per-area pattern tables, unlock costs |
//! | [`cosmetics`] | Cosmetic catalog entries and applied overlays |
//! | [`economy`] | Sell values and the storage-chance roll threshold |
//! | [`messages`] | Bounded player-visible message log |
//! | [`pattern`] | Fish patterns and their base coin values |
//! | [`progression`] | Experience, levels, and threshold growth |
//! | [`upgrades`] | Upgrade kinds, cost table, purchase math, interval floors |

pub mod area;
pub mod cosmetics;
pub mod economy;
pub mod messages;
pub mod pattern;
pub mod progression;
pub mod upgrades;
