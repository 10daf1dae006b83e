//! Fish generation - pool refills and fresh fish placement

mod spawn;

pub use spawn::*;
