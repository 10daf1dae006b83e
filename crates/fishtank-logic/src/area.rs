//! Area registry: the ordered zones a player can unlock and visit.
//!
//! Areas are ordered Pond → Lake → Stream → River → Ocean, followed by the
//! special Tank. Each spawning area draws fish from its own pattern subset.
//! The Tank is never spawn-populated and is always open.

use serde::{Deserialize, Serialize};

use crate::pattern::Pattern;

/// A distinct zone of the game world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Area {
    Pond,
    Lake,
    Stream,
    River,
    Ocean,
    Tank,
}

impl Area {
    /// All areas in display and unlock order.
    pub const ALL: [Area; 6] = [
        Area::Pond,
        Area::Lake,
        Area::Stream,
        Area::River,
        Area::Ocean,
        Area::Tank,
    ];

    /// The area every new player starts in.
    pub const STARTING: Area = Area::Pond;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Area> {
        Area::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Area::Pond => "Pond",
            Area::Lake => "Lake",
            Area::Stream => "Stream",
            Area::River => "River",
            Area::Ocean => "Ocean",
            Area::Tank => "Tank",
        }
    }

    pub fn is_tank(self) -> bool {
        self == Area::Tank
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Cost to unlock the area at `index`: `(index + 1) * 10` coins.
pub fn unlock_cost(index: usize) -> u64 {
    (index as u64 + 1) * 10
}

/// Whether `area` is open to a player holding `unlocked`.
/// The Tank is always open.
pub fn is_unlocked(area: Area, unlocked: &[Area]) -> bool {
    area.is_tank() || unlocked.contains(&area)
}

/// Per-area pattern subsets used when refilling the free-swimming pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaTable {
    pub pond: Vec<Pattern>,
    pub lake: Vec<Pattern>,
    pub stream: Vec<Pattern>,
    pub river: Vec<Pattern>,
    pub ocean: Vec<Pattern>,
}

impl Default for AreaTable {
    fn default() -> Self {
        use Pattern::*;
        Self {
            pond: vec![Plain],
            lake: vec![Plain, Striped],
            stream: vec![Plain, Striped, Spotted],
            river: vec![Plain, Striped, Spotted, Glowing],
            ocean: vec![Plain, Striped, Spotted, Glowing, Rainbow],
        }
    }
}

impl AreaTable {
    /// Patterns that can spawn in `area`. The Tank (or an empty table row)
    /// falls back to plain fish only.
    pub fn patterns_for(&self, area: Area) -> &[Pattern] {
        const PLAIN_ONLY: &[Pattern] = &[Pattern::Plain];
        let row = match area {
            Area::Pond => self.pond.as_slice(),
            Area::Lake => self.lake.as_slice(),
            Area::Stream => self.stream.as_slice(),
            Area::River => self.river.as_slice(),
            Area::Ocean => self.ocean.as_slice(),
            Area::Tank => PLAIN_ONLY,
        };
        if row.is_empty() {
            PLAIN_ONLY
        } else {
            row
        }
    }
}
