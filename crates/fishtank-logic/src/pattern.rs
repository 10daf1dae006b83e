//! Fish patterns and their base coin values.

use serde::{Deserialize, Serialize};

/// Visual pattern of a fish. Determines its base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pattern {
    Plain,
    Striped,
    Spotted,
    Glowing,
    Rainbow,
}

impl Pattern {
    /// All patterns, cheapest first.
    pub const ALL: [Pattern; 5] = [
        Pattern::Plain,
        Pattern::Striped,
        Pattern::Spotted,
        Pattern::Glowing,
        Pattern::Rainbow,
    ];

    /// Fixed base value (1..=5).
    pub fn base_value(self) -> u32 {
        match self {
            Pattern::Plain => 1,
            Pattern::Striped => 2,
            Pattern::Spotted => 3,
            Pattern::Glowing => 4,
            Pattern::Rainbow => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Plain => "plain",
            Pattern::Striped => "striped",
            Pattern::Spotted => "spotted",
            Pattern::Glowing => "glowing",
            Pattern::Rainbow => "rainbow",
        }
    }

    /// Parse a lowercase pattern name.
    pub fn from_name(name: &str) -> Option<Pattern> {
        Pattern::ALL.iter().copied().find(|p| p.name() == name)
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Base value looked up by name; unknown names are worth 1.
pub fn base_value_for_name(name: &str) -> u32 {
    Pattern::from_name(name).map(Pattern::base_value).unwrap_or(1)
}
