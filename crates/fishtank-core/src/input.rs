//! Input events fed in by the presentation layer, and the UI mode they
//! are routed through.

use serde::{Deserialize, Serialize};

/// A single input event in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Mouse button pressed at `(x, y)`
    Click { x: f32, y: f32 },
    /// Window close or quit request
    Quit,
}

impl InputEvent {
    pub fn click(x: f32, y: f32) -> Self {
        InputEvent::Click { x, y }
    }
}

/// Which screen is receiving clicks. Shops are modal overlays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiMode {
    /// Main play view
    #[default]
    Normal,
    AreaShop,
    UpgradeShop,
    CosmeticsShop,
}

impl UiMode {
    pub fn is_shop(self) -> bool {
        self != UiMode::Normal
    }

    pub fn title(self) -> Option<&'static str> {
        match self {
            UiMode::Normal => None,
            UiMode::AreaShop => Some("Area Shop"),
            UiMode::UpgradeShop => Some("Upgrade Shop"),
            UiMode::CosmeticsShop => Some("Cosmetics Shop"),
        }
    }
}
