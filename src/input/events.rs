use serde::{Deserialize, Serialize};

/// Keyboard key codes the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    PageUp,
    PageDown,
    Other(u32),
}

/// Navigation gesture produced by a key press or an on-screen button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavAction {
    /// Pan by whole steps; positive `dx` is east, positive `dy` is north
    Pan { dx: i32, dy: i32 },
    ZoomIn,
    ZoomOut,
}

impl NavAction {
    pub const NORTH: NavAction = NavAction::Pan { dx: 0, dy: 1 };
    pub const SOUTH: NavAction = NavAction::Pan { dx: 0, dy: -1 };
    pub const WEST: NavAction = NavAction::Pan { dx: -1, dy: 0 };
    pub const EAST: NavAction = NavAction::Pan { dx: 1, dy: 0 };

    /// WASD and arrows pan, PageUp/PageDown zoom
    pub fn from_key(key: KeyCode) -> Option<NavAction> {
        match key {
            KeyCode::W | KeyCode::ArrowUp => Some(Self::NORTH),
            KeyCode::S | KeyCode::ArrowDown => Some(Self::SOUTH),
            KeyCode::A | KeyCode::ArrowLeft => Some(Self::WEST),
            KeyCode::D | KeyCode::ArrowRight => Some(Self::EAST),
            KeyCode::PageUp => Some(Self::ZoomIn),
            KeyCode::PageDown => Some(Self::ZoomOut),
            KeyCode::Other(_) => None,
        }
    }

    pub fn is_pan(&self) -> bool {
        matches!(self, NavAction::Pan { .. })
    }
}
