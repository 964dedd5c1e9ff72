use std::collections::HashSet;
use std::path::PathBuf;

use crate::coords::Vec2;

use super::types::{Key, MouseButton};

/// Raw input and window state for one frame.
///
/// Two snapshots are kept by the session (current and previous); edges are
/// derived by diffing them.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    pub mouse_position: Vec2,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
    pub window_size: (u32, u32),
    pub focused: bool,
    pub mouse_focused: bool,
    pub visible: bool,
    /// Vertical wheel movement accumulated this frame.
    pub wheel: f32,
    pub dropped_files: Vec<PathBuf>,
    pub dropped_directories: Vec<PathBuf>,
    /// The OS asked the window to close during this frame.
    pub close_requested: bool,
}

impl InputSnapshot {
    /// State of a freshly opened, focused window with nothing held.
    pub fn baseline(width: u32, height: u32) -> Self {
        Self {
            mouse_position: Vec2::zero(),
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            window_size: (width, height),
            focused: true,
            mouse_focused: true,
            visible: true,
            wheel: 0.0,
            dropped_files: Vec::new(),
            dropped_directories: Vec::new(),
            close_requested: false,
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Copy of this snapshot without per-frame transients (wheel, drops, close).
    pub fn persistent(&self) -> Self {
        Self {
            wheel: 0.0,
            dropped_files: Vec::new(),
            dropped_directories: Vec::new(),
            close_requested: false,
            ..self.clone()
        }
    }

    // ── builders ──────────────────────────────────────────────────────────

    pub fn with_key(mut self, key: Key) -> Self {
        self.keys_down.insert(key);
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.buttons_down.insert(button);
        self
    }

    pub fn with_mouse(mut self, x: f32, y: f32) -> Self {
        self.mouse_position = Vec2::new(x, y);
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn with_wheel(mut self, amount: f32) -> Self {
        self.wheel = amount;
        self
    }

    pub fn with_close_requested(mut self) -> Self {
        self.close_requested = true;
        self
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::baseline(0, 0)
    }
}
