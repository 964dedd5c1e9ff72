use std::collections::HashSet;

use crate::coords::Vec2;
use crate::platform::WindowCommand;

use super::snapshot::InputSnapshot;
use super::types::{CursorKind, MouseButton};

/// Mouse state visible to game callbacks.
///
/// Setters take effect locally right away; the matching platform request is
/// queued and applied after the current callback returns.
#[derive(Debug, Clone)]
pub struct Mouse {
    position: Vec2,
    down: HashSet<MouseButton>,
    visible: bool,
    grabbed: bool,
    cursor: CursorKind,
    commands: Vec<WindowCommand>,
}

impl Default for Mouse {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            down: HashSet::new(),
            visible: true,
            grabbed: false,
            cursor: CursorKind::Default,
            commands: Vec::new(),
        }
    }
}

impl Mouse {
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.down.contains(&button)
    }

    pub fn is_any_down(&self, buttons: &[MouseButton]) -> bool {
        buttons.iter().any(|b| self.down.contains(b))
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn cursor(&self) -> CursorKind {
        self.cursor
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.commands.push(WindowCommand::SetCursorVisible(visible));
    }

    /// Confines the cursor to the window.
    pub fn set_grabbed(&mut self, grabbed: bool) {
        self.grabbed = grabbed;
        self.commands.push(WindowCommand::SetCursorGrabbed(grabbed));
    }

    pub fn set_cursor(&mut self, cursor: CursorKind) {
        self.cursor = cursor;
        self.commands.push(WindowCommand::SetCursor(cursor));
    }

    /// Warps the cursor, in window coordinates.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
        self.commands.push(WindowCommand::SetCursorPosition(self.position));
    }

    pub fn set_x(&mut self, x: f32) {
        self.set_position(x, self.position.y);
    }

    pub fn set_y(&mut self, y: f32) {
        self.set_position(self.position.x, y);
    }

    pub(crate) fn sync(&mut self, snapshot: &InputSnapshot) {
        self.position = snapshot.mouse_position;
        self.down.clone_from(&snapshot.buttons_down);
    }

    pub(crate) fn drain_commands(&mut self) -> Vec<WindowCommand> {
        std::mem::take(&mut self.commands)
    }
}
