use std::collections::HashSet;
use std::path::PathBuf;

use crate::coords::Vec2;

use super::snapshot::InputSnapshot;
use super::types::{Key, MouseButton};

/// Platform-agnostic raw input event.
///
/// Platform backends translate native events into these and feed an
/// [`InputCollector`]; nothing downstream sees native types.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    KeyDown(Key),
    KeyUp(Key),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    CursorMoved(Vec2),
    CursorEntered,
    CursorLeft,
    Wheel(f32),
    Resized { width: u32, height: u32 },
    Focused(bool),
    Visible(bool),
    Dropped(PathBuf),
    CloseRequested,
}

/// Folds raw events into the state reported by the next snapshot.
///
/// Presses are latched until the next snapshot, so a key tapped and released
/// between two polls still reads as down for one frame.
#[derive(Debug, Clone)]
pub struct InputCollector {
    current: InputSnapshot,
    pressed_keys: HashSet<Key>,
    pressed_buttons: HashSet<MouseButton>,
}

impl InputCollector {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            current: InputSnapshot::baseline(width, height),
            pressed_keys: HashSet::new(),
            pressed_buttons: HashSet::new(),
        }
    }

    pub fn push(&mut self, event: RawEvent) {
        let s = &mut self.current;
        match event {
            RawEvent::KeyDown(Key::Unknown(_)) | RawEvent::KeyUp(Key::Unknown(_)) => {}
            RawEvent::KeyDown(key) => {
                s.keys_down.insert(key);
                self.pressed_keys.insert(key);
            }
            RawEvent::KeyUp(key) => {
                s.keys_down.remove(&key);
            }
            RawEvent::ButtonDown(button) => {
                s.buttons_down.insert(button);
                self.pressed_buttons.insert(button);
            }
            RawEvent::ButtonUp(button) => {
                s.buttons_down.remove(&button);
            }
            RawEvent::CursorMoved(p) => s.mouse_position = p,
            RawEvent::CursorEntered => s.mouse_focused = true,
            RawEvent::CursorLeft => s.mouse_focused = false,
            RawEvent::Wheel(amount) => s.wheel += amount,
            RawEvent::Resized { width, height } => s.window_size = (width, height),
            RawEvent::Focused(focused) => {
                s.focused = focused;
                if !focused {
                    // Releases never arrive for keys held while focus is gone.
                    s.keys_down.clear();
                    s.buttons_down.clear();
                    self.pressed_keys.clear();
                    self.pressed_buttons.clear();
                }
            }
            RawEvent::Visible(visible) => s.visible = visible,
            RawEvent::Dropped(path) => {
                if path.is_dir() {
                    s.dropped_directories.push(path);
                } else {
                    s.dropped_files.push(path);
                }
            }
            RawEvent::CloseRequested => s.close_requested = true,
        }
    }

    /// Returns the state for this frame and clears per-frame transients.
    ///
    /// Keys and buttons pressed since the last snapshot are reported as down
    /// even if already released; the release shows up in the snapshot after.
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        let next = self.current.persistent();
        let mut snapshot = std::mem::replace(&mut self.current, next);
        snapshot.keys_down.extend(self.pressed_keys.drain());
        snapshot.buttons_down.extend(self.pressed_buttons.drain());
        snapshot
    }

    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_persist_across_snapshots() {
        let mut c = InputCollector::new(800, 600);
        c.push(RawEvent::KeyDown(Key::A));
        assert!(c.take_snapshot().key_down(Key::A));
        assert!(c.take_snapshot().key_down(Key::A));
        c.push(RawEvent::KeyUp(Key::A));
        assert!(!c.take_snapshot().key_down(Key::A));
    }

    #[test]
    fn tap_between_polls_is_seen_for_one_frame() {
        let mut c = InputCollector::new(800, 600);
        c.push(RawEvent::KeyDown(Key::Space));
        c.push(RawEvent::KeyUp(Key::Space));
        c.push(RawEvent::ButtonDown(MouseButton::Left));
        c.push(RawEvent::ButtonUp(MouseButton::Left));

        let s = c.take_snapshot();
        assert!(s.key_down(Key::Space));
        assert!(s.button_down(MouseButton::Left));

        let s = c.take_snapshot();
        assert!(!s.key_down(Key::Space));
        assert!(!s.button_down(MouseButton::Left));
    }

    #[test]
    fn tap_yields_press_then_release_edges() {
        use crate::input::{InputEvent, detect};

        let mut c = InputCollector::new(800, 600);
        let first = c.take_snapshot();
        c.push(RawEvent::KeyDown(Key::A));
        c.push(RawEvent::KeyUp(Key::A));
        let second = c.take_snapshot();
        let third = c.take_snapshot();

        assert_eq!(
            detect(&first, &second, false),
            [InputEvent::KeyPressed { key: Key::A, repeat: false }]
        );
        assert_eq!(detect(&second, &third, false), [InputEvent::KeyReleased(Key::A)]);
    }

    #[test]
    fn wheel_and_close_are_per_frame() {
        let mut c = InputCollector::new(800, 600);
        c.push(RawEvent::Wheel(1.0));
        c.push(RawEvent::Wheel(2.0));
        c.push(RawEvent::CloseRequested);
        let s = c.take_snapshot();
        assert_eq!(s.wheel, 3.0);
        assert!(s.close_requested);

        let s = c.take_snapshot();
        assert_eq!(s.wheel, 0.0);
        assert!(!s.close_requested);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut c = InputCollector::new(800, 600);
        c.push(RawEvent::KeyDown(Key::Space));
        c.push(RawEvent::ButtonDown(MouseButton::Left));
        c.push(RawEvent::Focused(false));
        let s = c.take_snapshot();
        assert!(!s.focused);
        assert!(s.keys_down.is_empty() && s.buttons_down.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut c = InputCollector::new(1, 1);
        c.push(RawEvent::KeyDown(Key::Unknown(42)));
        assert!(c.current().keys_down.is_empty());
    }

    #[test]
    fn resize_updates_window_size() {
        let mut c = InputCollector::new(800, 600);
        c.push(RawEvent::Resized { width: 1024, height: 768 });
        assert_eq!(c.take_snapshot().window_size, (1024, 768));
    }
}
