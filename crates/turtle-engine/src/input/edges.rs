//! Edge detection between two input snapshots.
//!
//! Per tracked control the states are `Up → Pressed → Held → Released → Up`.
//! Events are emitted in a fixed order every frame:
//!
//! 1. dropped files, dropped directories
//! 2. focus, mouse focus, resize, visibility
//! 3. keys, in [`TRACKED_KEYS`] order
//! 4. mouse move
//! 5. mouse buttons, in [`TRACKED_BUTTONS`] order
//! 6. wheel

use std::path::PathBuf;

use super::snapshot::InputSnapshot;
use super::types::{Key, MouseButton, TRACKED_BUTTONS, TRACKED_KEYS};

/// An edge derived from two consecutive snapshots.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    FilesDropped(Vec<PathBuf>),
    DirectoriesDropped(Vec<PathBuf>),
    Focus(bool),
    MouseFocus(bool),
    Resize { width: u32, height: u32 },
    Visible(bool),
    KeyPressed { key: Key, repeat: bool },
    KeyReleased(Key),
    MouseMoved { x: f32, y: f32, dx: f32, dy: f32 },
    MousePressed { x: f32, y: f32, button: MouseButton },
    MouseReleased { x: f32, y: f32, button: MouseButton },
    WheelMoved(f32),
}

impl InputEvent {
    /// Window-level events keep flowing while the error screen is shown.
    pub fn is_window_level(&self) -> bool {
        matches!(
            self,
            InputEvent::Focus(_)
                | InputEvent::MouseFocus(_)
                | InputEvent::Resize { .. }
                | InputEvent::Visible(_)
        )
    }
}

/// Receiver of detected edges.
///
/// `key_repeat` is queried for every key at the moment it is evaluated, so a
/// callback toggling repeat mode affects the keys that come after it in the
/// same frame.
pub trait EdgeSink {
    fn key_repeat(&self) -> bool;
    fn emit(&mut self, event: InputEvent);
}

/// Diffs `prev` against `cur` and feeds every edge to `sink` in dispatch order.
pub fn dispatch_edges(prev: &InputSnapshot, cur: &InputSnapshot, sink: &mut impl EdgeSink) {
    if !cur.dropped_files.is_empty() {
        sink.emit(InputEvent::FilesDropped(cur.dropped_files.clone()));
    }
    if !cur.dropped_directories.is_empty() {
        sink.emit(InputEvent::DirectoriesDropped(cur.dropped_directories.clone()));
    }

    if cur.focused != prev.focused {
        sink.emit(InputEvent::Focus(cur.focused));
    }
    if cur.mouse_focused != prev.mouse_focused {
        sink.emit(InputEvent::MouseFocus(cur.mouse_focused));
    }
    if cur.window_size != prev.window_size {
        let (width, height) = cur.window_size;
        sink.emit(InputEvent::Resize { width, height });
    }
    if cur.visible != prev.visible {
        sink.emit(InputEvent::Visible(cur.visible));
    }

    for &key in TRACKED_KEYS {
        match (prev.key_down(key), cur.key_down(key)) {
            (false, true) => sink.emit(InputEvent::KeyPressed { key, repeat: false }),
            (true, true) if sink.key_repeat() => {
                sink.emit(InputEvent::KeyPressed { key, repeat: true });
            }
            (true, false) => sink.emit(InputEvent::KeyReleased(key)),
            _ => {}
        }
    }

    let (p, c) = (prev.mouse_position, cur.mouse_position);
    if p != c {
        sink.emit(InputEvent::MouseMoved { x: c.x, y: c.y, dx: c.x - p.x, dy: c.y - p.y });
    }

    for &button in TRACKED_BUTTONS {
        let (x, y) = (c.x, c.y);
        match (prev.button_down(button), cur.button_down(button)) {
            (false, true) => sink.emit(InputEvent::MousePressed { x, y, button }),
            (true, false) => sink.emit(InputEvent::MouseReleased { x, y, button }),
            _ => {}
        }
    }

    if cur.wheel != 0.0 {
        sink.emit(InputEvent::WheelMoved(cur.wheel));
    }
}

/// Collects every edge with a fixed repeat mode.
pub fn detect(prev: &InputSnapshot, cur: &InputSnapshot, key_repeat: bool) -> Vec<InputEvent> {
    struct Collect {
        repeat: bool,
        events: Vec<InputEvent>,
    }

    impl EdgeSink for Collect {
        fn key_repeat(&self) -> bool {
            self.repeat
        }

        fn emit(&mut self, event: InputEvent) {
            self.events.push(event);
        }
    }

    let mut sink = Collect { repeat: key_repeat, events: Vec::new() };
    dispatch_edges(prev, cur, &mut sink);
    sink.events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(states: &[bool]) -> Vec<InputSnapshot> {
        states
            .iter()
            .map(|&down| {
                let s = InputSnapshot::baseline(800, 600);
                if down { s.with_key(Key::A) } else { s }
            })
            .collect()
    }

    fn run(states: &[bool], repeat: bool) -> Vec<Vec<InputEvent>> {
        let snaps = frames(states);
        let mut prev = InputSnapshot::baseline(800, 600);
        snaps
            .iter()
            .map(|cur| {
                let events = detect(&prev, cur, repeat);
                prev = cur.clone();
                events
            })
            .collect()
    }

    // ── key edges ─────────────────────────────────────────────────────────

    #[test]
    fn press_hold_release_without_repeat() {
        let out = run(&[false, true, true, false], false);
        assert_eq!(out[0], vec![]);
        assert_eq!(out[1], vec![InputEvent::KeyPressed { key: Key::A, repeat: false }]);
        assert_eq!(out[2], vec![]);
        assert_eq!(out[3], vec![InputEvent::KeyReleased(Key::A)]);
    }

    #[test]
    fn press_hold_release_with_repeat() {
        let out = run(&[false, true, true, false], true);
        assert_eq!(out[1], vec![InputEvent::KeyPressed { key: Key::A, repeat: false }]);
        assert_eq!(out[2], vec![InputEvent::KeyPressed { key: Key::A, repeat: true }]);
        assert_eq!(out[3], vec![InputEvent::KeyReleased(Key::A)]);
    }

    #[test]
    fn repeat_does_not_suppress_release() {
        let out = run(&[true, false], true);
        assert_eq!(out[1], vec![InputEvent::KeyReleased(Key::A)]);
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn events_follow_fixed_order() {
        let prev = InputSnapshot::baseline(800, 600).with_button(MouseButton::Right);
        let mut cur = InputSnapshot::baseline(1024, 768)
            .with_focus(false)
            .with_key(Key::Z)
            .with_key(Key::Escape)
            .with_mouse(10.0, 20.0)
            .with_button(MouseButton::Left)
            .with_wheel(-1.0);
        cur.visible = false;
        cur.mouse_focused = false;
        cur.dropped_files.push(PathBuf::from("a.txt"));
        cur.dropped_directories.push(PathBuf::from("dir"));

        let events = detect(&prev, &cur, false);
        assert_eq!(
            events,
            vec![
                InputEvent::FilesDropped(vec![PathBuf::from("a.txt")]),
                InputEvent::DirectoriesDropped(vec![PathBuf::from("dir")]),
                InputEvent::Focus(false),
                InputEvent::MouseFocus(false),
                InputEvent::Resize { width: 1024, height: 768 },
                InputEvent::Visible(false),
                InputEvent::KeyPressed { key: Key::Escape, repeat: false },
                InputEvent::KeyPressed { key: Key::Z, repeat: false },
                InputEvent::MouseMoved { x: 10.0, y: 20.0, dx: 10.0, dy: 20.0 },
                InputEvent::MousePressed { x: 10.0, y: 20.0, button: MouseButton::Left },
                InputEvent::MouseReleased { x: 10.0, y: 20.0, button: MouseButton::Right },
                InputEvent::WheelMoved(-1.0),
            ]
        );
    }

    #[test]
    fn unchanged_state_emits_nothing() {
        let s = InputSnapshot::baseline(800, 600).with_mouse(5.0, 5.0);
        assert!(detect(&s, &s, false).is_empty());
    }

    #[test]
    fn repeat_flag_is_read_per_key() {
        // The sink turns repeat on after seeing the first key, so only the
        // later held key repeats.
        struct Toggle {
            repeat: bool,
            events: Vec<InputEvent>,
        }
        impl EdgeSink for Toggle {
            fn key_repeat(&self) -> bool {
                self.repeat
            }
            fn emit(&mut self, event: InputEvent) {
                if event == (InputEvent::KeyPressed { key: Key::Escape, repeat: false }) {
                    self.repeat = true;
                }
                self.events.push(event);
            }
        }

        let prev = InputSnapshot::baseline(1, 1).with_key(Key::A);
        let cur = InputSnapshot::baseline(1, 1).with_key(Key::Escape).with_key(Key::A);
        let mut sink = Toggle { repeat: false, events: Vec::new() };
        dispatch_edges(&prev, &cur, &mut sink);

        assert_eq!(
            sink.events,
            vec![
                InputEvent::KeyPressed { key: Key::Escape, repeat: false },
                InputEvent::KeyPressed { key: Key::A, repeat: true },
            ]
        );
    }

    #[test]
    fn window_level_classification() {
        assert!(InputEvent::Resize { width: 1, height: 1 }.is_window_level());
        assert!(InputEvent::Focus(true).is_window_level());
        assert!(!InputEvent::KeyReleased(Key::A).is_window_level());
        assert!(!InputEvent::FilesDropped(vec![]).is_window_level());
    }
}
