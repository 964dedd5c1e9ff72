use std::fmt;

/// Keyboard key identifier.
///
/// The platform layer maps physical keys into these variants where possible.
/// Keys without a variant arrive as `Key::Unknown(code)` and are not tracked
/// by edge detection.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Modifiers, left and right sides folded together
    Shift,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

/// Every key the edge detector scans, in dispatch order.
pub const TRACKED_KEYS: &[Key] = &[
    Key::Escape, Key::Enter, Key::Tab, Key::Backspace, Key::Space,
    Key::Insert, Key::Delete, Key::Home, Key::End, Key::PageUp, Key::PageDown,
    Key::ArrowUp, Key::ArrowDown, Key::ArrowLeft, Key::ArrowRight,
    Key::Shift, Key::Control, Key::Alt, Key::Meta,
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
    Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
];

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Every mouse button the edge detector scans, in dispatch order.
pub const TRACKED_BUTTONS: &[MouseButton] = &[
    MouseButton::Left,
    MouseButton::Right,
    MouseButton::Middle,
    MouseButton::Back,
    MouseButton::Forward,
];

/// Mouse cursor shapes.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum CursorKind {
    #[default]
    Default,
    Arrow,
    IBeam,
    Crosshair,
    PointingHand,
    ResizeEw,
    ResizeNs,
    ResizeNwse,
    ResizeNesw,
    ResizeAll,
    NotAllowed,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Unknown(code) => write!(f, "Unknown({code})"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn tracked_keys_are_unique() {
        let set: HashSet<_> = TRACKED_KEYS.iter().collect();
        assert_eq!(set.len(), TRACKED_KEYS.len());
        assert!(!TRACKED_KEYS.iter().any(|k| matches!(k, Key::Unknown(_))));
    }

    #[test]
    fn left_button_is_scanned_first() {
        assert_eq!(TRACKED_BUTTONS[0], MouseButton::Left);
    }
}
