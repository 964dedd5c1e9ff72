use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorIcon, Window};

use crate::coords::Vec2;
use crate::input::{CursorKind, Key, MouseButton, RawEvent};

/// Pixels of trackpad scroll counted as one wheel notch.
const PIXELS_PER_LINE: f32 = 20.0;

/// Translates a winit `WindowEvent` into a [`RawEvent`].
///
/// Positions and sizes are converted to logical pixels. Returns `None` for
/// events the input subsystem does not track.
pub fn translate_window_event(window: &Window, event: &WindowEvent) -> Option<RawEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let key = map_key(event.physical_key);
            Some(match event.state {
                ElementState::Pressed => RawEvent::KeyDown(key),
                ElementState::Released => RawEvent::KeyUp(key),
            })
        }

        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button);
            Some(match state {
                ElementState::Pressed => RawEvent::ButtonDown(button),
                ElementState::Released => RawEvent::ButtonUp(button),
            })
        }

        WindowEvent::CursorMoved { position, .. } => {
            Some(RawEvent::CursorMoved(to_logical_vec2(window, *position)))
        }
        WindowEvent::CursorEntered { .. } => Some(RawEvent::CursorEntered),
        WindowEvent::CursorLeft { .. } => Some(RawEvent::CursorLeft),

        WindowEvent::MouseWheel { delta, .. } => {
            let amount = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(p) => {
                    to_logical_vec2(window, *p).y / PIXELS_PER_LINE
                }
            };
            Some(RawEvent::Wheel(amount))
        }

        WindowEvent::Resized(size) => {
            let (width, height) = to_logical_size(window, *size);
            Some(RawEvent::Resized { width, height })
        }

        WindowEvent::Focused(f) => Some(RawEvent::Focused(*f)),
        WindowEvent::Occluded(occluded) => Some(RawEvent::Visible(!*occluded)),
        WindowEvent::DroppedFile(path) => Some(RawEvent::Dropped(path.clone())),
        WindowEvent::CloseRequested => Some(RawEvent::CloseRequested),

        _ => None,
    }
}

pub fn to_logical_size(window: &Window, size: PhysicalSize<u32>) -> (u32, u32) {
    let logical = size.to_logical::<f64>(window.scale_factor());
    (logical.width.round() as u32, logical.height.round() as u32)
}

fn to_logical_vec2(window: &Window, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    Vec2::new(logical.x as f32, logical.y as f32)
}

pub fn cursor_icon(kind: CursorKind) -> CursorIcon {
    match kind {
        CursorKind::Default | CursorKind::Arrow => CursorIcon::Default,
        CursorKind::IBeam => CursorIcon::Text,
        CursorKind::Crosshair => CursorIcon::Crosshair,
        CursorKind::PointingHand => CursorIcon::Pointer,
        CursorKind::ResizeEw => CursorIcon::EwResize,
        CursorKind::ResizeNs => CursorIcon::NsResize,
        CursorKind::ResizeNwse => CursorIcon::NwseResize,
        CursorKind::ResizeNesw => CursorIcon::NeswResize,
        CursorKind::ResizeAll => CursorIcon::Move,
        CursorKind::NotAllowed => CursorIcon::NotAllowed,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Space => Key::Space,

        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

        KeyCode::KeyA => Key::A, KeyCode::KeyB => Key::B, KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D, KeyCode::KeyE => Key::E, KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G, KeyCode::KeyH => Key::H, KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J, KeyCode::KeyK => Key::K, KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M, KeyCode::KeyN => Key::N, KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P, KeyCode::KeyQ => Key::Q, KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S, KeyCode::KeyT => Key::T, KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V, KeyCode::KeyW => Key::W, KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y, KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 | KeyCode::Numpad0 => Key::Digit0,
        KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit1,
        KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit2,
        KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit3,
        KeyCode::Digit4 | KeyCode::Numpad4 => Key::Digit4,
        KeyCode::Digit5 | KeyCode::Numpad5 => Key::Digit5,
        KeyCode::Digit6 | KeyCode::Numpad6 => Key::Digit6,
        KeyCode::Digit7 | KeyCode::Numpad7 => Key::Digit7,
        KeyCode::Digit8 | KeyCode::Numpad8 => Key::Digit8,
        KeyCode::Digit9 | KeyCode::Numpad9 => Key::Digit9,

        KeyCode::F1 => Key::F1, KeyCode::F2 => Key::F2, KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4, KeyCode::F5 => Key::F5, KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7, KeyCode::F8 => Key::F8, KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10, KeyCode::F11 => Key::F11, KeyCode::F12 => Key::F12,

        other => Key::Unknown(other as u32),
    }
}
