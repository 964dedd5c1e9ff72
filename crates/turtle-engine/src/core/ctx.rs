use crate::audio::Audio;
use crate::graphics::Graphics;
use crate::input::{Keyboard, Mouse};
use crate::math::{self, NoiseType, Random};
use crate::platform::Platform;
use crate::session::ErrorReporter;
use crate::time::Timer;

use super::system::{self, Os};
use super::{Event, Window};

/// Per-callback context passed to every [`App`](super::App) method.
///
/// Subsystems are plain fields so callbacks can borrow several at once
/// (e.g. `world.render(ctx.graphics)` while reading `ctx.mouse`).
pub struct Context<'a> {
    pub graphics: &'a mut Graphics,
    pub audio: &'a mut Audio,
    pub keyboard: &'a mut Keyboard,
    pub mouse: &'a mut Mouse,
    pub window: &'a mut Window,
    pub event: &'a mut Event,
    pub timer: &'a Timer,
    pub random: &'a mut Random,
    pub(crate) platform: &'a mut dyn Platform,
    pub(crate) errors: &'a ErrorReporter,
}

impl Context<'_> {
    /// Raises a session error; the error screen replaces the game from the
    /// next stage on.
    pub fn raise_error(&self, message: impl Into<String>) {
        self.errors.raise(message);
    }

    /// Returns false if the clipboard is unavailable.
    pub fn set_clipboard_text(&mut self, text: &str) -> bool {
        match self.platform.set_clipboard_text(text) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    pub fn clipboard_text(&mut self) -> Option<String> {
        self.platform
            .clipboard_text()
            .inspect_err(|e| log::warn!("{e}"))
            .ok()
    }

    /// Size of monitor `display` in pixels.
    pub fn desktop_dimensions(&self, display: usize) -> Option<(u32, u32)> {
        self.platform.desktop_dimensions(display)
    }

    /// 2D noise in `[0, 1]`.
    pub fn noise(&self, x: f32, y: f32, kind: NoiseType) -> f32 {
        math::noise2(x, y, kind)
    }

    /// 3D noise in `[0, 1]`.
    pub fn noise3(&self, x: f32, y: f32, z: f32, kind: NoiseType) -> f32 {
        math::noise3(x, y, z, kind)
    }

    pub fn os(&self) -> Os {
        Os::current()
    }

    pub fn processor_count(&self) -> usize {
        system::processor_count()
    }
}
