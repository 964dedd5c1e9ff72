use std::path::PathBuf;

use crate::input::{Key, MouseButton};

use super::{Config, Context};

/// Application contract implemented by games.
///
/// Every callback has a no-op default. Window commands and mouse requests
/// made inside a callback are applied after it returns.
#[allow(unused_variables)]
pub trait App {
    /// Called once, before the window opens.
    fn configure(&mut self) -> Config {
        Config::default()
    }

    /// Called once after the window and subsystems are ready. `args` are the
    /// process arguments, verbatim.
    fn load(&mut self, ctx: &mut Context<'_>, args: &[String]) {}

    fn update(&mut self, ctx: &mut Context<'_>, dt: f32) {}

    /// Called after the frame is cleared to the background color.
    fn draw(&mut self, ctx: &mut Context<'_>) {}

    /// Called when the OS or [`Event::quit`](super::Event::quit) asks to
    /// close. Return `true` to cancel.
    fn quit(&mut self, ctx: &mut Context<'_>) -> bool {
        false
    }

    // ── window events ─────────────────────────────────────────────────────

    fn resize(&mut self, ctx: &mut Context<'_>, width: u32, height: u32) {}

    fn focus(&mut self, ctx: &mut Context<'_>, focused: bool) {}

    fn mouse_focus(&mut self, ctx: &mut Context<'_>, focused: bool) {}

    fn visible(&mut self, ctx: &mut Context<'_>, visible: bool) {}

    fn files_dropped(&mut self, ctx: &mut Context<'_>, paths: &[PathBuf]) {}

    fn directories_dropped(&mut self, ctx: &mut Context<'_>, paths: &[PathBuf]) {}

    // ── input events ──────────────────────────────────────────────────────

    fn key_pressed(&mut self, ctx: &mut Context<'_>, key: Key, is_repeat: bool) {}

    fn key_released(&mut self, ctx: &mut Context<'_>, key: Key) {}

    fn mouse_moved(&mut self, ctx: &mut Context<'_>, x: f32, y: f32, dx: f32, dy: f32) {}

    fn mouse_pressed(&mut self, ctx: &mut Context<'_>, x: f32, y: f32, button: MouseButton) {}

    fn mouse_released(&mut self, ctx: &mut Context<'_>, x: f32, y: f32, button: MouseButton) {}

    fn wheel_moved(&mut self, ctx: &mut Context<'_>, amount: f32) {}
}
