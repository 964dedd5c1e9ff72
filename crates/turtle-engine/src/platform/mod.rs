//! Platform seam.
//!
//! The session drives a [`Platform`] and never touches winit or wgpu
//! directly. Two implementations exist: the winit/wgpu backend in
//! [`crate::window`] and [`HeadlessPlatform`] for CI and tests.

mod headless;

use crate::coords::Vec2;
use crate::core::Config;
use crate::graphics::ImageStore;
use crate::input::{CursorKind, InputSnapshot};
use crate::paint::Color;
use crate::scene::DrawList;
use crate::text::FontSystem;

pub use headless::{HeadlessPlatform, PresentedFrame};

/// Window change requested by game code, applied between callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCommand {
    SetTitle(String),
    SetSize { width: u32, height: u32 },
    SetFullscreen(bool),
    SetVsync(bool),
    SetPosition { x: i32, y: i32 },
    Minimize,
    Maximize,
    SetCursorVisible(bool),
    SetCursorGrabbed(bool),
    SetCursorPosition(Vec2),
    SetCursor(CursorKind),
}

/// Window icon in straight RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Everything needed to present one frame.
pub struct Frame<'a> {
    pub clear: Color,
    pub draw_list: &'a DrawList,
    pub fonts: &'a FontSystem,
    pub images: &'a ImageStore,
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("window error: {0}")]
    Window(String),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("gpu error: {0}")]
    Gpu(String),
}

/// Host services the session runs on.
pub trait Platform {
    /// Opens the window and returns its logical size.
    fn open_window(&mut self, config: &Config) -> Result<(u32, u32), PlatformError>;

    fn set_icon(&mut self, icon: Icon) -> Result<(), PlatformError>;

    fn set_vsync(&mut self, enabled: bool);

    /// Raw input and window state accumulated since the previous poll.
    fn poll_input(&mut self) -> InputSnapshot;

    /// Seconds since the previous frame.
    fn frame_time(&mut self) -> f32;

    fn present(&mut self, frame: Frame<'_>) -> Result<(), PlatformError>;

    fn set_clipboard_text(&mut self, text: &str) -> Result<(), PlatformError>;

    fn clipboard_text(&mut self) -> Result<String, PlatformError>;

    fn apply(&mut self, command: WindowCommand);

    /// Size of monitor `display`, if it exists.
    fn desktop_dimensions(&self, display: usize) -> Option<(u32, u32)>;

    fn close_window(&mut self);
}
