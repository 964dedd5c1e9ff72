use crate::input::InputSnapshot;
use crate::platform::WindowCommand;

use super::Config;

/// Window state visible to game callbacks.
///
/// Setters update the local view immediately and queue a request that the
/// session hands to the platform after the current callback.
#[derive(Debug, Clone)]
pub struct Window {
    title: String,
    size: (u32, u32),
    min_size: (u32, u32),
    fullscreen: bool,
    vsync: bool,
    display: usize,
    position: Option<(i32, i32)>,
    focused: bool,
    mouse_focused: bool,
    visible: bool,
    minimized: bool,
    maximized: bool,
    open: bool,
    commands: Vec<WindowCommand>,
}

impl Window {
    pub(crate) fn from_config(config: &Config) -> Self {
        Self {
            title: config.title.clone(),
            size: (config.width, config.height),
            min_size: (config.min_width, config.min_height),
            fullscreen: config.fullscreen,
            vsync: config.vsync,
            display: config.display,
            position: config.position(),
            focused: true,
            mouse_focused: true,
            visible: true,
            minimized: false,
            maximized: false,
            open: false,
            commands: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.commands.push(WindowCommand::SetTitle(self.title.clone()));
    }

    /// Logical size in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    /// Resizes the window, clamped to the configured minimum size.
    pub fn set_mode(&mut self, width: u32, height: u32) {
        let width = width.max(self.min_size.0);
        let height = height.max(self.min_size.1);
        self.size = (width, height);
        self.commands.push(WindowCommand::SetSize { width, height });
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
        self.commands.push(WindowCommand::SetFullscreen(fullscreen));
    }

    pub fn vsync(&self) -> bool {
        self.vsync
    }

    pub fn set_vsync(&mut self, vsync: bool) {
        self.vsync = vsync;
        self.commands.push(WindowCommand::SetVsync(vsync));
    }

    pub fn display(&self) -> usize {
        self.display
    }

    /// Last position requested through config or [`set_position`](Self::set_position).
    pub fn position(&self) -> Option<(i32, i32)> {
        self.position
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.position = Some((x, y));
        self.commands.push(WindowCommand::SetPosition { x, y });
    }

    pub fn minimize(&mut self) {
        self.minimized = true;
        self.maximized = false;
        self.commands.push(WindowCommand::Minimize);
    }

    pub fn maximize(&mut self) {
        self.maximized = true;
        self.minimized = false;
        self.commands.push(WindowCommand::Maximize);
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn has_mouse_focus(&self) -> bool {
        self.mouse_focused
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub(crate) fn sync(&mut self, snapshot: &InputSnapshot) {
        self.size = snapshot.window_size;
        self.focused = snapshot.focused;
        self.mouse_focused = snapshot.mouse_focused;
        self.visible = snapshot.visible;
        if snapshot.visible {
            self.minimized = false;
        }
    }

    pub(crate) fn drain_commands(&mut self) -> Vec<WindowCommand> {
        std::mem::take(&mut self.commands)
    }
}
