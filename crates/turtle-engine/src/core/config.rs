use std::path::PathBuf;

/// Optional subsystems the session may skip opening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modules {
    pub audio: bool,
    /// Load a default font at startup.
    pub font: bool,
}

impl Default for Modules {
    fn default() -> Self {
        Self { audio: true, font: true }
    }
}

/// Session configuration returned by [`App::configure`](super::App::configure).
///
/// Read once while the session starts. Later changes go through
/// [`Window`](super::Window) setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub borderless: bool,
    pub fullscreen: bool,
    /// Only honored for resizable windows.
    pub min_width: u32,
    pub min_height: u32,
    pub vsync: bool,
    /// Request 4x multisampling.
    pub msaa: bool,
    /// Monitor index the window opens on.
    pub display: usize,
    /// Initial position; both must be set to take effect.
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub icon: Option<PathBuf>,
    /// Framework version the game was written for, `major.minor.revision`.
    pub version: Option<String>,
    /// Bundled default font, tried before system fonts.
    pub font: PathBuf,
    pub modules: Modules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            width: 800,
            height: 600,
            resizable: false,
            borderless: false,
            fullscreen: false,
            min_width: 1,
            min_height: 1,
            vsync: true,
            msaa: false,
            display: 0,
            x: None,
            y: None,
            icon: None,
            version: None,
            font: PathBuf::from("assets/font.ttf"),
            modules: Modules::default(),
        }
    }
}

impl Config {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<PathBuf>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_font(mut self, font: impl Into<PathBuf>) -> Self {
        self.font = font.into();
        self
    }

    pub fn with_modules(mut self, modules: Modules) -> Self {
        self.modules = modules;
        self
    }

    /// `(x, y)` when both coordinates are set.
    pub fn position(&self) -> Option<(i32, i32)> {
        self.x.zip(self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.title, "Untitled");
        assert_eq!((c.width, c.height), (800, 600));
        assert_eq!((c.min_width, c.min_height), (1, 1));
        assert!(c.vsync && !c.msaa && !c.resizable);
        assert_eq!(c.display, 0);
        assert!(c.icon.is_none() && c.version.is_none());
    }

    #[test]
    fn position_requires_both_coordinates() {
        let mut c = Config::default();
        c.x = Some(10);
        assert_eq!(c.position(), None);
        assert_eq!(c.with_position(1, 2).position(), Some((1, 2)));
    }
}
