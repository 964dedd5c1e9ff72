use std::path::Path;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Line height used when a font has no horizontal line metrics.
const FALLBACK_LINE_HEIGHT: f32 = 1.2;

/// Error returned by [`FontSystem::load_font`] and [`FontSystem::load_font_file`].
#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("font file does not exist: {0}")]
    NotFound(String),
    #[error("failed to read font file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("font load error: {0}")]
    Parse(String),
}

/// Opaque handle to a font loaded into a [`FontSystem`].
///
/// Ids are never reused, so a released id stays invalid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns every font loaded during a session.
///
/// Fonts are immutable after loading. The renderer reads them each frame so
/// new glyphs can be rasterized on demand.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<Option<fontdue::Font>>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError::Parse(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(Some(font));
        Ok(id)
    }

    pub fn load_font_file(&mut self, path: &Path) -> Result<FontId, FontLoadError> {
        if !path.is_file() {
            return Err(FontLoadError::NotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path).map_err(|source| FontLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.load_font(&bytes)
    }

    /// Returns the underlying `fontdue::Font` while `id` is live.
    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0).and_then(Option::as_ref)
    }

    pub fn is_live(&self, id: FontId) -> bool {
        self.get(id).is_some()
    }

    /// Drops one font. Returns false if it was already released.
    pub fn release(&mut self, id: FontId) -> bool {
        self.fonts.get_mut(id.0).and_then(Option::take).is_some()
    }

    /// Drops every live font and returns how many there were.
    pub fn release_all(&mut self) -> usize {
        self.fonts.iter_mut().filter_map(Option::take).count()
    }

    pub fn live_count(&self) -> usize {
        self.fonts.iter().filter(|f| f.is_some()).count()
    }

    /// Distance between two baselines, in logical pixels.
    pub fn line_height(&self, id: FontId, size: f32) -> f32 {
        self.get(id)
            .and_then(|f| f.horizontal_line_metrics(size))
            .map(|m| m.new_line_size)
            .unwrap_or(size * FALLBACK_LINE_HEIGHT)
    }

    /// Computes the bounding box of a laid-out text string.
    ///
    /// Returns `(width, height)` in logical pixels. Unknown fonts and empty
    /// strings measure zero wide and one line tall.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size * FALLBACK_LINE_HEIGHT);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings { max_width, ..LayoutSettings::default() });
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, self.line_height(id, size));
        }

        // Pen position after each glyph rather than the bitmap's right edge, so
        // a measured width passed back as `max_width` does not wrap.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = layout.height().max(self.line_height(id, size));
        Vec2::new(w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── loading ───────────────────────────────────────────────────────────

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let mut fonts = FontSystem::new();
        assert!(matches!(fonts.load_font(&[0, 1, 2, 3]), Err(FontLoadError::Parse(_))));
        assert_eq!(fonts.live_count(), 0);
    }

    #[test]
    fn missing_file_is_not_found() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_font_file(Path::new("no/such/font.ttf")).unwrap_err();
        assert!(matches!(err, FontLoadError::NotFound(_)));
        assert!(err.to_string().starts_with("font file does not exist"));
    }

    // ── measurement ───────────────────────────────────────────────────────

    #[test]
    fn unknown_font_measures_one_line() {
        let fonts = FontSystem::new();
        let m = fonts.measure_text("hello", FontId(7), 10.0, None);
        assert_eq!(m, Vec2::new(0.0, 12.0));
    }

    #[test]
    fn release_of_unknown_id_is_false() {
        let mut fonts = FontSystem::new();
        assert!(!fonts.release(FontId(0)));
        assert_eq!(fonts.release_all(), 0);
    }
}
