use std::path::{Path, PathBuf};

use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::shapes::image::FULL_UV;
use crate::scene::{DrawList, DrawMode};
use crate::session::ErrorReporter;
use crate::text::{FontId, FontLoadError, FontSystem};

use super::geometry;
use super::quad::Quad;
use super::texture::{ImageId, ImageStore};

pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Segments used by [`Graphics::arc`].
pub const DEFAULT_ARC_SEGMENTS: usize = 10;

/// Compiled-in font used when no default font file can be loaded.
const EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/Cantarell-Regular.ttf");

/// Fonts tried when the bundled default font is missing.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A loaded font at a fixed pixel size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Font {
    pub id: FontId,
    pub size: f32,
}

/// Drawing state and resource owner for one session.
pub struct Graphics {
    draw_list: DrawList,
    fonts: FontSystem,
    images: ImageStore,

    color: Color,
    background: Color,
    line_width: f32,
    point_size: f32,
    font: Option<Font>,
    dimensions: (u32, u32),

    errors: ErrorReporter,
}

impl Graphics {
    pub fn new(errors: ErrorReporter) -> Self {
        Self {
            draw_list: DrawList::new(),
            fonts: FontSystem::new(),
            images: ImageStore::new(),
            color: Color::WHITE,
            background: Color::BLACK,
            line_width: 1.0,
            point_size: 1.0,
            font: None,
            dimensions: (0, 0),
            errors,
        }
    }

    // ── state ─────────────────────────────────────────────────────────────

    pub fn color(&self) -> Color {
        self.color
    }

    /// Color used by every following draw call.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn background_color(&self) -> Color {
        self.background
    }

    /// Color the next frame is cleared to.
    pub fn set_background_color(&mut self, color: Color) {
        self.background = color;
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width.max(0.0);
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn set_point_size(&mut self, size: f32) {
        self.point_size = size.max(0.0);
    }

    /// Window width in logical pixels.
    pub fn width(&self) -> u32 {
        self.dimensions.0
    }

    pub fn height(&self) -> u32 {
        self.dimensions.1
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    // ── shapes ────────────────────────────────────────────────────────────

    pub fn circle(&mut self, mode: DrawMode, x: f32, y: f32, radius: f32) {
        self.draw_list
            .push_circle(Vec2::new(x, y), radius, mode, self.color, self.line_width);
    }

    /// Axis-aligned rectangle with its top-left corner at `(x, y)`.
    pub fn rectangle(&mut self, mode: DrawMode, x: f32, y: f32, width: f32, height: f32) {
        self.rectangle_rotated(mode, x, y, width, height, 0.0);
    }

    /// Rectangle whose unrotated top-left corner is `(x, y)`, rotated by
    /// `angle` radians about its center.
    pub fn rectangle_rotated(
        &mut self,
        mode: DrawMode,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        angle: f32,
    ) {
        let size = Vec2::new(width, height);
        let center = Vec2::new(x, y) + size * 0.5;
        self.draw_list
            .push_rect(center, size, angle, mode, self.color, self.line_width);
    }

    /// Segment drawn as a filled quad `line_width` thick.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let (a, b) = (Vec2::new(x1, y1), Vec2::new(x2, y2));
        let d = b - a;
        let len = d.length();
        if len <= 0.0 {
            return;
        }
        let center = (a + b) * 0.5;
        let angle = d.y.atan2(d.x);
        self.draw_list.push_rect(
            center,
            Vec2::new(len, self.line_width),
            angle,
            DrawMode::Fill,
            self.color,
            self.line_width,
        );
    }

    pub fn ellipse(&mut self, mode: DrawMode, x: f32, y: f32, radius_x: f32, radius_y: f32) {
        let (rx, ry) = (radius_x.abs(), radius_y.abs());
        if rx == 0.0 || ry == 0.0 {
            return;
        }
        let center = Vec2::new(x, y);
        let ring = geometry::ellipse_ring(center, (rx, ry), geometry::ellipse_segments(rx.max(ry)));
        self.push_outline(mode, center, &ring, true);
    }

    /// Circle sector from `start` to `end` radians, clockwise on screen.
    /// Line mode outlines the whole slice, including both radii.
    pub fn arc(&mut self, mode: DrawMode, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        self.arc_segments(mode, x, y, radius, start, end, DEFAULT_ARC_SEGMENTS);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc_segments(
        &mut self,
        mode: DrawMode,
        x: f32,
        y: f32,
        radius: f32,
        start: f32,
        end: f32,
        segments: usize,
    ) {
        if radius == 0.0 || start == end {
            return;
        }
        let center = Vec2::new(x, y);
        let r = radius.abs();
        let rim = geometry::arc_points(center, (r, r), start, end, segments);
        match mode {
            DrawMode::Fill => self.push_outline(mode, center, &rim, false),
            DrawMode::Line => {
                let mut pie = Vec::with_capacity(rim.len() + 1);
                pie.push(center);
                pie.extend(rim);
                self.push_outline(mode, center, &pie, true);
            }
        }
    }

    /// Regular polygon with `sides` corners on a circle of `radius`; the
    /// first corner sits at `rotation` radians. Fewer than 3 sides draws nothing.
    pub fn polygon(
        &mut self,
        mode: DrawMode,
        x: f32,
        y: f32,
        sides: usize,
        radius: f32,
        rotation: f32,
    ) {
        if sides < 3 || radius == 0.0 {
            log::debug!("polygon skipped: {sides} sides, radius {radius}");
            return;
        }
        let center = Vec2::new(x, y);
        let corners = geometry::regular_polygon(center, sides, radius.abs(), rotation);
        self.push_outline(mode, center, &corners, true);
    }

    /// Fans `rim` around `hub` when filling, strokes it when outlining.
    fn push_outline(&mut self, mode: DrawMode, hub: Vec2, rim: &[Vec2], closed: bool) {
        let triangles = match mode {
            DrawMode::Fill => geometry::fan(hub, rim, closed),
            DrawMode::Line => geometry::stroke(rim, closed, self.line_width),
        };
        self.draw_list.push_mesh(triangles, self.color);
    }

    /// Drops everything drawn so far this frame.
    pub fn clear(&mut self) {
        self.draw_list.clear();
    }

    /// [`clear`](Self::clear), then paints the frame `color`. The background
    /// color is changed for following frames too.
    pub fn clear_with(&mut self, color: Color) {
        self.clear();
        self.background = color;
    }

    /// Square points `point_size` wide, centered on each position.
    pub fn points(&mut self, points: &[Vec2]) {
        let size = Vec2::new(self.point_size, self.point_size);
        for &p in points {
            self.draw_list
                .push_rect(p, size, 0.0, DrawMode::Fill, self.color, self.line_width);
        }
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Draws `text` with its top-left at `(x, y)` in the current font.
    pub fn print(&mut self, text: impl Into<String>, x: f32, y: f32) {
        self.push_text(text.into(), x, y, None);
    }

    /// Like [`print`](Self::print) but wraps at `limit` pixels.
    pub fn printf(&mut self, text: impl Into<String>, x: f32, y: f32, limit: f32) {
        self.push_text(text.into(), x, y, Some(limit));
    }

    fn push_text(&mut self, text: String, x: f32, y: f32, max_width: Option<f32>) {
        let Some(font) = self.font else {
            log::debug!("print skipped: no font set");
            return;
        };
        self.draw_list
            .push_text(text, font.id, font.size, self.color, Vec2::new(x, y), max_width);
    }

    pub fn font(&self) -> Option<Font> {
        self.font
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = Some(font);
    }

    /// Loads a font file. On failure the error is raised and `None` returned.
    pub fn new_font(&mut self, path: impl AsRef<Path>, size: f32) -> Option<Font> {
        let path = path.as_ref();
        match self.fonts.load_font_file(path) {
            Ok(id) => {
                log::debug!("loaded font {} at {size}px", path.display());
                Some(Font { id, size })
            }
            Err(FontLoadError::NotFound(p)) => {
                self.errors.raise(format!("Font file does not exist: {p}"));
                None
            }
            Err(e) => {
                self.errors.raise(e.to_string());
                None
            }
        }
    }

    /// [`new_font`](Self::new_font) followed by [`set_font`](Self::set_font).
    pub fn set_new_font(&mut self, path: impl AsRef<Path>, size: f32) -> Option<Font> {
        let font = self.new_font(path, size)?;
        self.set_font(font);
        Some(font)
    }

    pub fn font_height(&self, font: Font) -> f32 {
        self.fonts.line_height(font.id, font.size)
    }

    pub fn text_width(&self, font: Font, text: &str) -> f32 {
        self.fonts.measure_text(text, font.id, font.size, None).x
    }

    pub fn measure_text(&self, font: Font, text: &str, max_width: Option<f32>) -> Vec2 {
        self.fonts.measure_text(text, font.id, font.size, max_width)
    }

    /// Installs the first loadable font from `candidates` as the current font,
    /// falling back to the embedded font when none load.
    ///
    /// Candidates that fail are logged, not raised. Returns `None` only if the
    /// embedded font is unusable too.
    pub(crate) fn install_default_font(&mut self, candidates: &[PathBuf]) -> Option<Font> {
        for path in candidates {
            match self.fonts.load_font_file(path) {
                Ok(id) => {
                    log::info!("default font: {}", path.display());
                    let font = Font { id, size: DEFAULT_FONT_SIZE };
                    self.font = Some(font);
                    return Some(font);
                }
                Err(e) => log::debug!("default font candidate rejected: {e}"),
            }
        }
        log::warn!("no default font file found; using the embedded font");
        self.install_embedded_font()
    }

    /// The current font, installing the embedded one if none is set.
    pub(crate) fn ensure_font(&mut self) -> Option<Font> {
        self.font.or_else(|| self.install_embedded_font())
    }

    fn install_embedded_font(&mut self) -> Option<Font> {
        match self.fonts.load_font(EMBEDDED_FONT) {
            Ok(id) => {
                let font = Font { id, size: DEFAULT_FONT_SIZE };
                self.font = Some(font);
                Some(font)
            }
            Err(e) => {
                log::error!("embedded font is unusable: {e}");
                None
            }
        }
    }

    // ── images ────────────────────────────────────────────────────────────

    /// Loads an image file. On failure the error is raised and `None` returned.
    pub fn new_image(&mut self, path: impl AsRef<Path>) -> Option<ImageId> {
        match self.images.load_file(path.as_ref()) {
            Ok(id) => Some(id),
            Err(e) => {
                self.errors.raise(e.to_string());
                None
            }
        }
    }

    pub fn image_width(&self, image: ImageId) -> Option<u32> {
        self.images.dimensions(image).map(|(w, _)| w)
    }

    pub fn image_height(&self, image: ImageId) -> Option<u32> {
        self.images.dimensions(image).map(|(_, h)| h)
    }

    /// Draws `image` unscaled with its top-left at `(x, y)`, tinted by the
    /// current color.
    pub fn draw(&mut self, image: ImageId, x: f32, y: f32) {
        self.draw_ex(image, x, y, 0.0, 1.0, 1.0);
    }

    /// Draws `image` scaled by `(sx, sy)` and rotated by `angle` radians about
    /// its center. `(x, y)` is the unrotated top-left corner.
    pub fn draw_ex(&mut self, image: ImageId, x: f32, y: f32, angle: f32, sx: f32, sy: f32) {
        let Some((w, h)) = self.images.dimensions(image) else {
            log::warn!("draw skipped: image {image:?} is not loaded");
            return;
        };
        let size = Vec2::new(w as f32 * sx, h as f32 * sy);
        let center = Vec2::new(x, y) + size * 0.5;
        self.draw_list.push_image(image, center, size, angle, self.color, FULL_UV);
    }

    /// Draws the `quad` region of `image` like [`draw_ex`](Self::draw_ex).
    /// Parts of the quad outside the image are cut off.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_quad(
        &mut self,
        image: ImageId,
        quad: Quad,
        x: f32,
        y: f32,
        angle: f32,
        sx: f32,
        sy: f32,
    ) {
        let Some(dims) = self.images.dimensions(image) else {
            log::warn!("draw skipped: image {image:?} is not loaded");
            return;
        };
        let Some((uv, (w, h))) = quad.clip_to(dims) else {
            return;
        };
        let size = Vec2::new(w as f32 * sx, h as f32 * sy);
        let center = Vec2::new(x, y) + size * 0.5;
        self.draw_list.push_image(image, center, size, angle, self.color, uv);
    }

    // ── release ───────────────────────────────────────────────────────────

    pub fn release_font(&mut self, font: Font) -> bool {
        if self.font.is_some_and(|f| f.id == font.id) {
            self.font = None;
        }
        self.fonts.release(font.id)
    }

    pub fn release_image(&mut self, image: ImageId) -> bool {
        self.images.release(image)
    }

    /// Releases every font; returns how many were live.
    pub fn release_fonts(&mut self) -> usize {
        self.font = None;
        self.fonts.release_all()
    }

    /// Releases every image; returns how many were live.
    pub fn release_images(&mut self) -> usize {
        self.images.release_all()
    }

    // ── frame plumbing ────────────────────────────────────────────────────

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub(crate) fn begin_frame(&mut self) {
        self.draw_list.clear();
    }

    pub(crate) fn set_dimensions(&mut self, width: u32, height: u32) {
        self.dimensions = (width, height);
    }

    pub(crate) fn fonts(&self) -> &FontSystem {
        &self.fonts
    }

    pub(crate) fn images(&self) -> &ImageStore {
        &self.images
    }

    pub(crate) fn images_mut(&mut self) -> &mut ImageStore {
        &mut self.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;

    fn graphics() -> (Graphics, ErrorReporter) {
        let errors = ErrorReporter::default();
        (Graphics::new(errors.clone()), errors)
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[test]
    fn shapes_use_current_color_and_line_width() {
        let (mut g, _) = graphics();
        let red = Color::rgb(1.0, 0.0, 0.0);
        g.set_color(red);
        g.set_line_width(3.0);
        g.circle(DrawMode::Line, 10.0, 20.0, 5.0);

        let DrawCmd::Circle(c) = &g.draw_list().items()[0] else {
            panic!("expected a circle");
        };
        assert_eq!(c.color, red);
        assert_eq!(c.line_width, 3.0);
        assert_eq!(c.center, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn rectangle_is_anchored_top_left() {
        let (mut g, _) = graphics();
        g.rectangle(DrawMode::Fill, 100.0, 100.0, 50.0, 20.0);
        let DrawCmd::Rect(r) = &g.draw_list().items()[0] else {
            panic!("expected a rect");
        };
        assert_eq!(r.center, Vec2::new(125.0, 110.0));
        assert_eq!(r.top_left(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn line_becomes_rotated_quad() {
        let (mut g, _) = graphics();
        g.set_line_width(2.0);
        g.line(0.0, 0.0, 0.0, 10.0);
        let DrawCmd::Rect(r) = &g.draw_list().items()[0] else {
            panic!("expected a rect");
        };
        assert_eq!(r.center, Vec2::new(0.0, 5.0));
        assert_eq!(r.size, Vec2::new(10.0, 2.0));
        assert!((r.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    fn mesh(g: &Graphics, i: usize) -> &crate::scene::shapes::MeshCmd {
        let DrawCmd::Mesh(m) = &g.draw_list().items()[i] else {
            panic!("expected a mesh");
        };
        m
    }

    #[test]
    fn filled_polygon_is_a_fan_of_triangles() {
        let (mut g, _) = graphics();
        g.polygon(DrawMode::Fill, 50.0, 50.0, 6, 10.0, 0.0);
        let m = mesh(&g, 0);
        assert_eq!(m.vertices.len(), 6 * 3);
        assert!(m.vertices.chunks(3).all(|t| t[0] == Vec2::new(50.0, 50.0)));
        assert!((m.vertices[1] - Vec2::new(60.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn degenerate_polygons_draw_nothing() {
        let (mut g, _) = graphics();
        g.polygon(DrawMode::Fill, 0.0, 0.0, 2, 10.0, 0.0);
        g.polygon(DrawMode::Line, 0.0, 0.0, 5, 0.0, 0.0);
        g.ellipse(DrawMode::Fill, 0.0, 0.0, 10.0, 0.0);
        g.arc(DrawMode::Fill, 0.0, 0.0, 10.0, 1.0, 1.0);
        assert!(g.draw_list().is_empty());
    }

    #[test]
    fn filled_arc_is_an_open_fan() {
        let (mut g, _) = graphics();
        g.arc(DrawMode::Fill, 0.0, 0.0, 10.0, 0.0, std::f32::consts::PI);
        // Ten segments, no closing triangle.
        assert_eq!(mesh(&g, 0).vertices.len(), DEFAULT_ARC_SEGMENTS * 3);
    }

    #[test]
    fn arc_outline_includes_both_radii() {
        let (mut g, _) = graphics();
        g.arc_segments(DrawMode::Line, 0.0, 0.0, 10.0, 0.0, 1.0, 4);
        // Center plus five rim points, closed: six stroked segments.
        assert_eq!(mesh(&g, 0).vertices.len(), 6 * 6);
    }

    #[test]
    fn ellipse_outline_uses_line_width_and_color() {
        let (mut g, _) = graphics();
        let green = Color::rgb(0.0, 1.0, 0.0);
        g.set_color(green);
        g.set_line_width(4.0);
        g.ellipse(DrawMode::Line, 100.0, 100.0, 40.0, 20.0);

        let m = mesh(&g, 0);
        assert_eq!(m.color, green);
        // First quad edge sits half the line width outside the rightmost point.
        let xs: Vec<f32> = m.vertices[..6].iter().map(|v| v.x).collect();
        assert!(xs.iter().any(|&x| (x - 142.0).abs() < 0.5), "{xs:?}");
    }

    #[test]
    fn clear_drops_commands_and_sets_background() {
        let (mut g, _) = graphics();
        g.rectangle(DrawMode::Fill, 0.0, 0.0, 5.0, 5.0);
        g.clear();
        assert!(g.draw_list().is_empty());

        g.circle(DrawMode::Fill, 0.0, 0.0, 5.0);
        let sky = Color::rgb(0.2, 0.4, 0.8);
        g.clear_with(sky);
        assert!(g.draw_list().is_empty());
        assert_eq!(g.background_color(), sky);
    }

    #[test]
    fn begin_frame_clears_draw_list() {
        let (mut g, _) = graphics();
        g.points(&[Vec2::zero(), Vec2::new(1.0, 1.0)]);
        assert_eq!(g.draw_list().len(), 2);
        g.begin_frame();
        assert!(g.draw_list().is_empty());
    }

    // ── loaders ───────────────────────────────────────────────────────────

    #[test]
    fn missing_image_raises_and_returns_none() {
        let (mut g, errors) = graphics();
        assert!(g.new_image("missing/player.png").is_none());
        assert_eq!(
            errors.message().as_deref(),
            Some("Image file does not exist: missing/player.png")
        );
    }

    #[test]
    fn missing_font_raises_and_returns_none() {
        let (mut g, errors) = graphics();
        assert!(g.set_new_font("missing/font.ttf", 16.0).is_none());
        assert!(g.font().is_none());
        assert_eq!(errors.message().as_deref(), Some("Font file does not exist: missing/font.ttf"));
    }

    #[test]
    fn print_without_font_records_nothing() {
        let (mut g, errors) = graphics();
        g.print("FPS: 60", 10.0, 10.0);
        assert!(g.draw_list().is_empty());
        assert!(!errors.has_error());
    }

    #[test]
    fn missing_default_font_falls_back_to_embedded() {
        let (mut g, errors) = graphics();
        let font = g.install_default_font(&[PathBuf::from("missing/a.ttf")]);
        let font = font.expect("embedded font loads");
        assert_eq!(g.font(), Some(font));
        assert_eq!(font.size, DEFAULT_FONT_SIZE);
        assert!(g.text_width(font, "Error") > 0.0);
        assert!(!errors.has_error());
    }

    #[test]
    fn ensure_font_keeps_the_current_font() {
        let (mut g, _) = graphics();
        let embedded = g.ensure_font().expect("embedded font loads");
        assert_eq!(g.ensure_font(), Some(embedded));
        assert_eq!(g.fonts().live_count(), 1);
    }

    #[test]
    fn draw_uses_image_size() {
        use crate::graphics::ImageData;

        let (mut g, _) = graphics();
        let id = g.images_mut().insert(ImageData::from_straight_rgba(4, 2, vec![255; 32]));
        g.draw_ex(id, 0.0, 0.0, 0.0, 2.0, 1.0);
        let DrawCmd::Image(img) = &g.draw_list().items()[0] else {
            panic!("expected an image");
        };
        assert_eq!(img.size, Vec2::new(8.0, 2.0));
        assert_eq!(img.center, Vec2::new(4.0, 1.0));
        assert_eq!(img.uv, FULL_UV);
        assert_eq!(g.release_images(), 1);
        assert_eq!(g.image_width(id), None);
    }

    #[test]
    fn draw_quad_uses_the_region_size_and_uv() {
        use crate::coords::Rect;
        use crate::graphics::ImageData;

        let (mut g, _) = graphics();
        let sheet = g.images_mut().insert(ImageData::from_straight_rgba(8, 4, vec![255; 128]));
        g.draw_quad(sheet, Quad::new(4, 0, 4, 4), 10.0, 20.0, 0.0, 2.0, 2.0);
        g.draw_quad(sheet, Quad::new(8, 0, 4, 4), 0.0, 0.0, 0.0, 1.0, 1.0);

        assert_eq!(g.draw_list().len(), 1);
        let DrawCmd::Image(img) = &g.draw_list().items()[0] else {
            panic!("expected an image");
        };
        assert_eq!(img.uv, Rect::new(0.5, 0.0, 0.5, 1.0));
        assert_eq!(img.size, Vec2::new(8.0, 8.0));
        assert_eq!(img.center, Vec2::new(14.0, 24.0));
    }
}
