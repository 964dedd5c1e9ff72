use crate::graphics::{Font, Graphics};
use crate::paint::Color;

const MARGIN: f32 = 70.0;
const TITLE_SCALE: f32 = 2.0;

pub(crate) const TITLE: &str = "Error";
pub(crate) const HINT: &str = "Click or press Ctrl+C to copy this error";
pub(crate) const HINT_COPIED: &str = "Copied to clipboard!";

pub(crate) fn background() -> Color {
    Color::from_srgb_u8(89, 157, 220, 255)
}

/// Records the error screen into `graphics`, replacing the current frame.
///
/// Installs the embedded font first if the game never set one.
pub(crate) fn render(graphics: &mut Graphics, message: &str, copied: bool) {
    graphics.begin_frame();
    graphics.set_background_color(background());
    graphics.set_color(Color::WHITE);

    let Some(font) = graphics.ensure_font() else {
        return;
    };
    let title = Font { size: font.size * TITLE_SCALE, ..font };
    let wrap = (graphics.width() as f32 - 2.0 * MARGIN).max(MARGIN);

    let mut y = MARGIN;
    graphics.set_font(title);
    graphics.print(TITLE, MARGIN, y);
    y += graphics.font_height(title) * 1.5;

    graphics.set_font(font);
    graphics.printf(message, MARGIN, y, wrap);
    y += graphics.measure_text(font, message, Some(wrap)).y + graphics.font_height(font);

    graphics.print(if copied { HINT_COPIED } else { HINT }, MARGIN, y);
}
