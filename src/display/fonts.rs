//! Font selection for the screen layouts.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

/// Label and status row font.
pub const LABEL_FONT: &MonoFont<'static> = &FONT_6X10;

/// Fonts for the large glyph layouts. Labels always use [`LABEL_FONT`].
#[derive(Clone, Copy)]
pub struct FontSet {
    /// Large DD.D digits.
    pub metric: &'static MonoFont<'static>,
    /// MM:SS digits.
    pub time: &'static MonoFont<'static>,
    /// Alert letters.
    pub alert: &'static MonoFont<'static>,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            metric: &PROFONT_24_POINT,
            time: &PROFONT_18_POINT,
            alert: &FONT_10X20,
        }
    }
}
