//! Precomputed pixel geometry for every screen layout.
//!
//! ```text
//! +--------------------------------+  y = 0
//! |      [T] [O] [.] [t]           |  metric band (DD.D), or
//! |     [M][M][:][S][S]            |  time band (MM:SS) from y = 5
//! |                                |
//! |________________________________|  eco line, height - 12
//! |U REC                      LABEL|  status band / label row
//! +--------------------------------+  y = 63
//! ```

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::canvas::{advance, string_width};
use super::fonts::{FontSet, LABEL_FONT};
use crate::config::{
    ALERT_BOTTOM_Y, ALERT_TOP_Y, ECO_LINE_OFFSET, SCREEN_HEIGHT, SCREEN_WIDTH, STATUS_BAND_WIDTH, STATUS_REC_X,
    TIME_DIGITS_Y,
};

/// DD.D slot order.
pub mod metric_slot {
    pub const TENS: usize = 0;
    pub const ONES: usize = 1;
    pub const DOT: usize = 2;
    pub const TENTHS: usize = 3;
}

/// MM:SS slot order.
pub mod time_slot {
    pub const MIN_TENS: usize = 0;
    pub const MIN_ONES: usize = 1;
    pub const COLON: usize = 2;
    pub const SEC_TENS: usize = 3;
    pub const SEC_ONES: usize = 4;
}

/// Read-only geometry, built once from the font metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutGeometry {
    /// Top-left of each DD.D glyph (also used for the `.DDD` distance).
    pub metric_slots: [Point; 4],
    /// Cleared before the metric digits are redrawn.
    pub metric_band: Rectangle,
    /// Top-left of each MM:SS glyph.
    pub time_slots: [Point; 5],
    /// Cleared before the time digits are redrawn.
    pub time_band: Rectangle,
    /// Top of the label / status row.
    pub status_y: i32,
    /// Cleared on every status row redraw; covers the REC highlight.
    pub status_band: Rectangle,
    /// Filled box behind "REC" while the timer runs.
    pub rec_highlight: Rectangle,
    pub eco_y: i32,
    pub alert_top_y: i32,
    pub alert_bottom_y: i32,
    /// Alert glyphs that fit across the screen.
    pub alert_max_chars: usize,
}

impl LayoutGeometry {
    pub fn from_fonts(fonts: &FontSet) -> Self {
        let height = SCREEN_HEIGHT as i32;
        let label_h = LABEL_FONT.character_size.height;
        let status_y = height - label_h as i32;

        Self {
            metric_slots: centered_slots(fonts.metric, 0),
            metric_band: Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, fonts.metric.character_size.height)),
            time_slots: centered_slots(fonts.time, TIME_DIGITS_Y),
            time_band: Rectangle::new(
                Point::zero(),
                Size::new(SCREEN_WIDTH, TIME_DIGITS_Y as u32 + fonts.time.character_size.height),
            ),
            status_y,
            status_band: Rectangle::new(Point::new(0, status_y - 1), Size::new(STATUS_BAND_WIDTH, label_h + 1)),
            rec_highlight: Rectangle::new(
                Point::new(STATUS_REC_X - 1, status_y - 1),
                Size::new(string_width(LABEL_FONT, "REC") + 2, label_h + 1),
            ),
            eco_y: height - ECO_LINE_OFFSET as i32,
            alert_top_y: ALERT_TOP_Y,
            alert_bottom_y: ALERT_BOTTOM_Y,
            alert_max_chars: (SCREEN_WIDTH / advance(fonts.alert).max(1)) as usize,
        }
    }

    /// Left edge of a right-aligned label.
    #[inline]
    pub fn label_x(
        &self,
        label: &str,
    ) -> i32 {
        SCREEN_WIDTH as i32 - string_width(LABEL_FONT, label) as i32
    }

    /// Left edge that centres `text` in `font`, never negative.
    #[inline]
    pub fn centered_x(
        &self,
        font: &MonoFont<'_>,
        text: &str,
    ) -> i32 {
        ((SCREEN_WIDTH as i32 - string_width(font, text) as i32) / 2).max(0)
    }
}

impl Default for LayoutGeometry {
    fn default() -> Self {
        Self::from_fonts(&FontSet::default())
    }
}

/// `N` equal-advance slots centred horizontally at row `y`.
fn centered_slots<const N: usize>(
    font: &MonoFont<'_>,
    y: i32,
) -> [Point; N] {
    let adv = advance(font) as i32;
    let x0 = ((SCREEN_WIDTH as i32 - adv * N as i32) / 2).max(0);
    core::array::from_fn(|i| Point::new(x0 + adv * i as i32, y))
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
