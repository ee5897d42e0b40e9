//! Display and layout configuration constants.
//!
//! Only positions that do not depend on font metrics live here. Everything
//! derived from glyph sizes (digit slots, band heights, label row) is computed
//! once at start-up by [`LayoutGeometry`](crate::display::LayoutGeometry).

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (SH1107 1.3" OLED, landscape).
pub const SCREEN_WIDTH: u32 = 128;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 64;

// =============================================================================
// Fixed Band Positions
// =============================================================================

/// Distance of the eco indicator line from the bottom edge.
pub const ECO_LINE_OFFSET: u32 = 12;

/// Width of the status band (link indicator + REC badge) cleared every tick.
pub const STATUS_BAND_WIDTH: u32 = 40;

/// Left edge of the "REC" text in the status band.
pub const STATUS_REC_X: i32 = 11;

/// Top of the MM:SS digits.
pub const TIME_DIGITS_Y: i32 = 5;

/// Top of the first alert line.
pub const ALERT_TOP_Y: i32 = 0;

/// Top of the second alert line.
pub const ALERT_BOTTOM_Y: i32 = 24;
