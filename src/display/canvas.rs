//! Drawing primitives shared by the screen layouts.
//!
//! Thin wrappers over `embedded-graphics` so the layouts read in pixel
//! coordinates. All text is top-aligned: `(x, y)` is the top-left corner of
//! the first glyph cell.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use super::fonts::LABEL_FONT;

/// Fill the whole surface.
pub fn fill<D>(
    display: &mut D,
    color: BinaryColor,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(color).ok();
}

/// Fill a rectangle given by its top-left corner and size.
pub fn fill_rect<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    color: BinaryColor,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    fill_area(display, &Rectangle::new(Point::new(x, y), Size::new(w, h)), color);
}

#[inline]
pub fn fill_area<D>(
    display: &mut D,
    area: &Rectangle,
    color: BinaryColor,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    display.fill_solid(area, color).ok();
}

/// Horizontal line `w` pixels long starting at `(x, y)`.
pub fn hline<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: u32,
    color: BinaryColor,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    if w == 0 {
        return;
    }
    fill_rect(display, x, y, w, 1, color);
}

pub fn line<D>(
    display: &mut D,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: BinaryColor,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    Line::new(Point::new(x0, y0), Point::new(x1, y1))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)
        .ok();
}

/// Text in the small label font.
pub fn draw_text<D>(
    display: &mut D,
    text: &str,
    x: i32,
    y: i32,
    color: BinaryColor,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_glyph_string(display, LABEL_FONT, text, x, y, color);
}

/// Text in an arbitrary monospaced font.
///
/// Only glyph pixels are written; the cell background is left alone.
pub fn draw_glyph_string<D>(
    display: &mut D,
    font: &MonoFont<'_>,
    text: &str,
    x: i32,
    y: i32,
    color: BinaryColor,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(font, color);
    Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
        .draw(display)
        .ok();
}

/// Rendered width of `text` in `font`, in pixels.
pub fn string_width(
    font: &MonoFont<'_>,
    text: &str,
) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0;
    }
    n * font.character_size.width + (n - 1) * font.character_spacing
}

/// Horizontal advance of one glyph cell.
#[inline]
pub const fn advance(font: &MonoFont<'_>) -> u32 { font.character_size.width + font.character_spacing }

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::FrameBuffer;
    use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};

    #[test]
    fn test_string_width() {
        assert_eq!(string_width(&FONT_6X10, ""), 0);
        assert_eq!(string_width(&FONT_6X10, "REC"), 18);
        assert_eq!(string_width(&FONT_10X20, "LOW"), 30);
        assert_eq!(advance(&FONT_10X20), 10);
    }

    #[test]
    fn test_fill_and_rect() {
        let mut fb = FrameBuffer::new();
        fill(&mut fb, BinaryColor::On);
        assert_eq!(fb.count_lit(&fb.bounding_box()), 128 * 64);

        fill_rect(&mut fb, 0, 0, 40, 8, BinaryColor::Off);
        assert_eq!(fb.count_lit(&fb.bounding_box()), 128 * 64 - 40 * 8);
    }

    #[test]
    fn test_hline_and_line_match() {
        let mut a = FrameBuffer::new();
        let mut b = FrameBuffer::new();
        hline(&mut a, 0, 52, 128, BinaryColor::On);
        line(&mut b, 0, 52, 127, 52, BinaryColor::On);
        assert_eq!(a, b);

        hline(&mut a, 0, 52, 0, BinaryColor::Off);
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_stays_inside_cell() {
        let mut fb = FrameBuffer::new();
        draw_text(&mut fb, "REC", 11, 54, BinaryColor::On);
        let cell = Rectangle::new(Point::new(11, 54), Size::new(18, 10));
        let lit = fb.count_lit(&cell);
        assert!(lit > 0);
        assert_eq!(fb.count_lit(&fb.bounding_box()), lit);
    }

    #[test]
    fn test_off_text_on_filled_background() {
        let mut fb = FrameBuffer::new();
        let cell = Rectangle::new(Point::new(0, 0), Size::new(10, 20));
        fill_area(&mut fb, &cell, BinaryColor::On);
        draw_glyph_string(&mut fb, &FONT_10X20, "8", 0, 0, BinaryColor::Off);
        let lit = fb.count_lit(&cell);
        assert!(lit > 0 && lit < 200);
    }
}
