//! 1-bit frame buffer for the 128x64 panel.
//!
//! Pixels are packed horizontally, most significant bit first: pixel `(x, y)`
//! lives in byte `(y * 128 + x) / 8`, bit `7 - x % 8`. One row is 16 bytes,
//! which is also the burst the SH1107 transport sends per row.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const WIDTH: usize = SCREEN_WIDTH as usize;
pub const HEIGHT: usize = SCREEN_HEIGHT as usize;
/// Bytes per pixel row.
pub const ROW_BYTES: usize = WIDTH / 8;
pub const BUFFER_SIZE: usize = ROW_BYTES * HEIGHT;

/// In-memory copy of the panel contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    buf: [u8; BUFFER_SIZE],
}

impl FrameBuffer {
    /// All pixels off.
    pub const fn new() -> Self {
        Self { buf: [0; BUFFER_SIZE] }
    }

    /// Whether pixel `(x, y)` is on. Out-of-bounds pixels read as off.
    pub fn pixel(
        &self,
        x: u32,
        y: u32,
    ) -> bool {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return false;
        }
        let (idx, mask) = Self::locate(x as usize, y as usize);
        self.buf[idx] & mask != 0
    }

    /// One 16-byte pixel row. Rows past the bottom edge are clamped.
    #[inline]
    pub fn row(
        &self,
        y: usize,
    ) -> &[u8] {
        let y = y.min(HEIGHT - 1);
        &self.buf[y * ROW_BYTES..(y + 1) * ROW_BYTES]
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; BUFFER_SIZE] { &self.buf }

    /// Number of lit pixels inside `area` (clipped to the panel).
    pub fn count_lit(
        &self,
        area: &Rectangle,
    ) -> u32 {
        let area = area.intersection(&self.bounding_box());
        area.points().filter(|p| self.pixel(p.x as u32, p.y as u32)).count() as u32
    }

    #[inline]
    const fn locate(
        x: usize,
        y: usize,
    ) -> (usize, u8) {
        ((y * WIDTH + x) / 8, 0x80 >> (x % 8))
    }

    #[inline]
    fn set(
        &mut self,
        x: usize,
        y: usize,
        on: bool,
    ) {
        let (idx, mask) = Self::locate(x, y);
        if on {
            self.buf[idx] |= mask;
        } else {
            self.buf[idx] &= !mask;
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as usize, point.y as usize);
            if x < WIDTH && y < HEIGHT {
                self.set(x, y, color.is_on());
            }
        }
        Ok(())
    }

    /// Fill a clipped rectangle, writing whole bytes where the span allows.
    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        let x0 = area.top_left.x as usize;
        let x1 = bottom_right.x as usize + 1;
        let on = color.is_on();
        let fill_byte = if on { 0xFF } else { 0x00 };

        for y in area.top_left.y as usize..=bottom_right.y as usize {
            let mut x = x0;
            while x < x1 {
                if x % 8 == 0 && x + 8 <= x1 {
                    self.buf[(y * WIDTH + x) / 8] = fill_byte;
                    x += 8;
                } else {
                    self.set(x, y, on);
                    x += 1;
                }
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.buf.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn test_new_is_blank() {
        let fb = FrameBuffer::new();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(fb.as_bytes().len(), 1024);
    }

    #[test]
    fn test_msb_first_packing() {
        let mut fb = FrameBuffer::new();
        fb.draw_iter([Pixel(Point::new(0, 0), BinaryColor::On)]).ok();
        fb.draw_iter([Pixel(Point::new(9, 0), BinaryColor::On)]).ok();
        fb.draw_iter([Pixel(Point::new(127, 1), BinaryColor::On)]).ok();

        assert_eq!(fb.as_bytes()[0], 0b1000_0000);
        assert_eq!(fb.as_bytes()[1], 0b0100_0000);
        // Last pixel of row 1 is the low bit of byte 31
        assert_eq!(fb.row(1)[15], 0b0000_0001);
        assert_eq!(fb.as_bytes()[31], 0b0000_0001);
        assert!(fb.pixel(9, 0));
        assert!(!fb.pixel(8, 0));
    }

    #[test]
    fn test_out_of_bounds_pixels_clipped() {
        let mut fb = FrameBuffer::new();
        fb.draw_iter([
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(128, 0), BinaryColor::On),
            Pixel(Point::new(0, 64), BinaryColor::On),
        ])
        .ok();
        assert_eq!(fb, FrameBuffer::new());
        assert!(!fb.pixel(200, 200));
    }

    #[test]
    fn test_fill_solid_unaligned_span() {
        let mut fb = FrameBuffer::new();
        let area = Rectangle::new(Point::new(3, 2), Size::new(20, 3));
        fb.fill_solid(&area, BinaryColor::On).ok();

        assert_eq!(fb.count_lit(&fb.bounding_box()), 60);
        assert!(fb.pixel(3, 2) && fb.pixel(22, 4));
        assert!(!fb.pixel(2, 2) && !fb.pixel(23, 2) && !fb.pixel(3, 5));
        assert_eq!(fb.row(3)[1], 0xFF);
    }

    #[test]
    fn test_fill_solid_clipped_to_panel() {
        let mut fb = FrameBuffer::new();
        let area = Rectangle::new(Point::new(120, 60), Size::new(50, 50));
        fb.fill_solid(&area, BinaryColor::On).ok();
        assert_eq!(fb.count_lit(&fb.bounding_box()), 8 * 4);
    }

    #[test]
    fn test_fill_solid_off_clears_region_only() {
        let mut fb = FrameBuffer::new();
        fb.clear(BinaryColor::On).ok();
        let area = Rectangle::new(Point::new(0, 0), Size::new(128, 10));
        fb.fill_solid(&area, BinaryColor::Off).ok();
        assert_eq!(fb.count_lit(&area), 0);
        assert_eq!(fb.count_lit(&fb.bounding_box()), 128 * 54);
    }

    #[test]
    fn test_line_primitive() {
        let mut fb = FrameBuffer::new();
        Line::new(Point::new(0, 52), Point::new(127, 52))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut fb)
            .ok();
        assert!(fb.row(52).iter().all(|&b| b == 0xFF));
        assert_eq!(fb.count_lit(&fb.bounding_box()), 128);
    }
}
