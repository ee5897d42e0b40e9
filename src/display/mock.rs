//! In-memory [`PixelSurface`] for host tests.

use core::convert::Infallible;
use std::vec::Vec;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::{FrameBuffer, PixelSurface, SurfaceError};

/// Records every hardware-facing call so tests can assert on them.
#[derive(Default)]
pub struct MockSurface {
    /// Working buffer the manager draws into.
    pub frame: FrameBuffer,
    /// Copy of `frame` taken at the last successful flush.
    pub flushed: FrameBuffer,
    pub flush_count: u32,
    /// Successful invert commands, in order.
    pub invert_commands: Vec<bool>,
    pub inverted: bool,
    /// Make the next flushes fail with [`SurfaceError::Bus`].
    pub fail_flush: bool,
    /// Make the next invert commands fail with [`SurfaceError::Pin`].
    pub fail_invert: bool,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Light one pixel directly, bypassing the manager.
    pub fn plant(
        &mut self,
        x: i32,
        y: i32,
    ) {
        self.frame.draw_iter([Pixel(Point::new(x, y), BinaryColor::On)]).ok();
    }

    /// Lit pixels of the last flushed frame inside `area`.
    pub fn lit_on_panel(
        &self,
        area: &Rectangle,
    ) -> u32 {
        self.flushed.count_lit(area)
    }
}

impl OriginDimensions for MockSurface {
    fn size(&self) -> Size {
        self.frame.size()
    }
}

impl DrawTarget for MockSurface {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.frame.draw_iter(pixels)
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.frame.fill_solid(area, color)
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.frame.clear(color)
    }
}

impl PixelSurface for MockSurface {
    fn flush(&mut self) -> Result<(), SurfaceError> {
        if self.fail_flush {
            return Err(SurfaceError::Bus);
        }
        self.flushed = self.frame.clone();
        self.flush_count += 1;
        Ok(())
    }

    fn set_invert(
        &mut self,
        invert: bool,
    ) -> Result<(), SurfaceError> {
        if self.fail_invert {
            return Err(SurfaceError::Pin);
        }
        self.invert_commands.push(invert);
        self.inverted = invert;
        Ok(())
    }
}
