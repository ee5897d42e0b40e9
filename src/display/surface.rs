//! Pixel surface contract between the display manager and the panel driver.

use core::convert::Infallible;
use core::fmt;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Hardware command failure reported by a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum SurfaceError {
    /// The bus transfer to the panel failed.
    Bus,
    /// A control pin (DC, CS, RST) could not be driven.
    Pin,
}

impl fmt::Display for SurfaceError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Bus => f.write_str("bus transfer failed"),
            Self::Pin => f.write_str("control pin failed"),
        }
    }
}

/// A 128x64 monochrome drawing surface backed by a panel.
///
/// Drawing only touches the in-memory buffer and cannot fail; the panel is
/// updated by [`flush`](Self::flush). Implemented by the SH1107 driver in the
/// firmware and by `MockSurface` in tests.
pub trait PixelSurface: DrawTarget<Color = BinaryColor, Error = Infallible> {
    /// Push the whole buffer to the panel.
    fn flush(&mut self) -> Result<(), SurfaceError>;

    /// Switch hardware colour inversion on or off.
    fn set_invert(
        &mut self,
        invert: bool,
    ) -> Result<(), SurfaceError>;
}
