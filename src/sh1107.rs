//! SH1107 OLED driver for the 1.3" 128x64 panel on SPI1.
//!
//! Pin mapping:
//! - SCK: GPIO10 (SPI1 CLK)
//! - MOSI: GPIO11 (SPI1 TX)
//! - CS: GPIO9
//! - DC: GPIO8
//! - RST: GPIO12
//!
//! The panel is mounted rotated 180 degrees. Each frame-buffer row is written as
//! one 16-byte burst into the matching controller column, so a flush is 64
//! column-address commands plus 64 data bursts.

use core::convert::Infallible;

use dis_dashboard::display::{HEIGHT, ROW_BYTES};
use dis_dashboard::{FrameBuffer, PixelSurface, SurfaceError};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embassy_time::Timer;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

// SH1107 commands
const DISPLAY_OFF: u8 = 0xAE;
const DISPLAY_ON: u8 = 0xAF;
const NORMAL: u8 = 0xA6;
const INVERSE: u8 = 0xA7;
const PAGE_ADDR: u8 = 0xB0;
const COLUMN_LOW: u8 = 0x00;
const COLUMN_HIGH: u8 = 0x10;

/// Power-up sequence: vertical addressing, 180 degree segment remap,
/// 1/64 duty with a 0x60 display offset, DC-DC on.
#[rustfmt::skip]
const INIT_SEQUENCE: &[u8] = &[
    DISPLAY_OFF,
    COLUMN_LOW,
    COLUMN_HIGH,
    PAGE_ADDR,
    0xDC, 0x00, // display start line
    0x81, 0x6F, // contrast
    0x21,       // vertical addressing mode
    0xA1,       // segment remap (rotate 180)
    0xC0,       // COM scan direction
    0xA4,       // resume to RAM content
    NORMAL,
    0xA8, 0x3F, // multiplex ratio
    0xD3, 0x60, // display offset
    0xD5, 0x41, // oscillator divide
    0xD9, 0x22, // pre-charge period
    0xDB, 0x35, // VCOMH
    0xAD, 0x8A, // DC-DC enable
    DISPLAY_ON,
];

/// SPI configuration for the SH1107 (mode 0, 30 MHz).
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = 30_000_000;
    config
}

/// Panel driver: owns the SPI bus, the control pins and the frame buffer
/// everything is drawn into.
pub struct Sh1107<'d> {
    spi: Spi<'d, SPI1, Blocking>,
    dc: Output<'d>,
    cs: Output<'d>,
    rst: Output<'d>,
    frame: FrameBuffer,
}

impl<'d> Sh1107<'d> {
    pub fn new(
        spi: Spi<'d, SPI1, Blocking>,
        dc: Output<'d>,
        cs: Output<'d>,
        rst: Output<'d>,
    ) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            frame: FrameBuffer::new(),
        }
    }

    /// Hardware reset followed by the init sequence.
    pub async fn init(&mut self) -> Result<(), SurfaceError> {
        self.rst.set_high();
        Timer::after_millis(1).await;
        self.rst.set_low();
        Timer::after_millis(10).await;
        self.rst.set_high();

        for &cmd in INIT_SEQUENCE {
            self.write_command(cmd)?;
        }
        Ok(())
    }

    /// Send a command byte (DC low, CS low during transfer).
    fn write_command(
        &mut self,
        cmd: u8,
    ) -> Result<(), SurfaceError> {
        self.dc.set_low();
        self.cs.set_low();
        let result = self.spi.blocking_write(&[cmd]);
        self.cs.set_high();
        result.map_err(|_| SurfaceError::Bus)
    }

    /// Send data bytes (DC high, CS low during transfer).
    fn write_data(
        &mut self,
        data: &[u8],
    ) -> Result<(), SurfaceError> {
        self.dc.set_high();
        self.cs.set_low();
        let result = self.spi.blocking_write(data);
        self.cs.set_high();
        result.map_err(|_| SurfaceError::Bus)
    }
}

impl PixelSurface for Sh1107<'_> {
    fn flush(&mut self) -> Result<(), SurfaceError> {
        self.write_command(PAGE_ADDR)?;

        let mut burst = [0u8; ROW_BYTES];
        for row in 0..HEIGHT {
            // Rotated 180: frame row N lands in controller column N
            let column = row as u8;
            self.write_command(COLUMN_LOW | (column & 0x0F))?;
            self.write_command(COLUMN_HIGH | (column >> 4))?;

            // The controller takes the leftmost pixel in bit 0
            for (dst, src) in burst.iter_mut().zip(self.frame.row(row)) {
                *dst = src.reverse_bits();
            }
            self.write_data(&burst)?;
        }
        Ok(())
    }

    fn set_invert(
        &mut self,
        invert: bool,
    ) -> Result<(), SurfaceError> {
        self.write_command(if invert { INVERSE } else { NORMAL })
    }
}

impl OriginDimensions for Sh1107<'_> {
    fn size(&self) -> Size {
        self.frame.size()
    }
}

impl DrawTarget for Sh1107<'_> {
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
