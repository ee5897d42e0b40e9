//! DIS telemetry dashboard firmware for Raspberry Pi Pico (RP2040).
//!
//! Shows speed, pack voltage, motor current, a stopwatch and trip distance on a
//! 1.3" SH1107 OLED, fed by telemetry lines arriving on UART1.
//!
//! # Architecture
//!
//! - UART RX task: forwards received bytes into a pipe
//! - Main task: every 20 ms samples both keys, drains the pipe and runs one
//!   [`Dashboard::tick`], which renders and flushes one frame
//!
//! # Button Controls
//!
//! - **KEY0**: Cycle screens (Speed → Voltage → Current → Time → Distance)
//! - **KEY1**: Short press starts/pauses the stopwatch, hold 3 s to reset it

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

#[cfg(target_arch = "arm")]
#[macro_use]
extern crate dis_dashboard;

#[cfg(target_arch = "arm")]
mod sh1107;
#[cfg(target_arch = "arm")]
mod tasks;

#[cfg(target_arch = "arm")]
use dis_dashboard::config::TICK_PERIOD_MS;
#[cfg(target_arch = "arm")]
use dis_dashboard::{AppConfig, Dashboard, MonotonicClock};
#[cfg(target_arch = "arm")]
use embassy_executor::Spawner;
#[cfg(target_arch = "arm")]
use embassy_rp::bind_interrupts;
#[cfg(target_arch = "arm")]
use embassy_rp::gpio::{Input, Level, Output, Pull};
#[cfg(target_arch = "arm")]
use embassy_rp::peripherals::UART1;
#[cfg(target_arch = "arm")]
use embassy_rp::spi::Spi;
#[cfg(target_arch = "arm")]
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
#[cfg(target_arch = "arm")]
use embassy_time::{Instant, Timer};
#[cfg(target_arch = "arm")]
use static_cell::StaticCell;
#[cfg(target_arch = "arm")]
use {defmt_rtt as _, panic_probe as _};

#[cfg(target_arch = "arm")]
use crate::sh1107::{Sh1107, display_spi_config};
#[cfg(target_arch = "arm")]
use crate::tasks::{PIPE_CAPACITY, TELEMETRY_PIPE, uart_rx_task};

#[cfg(target_arch = "arm")]
bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// UART buffers must outlive the split halves
#[cfg(target_arch = "arm")]
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
#[cfg(target_arch = "arm")]
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Telemetry line rate.
#[cfg(target_arch = "arm")]
const UART_BAUD: u32 = 115_200;

/// [`MonotonicClock`] on top of the embassy time driver.
#[cfg(target_arch = "arm")]
struct EmbassyClock;

#[cfg(target_arch = "arm")]
impl MonotonicClock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }

    fn now_us(&self) -> u32 {
        Instant::now().as_micros() as u32
    }
}

#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    log_info!("DIS dashboard starting...");

    let p = embassy_rp::init(Default::default());

    // SH1107 pinout: SCK=10, MOSI=11, CS=9, DC=8, RST=12
    let cs = Output::new(p.PIN_9, Level::High);
    let dc = Output::new(p.PIN_8, Level::Low);
    let rst = Output::new(p.PIN_12, Level::High);

    // TX-only, the panel has no MISO
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, display_spi_config());

    static PANEL: StaticCell<Sh1107<'static>> = StaticCell::new();
    let panel = PANEL.init(Sh1107::new(spi, dc, cs, rst));
    if let Err(e) = panel.init().await {
        log_error!("Display init failed: {}", e);
    }
    log_info!("Display initialized");

    // Telemetry UART: TX=4, RX=5
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = UART_BAUD;
    let uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, uart_config);
    let uart = uart.into_buffered(Irqs, TX_BUF.init([0; 16]), RX_BUF.init([0; 256]));
    let (_tx, rx) = uart.split();

    if spawner.spawn(uart_rx_task(rx)).is_err() {
        log_error!("UART RX task spawn failed");
    }

    // Buttons (active-low with internal pull-up)
    let key0 = Input::new(p.PIN_15, Pull::Up);
    let key1 = Input::new(p.PIN_17, Pull::Up);

    let clock = EmbassyClock;
    let mut dashboard = Dashboard::new(panel, AppConfig::default(), clock.now_ms());
    let mut serial = [0u8; PIPE_CAPACITY];

    log_info!("Main loop starting");

    loop {
        // Everything that arrived since the last tick, without waiting
        let n = TELEMETRY_PIPE.try_read(&mut serial).unwrap_or(0);

        if let Err(e) = dashboard.tick(&clock, key0.is_low(), key1.is_low(), &serial[..n]) {
            log_error!("Frame failed: {}", e);
        }

        Timer::after_millis(TICK_PERIOD_MS).await;
    }
}

/// Host builds only need the library; the firmware entry point is ARM-only.
#[cfg(not(target_arch = "arm"))]
fn main() {}
