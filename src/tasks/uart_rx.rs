//! Telemetry UART receive task.
//!
//! Reads whatever the buffered UART has collected and pushes it into
//! [`TELEMETRY_PIPE`]. The control loop drains the pipe with `try_read` once per
//! tick, so it never waits on the serial line.

use embassy_rp::uart::BufferedUartRx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;
use embedded_io_async::Read;

/// Bytes the pipe holds between two ticks (~22 ms of line time at 115200 baud).
pub const PIPE_CAPACITY: usize = 256;

/// Serial bytes from the receive task to the control loop.
pub static TELEMETRY_PIPE: Pipe<CriticalSectionRawMutex, PIPE_CAPACITY> = Pipe::new();

/// Chunk size for one UART read.
const RX_CHUNK: usize = 64;

#[embassy_executor::task]
pub async fn uart_rx_task(mut rx: BufferedUartRx) {
    log_info!("UART RX task started");

    let mut buf = [0u8; RX_CHUNK];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                // Waits while the control loop catches up
                TELEMETRY_PIPE.write_all(&buf[..n]).await;
            }
            Ok(_) => {}
            Err(e) => {
                log_warn!("UART read error: {}", e);
            }
        }
    }
}
