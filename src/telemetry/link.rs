//! Serial line assembly and the live telemetry model.

use heapless::Vec;

use super::sample::{DiscardReason, TelemetrySample};
use crate::config::LINE_CAPACITY;

/// Receives raw serial bytes and keeps the most recent valid sample.
///
/// Bytes are filtered to printable ASCII plus `\n`, assembled into lines and
/// decoded one line at a time. A line that fails to decode is dropped with a
/// warning; the live sample only ever changes as a whole.
pub struct TelemetryLink {
    line: Vec<u8, LINE_CAPACITY>,
    /// Set when the current line outgrew the buffer; bytes are dropped until `\n`.
    overflowed: bool,
    sample: TelemetrySample,
    new_data: bool,
    link_blink: bool,
    parsed: u32,
    discarded: u32,
}

impl TelemetryLink {
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            overflowed: false,
            sample: TelemetrySample {
                deci_volts: 0,
                milliamps: 0,
                rpm: 0,
                duty: 0,
                throttle: 0,
                eco: false,
            },
            new_data: false,
            link_blink: false,
            parsed: 0,
            discarded: 0,
        }
    }

    /// Feed whatever bytes arrived since the last tick.
    ///
    /// Clears the new-data flag first, so after this call it reports whether
    /// *this* batch produced at least one sample. A partial trailing line is
    /// kept for the next call.
    pub fn ingest(
        &mut self,
        bytes: &[u8],
    ) {
        self.new_data = false;

        for &b in bytes {
            match b {
                b'\n' => self.end_line(),
                32..=126 => self.push_byte(b),
                // Line noise
                _ => {}
            }
        }
    }

    /// Decode one complete line and, on success, make it the live sample.
    ///
    /// On failure the previous sample is left untouched and the reason is
    /// logged and returned.
    pub fn parse_line(
        &mut self,
        line: &[u8],
    ) -> Result<TelemetrySample, DiscardReason> {
        match TelemetrySample::decode(line) {
            Ok(sample) => {
                self.sample = sample;
                self.new_data = true;
                self.link_blink = !self.link_blink;
                self.parsed = self.parsed.wrapping_add(1);
                Ok(sample)
            }
            Err(reason) => {
                self.discard(reason, line.len());
                Err(reason)
            }
        }
    }

    /// Most recent successfully decoded sample.
    #[inline]
    pub const fn sample(&self) -> &TelemetrySample { &self.sample }

    /// At least one sample was decoded during the last [`ingest`](Self::ingest).
    #[inline]
    pub const fn has_new_data(&self) -> bool { self.new_data }

    /// Link activity indicator, flips on every decoded sample.
    #[inline]
    pub const fn link_blink(&self) -> bool { self.link_blink }

    /// Total decoded samples since boot (wrapping).
    #[inline]
    pub const fn parsed_count(&self) -> u32 { self.parsed }

    /// Total discarded lines since boot (wrapping), empty lines excluded.
    #[inline]
    pub const fn discarded_count(&self) -> u32 { self.discarded }

    fn push_byte(
        &mut self,
        b: u8,
    ) {
        if self.overflowed {
            return;
        }
        if self.line.push(b).is_err() {
            self.overflowed = true;
            self.discard(DiscardReason::Overflow, self.line.len());
        }
    }

    fn end_line(&mut self) {
        if self.overflowed {
            self.overflowed = false;
            self.line.clear();
            return;
        }

        let line = core::mem::take(&mut self.line);
        // Blank lines are keep-alives, not errors
        if !line.trim_ascii().is_empty() {
            let _ = self.parse_line(&line);
        }
    }

    fn discard(
        &mut self,
        reason: DiscardReason,
        len: usize,
    ) {
        self.discarded = self.discarded.wrapping_add(1);
        log_warn!("Telemetry line discarded: {} (len={})", reason, len);
    }
}

impl Default for TelemetryLink {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::Field;

    const GOOD: &[u8] = b"s4800001250600801201";

    fn good_sample() -> TelemetrySample {
        TelemetrySample {
            deci_volts: 480,
            milliamps: 125,
            rpm: 60,
            duty: 80,
            throttle: 120,
            eco: true,
        }
    }

    #[test]
    fn test_ingest_complete_line() {
        let mut link = TelemetryLink::new();
        link.ingest(b"s4800001250600801201\n");

        assert!(link.has_new_data());
        assert!(link.link_blink());
        assert_eq!(*link.sample(), good_sample());
        assert_eq!(link.parsed_count(), 1);
    }

    #[test]
    fn test_ingest_line_split_across_calls() {
        let mut link = TelemetryLink::new();
        link.ingest(b"s480000125");
        assert!(!link.has_new_data());
        assert_eq!(link.parsed_count(), 0);

        link.ingest(b"0600801201\n");
        assert!(link.has_new_data());
        assert_eq!(*link.sample(), good_sample());
    }

    #[test]
    fn test_new_data_cleared_on_next_ingest() {
        let mut link = TelemetryLink::new();
        link.ingest(b"s4800001250600801201\n");
        assert!(link.has_new_data());

        link.ingest(b"");
        assert!(!link.has_new_data());
    }

    #[test]
    fn test_blink_toggles_per_parsed_line() {
        let mut link = TelemetryLink::new();
        link.ingest(b"s4800001250600801201\ns4800001250600801201\ns4800001250600801201\n");
        assert_eq!(link.parsed_count(), 3);
        assert!(link.link_blink());

        link.ingest(b"s4800001250600801201\n");
        assert!(!link.link_blink());
    }

    #[test]
    fn test_malformed_lines_keep_previous_sample() {
        let mut link = TelemetryLink::new();
        link.ingest(b"s4800001250600801201\n");
        let before = *link.sample();

        link.ingest(b"s48\n");
        link.ingest(b"s48x0001250600801201\n");
        link.ingest(b"hello world\n");
        link.ingest(b"s4800001250601011201\n");

        assert_eq!(*link.sample(), before);
        assert!(!link.has_new_data());
        assert_eq!(link.parsed_count(), 1);
        assert_eq!(link.discarded_count(), 4);
        // Blink only moves on a decoded sample
        assert!(link.link_blink());
    }

    #[test]
    fn test_parse_line_reports_reason() {
        let mut link = TelemetryLink::new();
        assert_eq!(link.parse_line(b"s48"), Err(DiscardReason::TooShort));
        assert_eq!(
            link.parse_line(b"s480000125abc0801201"),
            Err(DiscardReason::InvalidField(Field::Rpm))
        );
        assert_eq!(link.parse_line(GOOD), Ok(good_sample()));
    }

    #[test]
    fn test_missing_eco_still_counts_as_link_activity() {
        // A line whose eco tail is absent is accepted, reads eco as off and
        // flips the activity indicator like any other sample.
        let mut link = TelemetryLink::new();
        link.ingest(b"s480000125060080120\n");
        assert!(link.has_new_data());
        assert!(link.link_blink());
        assert!(!link.sample().eco);
    }

    #[test]
    fn test_non_printable_bytes_dropped() {
        let mut link = TelemetryLink::new();
        link.ingest(b"s48000\x00\x1b0125\xff0600801201\r\n");
        assert_eq!(*link.sample(), good_sample());
    }

    #[test]
    fn test_empty_lines_skipped_silently() {
        let mut link = TelemetryLink::new();
        link.ingest(b"\n\n   \n");
        assert_eq!(link.discarded_count(), 0);
        assert!(!link.has_new_data());
    }

    #[test]
    fn test_overflow_drops_until_newline() {
        let mut link = TelemetryLink::new();
        let mut noise = [b'9'; LINE_CAPACITY + 20];
        noise[0] = b's';
        link.ingest(&noise);
        link.ingest(b"\n");
        assert_eq!(link.discarded_count(), 1);
        assert_eq!(link.parsed_count(), 0);

        // The next line starts clean
        link.ingest(b"s4800001250600801201\n");
        assert_eq!(*link.sample(), good_sample());
    }

    #[test]
    fn test_line_at_capacity_is_parsed() {
        let mut line = [b'0'; LINE_CAPACITY];
        line[..GOOD.len()].copy_from_slice(GOOD);
        let mut link = TelemetryLink::new();
        link.ingest(&line);
        link.ingest(b"\n");
        assert_eq!(link.parsed_count(), 1);
        // Eco tail is "1" followed by zeros, a non-zero integer
        assert!(link.sample().eco);
    }
}
