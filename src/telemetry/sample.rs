//! Telemetry sample and the fixed-width line decoder.
//!
//! # Wire format
//!
//! ```text
//! s 048 012500 060 080 120 1
//! | |   |      |   |   |   +-- eco flag, rest of the line (0/1)
//! | |   |      |   |   +------ throttle, bytes 16..19 (0..255)
//! | |   |      |   +---------- duty, bytes 13..16 (0..100 %)
//! | |   |      +-------------- rpm, bytes 10..13
//! | |   +--------------------- current in milliamps, bytes 4..10
//! | +------------------------- pack voltage x10, bytes 1..4
//! +--------------------------- sentinel
//! ```
//!
//! (Spaces shown for readability only; the real line has none.)

use core::fmt;

/// Line sentinel that marks a telemetry sample.
pub const SENTINEL: u8 = b's';

const VOLTS_FIELD: (usize, usize) = (1, 4);
const CURRENT_FIELD: (usize, usize) = (4, 10);
const RPM_FIELD: (usize, usize) = (10, 13);
const DUTY_FIELD: (usize, usize) = (13, 16);
const THROTTLE_FIELD: (usize, usize) = (16, 19);

/// Minimum line length: sentinel plus the five fixed-width fields.
pub const MIN_LINE_LEN: usize = THROTTLE_FIELD.1;

const MAX_DUTY: u32 = 100;
const MAX_THROTTLE: u32 = 255;

/// One decoded telemetry line.
///
/// Voltage and current are kept in the fixed-point units they arrive in;
/// [`volts`](Self::volts) and [`amps`](Self::amps) convert for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct TelemetrySample {
    /// Pack voltage in tenths of a volt.
    pub deci_volts: u16,
    /// Motor current in milliamps.
    pub milliamps: u32,
    /// Motor speed in revolutions per minute.
    pub rpm: u16,
    /// PWM duty cycle, 0..=100 %.
    pub duty: u8,
    /// Throttle position, 0..=255.
    pub throttle: u8,
    /// Eco mode engaged.
    pub eco: bool,
}

impl TelemetrySample {
    /// Pack voltage in volts.
    #[inline]
    pub fn volts(&self) -> f32 { f32::from(self.deci_volts) / 10.0 }

    /// Motor current in amps.
    #[inline]
    pub fn amps(&self) -> f32 { self.milliamps as f32 / 1000.0 }

    /// Decode one line (without the trailing newline).
    ///
    /// Surrounding whitespace is ignored, and so is whitespace padding inside
    /// a fixed-width field. The eco flag is the leading integer of whatever
    /// follows the throttle field; a missing or non-numeric tail reads as
    /// eco off rather than rejecting the line.
    pub fn decode(line: &[u8]) -> Result<Self, DiscardReason> {
        let line = line.trim_ascii();
        if line.is_empty() {
            return Err(DiscardReason::Empty);
        }
        if line[0] != SENTINEL {
            return Err(DiscardReason::MissingSentinel);
        }
        if line.len() < MIN_LINE_LEN {
            return Err(DiscardReason::TooShort);
        }

        let deci_volts = parse_field(line, VOLTS_FIELD, Field::Voltage)?;
        let milliamps = parse_field(line, CURRENT_FIELD, Field::Current)?;
        let rpm = parse_field(line, RPM_FIELD, Field::Rpm)?;
        let duty = parse_field(line, DUTY_FIELD, Field::Duty)?;
        let throttle = parse_field(line, THROTTLE_FIELD, Field::Throttle)?;

        if duty > MAX_DUTY {
            return Err(DiscardReason::InvalidField(Field::Duty));
        }
        if throttle > MAX_THROTTLE {
            return Err(DiscardReason::InvalidField(Field::Throttle));
        }

        Ok(Self {
            deci_volts: deci_volts as u16,
            milliamps,
            rpm: rpm as u16,
            duty: duty as u8,
            throttle: throttle as u8,
            eco: parse_eco(&line[MIN_LINE_LEN..]),
        })
    }
}

/// Fixed-width field names, for discard diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Field {
    Voltage,
    Current,
    Rpm,
    Duty,
    Throttle,
}

impl Field {
    /// Short name for log output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Voltage => "voltage",
            Self::Current => "current",
            Self::Rpm => "rpm",
            Self::Duty => "duty",
            Self::Throttle => "throttle",
        }
    }
}

/// Why a line was dropped instead of becoming a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum DiscardReason {
    /// Nothing but whitespace between two newlines.
    Empty,
    /// The line does not start with the `s` sentinel.
    MissingSentinel,
    /// Fewer bytes than the five fixed-width fields need.
    TooShort,
    /// A field holds something other than digits, or is out of range.
    InvalidField(Field),
    /// The line outgrew the receive buffer before its newline arrived.
    Overflow,
}

impl fmt::Display for DiscardReason {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty line"),
            Self::MissingSentinel => f.write_str("missing sentinel"),
            Self::TooShort => f.write_str("line too short"),
            Self::InvalidField(field) => write!(f, "invalid {} field", field.name()),
            Self::Overflow => f.write_str("line overflow"),
        }
    }
}

/// Parse one fixed-width decimal field.
fn parse_field(
    line: &[u8],
    (start, end): (usize, usize),
    field: Field,
) -> Result<u32, DiscardReason> {
    let digits = line[start..end].trim_ascii();
    if digits.is_empty() {
        return Err(DiscardReason::InvalidField(field));
    }

    let mut value = 0u32;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(DiscardReason::InvalidField(field));
        }
        // Fields are at most 6 digits, so this cannot overflow
        value = value * 10 + u32::from(b - b'0');
    }
    Ok(value)
}

/// Eco flag: leading integer of the tail, non-zero means on.
fn parse_eco(tail: &[u8]) -> bool {
    tail.trim_ascii()
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .any(|&b| b != b'0')
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_line() {
        let sample = TelemetrySample::decode(b"s0480125000600801201").unwrap();
        assert_eq!(sample.deci_volts, 48);
        assert_eq!(sample.volts(), 4.8);
        assert_eq!(sample.milliamps, 12_500);
        assert_eq!(sample.amps(), 12.5);
        assert_eq!(sample.rpm, 60);
        assert_eq!(sample.duty, 80);
        assert_eq!(sample.throttle, 120);
        assert!(sample.eco);
    }

    #[test]
    fn test_decode_small_current() {
        let sample = TelemetrySample::decode(b"s4800001250600801200").unwrap();
        assert_eq!(sample.volts(), 48.0);
        assert_eq!(sample.amps(), 0.125);
        assert!(!sample.eco);
    }

    #[test]
    fn test_decode_tolerates_trailing_garbage_after_eco() {
        let sample = TelemetrySample::decode(b"s4800001250600801201xyz").unwrap();
        assert!(sample.eco);
    }

    #[test]
    fn test_decode_multi_digit_eco_is_truthy() {
        let sample = TelemetrySample::decode(b"s48000012506008012010").unwrap();
        assert!(sample.eco);
        let sample = TelemetrySample::decode(b"s48000012506008012000").unwrap();
        assert!(!sample.eco);
    }

    #[test]
    fn test_decode_missing_eco_reads_as_off() {
        // The line is accepted even though the eco field is absent
        let sample = TelemetrySample::decode(b"s480000125060080120").unwrap();
        assert!(!sample.eco);
        let sample = TelemetrySample::decode(b"s480000125060080120 junk").unwrap();
        assert!(!sample.eco);
    }

    #[test]
    fn test_decode_strips_surrounding_whitespace() {
        let sample = TelemetrySample::decode(b"  s4800001250600801201  ").unwrap();
        assert_eq!(sample.rpm, 60);
    }

    #[test]
    fn test_decode_accepts_padded_fields() {
        let sample = TelemetrySample::decode(b"s 48   125 60 80 201").unwrap();
        assert_eq!(sample.deci_volts, 48);
        assert_eq!(sample.milliamps, 125);
        assert_eq!(sample.rpm, 60);
        assert_eq!(sample.duty, 80);
        assert_eq!(sample.throttle, 20);
        assert!(sample.eco);
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert_eq!(TelemetrySample::decode(b""), Err(DiscardReason::Empty));
        assert_eq!(TelemetrySample::decode(b"   "), Err(DiscardReason::Empty));
    }

    #[test]
    fn test_decode_rejects_missing_sentinel() {
        assert_eq!(
            TelemetrySample::decode(b"V=48.00, I=1.20, RPM=60"),
            Err(DiscardReason::MissingSentinel)
        );
    }

    #[test]
    fn test_decode_rejects_short_line() {
        assert_eq!(TelemetrySample::decode(b"s480"), Err(DiscardReason::TooShort));
        assert_eq!(TelemetrySample::decode(b"s48000012506008012"), Err(DiscardReason::TooShort));
    }

    #[test]
    fn test_decode_rejects_non_numeric_fields() {
        assert_eq!(
            TelemetrySample::decode(b"s4x00001250600801201"),
            Err(DiscardReason::InvalidField(Field::Voltage))
        );
        assert_eq!(
            TelemetrySample::decode(b"s480000-250600801201"),
            Err(DiscardReason::InvalidField(Field::Current))
        );
        assert_eq!(
            TelemetrySample::decode(b"s480000125   0801201"),
            Err(DiscardReason::InvalidField(Field::Rpm))
        );
        assert_eq!(
            TelemetrySample::decode(b"s4800001250604.01201"),
            Err(DiscardReason::InvalidField(Field::Duty))
        );
        assert_eq!(
            TelemetrySample::decode(b"s48000012506008012?1"),
            Err(DiscardReason::InvalidField(Field::Throttle))
        );
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        assert_eq!(
            TelemetrySample::decode(b"s4800001250601011201"),
            Err(DiscardReason::InvalidField(Field::Duty))
        );
        assert_eq!(
            TelemetrySample::decode(b"s4800001250600802561"),
            Err(DiscardReason::InvalidField(Field::Throttle))
        );
    }

    #[test]
    fn test_decode_accepts_range_limits() {
        let sample = TelemetrySample::decode(b"s9999999999991002551").unwrap();
        assert_eq!(sample.deci_volts, 999);
        assert_eq!(sample.milliamps, 999_999);
        assert_eq!(sample.rpm, 999);
        assert_eq!(sample.duty, 100);
        assert_eq!(sample.throttle, 255);
    }

    #[test]
    fn test_discard_reason_display() {
        assert_eq!(DiscardReason::TooShort.to_string(), "line too short");
        assert_eq!(DiscardReason::InvalidField(Field::Rpm).to_string(), "invalid rpm field");
    }
}
