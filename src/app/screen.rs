//! Screen navigation for the dashboard.
//!
//! KEY0 cycles through the screens in a fixed order.
//!
//! # Screens
//!
//! - [`Screen::Speed`]: road speed, inverted while the battery is low
//! - [`Screen::Voltage`]: pack voltage
//! - [`Screen::Current`]: motor current
//! - [`Screen::Time`]: stopwatch as MM:SS
//! - [`Screen::Distance`]: trip distance in miles

/// Available screens.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Screen {
    #[default]
    Speed,
    Voltage,
    Current,
    Time,
    Distance,
}

impl Screen {
    /// Advance to the next screen (cycles: Speed → Voltage → Current → Time → Distance → Speed).
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Speed => Self::Voltage,
            Self::Voltage => Self::Current,
            Self::Current => Self::Time,
            Self::Time => Self::Distance,
            Self::Distance => Self::Speed,
        }
    }

    /// Label drawn in the bottom-right corner.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Speed => "MPH",
            Self::Voltage => "VOLTS",
            Self::Current => "AMPS",
            Self::Time => "TIME",
            Self::Distance => "MILES",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
