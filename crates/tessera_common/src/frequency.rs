//! Clock frequency values with unit parsing and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A clock frequency stored in Hertz.
///
/// Parses strings like `"2.5GHz"`, `"800MHz"` and `"100KHz"`. A bare number
/// such as `"2.5"` is read in gigahertz, the unit chip specifications use
/// for their clock target.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Frequency(f64);

const HZ_PER_GHZ: f64 = 1_000_000_000.0;
const HZ_PER_MHZ: f64 = 1_000_000.0;

impl Frequency {
    /// Creates a new frequency from a value in gigahertz.
    pub fn from_ghz(ghz: f64) -> Self {
        Self(ghz * HZ_PER_GHZ)
    }

    /// Returns the frequency in gigahertz.
    pub fn ghz(&self) -> f64 {
        self.0 / HZ_PER_GHZ
    }

    /// Returns the clock period in nanoseconds, or `0.0` for a zero frequency.
    pub fn period_ns(&self) -> f64 {
        if self.0 > 0.0 {
            HZ_PER_GHZ / self.0
        } else {
            0.0
        }
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

/// Gigahertz from 1 GHz up, megahertz below.
impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= HZ_PER_GHZ {
            write!(f, "{}GHz", self.0 / HZ_PER_GHZ)
        } else {
            write!(f, "{}MHz", self.0 / HZ_PER_MHZ)
        }
    }
}

/// Error type for parsing frequency strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFrequencyError {
    /// The input string that failed to parse.
    pub input: String,
}

impl fmt::Display for ParseFrequencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid frequency: '{}'", self.input)
    }
}

impl std::error::Error for ParseFrequencyError {}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseFrequencyError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let suffixes = [
            ("ghz", HZ_PER_GHZ),
            ("mhz", HZ_PER_MHZ),
            ("khz", 1_000.0),
            ("hz", 1.0),
        ];
        for (suffix, scale) in suffixes {
            if let Some(num) = lower.strip_suffix(suffix) {
                let val: f64 = num.trim().parse().map_err(|_| err())?;
                return Ok(Frequency(val * scale));
            }
        }

        let ghz: f64 = s.parse().map_err(|_| err())?;
        Ok(Frequency::from_ghz(ghz))
    }
}
