//! Refill wait estimation

use std::fmt;

use lanegate_core::BaseUnits;
use serde::{Deserialize, Serialize};

/// How long until the bucket holds enough for a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaitEstimate {
    Seconds(u64),
    /// The bucket does not refill
    Indeterminate,
}

impl WaitEstimate {
    /// `ceil(shortfall / rate)` seconds; a zero rate never refills.
    pub fn for_shortfall(shortfall: BaseUnits, rate: BaseUnits) -> Self {
        if rate == 0 {
            return Self::Indeterminate;
        }
        let secs = shortfall / rate + u128::from(shortfall % rate != 0);
        Self::Seconds(u64::try_from(secs).unwrap_or(u64::MAX))
    }

    pub fn seconds(&self) -> Option<u64> {
        match self {
            Self::Seconds(s) => Some(*s),
            Self::Indeterminate => None,
        }
    }
}

impl fmt::Display for WaitEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds(s) => write!(f, "{}", format_wait(*s)),
            Self::Indeterminate => write!(f, "unknown"),
        }
    }
}

/// Compact human duration: `45s`, `1m 30s`, `2h 5m`, `3d 4h`
///
/// The minor unit is rounded up, so the text never promises less wait than
/// `secs`.
pub fn format_wait(secs: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    let (major_size, major_unit, minor_size, minor_unit) = if secs < MINUTE {
        return format!("{}s", secs);
    } else if secs < HOUR {
        (MINUTE, "m", 1, "s")
    } else if secs < DAY {
        (HOUR, "h", MINUTE, "m")
    } else {
        (DAY, "d", HOUR, "h")
    };

    let minors = secs.div_ceil(minor_size);
    let per_major = major_size / minor_size;
    let (major, minor) = (minors / per_major, minors % per_major);

    if minor == 0 {
        format!("{}{}", major, major_unit)
    } else {
        format!("{}{} {}{}", major, major_unit, minor, minor_unit)
    }
}
