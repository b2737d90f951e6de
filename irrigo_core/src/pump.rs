//! Pump status and the moisture-threshold rule.

use std::fmt;
use std::str::FromStr;

use crate::error::InvalidPumpStatus;

/// Commanded state of the irrigation pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    On,
    Off,
}

impl PumpStatus {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            PumpStatus::On => "ON",
            PumpStatus::Off => "OFF",
        }
    }
}

impl fmt::Display for PumpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PumpStatus {
    type Err = InvalidPumpStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("on") {
            Ok(PumpStatus::On)
        } else if s.eq_ignore_ascii_case("off") {
            Ok(PumpStatus::Off)
        } else {
            Err(InvalidPumpStatus(s.to_string()))
        }
    }
}

/// Moisture reading below which the pump turns on.
pub const DEFAULT_MOISTURE_THRESHOLD: i32 = 500;

/// Process-wide pump state plus the automatic threshold rule.
///
/// The rule is a hard threshold: strictly below => ON, otherwise OFF.
/// No hysteresis, smoothing, or debounce. Starts OFF.
#[derive(Debug)]
pub struct PumpController {
    threshold: i32,
    status: PumpStatus,
}

impl PumpController {
    pub fn new(threshold: i32) -> Self {
        Self {
            threshold,
            status: PumpStatus::Off,
        }
    }

    /// Re-evaluate the status from a fresh moisture reading and return it.
    pub fn evaluate(&mut self, moisture: i32) -> PumpStatus {
        let next = if moisture < self.threshold {
            PumpStatus::On
        } else {
            PumpStatus::Off
        };
        if next != self.status {
            tracing::info!(
                moisture,
                threshold = self.threshold,
                status = %next,
                "pump status changed"
            );
        }
        self.status = next;
        next
    }

    /// Manual override; holds until the next evaluation or override.
    pub fn set_status(&mut self, status: PumpStatus) {
        tracing::info!(status = %status, "pump status override");
        self.status = status;
    }

    #[inline]
    pub fn status(&self) -> PumpStatus {
        self.status
    }

    #[inline]
    pub fn threshold(&self) -> i32 {
        self.threshold
    }
}

impl Default for PumpController {
    fn default() -> Self {
        Self::new(DEFAULT_MOISTURE_THRESHOLD)
    }
}
