//! Alert threshold type

use std::fmt;
use std::str::FromStr;

use crate::error::ThresholdParseError;

/// Used-percent above which an alert fires, always within `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AlertThreshold(f64);

impl AlertThreshold {
    pub fn new(percent: f64) -> Result<Self, ThresholdParseError> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(ThresholdParseError::OutOfRange(percent));
        }
        Ok(Self(percent))
    }

    pub fn percent(self) -> f64 {
        self.0
    }
}

impl FromStr for AlertThreshold {
    type Err = ThresholdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ThresholdParseError::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for AlertThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
