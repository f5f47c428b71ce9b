use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Output volume as a whole percentage, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VolumeLevel(u8);

impl VolumeLevel {
    /// Clamp and round an arbitrary percentage.
    pub fn from_percent(percent: f64) -> Self {
        if percent.is_nan() {
            return Self(0);
        }
        Self(percent.clamp(0.0, 100.0).round() as u8)
    }

    /// From a `0.0..=1.0` scalar, as reported by Core Audio.
    pub fn from_scalar(scalar: f32) -> Self {
        Self::from_percent(f64::from(scalar) * 100.0)
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn as_scalar(self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid volume level {:?}: expected a number", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

/// Parses any float ("40", "40.6", "150", "-3", "55%") and clamps it.
impl FromStr for VolumeLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
        number
            .parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
            .map(Self::from_percent)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
