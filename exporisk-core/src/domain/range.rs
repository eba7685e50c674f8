//! ValueRange — a numeric interval with independently open/closed bounds.

use serde::{Deserialize, Serialize};

/// A numeric interval used throughout the configuration: risk-level mapping
/// ranges and minutes-at-attenuation drop ranges.
///
/// Bounds are inclusive unless the corresponding `*_exclusive` flag is set,
/// matching the server-delivered range encoding. Both flags default to false
/// when omitted from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub min_exclusive: bool,
    #[serde(default)]
    pub max_exclusive: bool,
}

impl ValueRange {
    /// Closed interval `[min, max]`.
    pub fn inclusive(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: false,
            max_exclusive: false,
        }
    }

    /// Half-open interval `(min, max]`, the shape mapping tables chain with.
    pub fn left_open(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: true,
            max_exclusive: false,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.min_exclusive {
            value > self.min
        } else {
            value >= self.min
        };
        let below_max = if self.max_exclusive {
            value < self.max
        } else {
            value <= self.max
        };
        above_min && below_max
    }
}
