//! Exposure window — the fundamental proximity observation unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Confidence in the Bluetooth signal calibration of the reporting device.
///
/// Wire values 0–3, lowest first. Part of the distinct-encounter identity:
/// two windows with the same transmission risk level and the same calibration
/// confidence on the same day are treated as one encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationConfidence {
    Lowest,
    Low,
    Medium,
    High,
}

/// Attenuation bucket of a scan instance, closest first.
///
/// The raw attenuation (dB) is bucketed by the platform before it reaches the
/// engine; the configuration assigns a weight to each bucket when computing
/// normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttenuationBucket {
    Immediate,
    Near,
    Medium,
    Other,
}

impl AttenuationBucket {
    pub const ALL: [AttenuationBucket; 4] = [
        AttenuationBucket::Immediate,
        AttenuationBucket::Near,
        AttenuationBucket::Medium,
        AttenuationBucket::Other,
    ];
}

/// One attenuation/duration sample inside an exposure window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanInstance {
    /// Duration of the sample, in minutes.
    pub minutes: f64,
    pub attenuation_bucket: AttenuationBucket,
}

/// A single Bluetooth proximity observation window, as delivered by the
/// platform's exposure-detection subsystem.
///
/// The `date` is already normalized to day granularity by the caller. The
/// engine never mutates a window; all derived values live on the engine-side
/// wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureWindow {
    pub date: NaiveDate,
    pub calibration_confidence: CalibrationConfidence,
    pub transmission_risk_level: u8,
    pub scan_instances: Vec<ScanInstance>,
}

impl ExposureWindow {
    /// Total duration of scan instances in the given buckets, in minutes.
    pub fn minutes_in_buckets(&self, buckets: &[AttenuationBucket]) -> f64 {
        self.scan_instances
            .iter()
            .filter(|si| buckets.contains(&si.attenuation_bucket))
            .map(|si| si.minutes)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_window() -> ExposureWindow {
        ExposureWindow {
            date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            calibration_confidence: CalibrationConfidence::Medium,
            transmission_risk_level: 5,
            scan_instances: vec![
                ScanInstance {
                    minutes: 10.0,
                    attenuation_bucket: AttenuationBucket::Immediate,
                },
                ScanInstance {
                    minutes: 20.0,
                    attenuation_bucket: AttenuationBucket::Near,
                },
                ScanInstance {
                    minutes: 5.0,
                    attenuation_bucket: AttenuationBucket::Other,
                },
            ],
        }
    }

    #[test]
    fn minutes_in_buckets_sums_only_named_buckets() {
        let w = sample_window();
        let close = w.minutes_in_buckets(&[AttenuationBucket::Immediate, AttenuationBucket::Near]);
        assert_eq!(close, 30.0);
        assert_eq!(w.minutes_in_buckets(&[AttenuationBucket::Medium]), 0.0);
        assert_eq!(w.minutes_in_buckets(&AttenuationBucket::ALL), 35.0);
    }

    #[test]
    fn window_serialization_roundtrip() {
        let w = sample_window();
        let json = serde_json::to_string(&w).unwrap();
        let back: ExposureWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }

    #[test]
    fn calibration_confidence_wire_order() {
        assert!(CalibrationConfidence::Lowest < CalibrationConfidence::Low);
        assert!(CalibrationConfidence::Medium < CalibrationConfidence::High);
    }
}
