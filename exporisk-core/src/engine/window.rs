//! Evaluated exposure window — one raw window plus its derived fields.

use crate::config::RiskCalculationConfiguration;
use crate::domain::{AttenuationBucket, CalibrationConfidence, ExposureWindow, RiskLevel};
use crate::engine::RiskCalculationError;
use chrono::NaiveDate;

/// Identity of a distinct encounter within one day.
///
/// Two windows sharing the same transmission risk level and calibration
/// confidence on the same day are assumed to be repeated observations of the
/// same physical encounter and count once. A struct key in a `HashSet` rather
/// than a formatted string, so there is no way for two different pairs to
/// collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncounterKey {
    pub transmission_risk_level: u8,
    pub calibration_confidence: CalibrationConfidence,
}

/// A raw exposure window wrapped with the values the pipeline needs.
///
/// All derived fields are computed once at construction against the
/// configuration the wrapper holds. The raw window is never mutated.
#[derive(Debug, Clone, Copy)]
pub struct EvaluatedWindow<'a> {
    window: &'a ExposureWindow,
    config: &'a RiskCalculationConfiguration,
    /// Weighted sum of scan-instance durations: Σ minutes × weight(bucket).
    pub normalized_time: f64,
    pub dropped_by_minutes_at_attenuation: bool,
    pub dropped_by_transmission_risk_level: bool,
}

impl<'a> EvaluatedWindow<'a> {
    pub fn new(window: &'a ExposureWindow, config: &'a RiskCalculationConfiguration) -> Self {
        let normalized_time = window
            .scan_instances
            .iter()
            .map(|si| si.minutes * config.attenuation_bucket_weights.weight_for(si.attenuation_bucket))
            .sum();

        let dropped_by_minutes_at_attenuation =
            config.minutes_at_attenuation_filters.iter().any(|filter| {
                let minutes = window.minutes_in_buckets(&filter.attenuation_buckets);
                filter.drop_if_minutes_in_range.contains(minutes)
            });

        let dropped_by_transmission_risk_level =
            window.transmission_risk_level < config.min_transmission_risk_level;

        Self {
            window,
            config,
            normalized_time,
            dropped_by_minutes_at_attenuation,
            dropped_by_transmission_risk_level,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.window.date
    }

    pub fn is_dropped(&self) -> bool {
        self.dropped_by_minutes_at_attenuation || self.dropped_by_transmission_risk_level
    }

    pub fn encounter_key(&self) -> EncounterKey {
        EncounterKey {
            transmission_risk_level: self.window.transmission_risk_level,
            calibration_confidence: self.window.calibration_confidence,
        }
    }

    /// Per-window low/high classification, used only for distinct-encounter
    /// counting.
    ///
    /// The window's own normalized time is looked up in the per-day mapping
    /// table. Using the daily table for a single window is intentional and
    /// matches the published risk-calculation rules, so it must not be
    /// "fixed" to a separate per-window table.
    pub fn risk_level(&self) -> Result<RiskLevel, RiskCalculationError> {
        self.config
            .risk_level_for_normalized_time(self.normalized_time)
            .ok_or(RiskCalculationError::InvalidConfiguration {
                normalized_time: self.normalized_time,
            })
    }
}
