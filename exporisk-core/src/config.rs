//! Risk calculation configuration — the server-delivered policy tables.
//!
//! The configuration is parsed and cached elsewhere; the engine receives it
//! fully typed. This module defines:
//! - drop filters (minutes-at-attenuation, minimum transmission risk level)
//! - per-bucket attenuation weights used to compute normalized time
//! - the ordered normalized-time-per-day → risk-level mapping table
//! - an offline validation pass for config files (advisory; the engine still
//!   fails hard on an actual mapping miss)

use crate::domain::{AttenuationBucket, RiskLevel, ValueRange};
use serde::{Deserialize, Serialize};

/// Drops windows whose time spent at close attenuation is suspicious.
///
/// The minutes of all scan instances in `attenuation_buckets` are summed; the
/// window is dropped when that sum falls inside `drop_if_minutes_in_range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinutesAtAttenuationFilter {
    pub attenuation_buckets: Vec<AttenuationBucket>,
    pub drop_if_minutes_in_range: ValueRange,
}

/// Weight applied to a scan instance's duration, selected by its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttenuationBucketWeights {
    pub immediate: f64,
    pub near: f64,
    pub medium: f64,
    pub other: f64,
}

impl AttenuationBucketWeights {
    pub fn weight_for(&self, bucket: AttenuationBucket) -> f64 {
        match bucket {
            AttenuationBucket::Immediate => self.immediate,
            AttenuationBucket::Near => self.near,
            AttenuationBucket::Medium => self.medium,
            AttenuationBucket::Other => self.other,
        }
    }
}

/// One entry of the normalized-time → risk-level mapping table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLevelRange {
    pub normalized_time_range: ValueRange,
    pub risk_level: RiskLevel,
}

/// The full policy configuration for one calculation.
///
/// The mapping table is ordered: the first range containing a value wins.
/// A well-formed table is non-overlapping and covers all non-negative reals;
/// a table with gaps makes the whole calculation fail with
/// `InvalidConfiguration` rather than silently defaulting a risk level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCalculationConfiguration {
    #[serde(default)]
    pub minutes_at_attenuation_filters: Vec<MinutesAtAttenuationFilter>,
    pub min_transmission_risk_level: u8,
    pub attenuation_bucket_weights: AttenuationBucketWeights,
    pub normalized_time_per_day_to_risk_level_mapping: Vec<RiskLevelRange>,
}

impl RiskCalculationConfiguration {
    /// First mapping range containing `normalized_time`, if any.
    pub fn risk_level_for_normalized_time(&self, normalized_time: f64) -> Option<RiskLevel> {
        self.normalized_time_per_day_to_risk_level_mapping
            .iter()
            .find(|entry| entry.normalized_time_range.contains(normalized_time))
            .map(|entry| entry.risk_level)
    }

    /// Offline lint for configuration files.
    ///
    /// Catches the mistakes that would otherwise only surface mid-calculation
    /// as `InvalidConfiguration`: empty or gapped mapping tables, overlapping
    /// ranges, tables that stop short of 0 or of large values, and negative
    /// weights.
    pub fn validate(&self) -> ConfigValidation {
        let mut errors = Vec::new();

        for bucket in AttenuationBucket::ALL {
            if self.attenuation_bucket_weights.weight_for(bucket) < 0.0 {
                errors.push(format!("negative weight for bucket {:?}", bucket));
            }
        }

        for (i, filter) in self.minutes_at_attenuation_filters.iter().enumerate() {
            if filter.attenuation_buckets.is_empty() {
                errors.push(format!("minutes-at-attenuation filter {} names no buckets", i));
            }
            let range = &filter.drop_if_minutes_in_range;
            if range.min > range.max {
                errors.push(format!(
                    "minutes-at-attenuation filter {}: drop range min {} > max {}",
                    i, range.min, range.max
                ));
            }
        }

        let mapping = &self.normalized_time_per_day_to_risk_level_mapping;
        if mapping.is_empty() {
            errors.push("normalized-time-to-risk-level mapping is empty".to_string());
        } else {
            if self.risk_level_for_normalized_time(0.0).is_none() {
                errors.push("mapping does not cover normalized time 0".to_string());
            }
            // Normalized time tops out around weight * minutes-per-day, so a
            // generous sentinel is enough to catch tables that stop short.
            if self.risk_level_for_normalized_time(1.0e9).is_none() {
                errors.push("mapping has a finite upper bound (large values uncovered)".to_string());
            }

            let mut sorted: Vec<&RiskLevelRange> = mapping.iter().collect();
            sorted.sort_by(|a, b| {
                a.normalized_time_range
                    .min
                    .total_cmp(&b.normalized_time_range.min)
            });
            for pair in sorted.windows(2) {
                let (cur, next) = (
                    &pair[0].normalized_time_range,
                    &pair[1].normalized_time_range,
                );
                if cur.min > cur.max {
                    errors.push(format!("mapping range min {} > max {}", cur.min, cur.max));
                }
                if next.min > cur.max {
                    errors.push(format!(
                        "gap in mapping between {} and {}",
                        cur.max, next.min
                    ));
                } else if next.min == cur.max {
                    // Boundary point must belong to exactly one range.
                    match (cur.max_exclusive, next.min_exclusive) {
                        (true, true) => errors.push(format!(
                            "mapping boundary {} excluded by both adjacent ranges",
                            cur.max
                        )),
                        (false, false) => errors.push(format!(
                            "mapping boundary {} included by both adjacent ranges",
                            cur.max
                        )),
                        _ => {}
                    }
                } else {
                    errors.push(format!(
                        "overlapping mapping ranges at {} (next starts before {} ends)",
                        next.min, cur.max
                    ));
                }
            }
        }

        ConfigValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Result of offline configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}
