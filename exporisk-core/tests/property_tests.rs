//! Property tests for calculation invariants.
//!
//! Uses proptest to verify:
//! 1. Full-coverage configurations never fail with InvalidConfiguration
//! 2. Dropped windows contribute to nothing downstream
//! 3. Total risk is high iff at least one date is high
//! 4. Distinct-encounter counts match a naive per-day unique-pair recount
//! 5. Most-recent dates agree with the per-date map
//! 6. Idempotence for a fixed calculation stamp

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashSet;
use exporisk_core::domain::{
    AttenuationBucket, CalibrationConfidence, ExposureWindow, RiskLevel, ScanInstance,
};
use exporisk_core::engine::calculate_risk;
use exporisk_core::fixtures::sample_configuration;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_bucket() -> impl Strategy<Value = AttenuationBucket> {
    prop_oneof![
        Just(AttenuationBucket::Immediate),
        Just(AttenuationBucket::Near),
        Just(AttenuationBucket::Medium),
        Just(AttenuationBucket::Other),
    ]
}

fn arb_confidence() -> impl Strategy<Value = CalibrationConfidence> {
    prop_oneof![
        Just(CalibrationConfidence::Lowest),
        Just(CalibrationConfidence::Low),
        Just(CalibrationConfidence::Medium),
        Just(CalibrationConfidence::High),
    ]
}

fn arb_scan_instance() -> impl Strategy<Value = ScanInstance> {
    (1u32..=60, arb_bucket()).prop_map(|(minutes, attenuation_bucket)| ScanInstance {
        minutes: minutes as f64,
        attenuation_bucket,
    })
}

fn arb_window() -> impl Strategy<Value = ExposureWindow> {
    (
        0i64..14,
        arb_confidence(),
        0u8..=8,
        prop::collection::vec(arb_scan_instance(), 0..5),
    )
        .prop_map(|(day_offset, calibration_confidence, trl, scan_instances)| {
            let base = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
            ExposureWindow {
                date: base + chrono::Duration::days(day_offset),
                calibration_confidence,
                transmission_risk_level: trl,
                scan_instances,
            }
        })
}

fn arb_windows() -> impl Strategy<Value = Vec<ExposureWindow>> {
    prop::collection::vec(arb_window(), 0..40)
}

fn stamp() -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

// ── Properties ───────────────────────────────────────────────────────

proptest! {
    /// A mapping table covering all non-negative reals can never produce
    /// InvalidConfiguration, whatever the windows look like.
    #[test]
    fn covering_config_never_fails(windows in arb_windows()) {
        let config = sample_configuration();
        prop_assert!(calculate_risk(&windows, &config, stamp()).is_ok());
    }

    /// Appending windows that fail the transmission-risk-level filter leaves
    /// the result unchanged: dropped windows feed no aggregate.
    #[test]
    fn dropped_windows_contribute_nothing(
        windows in arb_windows(),
        extra_count in 1usize..10,
    ) {
        let config = sample_configuration();
        let baseline = calculate_risk(&windows, &config, stamp()).unwrap();

        let mut padded = windows.clone();
        for i in 0..extra_count {
            padded.push(ExposureWindow {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
                    + chrono::Duration::days((i % 14) as i64),
                calibration_confidence: CalibrationConfidence::High,
                // Below min_transmission_risk_level = 3, so always dropped.
                transmission_risk_level: (i % 3) as u8,
                scan_instances: vec![ScanInstance {
                    minutes: 240.0,
                    attenuation_bucket: AttenuationBucket::Immediate,
                }],
            });
        }
        let padded_result = calculate_risk(&padded, &config, stamp()).unwrap();
        prop_assert_eq!(baseline, padded_result);
    }

    /// Total risk is high iff at least one date in the per-date map is high.
    #[test]
    fn total_risk_matches_per_date_map(windows in arb_windows()) {
        let config = sample_configuration();
        let result = calculate_risk(&windows, &config, stamp()).unwrap();
        let any_high = result
            .risk_level_per_date
            .values()
            .any(|level| level.is_high());
        prop_assert_eq!(result.risk_level.is_high(), any_high);
    }

    /// The low-risk encounter total equals a naive recount: per day, the
    /// number of unique (trl, confidence) pairs among surviving windows whose
    /// own normalized time classifies low.
    #[test]
    fn low_encounter_total_matches_naive_recount(windows in arb_windows()) {
        let config = sample_configuration();
        let result = calculate_risk(&windows, &config, stamp()).unwrap();

        let mut expected = 0usize;
        for date in result.risk_level_per_date.keys() {
            let mut pairs: HashSet<(u8, CalibrationConfidence)> = HashSet::new();
            for w in windows.iter().filter(|w| w.date == *date) {
                if w.transmission_risk_level < config.min_transmission_risk_level {
                    continue;
                }
                let close_minutes = w.minutes_in_buckets(&[
                    AttenuationBucket::Immediate,
                    AttenuationBucket::Near,
                ]);
                if close_minutes < 5.0 {
                    continue;
                }
                let normalized: f64 = w
                    .scan_instances
                    .iter()
                    .map(|si| {
                        si.minutes
                            * config.attenuation_bucket_weights.weight_for(si.attenuation_bucket)
                    })
                    .sum();
                if normalized <= 30.0 {
                    pairs.insert((w.transmission_risk_level, w.calibration_confidence));
                }
            }
            expected += pairs.len();
        }
        prop_assert_eq!(result.minimum_distinct_encounters_with_low_risk, expected);
    }

    /// Encounter totals never exceed the raw number of surviving windows.
    #[test]
    fn encounter_totals_bounded_by_window_count(windows in arb_windows()) {
        let config = sample_configuration();
        let result = calculate_risk(&windows, &config, stamp()).unwrap();
        let total = result.minimum_distinct_encounters_with_low_risk
            + result.minimum_distinct_encounters_with_high_risk;
        prop_assert!(total <= windows.len());
    }

    /// Most-recent dates are the max over dates of that level, and None iff
    /// no date has the level.
    #[test]
    fn most_recent_dates_agree_with_map(windows in arb_windows()) {
        let config = sample_configuration();
        let result = calculate_risk(&windows, &config, stamp()).unwrap();

        let max_of = |wanted: RiskLevel| {
            result
                .risk_level_per_date
                .iter()
                .filter(|(_, level)| **level == wanted)
                .map(|(date, _)| *date)
                .max()
        };
        prop_assert_eq!(result.most_recent_date_with_low_risk, max_of(RiskLevel::Low));
        prop_assert_eq!(result.most_recent_date_with_high_risk, max_of(RiskLevel::High));
    }

    /// Same windows, same config, same stamp: identical results.
    #[test]
    fn calculation_is_idempotent(windows in arb_windows()) {
        let config = sample_configuration();
        let a = calculate_risk(&windows, &config, stamp()).unwrap();
        let b = calculate_risk(&windows, &config, stamp()).unwrap();
        prop_assert_eq!(a, b);
    }
}
