//! Deterministic synthetic fixtures for benches, tests, and the CLI.
//!
//! Everything here is seeded: the same (seed, shape) arguments always produce
//! the same windows, so fixture files and bench runs are reproducible.

use crate::config::{
    AttenuationBucketWeights, MinutesAtAttenuationFilter, RiskCalculationConfiguration,
    RiskLevelRange,
};
use crate::domain::{
    AttenuationBucket, CalibrationConfidence, ExposureWindow, RiskLevel, ScanInstance, ValueRange,
};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A plausible full-coverage configuration: short close contacts are dropped,
/// up to 30 weighted minutes per day is low risk, anything beyond is high.
pub fn sample_configuration() -> RiskCalculationConfiguration {
    RiskCalculationConfiguration {
        minutes_at_attenuation_filters: vec![MinutesAtAttenuationFilter {
            attenuation_buckets: vec![AttenuationBucket::Immediate, AttenuationBucket::Near],
            drop_if_minutes_in_range: ValueRange {
                min: 0.0,
                max: 5.0,
                min_exclusive: false,
                max_exclusive: true,
            },
        }],
        min_transmission_risk_level: 3,
        attenuation_bucket_weights: AttenuationBucketWeights {
            immediate: 1.0,
            near: 1.0,
            medium: 0.5,
            other: 0.0,
        },
        normalized_time_per_day_to_risk_level_mapping: vec![
            RiskLevelRange {
                normalized_time_range: ValueRange::inclusive(0.0, 30.0),
                risk_level: RiskLevel::Low,
            },
            RiskLevelRange {
                normalized_time_range: ValueRange::left_open(30.0, f64::MAX),
                risk_level: RiskLevel::High,
            },
        ],
    }
}

/// Generate `days × per_day` synthetic exposure windows starting at
/// `base_date`, from a seeded RNG.
pub fn synthetic_windows(
    base_date: NaiveDate,
    days: u32,
    per_day: u32,
    seed: u64,
) -> Vec<ExposureWindow> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut windows = Vec::with_capacity((days * per_day) as usize);
    for day in 0..days {
        let date = base_date + chrono::Duration::days(day as i64);
        for _ in 0..per_day {
            windows.push(random_window(&mut rng, date));
        }
    }
    windows
}

fn random_window(rng: &mut StdRng, date: NaiveDate) -> ExposureWindow {
    let scan_count = rng.gen_range(1..=4);
    let scan_instances = (0..scan_count)
        .map(|_| ScanInstance {
            minutes: rng.gen_range(1..=30) as f64,
            attenuation_bucket: random_bucket(rng),
        })
        .collect();
    ExposureWindow {
        date,
        calibration_confidence: random_confidence(rng),
        transmission_risk_level: rng.gen_range(1..=8),
        scan_instances,
    }
}

fn random_bucket(rng: &mut StdRng) -> AttenuationBucket {
    match rng.gen_range(0..4) {
        0 => AttenuationBucket::Immediate,
        1 => AttenuationBucket::Near,
        2 => AttenuationBucket::Medium,
        _ => AttenuationBucket::Other,
    }
}

fn random_confidence(rng: &mut StdRng) -> CalibrationConfidence {
    match rng.gen_range(0..4) {
        0 => CalibrationConfidence::Lowest,
        1 => CalibrationConfidence::Low,
        2 => CalibrationConfidence::Medium,
        _ => CalibrationConfidence::High,
    }
}
