//! The calculation pipeline: filter, group by date, aggregate, classify.

use crate::config::RiskCalculationConfiguration;
use crate::domain::{ExposureWindow, RiskLevel};
use crate::engine::result::RiskCalculationResult;
use crate::engine::window::{EncounterKey, EvaluatedWindow};
use crate::engine::RiskCalculationError;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashSet};

/// Run the full risk calculation over a batch of exposure windows.
///
/// Pure and synchronous: either the whole batch reduces to a result, or the
/// calculation aborts with `InvalidConfiguration` when some populated
/// normalized-time value has no mapping range. No partial result is ever
/// returned — a partially aggregated result could understate risk.
///
/// `calculation_date` is stamped into the result unchanged, which keeps the
/// function deterministic for identical inputs; `calculate_risk_now` is the
/// wall-clock convenience wrapper.
pub fn calculate_risk(
    exposure_windows: &[ExposureWindow],
    configuration: &RiskCalculationConfiguration,
    calculation_date: DateTime<Utc>,
) -> Result<RiskCalculationResult, RiskCalculationError> {
    // Wrap every window and drop the filtered ones. Dropped windows
    // contribute to nothing downstream.
    let filtered: Vec<EvaluatedWindow> = exposure_windows
        .iter()
        .map(|window| EvaluatedWindow::new(window, configuration))
        .filter(|evaluated| !evaluated.is_dropped())
        .collect();

    // Partition by calendar date. Every surviving window lands in exactly
    // one bucket.
    let mut windows_per_date: BTreeMap<NaiveDate, Vec<&EvaluatedWindow>> = BTreeMap::new();
    for evaluated in &filtered {
        windows_per_date
            .entry(evaluated.date())
            .or_default()
            .push(evaluated);
    }

    // Sum normalized time per date and classify each date. A mapping miss
    // here is fatal for the whole calculation.
    let mut risk_level_per_date: BTreeMap<NaiveDate, RiskLevel> = BTreeMap::new();
    for (date, group) in &windows_per_date {
        let normalized_time: f64 = group
            .iter()
            .map(|evaluated| evaluated.normalized_time)
            .sum();
        let level = configuration
            .risk_level_for_normalized_time(normalized_time)
            .ok_or(RiskCalculationError::InvalidConfiguration { normalized_time })?;
        risk_level_per_date.insert(*date, level);
    }

    // Distinct encounters per date, split by each window's own low/high
    // classification and deduplicated by encounter identity. The totals are
    // the sums across dates.
    let mut minimum_distinct_encounters_with_low_risk = 0usize;
    let mut minimum_distinct_encounters_with_high_risk = 0usize;
    for group in windows_per_date.values() {
        let mut low_encounters: HashSet<EncounterKey> = HashSet::new();
        let mut high_encounters: HashSet<EncounterKey> = HashSet::new();
        for evaluated in group {
            match evaluated.risk_level()? {
                RiskLevel::Low => low_encounters.insert(evaluated.encounter_key()),
                RiskLevel::High => high_encounters.insert(evaluated.encounter_key()),
            };
        }
        minimum_distinct_encounters_with_low_risk += low_encounters.len();
        minimum_distinct_encounters_with_high_risk += high_encounters.len();
    }

    // One high date is enough to make the whole result high.
    let risk_level = if risk_level_per_date.values().any(|level| level.is_high()) {
        RiskLevel::High
    } else {
        RiskLevel::Low
    };

    let most_recent_date_with = |wanted: RiskLevel| {
        risk_level_per_date
            .iter()
            .filter(|(_, level)| **level == wanted)
            .map(|(date, _)| *date)
            .max()
    };

    Ok(RiskCalculationResult {
        risk_level,
        minimum_distinct_encounters_with_low_risk,
        minimum_distinct_encounters_with_high_risk,
        most_recent_date_with_low_risk: most_recent_date_with(RiskLevel::Low),
        most_recent_date_with_high_risk: most_recent_date_with(RiskLevel::High),
        risk_level_per_date,
        calculation_date,
    })
}

/// `calculate_risk` stamped with the current wall-clock time.
pub fn calculate_risk_now(
    exposure_windows: &[ExposureWindow],
    configuration: &RiskCalculationConfiguration,
) -> Result<RiskCalculationResult, RiskCalculationError> {
    calculate_risk(exposure_windows, configuration, Utc::now())
}
