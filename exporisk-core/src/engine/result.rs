//! Aggregate result of one risk calculation.

use crate::domain::RiskLevel;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The output of `calculate_risk`: one aggregate classification plus the
/// per-date breakdown the surrounding application persists as risk history.
///
/// Encounter counts are "minimum distinct" counts: per day, repeated windows
/// with the same (transmission risk level, calibration confidence) identity
/// count once, so the true number of encounters is at least this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCalculationResult {
    pub risk_level: RiskLevel,
    pub minimum_distinct_encounters_with_low_risk: usize,
    pub minimum_distinct_encounters_with_high_risk: usize,
    pub most_recent_date_with_low_risk: Option<NaiveDate>,
    pub most_recent_date_with_high_risk: Option<NaiveDate>,
    /// Per-date classification, ordered by date.
    pub risk_level_per_date: BTreeMap<NaiveDate, RiskLevel>,
    pub calculation_date: DateTime<Utc>,
}

impl RiskCalculationResult {
    pub fn number_of_days_with_low_risk(&self) -> usize {
        self.risk_level_per_date
            .values()
            .filter(|level| **level == RiskLevel::Low)
            .count()
    }

    pub fn number_of_days_with_high_risk(&self) -> usize {
        self.risk_level_per_date
            .values()
            .filter(|level| level.is_high())
            .count()
    }
}
