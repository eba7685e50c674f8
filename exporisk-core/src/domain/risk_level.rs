//! Risk level — the two-valued classification produced by the engine.

use serde::{Deserialize, Serialize};

/// Risk classification for a window, a day, or a whole calculation.
///
/// Deliberately two-valued. There is no "medium" or "unknown": a day either
/// crosses the configured exposure threshold or it does not, and anything the
/// drop filters remove never reaches classification at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    High,
}

impl RiskLevel {
    pub fn is_high(self) -> bool {
        self == RiskLevel::High
    }
}
