//! Risk calculation engine — the filter/group/aggregate pipeline.
//!
//! The engine consumes raw exposure windows plus a configuration and reduces
//! them to one aggregate result:
//!
//! 1. Wrap each window, computing normalized time and drop flags; discard
//!    dropped windows
//! 2. Group survivors by calendar date
//! 3. Sum normalized time per date and classify each date low/high
//! 4. Count distinct encounters per date, deduplicated by
//!    (transmission risk level, calibration confidence)
//! 5. Reduce to the aggregate: total risk level, encounter totals, most
//!    recent low/high dates

pub mod calculation;
pub mod result;
pub mod window;

pub use calculation::{calculate_risk, calculate_risk_now};
pub use result::RiskCalculationResult;
pub use window::{EncounterKey, EvaluatedWindow};

use thiserror::Error;

/// Errors from the risk calculation.
///
/// There is exactly one kind: a normalized-time value that no mapping range
/// covers. That indicates a corrupt or incompatible server-delivered
/// configuration, so the whole calculation aborts rather than defaulting a
/// risk level. Retrying with the same configuration would fail identically;
/// the caller's remedy is a configuration refresh.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RiskCalculationError {
    #[error("invalid configuration: no risk level range covers normalized time {normalized_time}")]
    InvalidConfiguration { normalized_time: f64 },
}
