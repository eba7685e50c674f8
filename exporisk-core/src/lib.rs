//! ExpoRisk Core — exposure-risk calculation engine.
//!
//! This crate contains the heart of the risk pipeline:
//! - Domain types (exposure windows, scan instances, risk levels, ranges)
//! - The server-delivered calculation configuration and its offline lint
//! - The filter/group/aggregate calculation over daily exposure windows
//! - Deterministic synthetic fixtures for benches and the CLI

pub mod config;
pub mod domain;
pub mod engine;
pub mod fixtures;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all public types are Send + Sync.
    ///
    /// The engine is pure and callers are free to run independent
    /// calculations from worker threads; this breaks the build immediately if
    /// a non-Sync field ever sneaks into a public type.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::ExposureWindow>();
        require_sync::<domain::ExposureWindow>();
        require_send::<domain::ScanInstance>();
        require_sync::<domain::ScanInstance>();
        require_send::<domain::RiskLevel>();
        require_sync::<domain::RiskLevel>();
        require_send::<domain::ValueRange>();
        require_sync::<domain::ValueRange>();

        require_send::<config::RiskCalculationConfiguration>();
        require_sync::<config::RiskCalculationConfiguration>();

        require_send::<engine::RiskCalculationResult>();
        require_sync::<engine::RiskCalculationResult>();
        require_send::<engine::RiskCalculationError>();
        require_sync::<engine::RiskCalculationError>();
    }
}
