//! Domain types for the exposure risk engine.

pub mod range;
pub mod risk_level;
pub mod window;

pub use range::ValueRange;
pub use risk_level::RiskLevel;
pub use window::{AttenuationBucket, CalibrationConfidence, ExposureWindow, ScanInstance};
