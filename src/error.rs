//! Error types.
//!
//! Target loss and bad measurements are handled inside the control loop and
//! never surface as errors. The only failure the crate reports is a
//! controller configuration that cannot be run safely, and it is reported
//! once, at construction.

use thiserror::Error;

/// A rejected [`PursuitConfig`](crate::motion::pursuit::config::PursuitConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A parameter is NaN or infinite.
    #[error("parameter `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// A tolerance is below zero.
    #[error("tolerance `{name}` must not be negative, got {value}")]
    NegativeTolerance { name: &'static str, value: f64 },

    /// The area stop threshold is outside `(0, 1]`.
    #[error("area stop threshold must be in (0, 1], got {0}")]
    AreaThreshold(f64),

    /// A speed is outside `[0, 1]`.
    #[error("speed `{name}` must be in [0, 1], got {value}")]
    Speed { name: &'static str, value: f64 },

    /// The target bearing is outside `[-180, 180]` degrees.
    #[error("target bearing must be in [-180, 180] degrees, got {0}")]
    TargetBearing(f64),
}
