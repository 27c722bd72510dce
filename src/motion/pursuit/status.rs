//! Human-readable pursuit status for dashboards.

use std::fmt;

/// What the pursuit is doing this cycle.
///
/// Purely informational. Its [`Display`](fmt::Display) form is the text shown
/// on the driver dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PursuitStatus {
    /// The pursuit is not running.
    #[default]
    NotActive,
    /// No matching target in view.
    TargetNotSeen,
    /// Rotating counter-clockwise toward the target.
    RotateCcw,
    /// Rotating clockwise toward the target.
    RotateCw,
    /// Alignment reached; stopping before the approach.
    Aligned,
    /// Driving toward the target.
    DriveForward,
    /// Close enough; holding position.
    Finished,
}

impl PursuitStatus {
    /// The dashboard text for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PursuitStatus::NotActive => "NOT ACTIVE",
            PursuitStatus::TargetNotSeen => "TARGET NOT SEEN",
            PursuitStatus::RotateCcw => "CCW",
            PursuitStatus::RotateCw => "CW",
            PursuitStatus::Aligned => "ALIGNED",
            PursuitStatus::DriveForward => "DRIVE FORWARD",
            PursuitStatus::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for PursuitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
