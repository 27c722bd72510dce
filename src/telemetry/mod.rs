//! Status reporting for dashboards and logs.
//!
//! Every cycle the pursuit publishes a read-only [`StatusSnapshot`] of what
//! it saw and what it decided. Reporters only observe; nothing they do can
//! feed back into the control loop.
//!
//! # Example
//!
//! ```ignore
//! use vision_pursuit::telemetry::{LogReporter, StatusReporter};
//!
//! let mut reporter = LogReporter::new();
//! reporter.publish(&snapshot);
//! ```

use log::{debug, info, warn};

use crate::{
    motion::{
        command::MotionCommand,
        pursuit::{PursuitPhase, status::PursuitStatus},
    },
    vision::TargetState,
};

/// One cycle's view of the pursuit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusSnapshot<'a> {
    /// Name of the pursuit, e.g. `"DriveToTag 7"`.
    pub name:        &'a str,
    /// Target state the controller acted on.
    pub target:      TargetState,
    /// Phase for the next cycle.
    pub phase:       PursuitPhase,
    /// Dashboard status text.
    pub status:      PursuitStatus,
    /// Command sent to the drive this cycle.
    pub command:     MotionCommand,
    /// Whether the measurement was out of range and clamped before use.
    pub clamped:     bool,
    /// Identities of every tagged detection in the latest frame.
    pub visible_ids: &'a [i32],
}

impl StatusSnapshot<'_> {
    /// Returns `true` if more than one target was in view.
    pub fn multiple_targets(&self) -> bool { self.visible_ids.len() > 1 }
}

/// A consumer of per-cycle status snapshots.
pub trait StatusReporter {
    /// Publishes the status of the current cycle.
    fn publish(&mut self, snapshot: &StatusSnapshot<'_>);
}

/// A reporter that discards every snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl StatusReporter for NullReporter {
    fn publish(&mut self, _snapshot: &StatusSnapshot<'_>) {}
}

/// A reporter that writes snapshots to the [`log`] facade.
///
/// Status changes are logged at `info`, the full snapshot at `debug` on every
/// cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter {
    last_status: Option<PursuitStatus>,
}

impl LogReporter {
    /// Creates a reporter that has not published anything yet.
    pub fn new() -> Self { Self::default() }

    /// The status of the most recently published snapshot.
    pub fn last_status(&self) -> Option<PursuitStatus> { self.last_status }
}

impl StatusReporter for LogReporter {
    fn publish(&mut self, snapshot: &StatusSnapshot<'_>) {
        if self.last_status != Some(snapshot.status) {
            info!("{} Status: {}", snapshot.name, snapshot.status);
            self.last_status = Some(snapshot.status);
        }

        let target = &snapshot.target;
        if snapshot.clamped {
            warn!(
                "{} acted on a clamped measurement: yaw={:.2} area={:.3}",
                snapshot.name, target.bearing_deg, target.area
            );
        }
        if target.is_contested() {
            debug!(
                "{} picked {:?} out of {} candidates",
                snapshot.name, target.identity, target.multiplicity
            );
        }
        debug!(
            "{} phase={} detected={} id={:?} yaw={:.2} pitch={:.2} area={:.3} candidates={} visible={:?} command={}",
            snapshot.name,
            snapshot.phase,
            target.present,
            target.identity,
            target.bearing_deg,
            target.elevation_deg,
            target.area,
            target.multiplicity,
            snapshot.visible_ids,
            snapshot.command,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot<'a>(status: PursuitStatus, ids: &'a [i32]) -> StatusSnapshot<'a> {
        StatusSnapshot {
            name: "DriveToTag 7",
            target: TargetState::absent(),
            phase: PursuitPhase::Searching,
            status,
            command: MotionCommand::STOP,
            clamped: false,
            visible_ids: ids,
        }
    }

    #[test]
    fn log_reporter_tracks_status() {
        let mut reporter = LogReporter::new();
        assert_eq!(reporter.last_status(), None);
        reporter.publish(&snapshot(PursuitStatus::TargetNotSeen, &[]));
        assert_eq!(reporter.last_status(), Some(PursuitStatus::TargetNotSeen));
        reporter.publish(&snapshot(PursuitStatus::RotateCw, &[7]));
        assert_eq!(reporter.last_status(), Some(PursuitStatus::RotateCw));
    }

    #[test]
    fn null_reporter_accepts_snapshots() {
        let mut reporter = NullReporter;
        reporter.publish(&snapshot(PursuitStatus::Finished, &[1, 2]));
    }

    #[test]
    fn log_reporter_handles_clamped_contested_target() {
        let mut reporter = LogReporter::new();
        let mut snap = snapshot(PursuitStatus::DriveForward, &[3, 7]);
        snap.target = TargetState {
            present: true,
            area: 1.0,
            multiplicity: 2,
            ..TargetState::default()
        };
        snap.clamped = true;
        reporter.publish(&snap);
        assert_eq!(reporter.last_status(), Some(PursuitStatus::DriveForward));
    }

    #[test]
    fn multiple_targets() {
        assert!(!snapshot(PursuitStatus::NotActive, &[7]).multiple_targets());
        assert!(snapshot(PursuitStatus::NotActive, &[3, 7]).multiple_targets());
    }
}
