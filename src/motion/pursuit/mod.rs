//! Phased visual pursuit.
//!
//! The pursuit steers the robot toward a target seen by the camera in two
//! separate phases: first rotate in place until the target sits at the
//! desired bearing, then drive forward with small lateral corrections until
//! the target looks big enough. The phases never overlap: no cycle asks the
//! robot to rotate and translate at once.
//!
//! # Phases
//!
//! | Phase         | Target seen                         | Next phase    | Command          |
//! |---------------|-------------------------------------|---------------|------------------|
//! | `SEARCHING`   | yes                                 | as `ALIGNING` | as `ALIGNING`    |
//! | `ALIGNING`    | bearing off by more than tolerance  | `ALIGNING`    | rotate           |
//! | `ALIGNING`    | bearing within tolerance            | `APPROACHING` | stop             |
//! | `APPROACHING` | area below threshold                | `APPROACHING` | forward + strafe |
//! | `APPROACHING` | area at or above threshold          | `DONE`        | stop             |
//! | `DONE`        | yes                                 | `DONE`        | stop             |
//!
//! Losing the target in any phase stops the robot and returns to
//! `SEARCHING` on that same cycle.
//!
//! # Example
//!
//! ```ignore
//! use vision_pursuit::motion::pursuit::{PursuitController, config::PursuitConfig};
//!
//! let mut pursuit = PursuitController::new(PursuitConfig::tag(7))?;
//!
//! // Once per control cycle
//! let command = pursuit.update(&target_state);
//! ```

/// Pursuit tuning parameters.
pub mod config;

/// Dashboard status text.
pub mod status;

use std::fmt;

use log::{info, trace, warn};

use self::{config::PursuitConfig, status::PursuitStatus};
use crate::{error::ConfigError, motion::command::MotionCommand, vision::TargetState};

/// The controller's current behavioral mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PursuitPhase {
    /// Waiting for the target to appear.
    #[default]
    Searching,
    /// Rotating in place toward the target.
    Aligning,
    /// Driving toward the target.
    Approaching,
    /// Close to the target. Left again only if the target is lost.
    Done,
}

impl fmt::Display for PursuitPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PursuitPhase::Searching => "SEARCHING",
            PursuitPhase::Aligning => "ALIGNING",
            PursuitPhase::Approaching => "APPROACHING",
            PursuitPhase::Done => "DONE",
        })
    }
}

/// The outcome of one control cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    /// The motion to apply this cycle.
    pub command: MotionCommand,
    /// The phase for the next cycle.
    pub phase:   PursuitPhase,
    /// Dashboard status for this cycle.
    pub status:  PursuitStatus,
    /// The target state the decision was made on, after clamping.
    pub target:  TargetState,
    /// Whether the input measurement had to be clamped or discarded.
    pub clamped: bool,
}

impl Decision {
    fn new(command: MotionCommand, phase: PursuitPhase, status: PursuitStatus) -> Self {
        Self {
            command,
            phase,
            status,
            target: TargetState::absent(),
            clamped: false,
        }
    }

    fn stop(phase: PursuitPhase, status: PursuitStatus) -> Self {
        Self::new(MotionCommand::STOP, phase, status)
    }
}

/// Phase-based pursuit controller.
///
/// Holds the validated configuration and the current phase. The phase is
/// the only state carried between cycles.
///
/// # Example
///
/// ```ignore
/// use vision_pursuit::motion::pursuit::{PursuitController, PursuitPhase};
/// use vision_pursuit::motion::pursuit::config::PursuitConfig;
///
/// let pursuit = PursuitController::new(PursuitConfig::default())?;
///
/// // Pure form: the caller threads the phase
/// let (command, next) = pursuit.step(&state, PursuitPhase::Searching);
/// ```
#[derive(Clone, Debug)]
pub struct PursuitController {
    config: PursuitConfig,
    phase:  PursuitPhase,
}

impl PursuitController {
    /// Creates a controller in the `SEARCHING` phase.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid. A
    /// controller is never built from a bad configuration.
    pub fn new(config: PursuitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            phase: PursuitPhase::Searching,
        })
    }

    /// The configuration this controller was built with.
    pub fn config(&self) -> &PursuitConfig { &self.config }

    /// The phase the next [`update`](Self::update) will start from.
    pub fn phase(&self) -> PursuitPhase { self.phase }

    /// Returns to `SEARCHING`, as on a fresh start.
    pub fn reset(&mut self) { self.phase = PursuitPhase::Searching; }

    /// Runs one cycle and advances the stored phase.
    pub fn update(&mut self, state: &TargetState) -> MotionCommand { self.advance(state).command }

    /// Like [`update`](Self::update), returning the full [`Decision`].
    pub fn advance(&mut self, state: &TargetState) -> Decision {
        let decision = self.decide(state, self.phase);
        self.phase = decision.phase;
        decision
    }

    /// Runs one cycle from the given phase without touching stored state.
    ///
    /// # Returns
    ///
    /// The command for this cycle and the phase for the next one.
    pub fn step(&self, state: &TargetState, phase: PursuitPhase) -> (MotionCommand, PursuitPhase) {
        let decision = self.decide(state, phase);
        (decision.command, decision.phase)
    }

    /// Like [`step`](Self::step), also reporting the dashboard status.
    pub fn decide(&self, state: &TargetState, phase: PursuitPhase) -> Decision {
        let (state, clamped) = sanitize(state);
        let decision = if !state.present {
            Decision::stop(PursuitPhase::Searching, PursuitStatus::TargetNotSeen)
        } else {
            match phase {
                // Searching aligns on the same cycle
                PursuitPhase::Searching | PursuitPhase::Aligning => self.align(&state),
                PursuitPhase::Approaching => self.approach(&state),
                PursuitPhase::Done => Decision::stop(PursuitPhase::Done, PursuitStatus::Finished),
            }
        };
        let decision = Decision {
            target: state,
            clamped,
            ..decision
        };

        if decision.phase != phase {
            info!("Pursuit {} -> {} ({})", phase, decision.phase, decision.status);
        }
        trace!("Pursuit {} command {}", decision.phase, decision.command);
        decision
    }

    fn align(&self, state: &TargetState) -> Decision {
        let target = self.config.target_bearing_deg;
        // `>` so a bearing exactly on the tolerance counts as aligned
        if (state.bearing_deg - target).abs() > self.config.yaw_tolerance_deg {
            let (rotate, status) = if state.bearing_deg < target {
                (self.config.rotate_speed, PursuitStatus::RotateCcw)
            } else {
                (-self.config.rotate_speed, PursuitStatus::RotateCw)
            };
            Decision::new(MotionCommand::rotate(rotate), PursuitPhase::Aligning, status)
        } else {
            // Cancel the rotation before translating
            Decision::stop(PursuitPhase::Approaching, PursuitStatus::Aligned)
        }
    }

    fn approach(&self, state: &TargetState) -> Decision {
        if state.area >= self.config.area_stop_threshold {
            return Decision::stop(PursuitPhase::Done, PursuitStatus::Finished);
        }

        let drift = state.bearing_deg - self.config.target_bearing_deg;
        let tolerance = self.config.strafe_tolerance_deg;
        let strafe = if drift > tolerance {
            self.config.strafe_speed
        } else if drift < -tolerance {
            -self.config.strafe_speed
        } else {
            0.0
        };

        Decision::new(
            MotionCommand::drive(self.config.forward_speed, strafe),
            PursuitPhase::Approaching,
            PursuitStatus::DriveForward,
        )
    }
}

/// Clamps out-of-range measurements so a bad frame cannot stall the loop.
///
/// A present target with a NaN bearing cannot be steered toward and is
/// treated as absent. The flag is `true` if anything was changed.
fn sanitize(state: &TargetState) -> (TargetState, bool) {
    if !state.present {
        return (*state, false);
    }
    if state.bearing_deg.is_nan() {
        warn!("Ignoring target with NaN bearing");
        return (TargetState::absent(), true);
    }

    let mut clean = *state;
    let mut clamped = false;
    if !(-180.0..=180.0).contains(&clean.bearing_deg) {
        warn!("Clamping bearing {} to [-180, 180]", clean.bearing_deg);
        clean.bearing_deg = clean.bearing_deg.clamp(-180.0, 180.0);
        clamped = true;
    }
    if clean.area.is_nan() {
        warn!("Treating NaN target area as 0");
        clean.area = 0.0;
        clamped = true;
    } else if !(0.0..=1.0).contains(&clean.area) {
        warn!("Clamping target area {} to [0, 1]", clean.area);
        clean.area = clean.area.clamp(0.0, 1.0);
        clamped = true;
    }
    (clean, clamped)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: f64 = -5.5;

    fn config() -> PursuitConfig {
        PursuitConfig {
            target_bearing_deg:   TARGET,
            yaw_tolerance_deg:    5.0,
            strafe_tolerance_deg: 2.0,
            area_stop_threshold:  0.20,
            rotate_speed:         0.15,
            forward_speed:        0.1,
            strafe_speed:         0.05,
            filter_identity:      None,
        }
    }

    fn controller() -> PursuitController { PursuitController::new(config()).unwrap() }

    fn seen(bearing_deg: f64, area: f64) -> TargetState {
        TargetState {
            present: true,
            bearing_deg,
            area,
            multiplicity: 1,
            ..TargetState::default()
        }
    }

    const ALL_PHASES: [PursuitPhase; 4] = [
        PursuitPhase::Searching,
        PursuitPhase::Aligning,
        PursuitPhase::Approaching,
        PursuitPhase::Done,
    ];

    #[test]
    fn rejects_invalid_config() {
        let bad = PursuitConfig {
            area_stop_threshold: 0.0,
            ..config()
        };
        assert!(PursuitController::new(bad).is_err());
    }

    #[test]
    fn starts_searching() {
        assert_eq!(controller().phase(), PursuitPhase::Searching);
    }

    #[test]
    fn absence_always_stops_and_searches() {
        let pursuit = controller();
        for phase in ALL_PHASES {
            let (command, next) = pursuit.step(&TargetState::absent(), phase);
            assert_eq!(command, MotionCommand::STOP);
            assert_eq!(next, PursuitPhase::Searching);
        }
    }

    #[test]
    fn searching_aligns_eagerly() {
        let pursuit = controller();
        let (command, next) = pursuit.step(&seen(TARGET + 10.0, 0.0), PursuitPhase::Searching);
        assert_eq!(next, PursuitPhase::Aligning);
        assert_eq!(command, MotionCommand::rotate(-0.15));
    }

    #[test]
    fn rotation_direction() {
        let pursuit = controller();
        let left = pursuit.decide(&seen(TARGET - 10.0, 0.0), PursuitPhase::Aligning);
        assert_eq!(left.command, MotionCommand::rotate(0.15));
        assert_eq!(left.status, PursuitStatus::RotateCcw);

        let right = pursuit.decide(&seen(TARGET + 10.0, 0.0), PursuitPhase::Aligning);
        assert_eq!(right.command, MotionCommand::rotate(-0.15));
        assert_eq!(right.status, PursuitStatus::RotateCw);
    }

    #[test]
    fn alignment_convergence() {
        let mut pursuit = controller();
        for _ in 0..3 {
            let command = pursuit.update(&seen(TARGET + 10.0, 0.0));
            assert_eq!(pursuit.phase(), PursuitPhase::Aligning);
            assert_eq!(command.forward, 0.0);
            assert_eq!(command.strafe, 0.0);
            assert!(command.rotate < 0.0);
        }
        let command = pursuit.update(&seen(TARGET, 0.0));
        assert_eq!(pursuit.phase(), PursuitPhase::Approaching);
        assert_eq!(command, MotionCommand::STOP);
    }

    #[test]
    fn yaw_tolerance_boundary_is_aligned() {
        let pursuit = controller();
        for bearing in [TARGET + 5.0, TARGET - 5.0] {
            let (command, next) = pursuit.step(&seen(bearing, 0.0), PursuitPhase::Aligning);
            assert_eq!(next, PursuitPhase::Approaching);
            assert_eq!(command, MotionCommand::STOP);
        }
        let (_, next) = pursuit.step(&seen(TARGET + 5.001, 0.0), PursuitPhase::Aligning);
        assert_eq!(next, PursuitPhase::Aligning);
    }

    #[test]
    fn already_aligned_from_searching() {
        let pursuit = controller();
        let decision = pursuit.decide(&seen(-5.5, 0.05), PursuitPhase::Searching);
        assert_eq!(decision.phase, PursuitPhase::Approaching);
        assert_eq!(decision.command, MotionCommand::STOP);
        assert_eq!(decision.status, PursuitStatus::Aligned);
    }

    #[test]
    fn approach_drives_forward() {
        let pursuit = controller();
        let decision = pursuit.decide(&seen(TARGET, 0.05), PursuitPhase::Approaching);
        assert_eq!(decision.phase, PursuitPhase::Approaching);
        assert_eq!(decision.command, MotionCommand::drive(0.1, 0.0));
        assert_eq!(decision.status, PursuitStatus::DriveForward);
    }

    #[test]
    fn strafe_symmetry() {
        let pursuit = controller();
        let eps = 0.01;
        let strafe_at = |drift: f64| {
            pursuit
                .step(&seen(TARGET + drift, 0.05), PursuitPhase::Approaching)
                .0
                .strafe
        };
        assert_eq!(strafe_at(2.0 + eps), 0.05);
        assert_eq!(strafe_at(-2.0 - eps), -0.05);
        for drift in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            assert_eq!(strafe_at(drift), 0.0);
        }
    }

    #[test]
    fn approach_termination() {
        let mut pursuit = controller();
        pursuit.update(&seen(TARGET, 0.0));
        assert_eq!(pursuit.phase(), PursuitPhase::Approaching);

        let mut area = 0.0;
        while area < 0.20 {
            let command = pursuit.update(&seen(TARGET + 1.0, area));
            assert_eq!(pursuit.phase(), PursuitPhase::Approaching);
            assert_eq!(command.forward, 0.1);
            area += 0.02;
        }
        let command = pursuit.update(&seen(TARGET + 1.0, 0.20));
        assert_eq!(pursuit.phase(), PursuitPhase::Done);
        assert_eq!(command, MotionCommand::STOP);

        for _ in 0..5 {
            assert_eq!(pursuit.update(&seen(TARGET + 1.0, 0.20)), MotionCommand::STOP);
            assert_eq!(pursuit.phase(), PursuitPhase::Done);
        }
    }

    #[test]
    fn done_holds_while_visible() {
        let pursuit = controller();
        // Bearing and area no longer matter once done
        let decision = pursuit.decide(&seen(TARGET + 40.0, 0.01), PursuitPhase::Done);
        assert_eq!(decision.phase, PursuitPhase::Done);
        assert_eq!(decision.command, MotionCommand::STOP);
        assert_eq!(decision.status, PursuitStatus::Finished);
    }

    #[test]
    fn target_loss_mid_maneuver() {
        let mut pursuit = controller();
        pursuit.update(&seen(TARGET + 20.0, 0.0));
        assert_eq!(pursuit.phase(), PursuitPhase::Aligning);
        assert_eq!(pursuit.update(&TargetState::absent()), MotionCommand::STOP);
        assert_eq!(pursuit.phase(), PursuitPhase::Searching);

        pursuit.update(&seen(TARGET, 0.0));
        pursuit.update(&seen(TARGET, 0.05));
        assert_eq!(pursuit.phase(), PursuitPhase::Approaching);
        assert_eq!(pursuit.update(&TargetState::absent()), MotionCommand::STOP);
        assert_eq!(pursuit.phase(), PursuitPhase::Searching);
    }

    #[test]
    fn done_falls_back_when_lost() {
        let mut pursuit = controller();
        pursuit.update(&seen(TARGET, 0.0));
        pursuit.update(&seen(TARGET, 0.5));
        assert_eq!(pursuit.phase(), PursuitPhase::Done);
        pursuit.update(&TargetState::absent());
        assert_eq!(pursuit.phase(), PursuitPhase::Searching);
    }

    #[test]
    fn reset_returns_to_searching() {
        let mut pursuit = controller();
        pursuit.update(&seen(TARGET + 20.0, 0.0));
        pursuit.reset();
        assert_eq!(pursuit.phase(), PursuitPhase::Searching);
    }

    #[test]
    fn out_of_range_area_is_clamped() {
        let pursuit = controller();
        let (command, next) = pursuit.step(&seen(TARGET, 3.0), PursuitPhase::Approaching);
        assert_eq!(next, PursuitPhase::Done);
        assert_eq!(command, MotionCommand::STOP);

        let (command, next) = pursuit.step(&seen(TARGET, -1.0), PursuitPhase::Approaching);
        assert_eq!(next, PursuitPhase::Approaching);
        assert_eq!(command.forward, 0.1);

        let (_, next) = pursuit.step(&seen(TARGET, f64::NAN), PursuitPhase::Approaching);
        assert_eq!(next, PursuitPhase::Approaching);
    }

    #[test]
    fn nan_bearing_is_absent() {
        let pursuit = controller();
        let decision = pursuit.decide(&seen(f64::NAN, 0.1), PursuitPhase::Approaching);
        assert_eq!(decision.command, MotionCommand::STOP);
        assert_eq!(decision.phase, PursuitPhase::Searching);
        assert!(decision.clamped);
        assert!(!decision.target.present);
    }

    #[test]
    fn decision_carries_clamped_target() {
        let pursuit = controller();
        let decision = pursuit.decide(&seen(TARGET, 3.0), PursuitPhase::Approaching);
        assert!(decision.clamped);
        assert_eq!(decision.target.area, 1.0);
        assert_eq!(decision.target.bearing_deg, TARGET);

        let decision = pursuit.decide(&seen(f64::INFINITY, 0.1), PursuitPhase::Aligning);
        assert!(decision.clamped);
        assert_eq!(decision.target.bearing_deg, 180.0);

        let clean = seen(TARGET, 0.1);
        let decision = pursuit.decide(&clean, PursuitPhase::Approaching);
        assert!(!decision.clamped);
        assert_eq!(decision.target, clean);

        let absent = pursuit.decide(&TargetState::absent(), PursuitPhase::Aligning);
        assert!(!absent.clamped);
        assert_eq!(absent.target, TargetState::absent());
    }

    #[test]
    fn out_of_range_bearing_is_clamped() {
        let pursuit = controller();
        let (command, next) = pursuit.step(&seen(400.0, 0.0), PursuitPhase::Aligning);
        assert_eq!(next, PursuitPhase::Aligning);
        assert_eq!(command, MotionCommand::rotate(-0.15));
    }

    #[test]
    fn phase_display() {
        assert_eq!(PursuitPhase::Searching.to_string(), "SEARCHING");
        assert_eq!(PursuitPhase::Approaching.to_string(), "APPROACHING");
    }
}
