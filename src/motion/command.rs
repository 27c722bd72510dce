//! Motion commands and the sink that executes them.

use std::fmt;

/// Largest magnitude of any command component.
const MAX_SPEED: f64 = 1.0;

/// One cycle's motion request.
///
/// Each component is a unitless signed speed in `[-1, 1]`. The actuation sink
/// decides how that maps to wheel velocities and whether it is applied
/// relative to the robot or to the field.
///
/// # Example
///
/// ```ignore
/// use vision_pursuit::motion::command::MotionCommand;
///
/// let turn = MotionCommand::rotate(0.15);
/// assert_eq!((turn.forward, turn.strafe, turn.rotate), (0.0, 0.0, 0.15));
/// assert!(MotionCommand::STOP.is_stop());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionCommand {
    /// Forward speed. Positive drives toward the camera's view.
    pub forward: f64,
    /// Lateral speed.
    pub strafe:  f64,
    /// Rotational speed. Positive turns counter-clockwise.
    pub rotate:  f64,
}

impl MotionCommand {
    /// Hold position.
    pub const STOP: MotionCommand = MotionCommand {
        forward: 0.0,
        strafe:  0.0,
        rotate:  0.0,
    };

    /// Creates a command, capping every component to `[-1, 1]`.
    pub fn new(forward: f64, strafe: f64, rotate: f64) -> Self {
        Self {
            forward: abscap(forward, MAX_SPEED),
            strafe:  abscap(strafe, MAX_SPEED),
            rotate:  abscap(rotate, MAX_SPEED),
        }
    }

    /// A pure rotation.
    pub fn rotate(speed: f64) -> Self { Self::new(0.0, 0.0, speed) }

    /// Forward motion with a lateral correction.
    pub fn drive(forward: f64, strafe: f64) -> Self { Self::new(forward, strafe, 0.0) }

    /// Returns `true` if this command holds position.
    pub fn is_stop(&self) -> bool { *self == Self::STOP }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(fwd {:.3}, strafe {:.3}, rot {:.3})",
            self.forward, self.strafe, self.rotate
        )
    }
}

/// The drive subsystem consuming motion commands.
///
/// Implementations own velocity scaling, field-relative conversion and
/// safety clamping. They must not replay a command after the pursuit has
/// been interrupted.
pub trait ActuationSink {
    /// Applies the command for the current cycle.
    fn apply(&mut self, command: MotionCommand);
}

// NaN becomes zero so a bad value never reaches the motors.
fn abscap(val: f64, cap: f64) -> f64 {
    if val.is_nan() {
        0.0
    } else if val > cap {
        cap
    } else if val < -cap {
        -cap
    } else {
        val
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_zero() {
        assert_eq!(MotionCommand::STOP, MotionCommand::new(0.0, 0.0, 0.0));
        assert_eq!(MotionCommand::default(), MotionCommand::STOP);
        assert!(MotionCommand::STOP.is_stop());
    }

    #[test]
    fn components_are_capped() {
        let c = MotionCommand::new(1.5, -3.0, 0.25);
        assert_eq!(c, MotionCommand {
            forward: 1.0,
            strafe:  -1.0,
            rotate:  0.25,
        });
    }

    #[test]
    fn nan_component_is_zeroed() {
        let c = MotionCommand::rotate(f64::NAN);
        assert!(c.is_stop());
    }

    #[test]
    fn constructors() {
        assert_eq!(MotionCommand::rotate(-0.2), MotionCommand::new(0.0, 0.0, -0.2));
        assert_eq!(MotionCommand::drive(0.1, 0.05), MotionCommand::new(0.1, 0.05, 0.0));
        assert!(!MotionCommand::drive(0.1, 0.0).is_stop());
    }

    #[test]
    fn display() {
        let c = MotionCommand::new(0.1, 0.0, -0.15);
        assert_eq!(c.to_string(), "(fwd 0.100, strafe 0.000, rot -0.150)");
    }
}
