//! Construction-time parameters of the pursuit controller.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tuning parameters for a pursuit.
///
/// These are fixed once the controller is built. Angles are in degrees and
/// speeds are unitless fractions of full speed.
///
/// # Example
///
/// ```ignore
/// use vision_pursuit::motion::pursuit::config::PursuitConfig;
///
/// // Chase tag 7, aligned 5.5 degrees left of boresight
/// let config = PursuitConfig {
///     filter_identity: Some(7),
///     ..PursuitConfig::default()
/// };
/// config.validate()?;
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    /// Bearing the target should sit at once aligned.
    ///
    /// Not necessarily zero: a camera mounted off-center sees a centered
    /// target at an angle.
    pub target_bearing_deg:   f64,
    /// Allowed bearing error before the robot rotates.
    pub yaw_tolerance_deg:    f64,
    /// Allowed bearing drift during the approach before the robot strafes.
    pub strafe_tolerance_deg: f64,
    /// Apparent area at which the robot is close enough and stops.
    pub area_stop_threshold:  f64,
    /// Rotation speed while aligning.
    pub rotate_speed:         f64,
    /// Forward speed while approaching.
    pub forward_speed:        f64,
    /// Lateral speed of approach corrections.
    pub strafe_speed:         f64,
    /// Only pursue the tag with this ID. `None` pursues any target.
    pub filter_identity:      Option<i32>,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            target_bearing_deg:   -5.5,
            yaw_tolerance_deg:    5.0,
            strafe_tolerance_deg: 2.0,
            area_stop_threshold:  0.20,
            rotate_speed:         0.15,
            forward_speed:        0.1,
            strafe_speed:         0.1,
            filter_identity:      None,
        }
    }
}

impl PursuitConfig {
    /// Creates a config that pursues any target with default tuning.
    pub fn any_target() -> Self { Self::default() }

    /// Creates a config that pursues a single tag with default tuning.
    pub fn tag(id: i32) -> Self {
        Self {
            filter_identity: Some(id),
            ..Self::default()
        }
    }

    /// Checks that the parameters describe a runnable controller.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("target_bearing_deg", self.target_bearing_deg),
            ("yaw_tolerance_deg", self.yaw_tolerance_deg),
            ("strafe_tolerance_deg", self.strafe_tolerance_deg),
            ("area_stop_threshold", self.area_stop_threshold),
            ("rotate_speed", self.rotate_speed),
            ("forward_speed", self.forward_speed),
            ("strafe_speed", self.strafe_speed),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        if !(-180.0..=180.0).contains(&self.target_bearing_deg) {
            return Err(ConfigError::TargetBearing(self.target_bearing_deg));
        }

        for (name, value) in [
            ("yaw_tolerance_deg", self.yaw_tolerance_deg),
            ("strafe_tolerance_deg", self.strafe_tolerance_deg),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeTolerance { name, value });
            }
        }

        if self.area_stop_threshold <= 0.0 || self.area_stop_threshold > 1.0 {
            return Err(ConfigError::AreaThreshold(self.area_stop_threshold));
        }

        for (name, value) in [
            ("rotate_speed", self.rotate_speed),
            ("forward_speed", self.forward_speed),
            ("strafe_speed", self.strafe_speed),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Speed { name, value });
            }
        }

        Ok(())
    }
}
