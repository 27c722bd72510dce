//! The aggregated target state consumed by the controller.

use std::time::Duration;

use super::detection::RawDetection;

/// The state of one tracked target class for one control cycle.
///
/// A target class is either "any object" or "the tag with a given ID". The
/// values are copied from the best detection of the current frame and reset
/// to neutral defaults as soon as the target is no longer present.
///
/// # Example
///
/// ```ignore
/// use vision_pursuit::vision::TargetState;
///
/// let lost = TargetState::absent();
/// assert!(!lost.present);
/// assert_eq!(lost.area, 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetState {
    /// Whether the target is visible this cycle.
    pub present:       bool,
    /// Identity of the selected detection, if it was tagged.
    pub identity:      Option<i32>,
    /// Horizontal angle to the target in degrees. `0` when absent.
    pub bearing_deg:   f64,
    /// Vertical angle to the target in degrees. `0` when absent.
    pub elevation_deg: f64,
    /// Normalized apparent size. `0` when absent.
    pub area:          f64,
    /// Number of detections that competed for selection this cycle.
    ///
    /// Diagnostic only.
    pub multiplicity:  usize,
    /// Capture time of the frame the selected detection came from.
    pub timestamp:     Option<Duration>,
}

impl TargetState {
    /// The state reported when no target is visible.
    pub fn absent() -> Self { Self::default() }

    /// Builds a present state from the selected detection.
    ///
    /// # Arguments
    ///
    /// * `best` - The canonical detection for this cycle.
    /// * `multiplicity` - How many detections competed with it.
    pub fn from_detection(best: &RawDetection, multiplicity: usize) -> Self {
        Self {
            present: true,
            identity: best.identity,
            bearing_deg: best.bearing_deg,
            elevation_deg: best.elevation_deg,
            area: best.area,
            multiplicity,
            timestamp: Some(best.timestamp),
        }
    }

    /// Returns `true` if more than one detection competed this cycle.
    pub fn is_contested(&self) -> bool { self.multiplicity > 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_neutral() {
        let s = TargetState::absent();
        assert!(!s.present);
        assert_eq!(s.identity, None);
        assert_eq!((s.bearing_deg, s.elevation_deg, s.area), (0.0, 0.0, 0.0));
        assert_eq!(s.multiplicity, 0);
        assert_eq!(s.timestamp, None);
    }

    #[test]
    fn copies_detection() {
        let det = RawDetection::tagged(7, -5.5, 3.0, 0.12).at(Duration::from_millis(40));
        let s = TargetState::from_detection(&det, 2);
        assert!(s.present);
        assert_eq!(s.identity, Some(7));
        assert_eq!(s.bearing_deg, -5.5);
        assert_eq!(s.elevation_deg, 3.0);
        assert_eq!(s.area, 0.12);
        assert!(s.is_contested());
        assert_eq!(s.timestamp, Some(Duration::from_millis(40)));
    }
}
