//! Raw camera detections.
//!
//! A [`RawDetection`] is one sighting of one target within a single camera
//! frame. The camera may report several of them for the same frame when more
//! than one target is visible, including several with the same identity when
//! the detector is unsure.

use std::time::Duration;

/// One camera-reported sighting within a frame.
///
/// Angles are measured from the camera boresight in degrees. The area is the
/// fraction of the image occupied by the target and grows as the robot gets
/// closer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawDetection {
    /// Fiducial ID for tagged targets. `None` for untagged objects.
    pub identity:      Option<i32>,
    /// Horizontal angle to the target in degrees.
    pub bearing_deg:   f64,
    /// Vertical angle to the target in degrees.
    pub elevation_deg: f64,
    /// Normalized apparent size in `[0, 1]`.
    pub area:          f64,
    /// Capture time of the frame this detection belongs to.
    pub timestamp:     Duration,
}

impl RawDetection {
    /// Creates a detection with a zero timestamp.
    pub fn new(identity: Option<i32>, bearing_deg: f64, elevation_deg: f64, area: f64) -> Self {
        Self {
            identity,
            bearing_deg,
            elevation_deg,
            area,
            timestamp: Duration::ZERO,
        }
    }

    /// Creates a detection of a fiducial tag.
    pub fn tagged(id: i32, bearing_deg: f64, elevation_deg: f64, area: f64) -> Self {
        Self::new(Some(id), bearing_deg, elevation_deg, area)
    }

    /// Creates a detection of an untagged object.
    pub fn untagged(bearing_deg: f64, elevation_deg: f64, area: f64) -> Self {
        Self::new(None, bearing_deg, elevation_deg, area)
    }

    /// Sets the capture time of the frame.
    pub fn at(mut self, timestamp: Duration) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// What the camera delivered for one control cycle.
///
/// The camera usually runs slower than the control loop, so many cycles see
/// no new frame at all. Those cycles are reported with `is_new == false` and
/// must not be confused with a new frame that simply contains no targets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Whether the camera processed a frame since the last cycle.
    pub is_new:     bool,
    /// The detections of that frame. Empty when nothing was seen.
    pub detections: Vec<RawDetection>,
}

impl Frame {
    /// A new frame with the given detections.
    pub fn new(detections: Vec<RawDetection>) -> Self {
        Self {
            is_new: true,
            detections,
        }
    }

    /// A new frame in which nothing was detected.
    pub fn empty() -> Self { Self::new(Vec::new()) }

    /// No new frame since the last cycle.
    pub fn stale() -> Self {
        Self {
            is_new:     false,
            detections: Vec::new(),
        }
    }

    /// Returns `true` if the frame contains at least one detection.
    pub fn has_targets(&self) -> bool { !self.detections.is_empty() }

    /// Identities of every tagged detection in the frame, in batch order.
    pub fn identities(&self) -> Vec<i32> {
        self.detections.iter().filter_map(|d| d.identity).collect()
    }
}

/// A source of camera detections.
///
/// Implementations wrap a camera driver. The driver may capture on its own
/// thread, but `frame_detections` must return an already decoded snapshot
/// without blocking.
///
/// # Example
///
/// ```ignore
/// use vision_pursuit::vision::{Frame, ObservationSource};
///
/// struct Replay(std::vec::IntoIter<Frame>);
///
/// impl ObservationSource for Replay {
///     fn frame_detections(&mut self) -> Frame { self.0.next().unwrap_or_else(Frame::stale) }
/// }
/// ```
pub trait ObservationSource {
    /// Returns what the camera saw since the previous call.
    fn frame_detections(&mut self) -> Frame;
}
