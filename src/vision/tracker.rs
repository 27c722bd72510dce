//! Frame-hold tracking on top of the pure aggregator.
//!
//! The control loop runs faster than the camera. On cycles where the camera
//! has no new frame, the tracker repeats the state it reported last cycle.
//! This is the only memory in the perception path: a new frame without
//! targets always blanks the state.

use log::debug;

use super::{aggregator::aggregate, detection::Frame, target::TargetState};

/// Per-cycle target tracker.
///
/// Holds the identity filter of the pursuit it serves and the state it
/// reported on the previous cycle.
///
/// # Example
///
/// ```ignore
/// use vision_pursuit::vision::{Frame, RawDetection, tracker::TargetTracker};
///
/// let mut tracker = TargetTracker::new(Some(7));
///
/// let seen = tracker.update(&Frame::new(vec![RawDetection::tagged(7, 2.0, 0.0, 0.1)]));
/// assert!(seen.present);
///
/// // Camera has not produced another frame yet
/// assert_eq!(tracker.update(&Frame::stale()), seen);
///
/// // New frame, tag out of view
/// assert!(!tracker.update(&Frame::empty()).present);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TargetTracker {
    filter_identity: Option<i32>,
    last:            TargetState,
}

impl TargetTracker {
    /// Creates a tracker for one target class.
    ///
    /// # Arguments
    ///
    /// * `filter_identity` - Tag ID to track, or `None` for any target.
    pub fn new(filter_identity: Option<i32>) -> Self {
        Self {
            filter_identity,
            last: TargetState::absent(),
        }
    }

    /// The identity filter this tracker applies.
    pub fn filter_identity(&self) -> Option<i32> { self.filter_identity }

    /// The state reported on the most recent cycle.
    pub fn last(&self) -> &TargetState { &self.last }

    /// Computes the target state for this cycle.
    ///
    /// A new frame is aggregated from scratch. A stale frame returns the
    /// previous cycle's state unchanged.
    pub fn update(&mut self, frame: &Frame) -> TargetState {
        if !frame.is_new {
            return self.last;
        }
        let state = if frame.has_targets() {
            aggregate(&frame.detections, self.filter_identity)
        } else {
            TargetState::absent()
        };
        if state.present != self.last.present {
            debug!(
                "Target {:?} {}",
                self.filter_identity,
                if state.present { "acquired" } else { "lost" }
            );
        }
        self.last = state;
        state
    }

    /// Forgets the previously reported state.
    pub fn reset(&mut self) { self.last = TargetState::absent(); }
}
