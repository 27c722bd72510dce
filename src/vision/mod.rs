//! Target perception aggregation.
//!
//! This module turns the raw, possibly empty, possibly multi-target
//! detections delivered by a camera into one stable [`TargetState`] per
//! control cycle.
//!
//! # Module Structure
//!
//! - **[`detection`]**: Raw camera sightings and the [`ObservationSource`]
//!   trait that delivers them.
//! - **[`target`]**: The aggregated [`TargetState`].
//! - **[`aggregator`]**: The pure per-cycle reduction from a batch of
//!   detections to a [`TargetState`].
//! - **[`tracker`]**: Applies the frame-hold rule on top of the aggregator.
//!
//! # Memory Policy
//!
//! The aggregator never carries target data from one frame to the next. The
//! only memory is held by the [`TargetTracker`](tracker::TargetTracker), and
//! only for cycles where the camera has not produced a new frame:
//!
//! | Camera reports            | Result                          |
//! |---------------------------|---------------------------------|
//! | new frame, targets        | best target of this frame       |
//! | new frame, no targets     | absent, neutral values          |
//! | no new frame              | previous cycle's state, as is   |
//!
//! # Example
//!
//! ```ignore
//! use vision_pursuit::vision::{detection::RawDetection, aggregator::aggregate};
//!
//! let batch = vec![
//!     RawDetection::tagged(7, -3.0, 1.0, 0.05),
//!     RawDetection::tagged(4, 10.0, 2.0, 0.12),
//! ];
//!
//! // Any target: tag 4 is larger, so it wins
//! let best = aggregate(&batch, None);
//! assert_eq!(best.identity, Some(4));
//!
//! // Only tag 7
//! let seven = aggregate(&batch, Some(7));
//! assert_eq!(seven.bearing_deg, -3.0);
//! ```

/// Pure reduction of a detection batch into a [`TargetState`].
pub mod aggregator;

/// Raw detections and the observation source trait.
pub mod detection;

/// The aggregated per-cycle target state.
pub mod target;

/// Frame-hold wrapper around the aggregator.
///
/// Provides [`TargetTracker`](tracker::TargetTracker), the component the
/// control loop calls once per cycle.
pub mod tracker;

pub use detection::{Frame, ObservationSource, RawDetection};
pub use target::TargetState;
