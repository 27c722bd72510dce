//! # Vision Pursuit
//!
//! Vision Pursuit steers a mobile robot toward a target seen by its camera,
//! either a fiducial tag with a known ID or any free-standing object. It
//! provides:
//!
//! - **Target Aggregation**: Reduces noisy, intermittent, multi-target camera
//!   frames to one stable target state per control cycle.
//! - **Phased Pursuit**: A search/align/approach state machine that emits one
//!   motion command per cycle and stops whenever the target is lost.
//! - **Status Reporting**: Per-cycle snapshots for dashboards and logs.
//! - **Logging**: A console and file logger for reviewing runs afterwards.
//!
//! The crate does no I/O in the control path. The camera driver and the
//! drivetrain are supplied by the caller through the
//! [`ObservationSource`](vision::ObservationSource) and
//! [`ActuationSink`](motion::ActuationSink) traits.
//!
//! ## Quick Start
//!
//! ```ignore
//! use vision_pursuit::{
//!     fs::logger,
//!     motion::pursuit::config::PursuitConfig,
//!     seeker::TargetSeeker,
//!     telemetry::LogReporter,
//! };
//! use log::LevelFilter;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     logger::init(LevelFilter::Info)?;
//!
//!     let mut seeker = TargetSeeker::new(
//!         "DriveToTag 7",
//!         PursuitConfig::tag(7),
//!         camera,
//!         drivetrain,
//!         LogReporter::new(),
//!     )?;
//!
//!     seeker.start();
//!     loop {
//!         seeker.cycle();
//!         wait_for_next_period();
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`vision`]: Raw detections, target aggregation and frame-hold tracking.
//! - [`motion`]: Motion commands and the pursuit controller.
//! - [`seeker`]: The complete per-cycle pipeline.
//! - [`telemetry`]: Status snapshots and reporters.
//! - [`fs`]: Filesystem utilities including logging.
//! - [`error`]: Configuration errors.

/// Configuration errors.
pub mod error;

/// Filesystem utilities module.
///
/// Contains logging functionality for recording pursuit telemetry and debug
/// information to a file.
pub mod fs;

/// Motion control module.
///
/// Provides the motion command type and the phased pursuit controller:
///
/// - **Commands**: Forward, strafe and rotate speeds for one cycle.
/// - **Pursuit**: Align with the target, then approach it until close.
pub mod motion;

/// The per-cycle pursuit pipeline.
///
/// Provides [`TargetSeeker`](seeker::TargetSeeker), which connects a camera,
/// the controller and a drivetrain.
pub mod seeker;

/// Status reporting module.
///
/// Publishes what the pursuit saw and decided each cycle, without any path
/// back into the control loop.
pub mod telemetry;

/// Target perception module.
///
/// Turns camera detections into a debounced [`TargetState`](vision::TargetState)
/// the controller can act on.
pub mod vision;

pub use error::ConfigError;
