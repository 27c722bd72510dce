//! The per-cycle vision pursuit pipeline.
//!
//! [`TargetSeeker`] wires the pieces together for one pursuit:
//!
//! 1. Reads the latest frame from the [`ObservationSource`].
//! 2. Reduces it to a [`TargetState`] with a [`TargetTracker`].
//! 3. Asks the [`PursuitController`] for a command.
//! 4. Hands the command to the [`ActuationSink`].
//! 5. Publishes a [`StatusSnapshot`] to the [`StatusReporter`].
//!
//! All collaborators are owned by the seeker and passed in at construction,
//! so the whole pipeline runs in tests without hardware.
//!
//! # Example
//!
//! ```ignore
//! use vision_pursuit::{
//!     motion::pursuit::config::PursuitConfig,
//!     seeker::TargetSeeker,
//!     telemetry::LogReporter,
//! };
//!
//! let mut seeker = TargetSeeker::new(
//!     "DriveToTag 7",
//!     PursuitConfig::tag(7),
//!     camera,
//!     drivetrain,
//!     LogReporter::new(),
//! )?;
//!
//! seeker.start();
//! while button.is_pressed() {
//!     seeker.cycle();
//!     scheduler.wait_next_period();
//! }
//! seeker.end(true);
//! ```

use log::info;

use crate::{
    error::ConfigError,
    motion::{
        command::{ActuationSink, MotionCommand},
        pursuit::{Decision, PursuitController, PursuitPhase, config::PursuitConfig, status::PursuitStatus},
    },
    telemetry::{StatusReporter, StatusSnapshot},
    vision::{ObservationSource, TargetState, tracker::TargetTracker},
};

/// A complete vision pursuit of one target class.
///
/// The type parameters are the camera (`S`), the drive (`A`) and the status
/// reporter (`R`).
pub struct TargetSeeker<S, A, R> {
    name:        String,
    source:      S,
    sink:        A,
    reporter:    R,
    tracker:     TargetTracker,
    controller:  PursuitController,
    visible_ids: Vec<i32>,
}

impl<S, A, R> TargetSeeker<S, A, R>
where
    S: ObservationSource,
    A: ActuationSink,
    R: StatusReporter,
{
    /// Creates a seeker in the `SEARCHING` phase.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in status reports.
    /// * `config` - Pursuit tuning. Its `filter_identity` selects the target.
    /// * `source` - The camera.
    /// * `sink` - The drive.
    /// * `reporter` - Where status snapshots go.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` is invalid.
    pub fn new(
        name: impl Into<String>,
        config: PursuitConfig,
        source: S,
        sink: A,
        reporter: R,
    ) -> Result<Self, ConfigError> {
        let controller = PursuitController::new(config)?;
        Ok(Self {
            name: name.into(),
            source,
            sink,
            reporter,
            tracker: TargetTracker::new(config.filter_identity),
            controller,
            visible_ids: Vec::new(),
        })
    }

    /// Prepares for a fresh pursuit.
    ///
    /// Returns to `SEARCHING` and forgets any previously seen target.
    pub fn start(&mut self) {
        info!("{} started", self.name);
        self.controller.reset();
        self.tracker.reset();
        self.visible_ids.clear();
        self.report_idle();
    }

    /// Runs one control cycle.
    ///
    /// # Returns
    ///
    /// The decision that was applied to the sink.
    pub fn cycle(&mut self) -> Decision {
        let frame = self.source.frame_detections();
        if frame.is_new {
            self.visible_ids = frame.identities();
        }
        let target = self.tracker.update(&frame);

        let decision = self.controller.advance(&target);
        self.sink.apply(decision.command);

        self.reporter.publish(&StatusSnapshot {
            name: &self.name,
            target: decision.target,
            phase: decision.phase,
            status: decision.status,
            command: decision.command,
            clamped: decision.clamped,
            visible_ids: &self.visible_ids,
        });
        decision
    }

    /// Stops the pursuit.
    ///
    /// Sends a final stop to the drive so no motion outlives the pursuit.
    ///
    /// # Arguments
    ///
    /// * `interrupted` - Whether the pursuit was cut short, e.g. because the
    ///   driver took back control.
    pub fn end(&mut self, interrupted: bool) {
        info!("{} ended{}", self.name, if interrupted { " (interrupted)" } else { "" });
        self.sink.apply(MotionCommand::STOP);
        self.report_idle();
    }

    fn report_idle(&mut self) {
        self.reporter.publish(&StatusSnapshot {
            name:        &self.name,
            target:      TargetState::absent(),
            phase:       self.controller.phase(),
            status:      PursuitStatus::NotActive,
            command:     MotionCommand::STOP,
            clamped:     false,
            visible_ids: &[],
        });
    }

    /// Label used in status reports.
    pub fn name(&self) -> &str { &self.name }

    /// The current pursuit phase.
    pub fn phase(&self) -> PursuitPhase { self.controller.phase() }

    /// The target state of the most recent cycle.
    pub fn target(&self) -> &TargetState { self.tracker.last() }

    /// The controller driving this pursuit.
    pub fn controller(&self) -> &PursuitController { &self.controller }

    /// The camera.
    pub fn source_mut(&mut self) -> &mut S { &mut self.source }

    /// The drive.
    pub fn sink(&self) -> &A { &self.sink }

    /// The status reporter.
    pub fn reporter(&self) -> &R { &self.reporter }

    /// Consumes the seeker, returning its collaborators.
    pub fn into_parts(self) -> (S, A, R) { (self.source, self.sink, self.reporter) }
}
