//! Motion control for visual pursuit.
//!
//! This module turns the aggregated target state into one motion command per
//! control cycle. It includes:
//!
//! - **Commands**: The [`MotionCommand`](command::MotionCommand) handed to the
//!   drive subsystem and the [`ActuationSink`](command::ActuationSink) trait
//!   it is handed through.
//! - **Pursuit**: The phased align-then-approach controller.
//!
//! # Architecture
//!
//! Nothing in here blocks, sleeps or talks to hardware. The caller's
//! scheduler invokes the controller at a fixed rate and forwards the result
//! to the drivetrain.
//!
//! # Example
//!
//! ```ignore
//! use vision_pursuit::motion::pursuit::{PursuitController, config::PursuitConfig};
//!
//! let mut pursuit = PursuitController::new(PursuitConfig::default())?;
//! let command = pursuit.update(&state);
//! drivetrain.apply(command);
//! ```

/// Motion commands and the actuation sink trait.
pub mod command;

/// Phased align-then-approach pursuit controller.
///
/// Provides [`PursuitController`](pursuit::PursuitController) and its
/// configuration and status types.
pub mod pursuit;

pub use command::{ActuationSink, MotionCommand};
