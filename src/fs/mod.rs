//! Filesystem utilities.
//!
//! The `logger` submodule provides a logger that mirrors every record to a
//! file. This is useful for reviewing a pursuit after the match, when the
//! console output is gone.
//!
//! # Example
//!
//! ```ignore
//! use vision_pursuit::fs::logger;
//! use log::{info, LevelFilter};
//!
//! // Initialize the logger at program start
//! logger::init(LevelFilter::Debug).expect("Failed to initialize logger");
//!
//! // Now you can use standard logging macros
//! info!("Robot initialized successfully");
//! ```

/// Console and file logging.
///
/// Provides a logger implementation that writes to both the console
/// and a log file.
pub mod logger;
