//! Console and file logger.
//!
//! This module implements the [`log`] crate's logging facade, writing log
//! messages to both the console and a log file. It is meant for the robot
//! program hosting the pursuit; the library itself only emits records.
//!
//! # Usage
//!
//! Initialize the logger once at the start of your program:
//!
//! ```ignore
//! use vision_pursuit::fs::logger;
//! use log::{info, LevelFilter};
//!
//! fn main() {
//!     logger::init(LevelFilter::Debug).expect("Logger init failed");
//!
//!     info!("Program started");
//! }
//! ```
//!
//! # Log Output
//!
//! Each log entry includes:
//! - Log level (TRACE, DEBUG, INFO, WARN, ERROR)
//! - Uptime (time since the logger was initialized)
//! - Target (module path)
//! - Message
//!
//! Example output:
//! ```text
//! INFO [2m 5s 123ms] vision_pursuit::motion::pursuit - Pursuit SEARCHING -> ALIGNING (CW)
//! WARN [2m 5s 456ms] vision_pursuit::vision::aggregator - Discarding malformed detection (id Some(7), bearing NaN, area 0.1)
//! ```

use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
    sync::{Mutex, OnceLock},
    time::{Duration, Instant},
};

use humantime::{FormattedDuration, format_duration};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "log.txt";

/// A dual-output logger.
///
/// Writes log messages to both the console and a file. The file is
/// created/truncated when the logger is initialized.
pub struct PursuitLogger {
    /// Buffered file writer for log output.
    ///
    /// `None` if the file could not be opened, in which case only the
    /// console receives output.
    file_writer: Mutex<Option<BufWriter<File>>>,
    started:     Instant,
}

impl PursuitLogger {
    fn new(path: &Path) -> Self {
        let file_writer = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .ok()
            .map(BufWriter::new);

        Self {
            file_writer: Mutex::new(file_writer),
            started:     Instant::now(),
        }
    }

    fn uptime(&self) -> FormattedDuration { format_uptime(self.started.elapsed()) }
}

impl log::Log for PursuitLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_line = format_line(record, self.uptime());

            print!("{}", log_line);

            if let Ok(mut writer_guard) = self.file_writer.lock() {
                if let Some(ref mut writer) = *writer_guard {
                    let _ = writer.write_all(log_line.as_bytes());
                }
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut writer_guard) = self.file_writer.lock() {
            if let Some(ref mut writer) = *writer_guard {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<PursuitLogger> = OnceLock::new();

/// Initializes the logger, writing to [`DEFAULT_LOG_PATH`].
///
/// # Arguments
///
/// * `level` - The minimum log level to record. Use [`LevelFilter::Trace`] to
///   see every pursuit command, [`LevelFilter::Info`] for phase changes only.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    init_with_path(DEFAULT_LOG_PATH, level)
}

/// Initializes the logger, writing to `path`.
///
/// If the file cannot be opened, logging continues on the console only.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
///
/// # Example
///
/// ```ignore
/// use vision_pursuit::fs::logger;
/// use log::LevelFilter;
///
/// logger::init_with_path("/home/lvuser/pursuit.log", LevelFilter::Debug)?;
/// ```
pub fn init_with_path(path: impl AsRef<Path>, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| PursuitLogger::new(path.as_ref()));
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

fn format_line(record: &Record, uptime: FormattedDuration) -> String {
    format!(
        "{} [{}] {} - {}\n",
        record.level(),
        uptime,
        record.target(),
        record.args()
    )
}

/// Formats an uptime with millisecond resolution.
fn format_uptime(elapsed: Duration) -> FormattedDuration {
    format_duration(Duration::from_millis(elapsed.as_millis() as u64))
}
