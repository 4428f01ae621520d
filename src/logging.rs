//! Logging setup
//!
//! Console output plus a daily-rotated file under the logs directory,
//! keeping the last [`RETAINED_LOG_FILES`] files.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::Result;

/// Log files kept before the oldest is removed
pub const RETAINED_LOG_FILES: usize = 7;

const LOG_FILE_PREFIX: &str = "jobscrape";

/// Build the daily rolling appender in `log_dir`, creating the directory.
pub fn file_appender(log_dir: &Path) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(log_dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(RETAINED_LOG_FILES)
        .build(log_dir)?;
    Ok(appender)
}

/// Install the global subscriber.
///
/// The file layer always records INFO and above. The console layer follows
/// `RUST_LOG` when set, otherwise `debug` if `verbose`, else `info`.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init(log_dir: &Path, verbose: bool) -> Result<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(file_appender(log_dir)?);

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_filter(console_filter))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Logging initialized successfully.");
    Ok(guard)
}
