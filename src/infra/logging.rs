use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, eyre};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "duckboard.log";

/// Installs the global JSON subscriber writing to a daily rolling file under
/// `log_dir`. Stdout belongs to the terminal UI, so nothing is printed there.
///
/// The returned guard flushes buffered lines on drop; keep it alive for the
/// whole run.
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|e| eyre!("Failed to install log subscriber: {e}"))?;

    Ok(guard)
}
