// src/logging.rs

use crate::config::{config_dir, Config};
use crate::errors::AtomiaResult;
use crate::models::ApiCallLog;
use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Starts file logging. The terminal belongs to the UI, so nothing goes to stdout.
/// Keep the returned handle alive for the lifetime of the program.
pub fn init(config: &Config) -> AtomiaResult<LoggerHandle> {
    let log_dir = config_dir()?.join("logs");

    let handle = Logger::try_with_env_or_str(&config.log_level)?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename("atomia")
                .suppress_timestamp(),
        )
        .append()
        .format(flexi_logger::detailed_format)
        .start()?;

    Ok(handle)
}

/// Records one HTTP call against the backend.
pub fn log_api_call(entry: &ApiCallLog) {
    log::info!(
        target: "atomia::api",
        "[{}] {} - {} - Status: {} - Time: {}ms",
        entry.timestamp.to_rfc3339(),
        entry.endpoint,
        entry.request_summary,
        entry.response_status,
        entry.response_time_ms
    );
}
