//! Logging setup: stderr plus an optional per-session log file.
//!
//! The file lives at `{log_dir}/rambox.log`. On every startup the previous
//! session's file is shifted to `rambox.log.1`, `.1` to `.2`, and so on,
//! keeping `backup_count` old sessions.

use std::path::Path;

use rambox_config::schema::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE_NAME: &str = "rambox.log";

/// The filter directive in effect: the CLI flag wins, then `RUST_LOG`,
/// then the configured level.
pub fn filter_directive(cli: Option<&str>, env: Option<&str>, config: &LoggingConfig) -> String {
    cli.or(env)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("warn,rambox={}", config.level.as_directive()))
}

/// Shift `name` to `name.1`, `name.1` to `name.2`, ..., dropping anything
/// beyond `keep`.
pub fn rotate_logs(dir: &Path, name: &str, keep: u32) -> std::io::Result<()> {
    let current = dir.join(name);
    if !current.exists() {
        return Ok(());
    }
    if keep == 0 {
        return std::fs::remove_file(&current);
    }

    let oldest = dir.join(format!("{name}.{keep}"));
    if oldest.exists() {
        std::fs::remove_file(&oldest)?;
    }
    for i in (1..keep).rev() {
        let from = dir.join(format!("{name}.{i}"));
        if from.exists() {
            std::fs::rename(&from, dir.join(format!("{name}.{}", i + 1)))?;
        }
    }
    std::fs::rename(&current, dir.join(format!("{name}.1")))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live until
/// the process exits.
pub fn init(config: &LoggingConfig, cli_directive: Option<&str>) -> Option<WorkerGuard> {
    let env = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(cli_directive, env.as_deref(), config);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter {directive:?} ({e}), falling back to info");
        EnvFilter::new("warn,rambox=info")
    });

    let mut guard = None;
    let file_layer = if config.file_logging {
        match open_log_file(config.backup_count) {
            Ok((writer, g)) => {
                guard = Some(g);
                Some(fmt::layer().with_writer(writer).with_ansi(false))
            }
            Err(e) => {
                eprintln!("file logging disabled: {e}");
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

fn open_log_file(
    backup_count: u32,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), String> {
    let dir = rambox_platform::log_dir().map_err(|e| e.to_string())?;
    std::fs::create_dir_all(&dir).map_err(|e| format!("{}: {e}", dir.display()))?;
    rotate_logs(&dir, LOG_FILE_NAME, backup_count)
        .map_err(|e| format!("log rotation failed: {e}"))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    Ok(tracing_appender::non_blocking(appender))
}
