//! Logging setup: stderr always, plus an optional per-session log file.
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the default `info` filter. The returned guard must be
/// held until exit so buffered file output is flushed.
pub fn setup_logging(seed: u64, to_file: bool) -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard, log_path) = if to_file {
        let dir = log_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

        let file_name = format!("session_{seed}.log");
        let appender = tracing_appender::rolling::never(&dir, &file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard), Some(dir.join(file_name)))
    } else {
        (None, None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(path) = log_path {
        tracing::info!("Log file: {}", path.display());
    }
    Ok(guard)
}

/// Platform cache directory for session logs.
///
/// - Linux: `~/.cache/arena-sim/logs` (or `$XDG_CACHE_HOME/arena-sim/logs`)
/// - macOS: `~/Library/Caches/arena-sim/logs`
/// - Fallback: `/tmp/arena-sim/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "arena-sim")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/arena-sim"))
        .join("logs")
}
