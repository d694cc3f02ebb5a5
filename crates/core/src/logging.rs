use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Overrides the directory holding the rolling log files.
pub const LOG_DIR_ENV: &str = "PREBUILT_APIS_LOG_DIR";

/// Filter used when `RUST_LOG` is unset: chatty enough to show per-module
/// generation summaries, quiet for dependencies.
pub const DEFAULT_FILTER: &str = "warn,prebuilt_apis_core=info,prebuilt_apis_cli=info";

/// Directory holding the rolling log files.
pub fn log_dir() -> PathBuf {
    resolve_log_dir(std::env::var_os(LOG_DIR_ENV).map(PathBuf::from), dirs::home_dir())
}

fn resolve_log_dir(override_dir: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    match override_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => home
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".prebuilt-apis/logs"),
    }
}

/// Log file prefix for a component, e.g. `cli` logs to `cli.log.2024-01-21`.
fn file_prefix(component: &str) -> String {
    format!("{component}.log")
}

pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let log_dir = log_dir();
    let _ = std::fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::daily(&log_dir, file_prefix(component));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        // Diagnostics are the interesting part on a terminal; targets are noise.
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
            .without_time();
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    guard
}
