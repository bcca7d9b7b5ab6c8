//! Logging and tracing initialization.
//!
//! Always logs to stderr; optionally mirrors events to a JSONL file when a
//! log path or directory is configured (flag, environment, or config file).

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Where file logging should go, if anywhere.
#[derive(Debug, Default)]
pub struct ObservabilityConfig {
    /// Explicit log file path (highest precedence).
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated JSONL log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Build from environment variables with a config-file fallback.
    ///
    /// Precedence: `CLAUSE_METER_LOG_PATH` > `CLAUSE_METER_LOG_DIR` >
    /// `config_log_dir` > the platform data directory. Stderr-only when
    /// none of those resolve.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os("CLAUSE_METER_LOG_PATH").map(PathBuf::from);
        let log_dir = std::env::var_os("CLAUSE_METER_LOG_DIR")
            .map(PathBuf::from)
            .or(config_log_dir)
            .or_else(default_log_dir);
        Self { log_path, log_dir }
    }
}

/// Platform-default log directory (e.g. `~/.local/share/clause-meter/logs`).
///
/// Returns `None` when the directory cannot be determined or created; the
/// caller degrades to stderr-only logging.
fn default_log_dir() -> Option<PathBuf> {
    let dir = directories::ProjectDirs::from("", "", "clause-meter")?
        .data_local_dir()
        .join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Build the env filter from CLI verbosity flags and the configured level.
///
/// `RUST_LOG` always wins when set. Otherwise: `--quiet` maps to `error`,
/// `-v` to `debug`, `-vv` (or more) to `trace`, and the config level is
/// the default.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Initialize the tracing subscriber.
///
/// Returns the file writer's worker guard when file logging is active;
/// hold it for the life of the process so buffered events are flushed.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match file_appender(config)? {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Resolve the file appender from the config, creating directories as
/// needed. `None` when file logging is not configured.
fn file_appender(
    config: &ObservabilityConfig,
) -> anyhow::Result<Option<tracing_appender::rolling::RollingFileAppender>> {
    if let Some(ref path) = config.log_path {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .with_context(|| format!("log path has no file name: {}", path.display()))?;
        ensure_dir(dir)?;
        return Ok(Some(tracing_appender::rolling::never(dir, file_name)));
    }

    if let Some(ref dir) = config.log_dir {
        ensure_dir(dir)?;
        return Ok(Some(tracing_appender::rolling::daily(
            dir,
            "clause-meter.jsonl",
        )));
    }

    Ok(None)
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_config_level() {
        let filter = env_filter(true, 0, "debug");
        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(env_filter(false, 0, "info").to_string(), "info");
        assert_eq!(env_filter(false, 1, "info").to_string(), "debug");
        assert_eq!(env_filter(false, 2, "info").to_string(), "trace");
    }

    #[test]
    fn empty_config_means_no_file_logging() {
        let config = ObservabilityConfig::default();
        assert!(file_appender(&config).unwrap().is_none());
    }
}
