//! Logging and tracing setup.
//!
//! Two layers: human-readable events on stderr, and JSON lines appended to a
//! log file. The file is chosen, first match wins, from
//! `STYLOMETRY_LOG_PATH`, `STYLOMETRY_LOG_DIR`, the configured `log_dir`,
//! then `logs/` under the platform's local data directory. If the file
//! cannot be opened only the stderr layer is installed.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const ENV_LOG_PATH: &str = "STYLOMETRY_LOG_PATH";
const ENV_LOG_DIR: &str = "STYLOMETRY_LOG_DIR";
const LOG_FILE_NAME: &str = "stylometry.jsonl";

/// Where and how much to log.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// JSON-lines log file, if any.
    pub log_file: Option<PathBuf>,
    /// Number of `-v` flags; zero keeps stderr to warnings and errors.
    pub verbosity: u8,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, then `config_log_dir`,
    /// then the platform default.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_file = std::env::var_os(ENV_LOG_PATH)
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(ENV_LOG_DIR).map(|dir| PathBuf::from(dir).join(LOG_FILE_NAME)))
            .or_else(|| config_log_dir.map(|dir| dir.join(LOG_FILE_NAME)))
            .or_else(|| {
                stylometry_core::config::user_data_local_dir()
                    .map(|dir| dir.join("logs").join(LOG_FILE_NAME).into_std_path_buf())
            });
        Self {
            log_file,
            verbosity: 0,
        }
    }

    /// Set how chatty stderr is.
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    const fn console_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Build the event filter.
///
/// `-q` and `-v` win over `RUST_LOG`, which wins over the configured level.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit so buffered file output is
/// flushed.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(config.console_level());

    let mut file_error = None;
    let (file, guard) = match config.log_file.as_deref().map(open_log_file) {
        Some(Ok(appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        Some(Err(e)) => {
            file_error = Some(e);
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(e) = file_error {
        tracing::debug!(error = %e, "file logging disabled");
    }
    Ok(guard)
}

fn open_log_file(path: &Path) -> anyhow::Result<RollingFileAppender> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid log file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
