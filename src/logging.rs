use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable holding the tracing filter directives
pub const LOG_ENV: &str = "APPLYVAULT_LOG";

const DEFAULT_LEVEL: &str = "info";

// The terminal belongs to the UI, so these are kept quiet even at debug
const NOISY_TARGETS: &[(&str, &str)] = &[("hyper_util", "warn"), ("reqwest", "warn"), ("rustls", "warn")];

/// Directory the daily log files are written to.
pub fn log_dir() -> PathBuf {
  dirs::data_dir()
    .unwrap_or_else(std::env::temp_dir)
    .join("applyvault")
}

fn build_env_filter(directives: Option<&str>) -> Result<EnvFilter> {
  let base = directives
    .map(str::trim)
    .filter(|d| !d.is_empty())
    .unwrap_or(DEFAULT_LEVEL);

  let mut parts = vec![base.to_string()];
  for (target, level) in NOISY_TARGETS {
    parts.push(format!("{}={}", target, level));
  }

  let filter = parts.join(",");
  EnvFilter::try_new(&filter).map_err(|e| eyre!("Invalid log filter '{}': {}", filter, e))
}

/// Install a file-only subscriber writing to `<data dir>/applyvault/applyvault.log.<date>`.
///
/// The returned guard flushes buffered lines when dropped; keep it alive
/// for the lifetime of the program.
pub fn init() -> Result<WorkerGuard> {
  let dir = log_dir();
  std::fs::create_dir_all(&dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let appender = tracing_appender::rolling::daily(&dir, "applyvault.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  let filter = build_env_filter(std::env::var(LOG_ENV).ok().as_deref())?;
  let file_layer = tracing_subscriber::fmt::layer()
    .with_ansi(false)
    .with_target(true)
    .with_writer(writer)
    .with_filter(filter);

  tracing_subscriber::registry()
    .with(file_layer)
    .try_init()
    .map_err(|e| eyre!("Failed to install log subscriber: {}", e))?;

  tracing::debug!(dir = %dir.display(), "logging initialized");
  Ok(guard)
}
