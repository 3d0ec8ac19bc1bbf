use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::i18n::Language;
use crate::warmup::Backoff;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  /// UI language ("en" or "de"); detected from the environment when unset
  pub language: Option<Language>,
  #[serde(default)]
  pub warmup: WarmupConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Base URL of the job applications backend, e.g. "https://api.example.com"
  #[serde(default)]
  pub base_url: String,
  /// Per-request timeout in seconds
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: String::new(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

fn default_timeout_secs() -> u64 {
  30
}

/// Backoff parameters for the backend warm-up gate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WarmupConfig {
  pub base_delay_ms: u64,
  pub rate: f64,
  pub max_delay_ms: u64,
  pub jitter_ms: u64,
}

impl Default for WarmupConfig {
  fn default() -> Self {
    Self {
      base_delay_ms: 500,
      rate: 1.35,
      max_delay_ms: 4000,
      jitter_ms: 250,
    }
  }
}

impl WarmupConfig {
  pub fn backoff(&self) -> Backoff {
    Backoff {
      base: Duration::from_millis(self.base_delay_ms),
      rate: self.rate,
      cap: Duration::from_millis(self.max_delay_ms),
      max_jitter: Duration::from_millis(self.jitter_ms),
    }
  }
}

impl ApiConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

impl Config {
  /// Load configuration from file and environment.
  ///
  /// Search order for the file:
  /// 1. Explicit path if provided (must exist)
  /// 2. ./applyvault.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/applyvault/config.yaml
  ///
  /// The file is optional; environment variables are applied on top.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("applyvault.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("applyvault").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(contents)
  }

  /// Apply environment overrides.
  ///
  /// APPLYVAULT_API_BASE_URL wins over VITE_API_BASE_URL; APPLYVAULT_LANG sets the language.
  fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
    if let Some(url) = var("APPLYVAULT_API_BASE_URL").or_else(|| var("VITE_API_BASE_URL")) {
      self.api.base_url = url;
    }
    if let Some(lang) = var("APPLYVAULT_LANG").and_then(|l| Language::from_tag(&l)) {
      self.language = Some(lang);
    }
    self
  }

  /// Check that the configuration can be used to talk to a backend.
  pub fn validate(&self) -> Result<()> {
    if self.api.base_url.trim().is_empty() {
      return Err(eyre!(
        "No API base URL configured. Set APPLYVAULT_API_BASE_URL, pass --base-url, \
         or set api.base_url in ~/.config/applyvault/config.yaml"
      ));
    }
    if self.warmup.rate.is_nan() || self.warmup.rate < 1.0 {
      return Err(eyre!("warmup.rate must be at least 1.0"));
    }
    Ok(())
  }

  /// Language from config, falling back to the process locale.
  pub fn resolved_language(&self) -> Language {
    self
      .language
      .unwrap_or_else(|| Language::detect(std::env::var("LANG").ok().as_deref()))
  }
}
