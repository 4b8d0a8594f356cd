//! ---
//! uikit_section: "01-core-functionality"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Shared primitives and utilities for the component runtime."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use tracing::debug;

use crate::logging::LogFormat;

/// Upper bound accepted for any configured throttle or debounce delay.
pub const MAX_DELAY: Duration = Duration::from_secs(60);

fn default_throttle_delay() -> Duration {
    Duration::from_millis(100)
}

fn default_debounce_delay() -> Duration {
    Duration::from_millis(50)
}

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Primary configuration object for hosts embedding the UI-Kit runtime.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UikitConfig {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where a [`UikitConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedUikitConfig {
    pub config: UikitConfig,
    pub source: PathBuf,
}

impl UikitConfig {
    pub const ENV_CONFIG_PATH: &str = "UIKIT_CONFIG";

    /// Load configuration from disk, respecting the `UIKIT_CONFIG` override.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration from disk together with the effective source path.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedUikitConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedUikitConfig {
                    config,
                    source: path,
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedUikitConfig {
                    config,
                    source: path,
                });
            }
        }

        Err(anyhow!(
            "no configuration files found. inspected: {}",
            candidates
                .iter()
                .map(|p| p.as_ref().display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }

    /// Parse and validate a configuration file at a concrete path.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<UikitConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.timing.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl std::str::FromStr for UikitConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: UikitConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Mechanism used to run microtasks, chosen once by the host.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MicrotaskStrategy {
    /// FIFO queue drained by the host at its microtask checkpoint.
    #[default]
    Native,
    /// Dispatcher task woken through a notification channel.
    Channel,
    /// Dispatcher task that waits a zero-length timer before each callback.
    Timer,
}

impl MicrotaskStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MicrotaskStrategy::Native => "native",
            MicrotaskStrategy::Channel => "channel",
            MicrotaskStrategy::Timer => "timer",
        }
    }
}

impl std::str::FromStr for MicrotaskStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" => Ok(MicrotaskStrategy::Native),
            "channel" => Ok(MicrotaskStrategy::Channel),
            "timer" => Ok(MicrotaskStrategy::Timer),
            other => Err(format!("unknown microtask strategy: {}", other)),
        }
    }
}

/// Default delays and scheduling mechanism for the timing utilities.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingConfig {
    #[serde(rename = "throttle_delay_ms", default = "default_throttle_delay")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub throttle_delay: Duration,
    #[serde(rename = "debounce_delay_ms", default = "default_debounce_delay")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub debounce_delay: Duration,
    #[serde(default)]
    pub microtask: MicrotaskStrategy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            throttle_delay: default_throttle_delay(),
            debounce_delay: default_debounce_delay(),
            microtask: MicrotaskStrategy::default(),
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, delay) in [
            ("throttle_delay_ms", self.throttle_delay),
            ("debounce_delay_ms", self.debounce_delay),
        ] {
            if delay > MAX_DELAY {
                return Err(anyhow!(
                    "timing.{} of {}ms exceeds the maximum of {}ms",
                    name,
                    delay.as_millis(),
                    MAX_DELAY.as_millis()
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            file_prefix: None,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(prefix) = &self.file_prefix {
            if prefix.trim().is_empty() {
                return Err(anyhow!("logging.file_prefix cannot be empty when set"));
            }
        }
        Ok(())
    }
}
