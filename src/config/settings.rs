//! Configuration settings for pomoclock.
//!
//! Settings are loaded from `~/.pomoclock/config.yaml` once at startup and
//! written back only when the user commits a change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::PomoError;
use crate::features::cycle::config::{
    DEFAULT_BREAK_MINUTES, DEFAULT_LONG_BREAK_INTERVAL, DEFAULT_LONG_BREAK_MINUTES,
    DEFAULT_WORK_MINUTES,
};
use crate::features::cycle::CycleConfig;

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "work",
    "break",
    "long-break",
    "interval",
    "count-backwards",
    "tick-interval-ms",
    "tick-sound",
    "ring-sound",
    "desktop",
    "tick-sound-file",
    "ring-sound-file",
    "log-level",
    "output",
];

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Cycle timing.
    pub timer: TimerConfig,
    /// Sounds and desktop notifications.
    pub notifications: NotificationConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    pub default_output: OutputFormat,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

/// Cycle timing settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Work period length in minutes.
    pub work_minutes: u32,
    /// Short break length in minutes.
    pub break_minutes: u32,
    /// Long break length in minutes.
    pub long_break_minutes: u32,
    /// Work periods before a long break.
    pub long_break_interval: u32,
    /// Show remaining time instead of elapsed time.
    pub count_backwards: bool,
    /// Milliseconds between ticks.
    pub tick_interval_ms: u64,
}

/// Notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationConfig {
    /// Play a sound when the clock starts.
    pub tick_sound: bool,
    /// Play a sound when a phase completes.
    pub ring_sound: bool,
    /// Show a desktop notification when a phase completes.
    pub desktop: bool,
    /// Custom start sound.
    pub tick_sound_file: Option<PathBuf>,
    /// Custom completion sound.
    pub ring_sound_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Pretty,
            log_level: "info".to_string(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            long_break_minutes: DEFAULT_LONG_BREAK_MINUTES,
            long_break_interval: DEFAULT_LONG_BREAK_INTERVAL,
            count_backwards: false,
            tick_interval_ms: 250,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            tick_sound: false,
            ring_sound: true,
            desktop: true,
            tick_sound_file: None,
            ring_sound_file: None,
        }
    }
}

impl TimerConfig {
    /// Validate into a [`CycleConfig`].
    ///
    /// # Errors
    ///
    /// Returns `PomoError::InvalidConfig` for zero durations or interval.
    pub fn cycle_config(&self) -> Result<CycleConfig, PomoError> {
        CycleConfig::new(
            self.work_minutes,
            self.break_minutes,
            self.long_break_minutes,
            self.count_backwards,
        )?
        .with_long_break_interval(self.long_break_interval)
    }

    /// Copy the timing out of a validated cycle configuration.
    pub fn apply(&mut self, cycle: &CycleConfig) {
        self.work_minutes = cycle.work_minutes();
        self.break_minutes = cycle.break_minutes();
        self.long_break_minutes = cycle.long_break_minutes();
        self.long_break_interval = cycle.long_break_interval();
        self.count_backwards = cycle.count_backwards();
    }

    /// Tick interval as a `Duration`, never shorter than 10ms.
    #[must_use]
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms.max(10))
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, PomoError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomoError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PomoError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), PomoError> {
        let contents = self.to_yaml()?;

        std::fs::write(path, contents).map_err(|e| {
            PomoError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, PomoError> {
        serde_yaml::to_string(self)
            .map_err(|e| PomoError::Config(format!("Failed to serialize config: {e}")))
    }

    /// Set a single value by key (see [`CONFIG_KEYS`]).
    ///
    /// Timer values are validated; on error the config is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, unparsable values or an invalid
    /// resulting cycle.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PomoError> {
        let mut next = self.clone();

        match key {
            "work" => next.timer.work_minutes = parse_value(key, value)?,
            "break" => next.timer.break_minutes = parse_value(key, value)?,
            "long-break" => next.timer.long_break_minutes = parse_value(key, value)?,
            "interval" => next.timer.long_break_interval = parse_value(key, value)?,
            "count-backwards" => next.timer.count_backwards = parse_bool(key, value)?,
            "tick-interval-ms" => next.timer.tick_interval_ms = parse_value(key, value)?,
            "tick-sound" => next.notifications.tick_sound = parse_bool(key, value)?,
            "ring-sound" => next.notifications.ring_sound = parse_bool(key, value)?,
            "desktop" => next.notifications.desktop = parse_bool(key, value)?,
            "tick-sound-file" => next.notifications.tick_sound_file = optional_path(value),
            "ring-sound-file" => next.notifications.ring_sound_file = optional_path(value),
            "log-level" => next.general.log_level = value.to_string(),
            "output" => {
                next.general.default_output = match value.to_lowercase().as_str() {
                    "pretty" => OutputFormat::Pretty,
                    "json" => OutputFormat::Json,
                    _ => {
                        return Err(PomoError::Config(format!(
                            "Invalid value for output: {value} (expected pretty or json)"
                        )))
                    }
                }
            }
            _ => {
                return Err(PomoError::Config(format!(
                    "Unknown key: {key}. Valid keys: {}",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }

        next.timer.cycle_config()?;
        *self = next;
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, PomoError> {
    value
        .trim()
        .parse()
        .map_err(|_| PomoError::Config(format!("Invalid value for {key}: {value}")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, PomoError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(PomoError::Config(format!(
            "Invalid value for {key}: {value} (expected true or false)"
        ))),
    }
}

fn optional_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(PathBuf::from(value))
    }
}
