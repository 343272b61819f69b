//! Configuration management for pomoclock.
//!
//! This module handles loading and saving configuration from `~/.pomoclock/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, GeneralConfig, NotificationConfig, TimerConfig, CONFIG_KEYS};
