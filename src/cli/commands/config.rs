//! Config command implementation.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::PomoError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// `config` is the configuration already loaded from `paths.config_file`.
///
/// # Errors
///
/// Returns an error for invalid settings or if the file cannot be written.
pub fn config(
    paths: &Paths,
    mut config: Config,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, PomoError> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Json => to_json(&config),
            OutputFormat::Pretty => config.to_yaml(),
        },

        ConfigCommands::Path => {
            let path = paths.config_file.display().to_string();
            match format {
                OutputFormat::Json => to_json(&json!({
                    "config": path,
                    "database": paths.database,
                    "log": paths.log_file,
                })),
                OutputFormat::Pretty => Ok(path),
            }
        }

        ConfigCommands::Init { force } => {
            if paths.config_file.exists() && !force {
                return Err(PomoError::Config(format!(
                    "{} already exists.\nUse --force to overwrite it with defaults.",
                    paths.config_file.display()
                )));
            }
            paths.ensure_dirs()?;
            Config::default().save_to_path(&paths.config_file)?;
            tracing::info!(path = %paths.config_file.display(), "wrote default config");
            Ok(format!(
                "{} {}",
                "Created".green(),
                paths.config_file.display()
            ))
        }

        ConfigCommands::Set { key, value } => {
            config.set(&key, &value)?;
            paths.ensure_dirs()?;
            config.save_to_path(&paths.config_file)?;
            tracing::info!(%key, %value, "config value changed");
            match format {
                OutputFormat::Json => to_json(&json!({ "key": key, "value": value })),
                OutputFormat::Pretty => Ok(format!("{} {key} = {value}", "Set".green())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_paths() -> (TempDir, Paths) {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().join("home"));
        (dir, paths)
    }

    #[test]
    fn test_set_persists_value() {
        let (_dir, paths) = temp_paths();
        config(
            &paths,
            Config::default(),
            ConfigCommands::Set {
                key: "work".to_string(),
                value: "50".to_string(),
            },
            OutputFormat::Pretty,
        )
        .unwrap();

        let saved = Config::load_from_path(&paths.config_file).unwrap();
        assert_eq!(saved.timer.work_minutes, 50);
    }

    #[test]
    fn test_set_invalid_writes_nothing() {
        let (_dir, paths) = temp_paths();
        let result = config(
            &paths,
            Config::default(),
            ConfigCommands::Set {
                key: "break".to_string(),
                value: "0".to_string(),
            },
            OutputFormat::Pretty,
        );

        assert!(result.is_err());
        assert!(!paths.config_file.exists());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let (_dir, paths) = temp_paths();
        let init = |force| {
            config(
                &paths,
                Config::default(),
                ConfigCommands::Init { force },
                OutputFormat::Pretty,
            )
        };

        init(false).unwrap();
        assert!(paths.config_file.exists());
        assert!(init(false).is_err());
        init(true).unwrap();
    }

    #[test]
    fn test_show_json() {
        let (_dir, paths) = temp_paths();
        let out = config(
            &paths,
            Config::default(),
            ConfigCommands::Show,
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["timer"]["work_minutes"], 25);
    }
}
