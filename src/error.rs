//! Error types for pomoclock.

use thiserror::Error;

/// Errors produced by pomoclock.
#[derive(Debug, Error)]
pub enum PomoError {
    /// A cycle configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading, writing or locating configuration failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Parsing or serializing data failed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A notification could not be delivered.
    #[error("Notification error: {0}")]
    Notification(String),

    /// The terminal could not be set up or drawn to.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// The cycle runtime is unavailable.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// An I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PomoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {e}"))
    }
}

impl From<serde_yaml::Error> for PomoError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(format!("YAML error: {e}"))
    }
}

impl From<rusqlite::Error> for PomoError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PomoError::InvalidConfig("work duration must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: work duration must be positive"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PomoError = io.into();
        assert!(matches!(err, PomoError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: PomoError = json_err.into();
        assert!(matches!(err, PomoError::Parse(_)));
    }
}
