//! Output formatting for pomoclock.

use serde::Serialize;

use crate::error::PomoError;

/// JSON formatter for any serializable type.
///
/// # Errors
///
/// Returns `PomoError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PomoError> {
    Ok(serde_json::to_string_pretty(value)?)
}
