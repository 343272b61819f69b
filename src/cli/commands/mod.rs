//! Command implementations for pomoclock.
//!
//! Each command returns the text to print; the binary prints it.

mod completions;
mod config;
mod history;

pub use completions::{completion_install_instructions, completions};
pub use config::config;
pub use history::{history, sessions};
