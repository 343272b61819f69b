//! Commands queued from the UI to the cycle runtime.

use crate::config::NotificationConfig;
use crate::features::cycle::CycleConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    /// Swap in a new configuration
    Reconfigure(CycleConfig),
    /// Swap in new sound and notification settings
    Notifications(NotificationConfig),
    /// End the runtime thread
    Shutdown,
}
