//! Sounds and desktop notifications for cycle events.

mod desktop;

pub use desktop::{DesktopNotifier, SilentNotifier, Sound};
