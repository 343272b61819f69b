//! Notification sink backed by the desktop and the system sound player.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use notify_rust::Notification;
use tracing::{debug, warn};

use crate::config::NotificationConfig;
use crate::error::PomoError;
use crate::features::cycle::{Notice, NotificationSink, Phase};

/// Sounds the clock can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Short cue when the stopwatch starts
    Tick,
    /// Alarm when a phase completes
    Ring,
}

impl Sound {
    /// Players and stock sound files to try, in order.
    const fn system_candidates(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Tick => &[
                ("paplay", "/usr/share/sounds/freedesktop/stereo/message.oga"),
                ("aplay", "/usr/share/sounds/sound-icons/prompt.wav"),
                ("afplay", "/System/Library/Sounds/Tink.aiff"),
            ],
            Self::Ring => &[
                (
                    "paplay",
                    "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga",
                ),
                ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
                ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
                ("afplay", "/System/Library/Sounds/Glass.aiff"),
            ],
        }
    }
}

/// Pick a player command and file for `sound`.
///
/// A configured file wins and is handed to the first player found on the
/// platform; otherwise the first stock file that exists is used.
fn resolve_sound(sound: Sound, custom: Option<&Path>) -> Option<(&'static str, PathBuf)> {
    let candidates = sound.system_candidates();

    if let Some(file) = custom {
        let player = if cfg!(target_os = "macos") {
            "afplay"
        } else {
            "paplay"
        };
        return Some((player, file.to_path_buf()));
    }

    candidates
        .iter()
        .find(|(_, file)| Path::new(file).exists())
        .map(|(player, file)| (*player, PathBuf::from(file)))
}

/// Summary and body of the notification shown when `phase` completes.
fn completion_message(phase: Phase) -> (String, &'static str) {
    if phase.is_break() {
        (format!("{phase} is over"), "Back to work.")
    } else {
        (format!("{phase} period complete"), "Time for a break.")
    }
}

/// Plays sounds and shows desktop notifications according to settings.
pub struct DesktopNotifier {
    settings: NotificationConfig,
    player: Option<Child>,
}

impl DesktopNotifier {
    #[must_use]
    pub const fn new(settings: NotificationConfig) -> Self {
        Self {
            settings,
            player: None,
        }
    }

    fn play(&mut self, sound: Sound) {
        self.silence();

        let custom = match sound {
            Sound::Tick => self.settings.tick_sound_file.as_deref(),
            Sound::Ring => self.settings.ring_sound_file.as_deref(),
        };

        let Some((player, file)) = resolve_sound(sound, custom) else {
            debug!(?sound, "no sound file available");
            return;
        };

        match Command::new(player)
            .arg(&file)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => self.player = Some(child),
            Err(e) => warn!(player, file = %file.display(), error = %e, "failed to play sound"),
        }
    }

    fn show(phase: Phase) -> Result<(), PomoError> {
        let (summary, body) = completion_message(phase);

        Notification::new()
            .summary(&summary)
            .body(body)
            .appname("pomoclock")
            .icon("alarm-clock")
            .show()
            .map(|_| ())
            .map_err(|e| PomoError::Notification(e.to_string()))
    }
}

impl NotificationSink for DesktopNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::TickStarted => {
                if self.settings.tick_sound {
                    self.play(Sound::Tick);
                }
            }
            Notice::PhaseCompleted(phase) => {
                if self.settings.ring_sound {
                    self.play(Sound::Ring);
                }
                if self.settings.desktop {
                    if let Err(e) = Self::show(phase) {
                        warn!(error = %e, "failed to show desktop notification");
                    }
                }
            }
        }
    }

    fn silence(&mut self) {
        if let Some(mut child) = self.player.take() {
            // Already-finished players make kill fail; that is fine.
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn configure(&mut self, settings: NotificationConfig) {
        debug!(?settings, "notification settings changed");
        self.settings = settings;
    }
}

impl Drop for DesktopNotifier {
    fn drop(&mut self) {
        self.silence();
    }
}

/// A sink that ignores every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl NotificationSink for SilentNotifier {
    fn notify(&mut self, _notice: Notice) {}

    fn silence(&mut self) {}

    fn configure(&mut self, _settings: NotificationConfig) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_settings() -> NotificationConfig {
        NotificationConfig {
            tick_sound: false,
            ring_sound: false,
            desktop: false,
            tick_sound_file: None,
            ring_sound_file: None,
        }
    }

    #[test]
    fn test_custom_sound_file_wins() {
        let custom = PathBuf::from("/tmp/my-bell.wav");
        let (_, file) = resolve_sound(Sound::Ring, Some(&custom)).unwrap();
        assert_eq!(file, custom);
    }

    #[test]
    fn test_completion_messages() {
        assert_eq!(
            completion_message(Phase::Work),
            ("Work period complete".to_string(), "Time for a break.")
        );
        assert_eq!(
            completion_message(Phase::ShortBreak),
            ("Short Break is over".to_string(), "Back to work.")
        );
        assert_eq!(completion_message(Phase::LongBreak).0, "Long Break is over");
    }

    #[test]
    fn test_stock_candidates_exist_for_both_sounds() {
        assert!(!Sound::Tick.system_candidates().is_empty());
        assert!(!Sound::Ring.system_candidates().is_empty());
    }

    #[test]
    fn test_disabled_notifier_spawns_nothing() {
        let mut notifier = DesktopNotifier::new(quiet_settings());
        notifier.notify(Notice::TickStarted);
        notifier.notify(Notice::PhaseCompleted(Phase::Work));
        assert!(notifier.player.is_none());
        notifier.silence();
    }

    #[test]
    fn test_configure_replaces_settings() {
        let mut notifier = DesktopNotifier::new(NotificationConfig::default());
        notifier.configure(quiet_settings());
        assert_eq!(notifier.settings, quiet_settings());
    }

    #[test]
    fn test_silent_notifier() {
        let mut notifier = SilentNotifier;
        notifier.notify(Notice::TickStarted);
        notifier.silence();
    }
}
