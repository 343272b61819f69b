//! The settings overlay.
//!
//! Edits a copy of the timer and notification settings; nothing changes
//! until the app commits the panel.

use crate::config::{Config, NotificationConfig, TimerConfig};
use crate::features::cycle::config::{MAX_LONG_BREAK_INTERVAL, MAX_MINUTES};

/// Rows of the settings overlay, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Work,
    Break,
    LongBreak,
    Interval,
    CountBackwards,
    TickSound,
    RingSound,
    Desktop,
}

impl SettingsField {
    pub const ALL: [Self; 8] = [
        Self::Work,
        Self::Break,
        Self::LongBreak,
        Self::Interval,
        Self::CountBackwards,
        Self::TickSound,
        Self::RingSound,
        Self::Desktop,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Work => "Work (min)",
            Self::Break => "Break (min)",
            Self::LongBreak => "Long break (min)",
            Self::Interval => "Work periods per set",
            Self::CountBackwards => "Count backwards",
            Self::TickSound => "Start sound",
            Self::RingSound => "Completion sound",
            Self::Desktop => "Desktop notifications",
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::LongBreak,
            Self::LongBreak => Self::Interval,
            Self::Interval => Self::CountBackwards,
            Self::CountBackwards => Self::TickSound,
            Self::TickSound => Self::RingSound,
            Self::RingSound => Self::Desktop,
            Self::Desktop => Self::Work,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Work => Self::Desktop,
            Self::Break => Self::Work,
            Self::LongBreak => Self::Break,
            Self::Interval => Self::LongBreak,
            Self::CountBackwards => Self::Interval,
            Self::TickSound => Self::CountBackwards,
            Self::RingSound => Self::TickSound,
            Self::Desktop => Self::RingSound,
        }
    }
}

/// Editable copy of the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPanel {
    pub timer: TimerConfig,
    pub notifications: NotificationConfig,
    pub field: SettingsField,
}

impl SettingsPanel {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            timer: config.timer,
            notifications: config.notifications.clone(),
            field: SettingsField::Work,
        }
    }

    pub fn select_next(&mut self) {
        self.field = self.field.next();
    }

    pub fn select_prev(&mut self) {
        self.field = self.field.prev();
    }

    /// Raise the selected number, or switch the selected flag on.
    pub fn increase(&mut self) {
        self.adjust(true);
    }

    /// Lower the selected number, or switch the selected flag off.
    pub fn decrease(&mut self) {
        self.adjust(false);
    }

    fn adjust(&mut self, up: bool) {
        let t = &mut self.timer;
        match self.field {
            SettingsField::Work => t.work_minutes = step(t.work_minutes, up, MAX_MINUTES),
            SettingsField::Break => t.break_minutes = step(t.break_minutes, up, MAX_MINUTES),
            SettingsField::LongBreak => {
                t.long_break_minutes = step(t.long_break_minutes, up, MAX_MINUTES);
            }
            SettingsField::Interval => {
                t.long_break_interval = step(t.long_break_interval, up, MAX_LONG_BREAK_INTERVAL);
            }
            _ => {
                if let Some(flag) = self.flag_mut() {
                    *flag = up;
                }
            }
        }
    }

    /// Flip the selected flag. Numeric rows are left alone.
    pub fn toggle(&mut self) {
        if let Some(flag) = self.flag_mut() {
            *flag = !*flag;
        }
    }

    fn flag_mut(&mut self) -> Option<&mut bool> {
        match self.field {
            SettingsField::CountBackwards => Some(&mut self.timer.count_backwards),
            SettingsField::TickSound => Some(&mut self.notifications.tick_sound),
            SettingsField::RingSound => Some(&mut self.notifications.ring_sound),
            SettingsField::Desktop => Some(&mut self.notifications.desktop),
            _ => None,
        }
    }

    /// Current value of `field` as shown in the overlay.
    #[must_use]
    pub fn value(&self, field: SettingsField) -> String {
        let on_off = |b: bool| if b { "on" } else { "off" }.to_string();
        match field {
            SettingsField::Work => self.timer.work_minutes.to_string(),
            SettingsField::Break => self.timer.break_minutes.to_string(),
            SettingsField::LongBreak => self.timer.long_break_minutes.to_string(),
            SettingsField::Interval => self.timer.long_break_interval.to_string(),
            SettingsField::CountBackwards => on_off(self.timer.count_backwards),
            SettingsField::TickSound => on_off(self.notifications.tick_sound),
            SettingsField::RingSound => on_off(self.notifications.ring_sound),
            SettingsField::Desktop => on_off(self.notifications.desktop),
        }
    }
}

/// One step up or down, kept within `1..=max` unless already outside it.
const fn step(value: u32, up: bool, max: u32) -> u32 {
    if up && value < max {
        value + 1
    } else if !up && value > 1 {
        value - 1
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut panel = SettingsPanel::from_config(&Config::default());
        panel.select_prev();
        assert_eq!(panel.field, SettingsField::Desktop);
        panel.select_next();
        assert_eq!(panel.field, SettingsField::Work);

        for _ in 0..SettingsField::ALL.len() {
            panel.select_next();
        }
        assert_eq!(panel.field, SettingsField::Work);
    }

    #[test]
    fn test_minutes_stay_in_range() {
        let mut panel = SettingsPanel::from_config(&Config::default());
        panel.field = SettingsField::Break;
        for _ in 0..10 {
            panel.decrease();
        }
        assert_eq!(panel.timer.break_minutes, 1);

        panel.field = SettingsField::Interval;
        for _ in 0..20 {
            panel.increase();
        }
        assert_eq!(panel.timer.long_break_interval, MAX_LONG_BREAK_INTERVAL);
    }

    #[test]
    fn test_flags_toggle_and_set() {
        let mut panel = SettingsPanel::from_config(&Config::default());
        panel.field = SettingsField::CountBackwards;
        panel.toggle();
        assert!(panel.timer.count_backwards);
        assert_eq!(panel.value(SettingsField::CountBackwards), "on");

        panel.field = SettingsField::Desktop;
        panel.decrease();
        assert!(!panel.notifications.desktop);
        panel.increase();
        assert!(panel.notifications.desktop);
    }

    #[test]
    fn test_toggle_ignores_numbers() {
        let mut panel = SettingsPanel::from_config(&Config::default());
        panel.toggle();
        assert_eq!(panel.timer.work_minutes, 25);
        assert_eq!(panel.value(SettingsField::Work), "25");
    }
}
