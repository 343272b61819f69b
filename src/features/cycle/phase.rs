//! Phases, cycle state and the values the controller emits.

use serde::{Deserialize, Serialize};

use super::config::{CycleConfig, DEFAULT_LONG_BREAK_INTERVAL};

/// The segment of the cycle currently counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// A work period
    #[default]
    Work,
    /// A short break between work periods
    ShortBreak,
    /// The long break that closes a set
    LongBreak,
}

impl Phase {
    /// Label shown while the phase waits to be started.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::ShortBreak => "break",
            Self::LongBreak => "long break",
        }
    }

    /// Check if this is a break phase.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }

    /// Length of this phase in minutes under `config`.
    #[must_use]
    pub const fn duration_minutes(&self, config: &CycleConfig) -> u32 {
        match self {
            Self::Work => config.work_minutes(),
            Self::ShortBreak => config.break_minutes(),
            Self::LongBreak => config.long_break_minutes(),
        }
    }

    /// Length of this phase in whole seconds under `config`.
    #[must_use]
    pub const fn duration_seconds(&self, config: &CycleConfig) -> u64 {
        self.duration_minutes(config) as u64 * 60
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "Work"),
            Self::ShortBreak => write!(f, "Short Break"),
            Self::LongBreak => write!(f, "Long Break"),
        }
    }
}

/// Mutable state of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CycleState {
    /// Active phase
    pub phase: Phase,
    /// Work phases completed in the current set
    pub period_count: u32,
    /// Whole seconds elapsed in the active phase
    pub elapsed_seconds: u64,
    /// Whether the stopwatch is counting
    pub running: bool,
}

/// Visual state hint for the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    /// Counting normally
    Normal,
    /// Stopwatch paused mid-phase
    Paused,
    /// A phase just finished and waits for acknowledgement
    Error,
    /// Idle after a reset
    #[default]
    None,
}

/// One refresh of the clock display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayUpdate {
    /// Formatted `mm:ss`, or a phase label between phases
    pub text: String,
    /// Phase the update belongs to
    pub phase: Phase,
    /// Period number shown to the user
    pub period: u32,
    /// Work periods per set in effect for this phase
    pub interval: u32,
    /// Elapsed fraction of the phase; not clamped
    pub progress: f64,
    /// Visual state hint
    pub visual: VisualState,
}

impl DisplayUpdate {
    /// The display after a reset.
    #[must_use]
    pub fn idle(interval: u32) -> Self {
        Self {
            text: "00:00".to_string(),
            phase: Phase::Work,
            period: 0,
            interval,
            progress: 0.0,
            visual: VisualState::None,
        }
    }

    /// Progress clamped to `[0, 1]` for gauges.
    #[must_use]
    pub fn clamped_progress(&self) -> f64 {
        self.progress.clamp(0.0, 1.0)
    }
}

impl Default for DisplayUpdate {
    fn default() -> Self {
        Self::idle(DEFAULT_LONG_BREAK_INTERVAL)
    }
}

/// Discrete events for the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// The stopwatch was started
    TickStarted,
    /// A phase reached its duration
    PhaseCompleted(Phase),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_durations() {
        let config = CycleConfig::default();
        assert_eq!(Phase::Work.duration_minutes(&config), 25);
        assert_eq!(Phase::ShortBreak.duration_minutes(&config), 5);
        assert_eq!(Phase::LongBreak.duration_seconds(&config), 900);
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(Phase::Work.label(), "work");
        assert_eq!(Phase::ShortBreak.label(), "break");
        assert!(Phase::LongBreak.is_break());
        assert!(!Phase::Work.is_break());
        assert_eq!(Phase::ShortBreak.to_string(), "Short Break");
    }

    #[test]
    fn test_initial_state() {
        let state = CycleState::default();
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.period_count, 0);
        assert_eq!(state.elapsed_seconds, 0);
        assert!(!state.running);
    }

    #[test]
    fn test_clamped_progress() {
        let mut update = DisplayUpdate::idle(4);
        update.progress = 1.2;
        assert!((update.clamped_progress() - 1.0).abs() < f64::EPSILON);
    }
}
