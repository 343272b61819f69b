//! Validated cycle configuration.

use serde::{Deserialize, Serialize};

use crate::error::PomoError;

/// Default work phase length in minutes.
pub const DEFAULT_WORK_MINUTES: u32 = 25;
/// Default short break length in minutes.
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
/// Default long break length in minutes.
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;
/// Default number of work phases per set.
pub const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;
/// Longest allowed phase in minutes.
pub const MAX_MINUTES: u32 = 180;
/// Most work phases allowed in one set.
pub const MAX_LONG_BREAK_INTERVAL: u32 = 12;

/// Durations and display mode for a Pomodoro cycle.
///
/// Every duration is a whole number of minutes in `1..=MAX_MINUTES`. Instances can only
/// be built through [`CycleConfig::new`], so a `CycleConfig` in hand is
/// always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCycleConfig")]
pub struct CycleConfig {
    work_minutes: u32,
    break_minutes: u32,
    long_break_minutes: u32,
    long_break_interval: u32,
    count_backwards: bool,
}

#[derive(Deserialize)]
struct RawCycleConfig {
    work_minutes: u32,
    break_minutes: u32,
    long_break_minutes: u32,
    long_break_interval: u32,
    count_backwards: bool,
}

impl TryFrom<RawCycleConfig> for CycleConfig {
    type Error = PomoError;

    fn try_from(raw: RawCycleConfig) -> Result<Self, Self::Error> {
        Self::new(
            raw.work_minutes,
            raw.break_minutes,
            raw.long_break_minutes,
            raw.count_backwards,
        )?
        .with_long_break_interval(raw.long_break_interval)
    }
}

impl CycleConfig {
    /// Create a configuration with the default long break interval.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::InvalidConfig` if any duration is zero or longer
    /// than [`MAX_MINUTES`].
    pub fn new(
        work_minutes: u32,
        break_minutes: u32,
        long_break_minutes: u32,
        count_backwards: bool,
    ) -> Result<Self, PomoError> {
        for (name, value) in [
            ("work", work_minutes),
            ("break", break_minutes),
            ("long break", long_break_minutes),
        ] {
            if value == 0 {
                return Err(PomoError::InvalidConfig(format!(
                    "{name} duration must be at least one minute"
                )));
            }
            if value > MAX_MINUTES {
                return Err(PomoError::InvalidConfig(format!(
                    "{name} duration must be at most {MAX_MINUTES} minutes"
                )));
            }
        }

        Ok(Self {
            work_minutes,
            break_minutes,
            long_break_minutes,
            long_break_interval: DEFAULT_LONG_BREAK_INTERVAL,
            count_backwards,
        })
    }

    /// Set how many work phases make up a set before the long break.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::InvalidConfig` if `interval` is zero or above
    /// [`MAX_LONG_BREAK_INTERVAL`].
    pub fn with_long_break_interval(mut self, interval: u32) -> Result<Self, PomoError> {
        if interval == 0 || interval > MAX_LONG_BREAK_INTERVAL {
            return Err(PomoError::InvalidConfig(format!(
                "long break interval must be between 1 and {MAX_LONG_BREAK_INTERVAL}"
            )));
        }
        self.long_break_interval = interval;
        Ok(self)
    }

    /// Return a copy with a different display direction.
    #[must_use]
    pub const fn with_count_backwards(mut self, count_backwards: bool) -> Self {
        self.count_backwards = count_backwards;
        self
    }

    #[must_use]
    pub const fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    #[must_use]
    pub const fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    #[must_use]
    pub const fn long_break_minutes(&self) -> u32 {
        self.long_break_minutes
    }

    #[must_use]
    pub const fn long_break_interval(&self) -> u32 {
        self.long_break_interval
    }

    /// Whether the display counts down from the phase length.
    #[must_use]
    pub const fn count_backwards(&self) -> bool {
        self.count_backwards
    }

    /// True if the two configs differ in anything but the display direction.
    #[must_use]
    pub const fn timing_differs(&self, other: &Self) -> bool {
        self.work_minutes != other.work_minutes
            || self.break_minutes != other.break_minutes
            || self.long_break_minutes != other.long_break_minutes
            || self.long_break_interval != other.long_break_interval
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            long_break_minutes: DEFAULT_LONG_BREAK_MINUTES,
            long_break_interval: DEFAULT_LONG_BREAK_INTERVAL,
            count_backwards: false,
        }
    }
}
