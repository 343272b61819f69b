//! Clock sources and the pausable stopwatch the controller reads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock: Send {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
}

/// Wall-clock backed [`Clock`] using `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A [`Clock`] advanced by hand.
///
/// Clones share the same time, so a test can keep one clone and hand the
/// other to a controller.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    #[allow(clippy::cast_possible_truncation)]
    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    /// Move the clock forward by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

/// A pausable stopwatch measured against an external clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stopwatch {
    /// Time banked by earlier runs
    accumulated: Duration,
    /// Clock reading at the last start, while running
    started_at: Option<Duration>,
}

impl Stopwatch {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accumulated: Duration::ZERO,
            started_at: None,
        }
    }

    /// Start or resume counting. No-op while running.
    pub fn start(&mut self, now: Duration) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Stop counting and bank the elapsed time.
    pub fn pause(&mut self, now: Duration) {
        if let Some(started) = self.started_at.take() {
            self.accumulated += now.saturating_sub(started);
        }
    }

    /// Zero the elapsed time and keep counting from `now`.
    pub fn restart(&mut self, now: Duration) {
        self.accumulated = Duration::ZERO;
        self.started_at = Some(now);
    }

    /// Zero the elapsed time and stop.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started_at = None;
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Total counted time as of `now`.
    #[must_use]
    pub fn elapsed(&self, now: Duration) -> Duration {
        let current = self
            .started_at
            .map_or(Duration::ZERO, |started| now.saturating_sub(started));
        self.accumulated + current
    }
}

/// Format whole seconds as MM:SS.
///
/// Minutes are not wrapped into hours, so 90 minutes reads `90:00`.
#[must_use]
pub fn format_mmss(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_counts_only_while_running() {
        let clock = ManualClock::new();
        let mut sw = Stopwatch::new();

        clock.advance_secs(10);
        assert_eq!(sw.elapsed(clock.now()), Duration::ZERO);

        sw.start(clock.now());
        clock.advance_secs(30);
        assert_eq!(sw.elapsed(clock.now()).as_secs(), 30);

        sw.pause(clock.now());
        clock.advance_secs(100);
        assert_eq!(sw.elapsed(clock.now()).as_secs(), 30);

        sw.start(clock.now());
        clock.advance_secs(5);
        assert_eq!(sw.elapsed(clock.now()).as_secs(), 35);
    }

    #[test]
    fn test_stopwatch_restart_and_reset() {
        let clock = ManualClock::new();
        let mut sw = Stopwatch::new();

        sw.start(clock.now());
        clock.advance_secs(42);
        sw.restart(clock.now());
        assert_eq!(sw.elapsed(clock.now()), Duration::ZERO);
        assert!(sw.is_running());

        clock.advance_secs(3);
        sw.reset();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed(clock.now()), Duration::ZERO);
    }

    #[test]
    fn test_start_while_running_keeps_origin() {
        let clock = ManualClock::new();
        let mut sw = Stopwatch::new();

        sw.start(clock.now());
        clock.advance_secs(20);
        sw.start(clock.now());
        assert_eq!(sw.elapsed(clock.now()).as_secs(), 20);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let a = ManualClock::new();
        let b = a.clone();
        a.advance(Duration::from_millis(1500));
        assert_eq!(b.now(), Duration::from_millis(1500));
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(90), "01:30");
        assert_eq!(format_mmss(25 * 60), "25:00");
        assert_eq!(format_mmss(90 * 60), "90:00");
    }
}
