//! The Pomodoro cycle controller.
//!
//! A tick-driven state machine: it owns the [`CycleState`], advances phases
//! when their time is up and reports to its collaborators. Every method is
//! infallible; collaborator failures are logged and swallowed.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::config::CycleConfig;
use super::phase::{CycleState, DisplayUpdate, Notice, Phase, VisualState};
use super::ports::{DisplaySink, NotificationSink, SessionStore};
use super::stopwatch::{format_mmss, Clock, Stopwatch};
use crate::config::NotificationConfig;

/// Drives a Pomodoro cycle.
pub struct CycleController {
    config: CycleConfig,
    /// Timing changes held back until the running phase ends
    pending: Option<CycleConfig>,
    state: CycleState,
    stopwatch: Stopwatch,
    clock: Box<dyn Clock>,
    display: Box<dyn DisplaySink>,
    store: Box<dyn SessionStore>,
    notifier: Box<dyn NotificationSink>,
    /// Last update handed to the display
    last_display: DisplayUpdate,
}

impl CycleController {
    /// Create a controller in the initial state.
    #[must_use]
    pub fn new(
        config: CycleConfig,
        clock: Box<dyn Clock>,
        display: Box<dyn DisplaySink>,
        store: Box<dyn SessionStore>,
        notifier: Box<dyn NotificationSink>,
    ) -> Self {
        Self {
            config,
            pending: None,
            state: CycleState::default(),
            stopwatch: Stopwatch::new(),
            clock,
            display,
            store,
            notifier,
            last_display: DisplayUpdate::idle(config.long_break_interval()),
        }
    }

    /// Start or resume the current phase.
    ///
    /// While already running this restarts the phase's elapsed time at zero
    /// and keeps the phase.
    pub fn start(&mut self) {
        let now = self.clock.now();

        if self.state.running {
            debug!(phase = ?self.state.phase, "restarting phase");
            self.stopwatch.restart(now);
            self.state.elapsed_seconds = 0;
            self.notifier.notify(Notice::TickStarted);
            self.emit_progress(VisualState::Normal);
            return;
        }

        self.stopwatch.start(now);
        self.state.running = true;
        info!(
            phase = ?self.state.phase,
            period = self.current_period(),
            "cycle started"
        );
        self.notifier.notify(Notice::TickStarted);
        self.emit_progress(VisualState::Normal);
    }

    /// Pause the current phase, or reset everything if already paused.
    pub fn stop(&mut self) {
        if !self.state.running {
            self.reset();
            return;
        }

        let now = self.clock.now();
        self.stopwatch.pause(now);
        self.state.elapsed_seconds = self.stopwatch.elapsed(now).as_secs();
        self.state.running = false;
        debug!(elapsed = self.state.elapsed_seconds, "cycle paused");
        self.notifier.silence();
        self.emit_progress(VisualState::Paused);
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        self.stopwatch.reset();
        self.state = CycleState::default();
        self.apply_pending();
        debug!("cycle reset");
        self.notifier.silence();
        self.show(DisplayUpdate::idle(self.config.long_break_interval()));
    }

    /// Advance the cycle by reading the stopwatch. No-op while stopped.
    pub fn tick(&mut self) {
        if !self.state.running {
            return;
        }

        self.state.elapsed_seconds = self.stopwatch.elapsed(self.clock.now()).as_secs();

        if self.state.elapsed_seconds >= self.phase_seconds() {
            self.complete_phase();
        } else {
            self.emit_progress(VisualState::Normal);
        }
    }

    /// Replace the configuration.
    ///
    /// The display direction always switches at once. Timing changes apply
    /// at once if the current phase has not begun, otherwise at the next
    /// phase transition or reset.
    pub fn reconfigure(&mut self, config: CycleConfig) {
        self.config = self.config.with_count_backwards(config.count_backwards());

        if !self.config.timing_differs(&config) {
            self.pending = None;
            return;
        }

        self.pending = Some(config);
        if self.phase_begun() {
            info!("configuration change deferred until the phase ends");
        } else {
            self.apply_pending();
            self.refresh_display();
        }
    }

    /// Hand new sound and notification settings to the notifier.
    pub fn configure_notifications(&mut self, settings: NotificationConfig) {
        self.notifier.configure(settings);
    }

    /// Current cycle state.
    #[must_use]
    pub const fn state(&self) -> &CycleState {
        &self.state
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Configuration waiting for the current phase to end.
    #[must_use]
    pub const fn pending_config(&self) -> Option<&CycleConfig> {
        self.pending.as_ref()
    }

    /// Period number shown to the user.
    ///
    /// During a work phase that has begun this is the period in progress;
    /// otherwise it is the number of work phases completed in the set.
    #[must_use]
    pub fn current_period(&self) -> u32 {
        if self.state.phase == Phase::Work && self.phase_begun() {
            self.state.period_count + 1
        } else {
            self.state.period_count
        }
    }

    /// Elapsed fraction of the current phase. Not clamped.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        self.state.elapsed_seconds as f64 / self.phase_seconds() as f64
    }

    fn phase_seconds(&self) -> u64 {
        self.state.phase.duration_seconds(&self.config)
    }

    fn phase_begun(&self) -> bool {
        self.state.running || !self.stopwatch.elapsed(self.clock.now()).is_zero()
    }

    fn complete_phase(&mut self) {
        let finished = self.state.phase;
        let progress = self.progress();

        if finished == Phase::Work {
            self.state.period_count += 1;
            let minutes = finished.duration_minutes(&self.config);
            if let Err(e) = self.store.record(Utc::now(), minutes) {
                warn!(error = %e, "failed to record completed session");
            }
        }
        self.notifier.notify(Notice::PhaseCompleted(finished));

        self.state.phase = match finished {
            Phase::Work if self.state.period_count >= self.config.long_break_interval() => {
                Phase::LongBreak
            }
            Phase::Work => Phase::ShortBreak,
            Phase::ShortBreak => Phase::Work,
            Phase::LongBreak => {
                self.state.period_count = 0;
                Phase::Work
            }
        };
        self.state.elapsed_seconds = 0;
        self.state.running = false;
        self.stopwatch.reset();
        self.apply_pending();

        info!(
            finished = ?finished,
            next = ?self.state.phase,
            period_count = self.state.period_count,
            "phase completed"
        );

        self.show(DisplayUpdate {
            text: self.state.phase.label().to_string(),
            phase: self.state.phase,
            period: self.current_period(),
            interval: self.config.long_break_interval(),
            progress,
            visual: VisualState::Error,
        });
    }

    fn apply_pending(&mut self) {
        let Some(config) = self.pending.take() else {
            return;
        };

        let interval = config.long_break_interval();
        self.state.period_count = if self.state.phase == Phase::LongBreak {
            self.state.period_count.min(interval)
        } else {
            self.state.period_count.min(interval - 1)
        };
        self.config = config;
        debug!(?config, "configuration applied");
    }

    /// Re-send the last update with the period and interval now in effect.
    fn refresh_display(&mut self) {
        let mut update = self.last_display.clone();
        update.period = self.current_period();
        update.interval = self.config.long_break_interval();
        self.show(update);
    }

    fn show(&mut self, update: DisplayUpdate) {
        self.last_display = update.clone();
        self.display.update(update);
    }

    fn emit_progress(&mut self, visual: VisualState) {
        let elapsed = self.state.elapsed_seconds;
        let shown = if self.config.count_backwards() {
            self.phase_seconds().saturating_sub(elapsed)
        } else {
            elapsed
        };

        self.show(DisplayUpdate {
            text: format_mmss(shown),
            phase: self.state.phase,
            period: self.current_period(),
            interval: self.config.long_break_interval(),
            progress: self.progress(),
            visual,
        });
    }
}
