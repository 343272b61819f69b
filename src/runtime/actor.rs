//! The runtime thread and its handle.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{select, tick, unbounded, Receiver, Sender};
use tracing::{debug, info, trace};

use super::commands::Command;
use crate::error::PomoError;
use crate::features::cycle::{CycleController, DisplaySink, DisplayUpdate};

/// A [`DisplaySink`] forwarding updates to another thread.
pub struct ChannelDisplay {
    tx: Sender<DisplayUpdate>,
}

impl ChannelDisplay {
    /// Create the sink and the receiving end for the UI.
    #[must_use]
    pub fn channel() -> (Self, Receiver<DisplayUpdate>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl DisplaySink for ChannelDisplay {
    fn update(&mut self, update: DisplayUpdate) {
        if self.tx.send(update).is_err() {
            trace!("display receiver dropped");
        }
    }
}

/// Handle to a running cycle thread.
///
/// Dropping the handle shuts the thread down.
pub struct CycleHandle {
    tx: Sender<Command>,
    join: Option<JoinHandle<()>>,
}

impl CycleHandle {
    /// Queue a command.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::Runtime` if the thread has exited.
    pub fn send(&self, command: Command) -> Result<(), PomoError> {
        self.tx
            .send(command)
            .map_err(|_| PomoError::Runtime("cycle runtime has stopped".to_string()))
    }

    /// Stop the thread and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::Runtime` if the thread panicked.
    pub fn shutdown(mut self) -> Result<(), PomoError> {
        self.stop_thread()
    }

    fn stop_thread(&mut self) -> Result<(), PomoError> {
        let Some(join) = self.join.take() else {
            return Ok(());
        };

        // The thread may already be gone; joining is what matters.
        let _ = self.tx.send(Command::Shutdown);
        join.join()
            .map_err(|_| PomoError::Runtime("cycle thread panicked".to_string()))
    }
}

impl Drop for CycleHandle {
    fn drop(&mut self) {
        let _ = self.stop_thread();
    }
}

/// Start the runtime thread, ticking the controller every `tick_interval`.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn(controller: CycleController, tick_interval: Duration) -> Result<CycleHandle, PomoError> {
    let (tx, rx) = unbounded();

    let join = thread::Builder::new()
        .name("pomoclock-cycle".to_string())
        .spawn(move || run(controller, &rx, tick_interval))?;

    Ok(CycleHandle {
        tx,
        join: Some(join),
    })
}

fn run(mut controller: CycleController, commands: &Receiver<Command>, tick_interval: Duration) {
    let ticker = tick(tick_interval);
    info!(?tick_interval, "cycle runtime started");

    loop {
        select! {
            recv(commands) -> msg => match msg {
                Ok(Command::Shutdown) | Err(_) => break,
                Ok(command) => apply(&mut controller, command),
            },
            recv(ticker) -> _ => controller.tick(),
        }
    }

    info!(state = ?controller.state(), "cycle runtime stopped");
}

/// Apply one command to the controller.
pub fn apply(controller: &mut CycleController, command: Command) {
    debug!(?command, "applying command");

    match command {
        Command::Start => controller.start(),
        Command::Stop => controller.stop(),
        Command::Reset => controller.reset(),
        Command::Reconfigure(config) => controller.reconfigure(config),
        Command::Notifications(settings) => controller.configure_notifications(settings),
        Command::Shutdown => {}
    }
}
