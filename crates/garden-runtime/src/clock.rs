//! Real-time driver: one engine step per wall-clock tick while playing.
//!
//! The engine is owned by a single tokio task. Front ends talk to it through
//! a command channel and read state from a watch channel that always holds
//! the latest snapshot.

use crate::GardenEngine;
use garden_core::{Difficulty, GamePhase, ResourceCommand, SimulationState};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

const COMMAND_BUFFER: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClockCommand {
    StartGame(Difficulty),
    Reset,
    SetPhase(GamePhase),
    Resource(ResourceCommand),
    Shutdown,
}

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("clock task is no longer running")]
    Stopped,
    #[error("clock task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Front-end side of a running clock.
pub struct ClockHandle {
    commands: mpsc::Sender<ClockCommand>,
    snapshots: watch::Receiver<SimulationState>,
    task: JoinHandle<GardenEngine>,
}

impl ClockHandle {
    pub async fn send(&self, cmd: ClockCommand) -> Result<(), ClockError> {
        self.commands.send(cmd).await.map_err(|_| ClockError::Stopped)
    }

    /// Receiver notified after every processed command or tick.
    pub fn subscribe(&self) -> watch::Receiver<SimulationState> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> SimulationState {
        self.snapshots.borrow().clone()
    }

    /// Stop the task and hand the engine back.
    pub async fn shutdown(self) -> Result<GardenEngine, ClockError> {
        // A closed channel means the task already ended; joining still works.
        let _ = self.commands.send(ClockCommand::Shutdown).await;
        Ok(self.task.await?)
    }
}

/// Move `engine` onto a new task on the current tokio runtime.
pub fn spawn_clock(engine: GardenEngine) -> ClockHandle {
    let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
    let (publish, snapshots) = watch::channel(engine.snapshot());
    let task = tokio::spawn(drive(engine, rx, publish));
    ClockHandle {
        commands,
        snapshots,
        task,
    }
}

async fn drive(
    mut engine: GardenEngine,
    mut commands: mpsc::Receiver<ClockCommand>,
    publish: watch::Sender<SimulationState>,
) -> GardenEngine {
    let period = Duration::from_millis(engine.config().wall_tick_millis);
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.reset();
    info!(period_ms = engine.config().wall_tick_millis, "clock started");

    loop {
        let playing = engine.phase() == GamePhase::Playing;
        tokio::select! {
            biased;
            cmd = commands.recv() => {
                let Some(cmd) = cmd else {
                    debug!("command channel closed");
                    break;
                };
                if !handle(&mut engine, cmd) {
                    break;
                }
                // Resuming starts a full period from now; paused time is never
                // caught up.
                if !playing && engine.phase() == GamePhase::Playing {
                    interval.reset();
                }
            }
            _ = interval.tick(), if playing => {
                engine.tick();
            }
        }
        publish.send_replace(engine.snapshot());
    }

    info!(tick = engine.state().tick, "clock stopped");
    engine
}

/// Apply one command. Returns `false` when the clock should stop.
fn handle(engine: &mut GardenEngine, cmd: ClockCommand) -> bool {
    match cmd {
        ClockCommand::StartGame(difficulty) => {
            if let Err(err) = engine.start_game(difficulty) {
                warn!(%err, "start rejected");
            }
        }
        ClockCommand::Reset => engine.reset_game(),
        ClockCommand::SetPhase(phase) => {
            if let Err(err) = engine.set_phase(phase) {
                warn!(%err, "phase change rejected");
            }
        }
        ClockCommand::Resource(cmd) => {
            let outcome = engine.apply(cmd);
            debug!(?outcome, "resource command");
        }
        ClockCommand::Shutdown => return false,
    }
    true
}
