//! Session worker that owns the authoritative [`echoes_core::Session`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), ticks the
//! session on a fixed interval (or on demand), and publishes every
//! [`SessionEvent`] on the broadcast channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use echoes_core::{
    Direction, GamePhase, RestartScope, Session, SessionError, SessionEvent, TickOutcome,
};

use crate::api::SessionSnapshot;
use crate::clock::Clock;

/// Commands that can be sent to the session worker
pub enum Command {
    /// One-shot input applied on the next tick.
    Input {
        direction: Option<Direction>,
        interact: bool,
    },
    /// Direction re-applied on every tick until replaced; `None` releases.
    Hold { direction: Option<Direction> },
    Pause,
    Resume,
    Continue {
        reply: oneshot::Sender<Result<GamePhase, SessionError>>,
    },
    Restart {
        scope: RestartScope,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },
    SelectLevel {
        index: usize,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },
    /// Query the current session (read-only).
    QuerySnapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    /// Tick immediately, outside the interval.
    Step {
        reply: oneshot::Sender<TickOutcome>,
    },
    Shutdown,
}

/// Background task that ticks the session and processes commands.
pub struct SessionWorker {
    session: Session,
    clock: Arc<dyn Clock>,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<SessionEvent>,
    /// `None` ticks only on [`Command::Step`].
    tick_period: Option<Duration>,
    held: Option<Direction>,
}

impl SessionWorker {
    pub fn new(
        session: Session,
        clock: Arc<dyn Clock>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<SessionEvent>,
        tick_period: Option<Duration>,
    ) -> Self {
        info!(
            levels = session.campaign().len(),
            loop_ms = session.config().loop_duration_ms,
            tick_period = ?tick_period,
            "SessionWorker initialized"
        );

        Self {
            session,
            clock,
            command_rx,
            event_tx,
            tick_period,
            held: None,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut interval = self.tick_period.map(|period| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                _ = next_tick(&mut interval) => {
                    self.tick();
                }
            }
        }

        info!("SessionWorker stopped");
    }

    fn handle_command(&mut self, command: Command) {
        let now = self.clock.now();
        match command {
            Command::Input {
                direction,
                interact,
            } => {
                self.session.apply_input(direction, interact);
            }
            Command::Hold { direction } => {
                self.held = direction;
            }
            Command::Pause => self.session.pause(now),
            Command::Resume => self.session.unpause(now),
            Command::Continue { reply } => {
                let before = (self.session.phase(), self.session.level_index());
                let result = self.session.continue_after_completion(now);
                let after = (self.session.phase(), self.session.level_index());
                self.after_level_change(result.is_ok() && before != after);
                if reply.send(result).is_err() {
                    debug!("Continue reply channel closed (caller dropped)");
                }
            }
            Command::Restart { scope, reply } => {
                let result = self.session.restart(now, scope);
                self.after_level_change(result.is_ok());
                if reply.send(result).is_err() {
                    debug!("Restart reply channel closed (caller dropped)");
                }
            }
            Command::SelectLevel { index, reply } => {
                let result = self.session.select_level(index, now);
                if let Err(error) = &result {
                    warn!(index, %error, "level selection rejected");
                }
                self.after_level_change(result.is_ok());
                if reply.send(result).is_err() {
                    debug!("SelectLevel reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(SessionSnapshot::capture(&self.session)).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
            Command::Step { reply } => {
                let outcome = self.tick();
                if reply.send(outcome).is_err() {
                    debug!("Step reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown => {}
        }
    }

    fn after_level_change(&mut self, changed: bool) {
        if changed {
            self.held = None;
        }
    }

    /// Samples the clock once and runs one session tick.
    fn tick(&mut self) -> TickOutcome {
        if let Some(direction) = self.held {
            self.session.apply_input(Some(direction), false);
        }

        let now = self.clock.now();
        let outcome = self.session.tick(now);

        for event in &outcome.events {
            log_event(event);
            // No subscribers is fine.
            let _ = self.event_tx.send(event.clone());
        }
        if outcome.loop_boundary_crossed {
            trace!(root = %hex::encode(self.session.state_root()), "state after loop reset");
        }

        outcome
    }
}

async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::LevelStarted { level, index } => info!(level, index, "level started"),
        SessionEvent::Interacted { actor, trigger } => {
            debug!(?actor, %trigger, "trigger activated")
        }
        SessionEvent::GateChanged { gate, open } => debug!(%gate, open, "gate changed"),
        SessionEvent::LevelCompleted { level } => info!(level, "level completed"),
        SessionEvent::LoopReset {
            completed_loop,
            echo,
        } => info!(completed_loop, echo, "loop reset, echo spawned"),
        SessionEvent::GameOver { level } => info!(level, "game over"),
        SessionEvent::GameComplete => info!("campaign complete"),
        SessionEvent::Paused => debug!("paused"),
        SessionEvent::Resumed => debug!("resumed"),
    }
}
