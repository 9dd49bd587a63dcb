//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! feeding input, driving level flow, and streaming session events.
use tokio::sync::{broadcast, mpsc, oneshot};

use echoes_core::{Direction, GamePhase, RestartScope, SessionEvent, TickOutcome};

use super::errors::{Result, RuntimeError};
use super::snapshot::SessionSnapshot;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(command(reply_tx)).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Queue input for the next tick only.
    pub async fn send_input(&self, direction: Option<Direction>, interact: bool) -> Result<()> {
        self.send(Command::Input {
            direction,
            interact,
        })
        .await
    }

    /// Keep moving in `direction` on every tick until changed; `None` releases.
    pub async fn hold(&self, direction: Option<Direction>) -> Result<()> {
        self.send(Command::Hold { direction }).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.send(Command::Pause).await
    }

    pub async fn resume(&self) -> Result<()> {
        self.send(Command::Resume).await
    }

    /// Advance past a completed level, or start over after the game ended.
    pub async fn continue_after_completion(&self) -> Result<GamePhase> {
        Ok(self.request(|reply| Command::Continue { reply }).await??)
    }

    pub async fn restart(&self, scope: RestartScope) -> Result<()> {
        Ok(self
            .request(|reply| Command::Restart { scope, reply })
            .await??)
    }

    pub async fn select_level(&self, index: usize) -> Result<()> {
        Ok(self
            .request(|reply| Command::SelectLevel { index, reply })
            .await??)
    }

    /// Query the current session (read-only snapshot)
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        self.request(|reply| Command::QuerySnapshot { reply }).await
    }

    /// Run one tick immediately at the clock's current value.
    pub async fn step(&self) -> Result<TickOutcome> {
        self.request(|reply| Command::Step { reply }).await
    }

    /// Subscribe to session events published after every tick.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Ask the worker to stop. Succeeds if it has already stopped.
    pub async fn shutdown(&self) -> Result<()> {
        match self.send(Command::Shutdown).await {
            Ok(()) | Err(RuntimeError::CommandChannelClosed) => Ok(()),
            Err(error) => Err(error),
        }
    }
}
