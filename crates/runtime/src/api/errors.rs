//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, content loading, and session
//! commands so clients can bubble them up with consistent context.
use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::oneshot;

use echoes_core::SessionError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("failed to load content from {}", path.display())]
    Content {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RuntimeError {
    /// True for errors a caller can shrug off and keep issuing commands.
    pub fn is_recoverable(&self) -> bool {
        use echoes_core::GameError;

        match self {
            Self::Session(error) => error.severity().is_recoverable(),
            _ => false,
        }
    }
}
