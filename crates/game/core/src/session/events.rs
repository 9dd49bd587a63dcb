use crate::puzzle::{GateId, TriggerId};

/// Identifies an actor in the session roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorRef {
    Live,
    /// Index into the echo roster (creation order).
    Echo(usize),
}

/// Observable things that happened since the previous tick.
///
/// Events are informational: consumers (audio, UI, logs) react to them but
/// the session state is already settled when they are emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionEvent {
    LevelStarted { level: u32, index: usize },
    Interacted { actor: ActorRef, trigger: TriggerId },
    GateChanged { gate: GateId, open: bool },
    LevelCompleted { level: u32 },
    /// Loop `completed_loop` ended and its recording became echo `echo`.
    LoopReset { completed_loop: u32, echo: usize },
    GameOver { level: u32 },
    GameComplete,
    Paused,
    Resumed,
}
