//! Deterministic rules for the echoes time-loop puzzle game.
//!
//! `echoes-core` owns everything that decides what happens in a session:
//! collision geometry, action recording and replay, the puzzle object graph,
//! the loop timer, and the [`Session`] orchestrator that ties them together.
//! Nothing here reads a clock or performs I/O; callers pass a monotonic `now`
//! into every time-dependent operation, so identical inputs always produce
//! identical sessions.
pub mod action;
pub mod actor;
pub mod config;
pub mod error;
pub mod geometry;
pub mod level;
pub mod puzzle;
pub mod session;
pub mod timer;

pub use action::{
    Action, ActionKind, ActionLog, ActionLogError, Direction, FrozenLog, compute_log_root,
};
pub use actor::{Actor, Body, ReplayStep, Role};
pub use config::GameConfig;
pub use error::{ConfigError, ErrorSeverity, GameError, SessionError};
pub use geometry::{Bounds, Position, Rect, Size};
pub use level::{Campaign, ExitSpec, GateSpec, Level, LevelSpec, TriggerSpec, WallSpec};
pub use puzzle::{
    Capabilities, Exit, Gate, GateChange, GateId, ObjectKind, PuzzleGraph, Trigger, TriggerId,
    TriggerKind, Wall,
};
pub use session::{
    ActorRef, GamePhase, Input, RestartScope, Session, SessionEvent, TickOutcome,
};
pub use timer::{LoopTimer, TimerState, TimerView};
