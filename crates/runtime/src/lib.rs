//! Async shell around the deterministic echoes session.
//!
//! This crate owns a single [`echoes_core::Session`] inside a tokio worker,
//! samples a [`Clock`] once per tick, and exposes a cloneable
//! [`RuntimeHandle`] for input, level flow, snapshots, and event streams.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder, and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`clock`] provides the time sources the worker samples
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod clock;
pub mod runtime;

mod workers;

pub use api::{
    EchoView, GateView, Result, RuntimeError, RuntimeHandle, SessionSnapshot, TriggerView,
};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, TickMode};
