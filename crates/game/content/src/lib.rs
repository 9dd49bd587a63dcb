//! Data-driven content definitions and loaders.
//!
//! This crate houses the level content the game ships with and provides
//! loaders for RON/TOML data files:
//! - Level campaigns (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! All loaders produce `echoes-core` types directly through serde.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LevelLoader, LoadResult};
