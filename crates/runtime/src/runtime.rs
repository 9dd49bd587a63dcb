//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the simulation.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use echoes_content::{ConfigLoader, ContentFactory, LevelLoader, builtin};
use echoes_core::{Campaign, GameConfig, Session, SessionError, SessionEvent};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::clock::{Clock, MonotonicClock};
use crate::workers::{Command, SessionWorker};

/// How the worker decides when to tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TickMode {
    /// Tick on a fixed interval of `1 / tick_rate_hz`.
    #[default]
    Realtime,
    /// Tick only when a client calls [`RuntimeHandle::step`].
    Manual,
}

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub tick_rate_hz: u32,
    pub tick_mode: TickMode,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// TOML file overriding `game_config`.
    pub config_path: Option<PathBuf>,
    /// RON campaign used when the builder is not given one.
    pub levels_path: Option<PathBuf>,
    /// Directory holding `config.toml` and `campaign.ron`, consulted for
    /// whichever of the two has no explicit path.
    pub data_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            tick_rate_hz: 60,
            tick_mode: TickMode::Realtime,
            event_buffer_size: 256,
            command_buffer_size: 32,
            config_path: None,
            levels_path: None,
            data_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ECHOES_TICK_HZ` - Ticks per second (default: 60)
    /// - `ECHOES_TICK_MODE` - `realtime` or `manual` (default: realtime)
    /// - `ECHOES_EVENT_BUFFER` - Event broadcast capacity (default: 256)
    /// - `ECHOES_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `ECHOES_CONFIG` - Path to a game config TOML file
    /// - `ECHOES_LEVELS` - Path to a campaign RON file
    /// - `ECHOES_DATA_DIR` - Directory with `config.toml` and `campaign.ron`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(hz) = read("ECHOES_TICK_HZ").and_then(|value| value.trim().parse::<u32>().ok())
        {
            config.tick_rate_hz = hz.max(1);
        }
        if let Some(mode) = read("ECHOES_TICK_MODE").and_then(|value| value.trim().parse().ok()) {
            config.tick_mode = mode;
        }
        if let Some(capacity) =
            read("ECHOES_EVENT_BUFFER").and_then(|value| value.trim().parse::<usize>().ok())
        {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) =
            read("ECHOES_COMMAND_BUFFER").and_then(|value| value.trim().parse::<usize>().ok())
        {
            config.command_buffer_size = capacity.max(1);
        }
        config.config_path = read("ECHOES_CONFIG").map(PathBuf::from);
        config.levels_path = read("ECHOES_LEVELS").map(PathBuf::from);
        config.data_dir = read("ECHOES_DATA_DIR").map(PathBuf::from);

        config
    }

    /// Interval between ticks, or `None` in manual mode.
    pub fn tick_period(&self) -> Option<Duration> {
        match self.tick_mode {
            TickMode::Realtime => Some(Duration::from_secs(1) / self.tick_rate_hz.max(1)),
            TickMode::Manual => None,
        }
    }
}

/// Main runtime that drives a session in the background
///
/// Design: Runtime owns the worker task.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.handle.subscribe()
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown().await?;
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    campaign: Option<Campaign>,
    clock: Option<Arc<dyn Clock>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            campaign: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Play this campaign instead of loading one.
    pub fn campaign(mut self, campaign: Campaign) -> Self {
        self.campaign = Some(campaign);
        self
    }

    /// Time source sampled once per tick (default: [`MonotonicClock`]).
    pub fn clock(mut self, clock: impl Clock) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the runtime
    ///
    /// Campaign precedence: explicit [`campaign`](Self::campaign), then
    /// `levels_path`, then `data_dir`, then the built-in levels. The game
    /// config comes from `config_path`, then `data_dir`, then `game_config`.
    pub async fn build(self) -> Result<Runtime> {
        let factory = self.config.data_dir.as_deref().map(ContentFactory::new);

        let game_config = match (&self.config.config_path, &factory) {
            (Some(path), _) => ConfigLoader::load(path).map_err(|e| content_error(path, e))?,
            (None, Some(factory)) => factory.load_config().map_err(|e| {
                content_error(&factory.data_dir().join(ContentFactory::CONFIG_FILE), e)
            })?,
            (None, None) => self.config.game_config.clone(),
        };
        let campaign = match (self.campaign, &self.config.levels_path, &factory) {
            (Some(campaign), _, _) => campaign,
            (None, Some(path), _) => {
                LevelLoader::load(path).map_err(|e| content_error(path, e))?
            }
            (None, None, Some(factory)) => factory.load_campaign().map_err(|e| {
                content_error(&factory.data_dir().join(ContentFactory::CAMPAIGN_FILE), e)
            })?,
            (None, None, None) => builtin::campaign().map_err(SessionError::from)?,
        };
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(MonotonicClock::new()));

        let session = Session::new(campaign, game_config, clock.now())?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) =
            broadcast::channel::<SessionEvent>(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let worker = SessionWorker::new(
            session,
            clock,
            command_rx,
            event_tx,
            self.config.tick_period(),
        );
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}

fn content_error(
    path: &Path,
    error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> RuntimeError {
    RuntimeError::Content {
        path: path.to_path_buf(),
        source: error.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = RuntimeConfig::from_lookup(|_| None);
        assert_eq!(config.tick_rate_hz, 60);
        assert_eq!(config.tick_mode, TickMode::Realtime);
        assert!(config.config_path.is_none());
        assert!(config.levels_path.is_none());
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("ECHOES_TICK_HZ", "30"),
            ("ECHOES_TICK_MODE", "Manual"),
            ("ECHOES_EVENT_BUFFER", "0"),
            ("ECHOES_LEVELS", "levels/custom.ron"),
            ("ECHOES_DATA_DIR", "assets"),
        ]));

        assert_eq!(config.tick_rate_hz, 30);
        assert_eq!(config.tick_mode, TickMode::Manual);
        assert_eq!(config.event_buffer_size, 1);
        assert_eq!(config.levels_path, Some(PathBuf::from("levels/custom.ron")));
        assert_eq!(config.data_dir, Some(PathBuf::from("assets")));
        assert_eq!(config.tick_period(), None);
    }

    #[test]
    fn unparsable_values_are_ignored() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("ECHOES_TICK_HZ", "fast"),
            ("ECHOES_CONFIG", "  "),
        ]));
        assert_eq!(config.tick_rate_hz, 60);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn realtime_period_follows_rate() {
        let config = RuntimeConfig {
            tick_rate_hz: 50,
            ..RuntimeConfig::default()
        };
        assert_eq!(config.tick_period(), Some(Duration::from_millis(20)));
    }
}
