use std::time::Duration;

use crate::error::ConfigError;
use crate::geometry::{Bounds, Size};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Playable area; actor boxes are clamped inside it.
    pub bounds: Bounds,
    /// Side length of trigger and exit boxes.
    pub tile_size: u32,
    /// Side length of actor boxes.
    pub actor_size: u32,
    /// Pixels travelled per successful move.
    pub speed: i32,
    /// Length of one loop in milliseconds.
    pub loop_duration_ms: u64,
    /// Skip gameplay updates while the loop timer is paused.
    pub freeze_while_paused: bool,
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const SCREEN_WIDTH: u32 = 800;
    pub const SCREEN_HEIGHT: u32 = 600;
    pub const TILE_SIZE: u32 = 40;
    /// Number of distinct echo tints renderers cycle through; later echoes reuse the last one.
    pub const ECHO_PALETTE_SIZE: usize = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ACTOR_SIZE: u32 = Self::TILE_SIZE - 10;
    pub const DEFAULT_SPEED: i32 = 5;
    pub const DEFAULT_LOOP_DURATION_MS: u64 = 10_000;

    pub fn new() -> Self {
        Self {
            bounds: Bounds::new(Self::SCREEN_WIDTH, Self::SCREEN_HEIGHT),
            tile_size: Self::TILE_SIZE,
            actor_size: Self::DEFAULT_ACTOR_SIZE,
            speed: Self::DEFAULT_SPEED,
            loop_duration_ms: Self::DEFAULT_LOOP_DURATION_MS,
            freeze_while_paused: true,
        }
    }

    pub fn with_loop_duration(mut self, loop_duration: Duration) -> Self {
        self.loop_duration_ms = loop_duration.as_millis() as u64;
        self
    }

    pub fn loop_duration(&self) -> Duration {
        Duration::from_millis(self.loop_duration_ms)
    }

    pub fn actor_box(&self) -> Size {
        Size::square(self.actor_size)
    }

    pub fn tile_box(&self) -> Size {
        Size::square(self.tile_size)
    }

    /// Rejects values that would make the simulation ill-defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loop_duration_ms == 0 {
            return Err(ConfigError::NonPositiveLoopDuration);
        }
        if self.speed <= 0 {
            return Err(ConfigError::NonPositiveSpeed { speed: self.speed });
        }
        if self.actor_size == 0 || self.tile_size == 0 {
            return Err(ConfigError::ZeroObjectSize);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_layout() {
        let config = GameConfig::default();
        assert_eq!(config.bounds, Bounds::new(800, 600));
        assert_eq!(config.actor_box(), Size::square(30));
        assert_eq!(config.loop_duration(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_loop_duration_is_rejected() {
        let config = GameConfig::default().with_loop_duration(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveLoopDuration));
    }

    #[test]
    fn negative_speed_is_rejected() {
        let config = GameConfig {
            speed: -1,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveSpeed { speed: -1 })
        );
    }
}
