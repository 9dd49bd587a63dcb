//! Common error infrastructure for echoes-core.
//!
//! This module provides shared types and traits used across all error types in
//! echoes-core. Domain-specific errors (e.g. [`ActionLogError`]) live in their
//! respective modules alongside the operations they guard.
//!
//! Movement collisions are not errors: a blocked move is an expected outcome
//! and is reported as `false` by [`Actor::attempt_move`]. Only configuration
//! mistakes and out-of-range level selection surface as error values.
//!
//! [`ActionLogError`]: crate::action::ActionLogError
//! [`Actor::attempt_move`]: crate::actor::Actor::attempt_move

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller can retry with a different request
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors indicating corrupted session state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative request.
    ///
    /// Examples: level index out of range
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: zero loop duration, empty campaign
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: out-of-order action log append
    Internal,

    /// Fatal error - session state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all echoes-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Configuration rejected at level, timer, or session construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    #[error("loop duration must be positive")]
    NonPositiveLoopDuration,

    #[error("level {level} allows zero loops")]
    ZeroMaxLoops { level: u32 },

    #[error("movement speed must be positive, got {speed}")]
    NonPositiveSpeed { speed: i32 },

    #[error("object size must be non-zero")]
    ZeroObjectSize,

    #[error("campaign contains no levels")]
    EmptyCampaign,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveLoopDuration => "CONFIG_NON_POSITIVE_LOOP_DURATION",
            Self::ZeroMaxLoops { .. } => "CONFIG_ZERO_MAX_LOOPS",
            Self::NonPositiveSpeed { .. } => "CONFIG_NON_POSITIVE_SPEED",
            Self::ZeroObjectSize => "CONFIG_ZERO_OBJECT_SIZE",
            Self::EmptyCampaign => "CONFIG_EMPTY_CAMPAIGN",
        }
    }
}

/// Errors surfaced by session-level commands.
///
/// A failed command never changes session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    #[error("level index {requested} is out of range ({available} levels available)")]
    InvalidLevelIndex { requested: usize, available: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidLevelIndex { .. } => ErrorSeverity::Recoverable,
            Self::Config(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLevelIndex { .. } => "SESSION_INVALID_LEVEL_INDEX",
            Self::Config(error) => error.error_code(),
        }
    }
}
