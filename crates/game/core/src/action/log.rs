use std::time::Duration;

use super::Action;
use crate::error::{ErrorSeverity, GameError};

/// Mutable, append-only action history owned by a live actor.
///
/// # Invariants
///
/// - Timestamps are non-decreasing in log order
/// - Cleared at every loop reset; the previous contents move into a [`FrozenLog`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from pre-recorded actions, validating their order.
    pub fn from_actions(
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<Self, ActionLogError> {
        let mut log = Self::new();
        for action in actions {
            log.push(action)?;
        }
        Ok(log)
    }

    /// Appends `action`, rejecting it if it predates the last entry.
    pub fn push(&mut self, action: Action) -> Result<(), ActionLogError> {
        if let Some(last) = self.actions.last()
            && action.timestamp < last.timestamp
        {
            return Err(ActionLogError::OutOfOrder {
                previous: last.timestamp,
                attempted: action.timestamp,
            });
        }

        self.actions.push(action);
        Ok(())
    }

    /// Appends `action`, lifting its timestamp to the last entry's if needed.
    pub(crate) fn record(&mut self, mut action: Action) {
        if let Some(last) = self.actions.last() {
            action.timestamp = action.timestamp.max(last.timestamp);
        }
        self.actions.push(action);
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn last(&self) -> Option<&Action> {
        self.actions.last()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Consumes the log into an immutable snapshot.
    pub fn freeze(self) -> FrozenLog {
        FrozenLog {
            actions: self.actions.into_boxed_slice(),
        }
    }
}

/// Write-once action history replayed by an echo.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrozenLog {
    actions: Box<[Action]>,
}

impl FrozenLog {
    pub fn get(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }
}

impl From<ActionLog> for FrozenLog {
    fn from(log: ActionLog) -> Self {
        log.freeze()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionLogError {
    #[error("action at {attempted:?} precedes last recorded action at {previous:?}")]
    OutOfOrder {
        previous: Duration,
        attempted: Duration,
    },
}

impl GameError for ActionLogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfOrder { .. } => "ACTION_LOG_OUT_OF_ORDER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Direction;
    use crate::geometry::Position;

    fn step(x: i32, millis: u64) -> Action {
        Action::moved(
            Position::new(x, 0),
            Direction::Right,
            Duration::from_millis(millis),
        )
    }

    #[test]
    fn push_rejects_out_of_order_timestamps() {
        let mut log = ActionLog::new();
        log.push(step(5, 100)).unwrap();
        log.push(step(10, 100)).unwrap();

        let error = log.push(step(15, 50)).unwrap_err();
        assert_eq!(
            error,
            ActionLogError::OutOfOrder {
                previous: Duration::from_millis(100),
                attempted: Duration::from_millis(50),
            }
        );
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn record_never_breaks_ordering() {
        let mut log = ActionLog::new();
        log.record(step(5, 200));
        log.record(step(10, 150));

        let stamps: Vec<_> = log.iter().map(|a| a.timestamp).collect();
        assert_eq!(
            stamps,
            vec![Duration::from_millis(200), Duration::from_millis(200)]
        );
    }

    #[test]
    fn freezing_preserves_order_and_content() {
        let log = ActionLog::from_actions([step(5, 0), step(10, 16), step(15, 33)]).unwrap();
        let expected = log.as_slice().to_vec();

        let frozen = log.freeze();
        assert_eq!(frozen.as_slice(), expected.as_slice());
        assert_eq!(frozen.get(1).map(|a| a.position.x), Some(10));
        assert!(frozen.get(3).is_none());
    }
}
