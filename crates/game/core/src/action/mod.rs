//! Recorded actor events and the logs that hold them.
//!
//! A live actor appends an [`Action`] for every successful move or
//! interaction, stamped with loop-relative time. At a loop boundary the log
//! is frozen into a [`FrozenLog`] and handed to a new echo, which replays it
//! against the clock of later loops.
mod log;
mod root;

use std::time::Duration;

use crate::geometry::Position;

pub use log::{ActionLog, ActionLogError, FrozenLog};
pub use root::compute_log_root;

/// Facing of an actor, and the direction of a movement request.
///
/// Up and Down follow screen coordinates: Up decreases `y`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn is_cardinal(self) -> bool {
        !matches!(self, Direction::None)
    }

    pub(crate) const fn code(self) -> u8 {
        match self {
            Direction::None => 0,
            Direction::Up => 1,
            Direction::Down => 2,
            Direction::Left => 3,
            Direction::Right => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Move,
    Interact,
}

/// One recorded actor event.
///
/// `position` and `facing` are the actor's state after the event; `timestamp`
/// is loop-relative time at the moment it was recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub kind: ActionKind,
    pub position: Position,
    pub timestamp: Duration,
    pub facing: Direction,
}

impl Action {
    pub const fn moved(position: Position, facing: Direction, timestamp: Duration) -> Self {
        Self {
            kind: ActionKind::Move,
            position,
            timestamp,
            facing,
        }
    }

    pub const fn interacted(position: Position, facing: Direction, timestamp: Duration) -> Self {
        Self {
            kind: ActionKind::Interact,
            position,
            timestamp,
            facing,
        }
    }
}
