//! Live and echo actors.
//!
//! Both roles share a [`Body`] and differ only in how their position changes:
//! a live actor moves through collision-checked requests and records what it
//! did, an echo teleports along a frozen recording. Behaviour is selected by
//! matching on [`Role`].
use std::time::Duration;

use crate::action::{Action, ActionKind, ActionLog, Direction, FrozenLog};
use crate::geometry::{Bounds, Position, Rect, Size};
use crate::puzzle::{PuzzleGraph, TriggerId};

/// State shared by every actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub position: Position,
    pub size: Size,
    pub facing: Direction,
}

impl Body {
    pub fn rect(&self) -> Rect {
        Rect::at(self.position, self.size)
    }
}

/// Recording side of a live actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiveState {
    log: ActionLog,
    /// Where the current loop started.
    origin: Position,
}

/// Replay side of an echo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replay {
    log: FrozenLog,
    /// Index of the next unconsumed action.
    cursor: usize,
    /// Loop the recording was made in (1-based).
    loop_index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Live(LiveState),
    Echo(Replay),
}

/// Result of advancing an echo.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplayStep {
    /// Number of actions consumed.
    pub consumed: usize,
    /// Triggers activated by replayed interactions, in log order.
    pub activated: Vec<TriggerId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    body: Body,
    role: Role,
}

impl Actor {
    /// Creates a live actor standing at `start` with an empty log.
    pub fn live(start: Position, size: Size) -> Self {
        Self {
            body: Body {
                position: start,
                size,
                facing: Direction::None,
            },
            role: Role::Live(LiveState {
                log: ActionLog::new(),
                origin: start,
            }),
        }
    }

    /// Creates an echo replaying `log` from `origin`.
    pub fn echo(origin: Position, size: Size, log: FrozenLog, loop_index: u32) -> Self {
        Self {
            body: Body {
                position: origin,
                size,
                facing: Direction::None,
            },
            role: Role::Echo(Replay {
                log,
                cursor: 0,
                loop_index,
            }),
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn position(&self) -> Position {
        self.body.position
    }

    pub fn facing(&self) -> Direction {
        self.body.facing
    }

    pub fn size(&self) -> Size {
        self.body.size
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn is_echo(&self) -> bool {
        matches!(self.role, Role::Echo(_))
    }

    /// Recorded (live) or replayed (echo) actions.
    pub fn actions(&self) -> &[Action] {
        match &self.role {
            Role::Live(live) => live.log.as_slice(),
            Role::Echo(replay) => replay.log.as_slice(),
        }
    }

    /// Loop the echo was recorded in; `None` for the live actor.
    pub fn loop_index(&self) -> Option<u32> {
        match &self.role {
            Role::Live(_) => None,
            Role::Echo(replay) => Some(replay.loop_index),
        }
    }

    /// Replay cursor; `None` for the live actor.
    pub fn cursor(&self) -> Option<usize> {
        match &self.role {
            Role::Live(_) => None,
            Role::Echo(replay) => Some(replay.cursor),
        }
    }

    /// True once an echo has consumed its whole log. Live actors never are.
    pub fn is_exhausted(&self) -> bool {
        match &self.role {
            Role::Live(_) => false,
            Role::Echo(replay) => replay.cursor >= replay.log.len(),
        }
    }

    /// Tries to move one step of `speed` pixels.
    ///
    /// Rejected (returns `false`, nothing recorded) if the candidate box hits
    /// any of `blockers`, if `direction` is not cardinal, or if this actor is
    /// an echo. On success the clamped position is committed and a Move action
    /// is appended at loop-relative time `now`.
    pub fn attempt_move(
        &mut self,
        direction: Direction,
        speed: i32,
        blockers: impl IntoIterator<Item = Rect>,
        bounds: &Bounds,
        now: Duration,
    ) -> bool {
        let Role::Live(live) = &mut self.role else {
            return false;
        };
        if !direction.is_cardinal() {
            return false;
        }

        let (dx, dy) = direction.delta();
        let candidate = self
            .body
            .position
            .offset(dx.saturating_mul(speed), dy.saturating_mul(speed));
        let candidate_rect = Rect::at(candidate, self.body.size);

        if blockers
            .into_iter()
            .any(|blocker| blocker.intersects(&candidate_rect))
        {
            return false;
        }

        self.body.position = bounds.clamp(candidate, self.body.size);
        self.body.facing = direction;
        live.log
            .record(Action::moved(self.body.position, direction, now));
        true
    }

    /// Activates the first switch or terminal under this live actor.
    ///
    /// Records an Interact action only when something was activated.
    pub fn attempt_interact(
        &mut self,
        puzzle: &mut PuzzleGraph,
        now: Duration,
    ) -> Option<TriggerId> {
        let Role::Live(live) = &mut self.role else {
            return None;
        };

        let trigger = puzzle.interact(&self.body.rect())?;
        live.log.record(Action::interacted(
            self.body.position,
            self.body.facing,
            now,
        ));
        Some(trigger)
    }

    /// Replays every action due at loop-relative time `now`.
    ///
    /// Moves teleport without collision checks. Interactions re-run the
    /// overlap test against the live `puzzle` from the echo's replayed
    /// position. A live actor, or an exhausted echo, does nothing.
    pub fn step(&mut self, now: Duration, puzzle: &mut PuzzleGraph) -> ReplayStep {
        let Role::Echo(replay) = &mut self.role else {
            return ReplayStep::default();
        };

        let mut step = ReplayStep::default();
        while let Some(&action) = replay.log.get(replay.cursor) {
            if action.timestamp > now {
                break;
            }

            match action.kind {
                ActionKind::Move => {
                    self.body.position = action.position;
                    self.body.facing = action.facing;
                }
                ActionKind::Interact => {
                    if let Some(trigger) = puzzle.interact(&self.body.rect()) {
                        step.activated.push(trigger);
                    }
                }
            }

            replay.cursor += 1;
            step.consumed += 1;
        }
        step
    }

    /// Moves the live log out into a new echo that starts where this loop began.
    ///
    /// The echo is placed at the loop origin, not at the live actor's current
    /// position: its log only holds positions reached after the loop started,
    /// so starting anywhere else would show it at the end point before its
    /// first recorded move. The position at the end of the loop is reached
    /// through the log itself.
    ///
    /// The live actor is left with an empty log. Returns `None` for echoes.
    pub fn spawn_echo(&mut self, loop_index: u32) -> Option<Actor> {
        let Role::Live(live) = &mut self.role else {
            return None;
        };

        let log = std::mem::take(&mut live.log).freeze();
        Some(Actor::echo(live.origin, self.body.size, log, loop_index))
    }

    /// Starts a new loop for a live actor at `start`, discarding its log.
    pub fn reset_to(&mut self, start: Position) {
        if let Role::Live(live) = &mut self.role {
            live.log.clear();
            live.origin = start;
            self.body.position = start;
            self.body.facing = Direction::None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Gate, GateId, Trigger, TriggerKind, Wall};

    const BOUNDS: Bounds = Bounds::new(800, 600);
    const SPEED: i32 = 5;

    fn player() -> Actor {
        Actor::live(Position::new(100, 300), Size::square(30))
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn successful_move_is_recorded() {
        let mut actor = player();

        assert!(actor.attempt_move(Direction::Right, SPEED, [], &BOUNDS, ms(16)));
        assert_eq!(actor.position(), Position::new(105, 300));
        assert_eq!(actor.facing(), Direction::Right);
        assert_eq!(
            actor.actions(),
            &[Action::moved(Position::new(105, 300), Direction::Right, ms(16))]
        );
    }

    #[test]
    fn blocked_move_changes_nothing() {
        let mut actor = player();
        let wall = Rect::new(131, 290, 20, 50);

        assert!(!actor.attempt_move(Direction::Right, SPEED, [wall], &BOUNDS, ms(16)));
        assert_eq!(actor.position(), Position::new(100, 300));
        assert_eq!(actor.facing(), Direction::None);
        assert!(actor.actions().is_empty());
    }

    #[test]
    fn closed_gate_blocks_like_a_wall() {
        let mut actor = player();
        let puzzle = PuzzleGraph::new(
            vec![],
            vec![],
            vec![Gate::new(GateId(1), Rect::new(90, 270, 50, 27))],
            None,
        );

        assert!(!actor.attempt_move(Direction::Up, SPEED, puzzle.blockers(), &BOUNDS, ms(0)));
        assert_eq!(actor.position(), Position::new(100, 300));
        assert!(actor.actions().is_empty());
    }

    #[test]
    fn move_is_clamped_to_bounds() {
        let mut actor = Actor::live(Position::new(2, 0), Size::square(30));

        assert!(actor.attempt_move(Direction::Left, SPEED, [], &BOUNDS, ms(0)));
        assert_eq!(actor.position(), Position::new(0, 0));
        assert_eq!(actor.actions()[0].position, Position::new(0, 0));
    }

    #[test]
    fn none_direction_is_not_a_move() {
        let mut actor = player();
        assert!(!actor.attempt_move(Direction::None, SPEED, [], &BOUNDS, ms(0)));
        assert!(actor.actions().is_empty());
    }

    #[test]
    fn interact_records_only_on_activation() {
        let mut actor = player();
        let mut puzzle = PuzzleGraph::new(
            vec![],
            vec![Trigger::new(
                TriggerId(0),
                TriggerKind::Switch,
                Rect::new(110, 310, 40, 40),
                GateId(1),
            )],
            vec![],
            None,
        );

        assert_eq!(actor.attempt_interact(&mut puzzle, ms(50)), Some(TriggerId(0)));
        assert_eq!(actor.actions().len(), 1);
        assert_eq!(actor.actions()[0].kind, ActionKind::Interact);

        let mut far = Actor::live(Position::new(500, 500), Size::square(30));
        assert_eq!(far.attempt_interact(&mut puzzle, ms(50)), None);
        assert!(far.actions().is_empty());
    }

    #[test]
    fn echo_replays_with_catch_up() {
        let mut live = player();
        for tick in 1..=4 {
            live.attempt_move(Direction::Down, SPEED, [], &BOUNDS, ms(tick * 100));
        }
        let mut echo = live.spawn_echo(1).unwrap();
        let mut puzzle = PuzzleGraph::default();

        assert_eq!(echo.position(), Position::new(100, 300));
        assert_eq!(echo.step(ms(50), &mut puzzle).consumed, 0);

        // Three actions are due at once.
        assert_eq!(echo.step(ms(300), &mut puzzle).consumed, 3);
        assert_eq!(echo.position(), Position::new(100, 315));
        assert_eq!(echo.cursor(), Some(3));

        echo.step(ms(400), &mut puzzle);
        assert!(echo.is_exhausted());
        assert_eq!(echo.position(), Position::new(100, 320));

        // Exhausted echoes hold position.
        assert_eq!(echo.step(ms(9_000), &mut puzzle).consumed, 0);
        assert_eq!(echo.position(), Position::new(100, 320));
    }

    #[test]
    fn echo_ignores_walls_it_never_saw() {
        let log = ActionLog::from_actions([Action::moved(
            Position::new(200, 300),
            Direction::Right,
            ms(10),
        )])
        .unwrap();
        let mut echo = Actor::echo(Position::new(100, 300), Size::square(30), log.freeze(), 1);
        let mut puzzle = PuzzleGraph::new(
            vec![Wall::new(Rect::new(190, 290, 50, 50))],
            vec![],
            vec![],
            None,
        );

        echo.step(ms(10), &mut puzzle);
        assert_eq!(echo.position(), Position::new(200, 300));
    }

    #[test]
    fn echo_interaction_uses_replayed_position_against_live_triggers() {
        let log = ActionLog::from_actions([
            Action::moved(Position::new(300, 400), Direction::Down, ms(10)),
            Action::interacted(Position::new(300, 400), Direction::Down, ms(10)),
        ])
        .unwrap();
        let mut echo = Actor::echo(Position::new(100, 300), Size::square(30), log.freeze(), 1);
        let mut puzzle = PuzzleGraph::new(
            vec![],
            vec![Trigger::new(
                TriggerId(0),
                TriggerKind::Terminal,
                Rect::new(300, 400, 40, 40),
                GateId(2),
            )],
            vec![],
            None,
        );

        let step = echo.step(ms(10), &mut puzzle);
        assert_eq!(step.activated, vec![TriggerId(0)]);
        assert!(puzzle.trigger(TriggerId(0)).unwrap().is_active());
    }

    #[test]
    fn empty_log_echo_never_acts() {
        let mut echo = Actor::echo(
            Position::new(100, 300),
            Size::square(30),
            FrozenLog::default(),
            1,
        );
        assert!(echo.is_exhausted());
        assert_eq!(echo.step(ms(5_000), &mut PuzzleGraph::default()), ReplayStep::default());
    }

    #[test]
    fn spawning_an_echo_transfers_the_log() {
        let mut live = player();
        live.attempt_move(Direction::Right, SPEED, [], &BOUNDS, ms(10));

        let echo = live.spawn_echo(3).unwrap();
        assert!(live.actions().is_empty());
        assert_eq!(echo.actions().len(), 1);
        assert_eq!(echo.loop_index(), Some(3));
        assert!(echo.clone().spawn_echo(9).is_none());
    }

    #[test]
    fn reset_returns_to_start_with_a_clean_log() {
        let mut live = player();
        live.attempt_move(Direction::Right, SPEED, [], &BOUNDS, ms(10));
        live.reset_to(Position::new(50, 50));

        assert_eq!(live.position(), Position::new(50, 50));
        assert!(live.actions().is_empty());
        assert_eq!(live.spawn_echo(1).unwrap().position(), Position::new(50, 50));
    }
}
