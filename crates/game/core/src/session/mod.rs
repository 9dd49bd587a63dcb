//! Session orchestrator.
//!
//! The [`Session`] owns the current level, the live actor, the echo roster,
//! and the loop timer. Callers feed it input with [`Session::apply_input`]
//! and advance it with [`Session::tick`], passing a monotonic `now` that is
//! sampled once per tick and shared by every actor.
//!
//! Per tick, in order:
//! 1. live input (move, then optional interact)
//! 2. echo replay at the same loop-relative time
//! 3. puzzle evaluation (plates, then gates)
//! 4. exit check against the live actor only
//! 5. loop boundary handling (echo spawn, reset) and game-over check
mod events;

pub use events::{ActorRef, SessionEvent};

use std::time::Duration;

use sha2::{Digest, Sha256};

use crate::action::Direction;
use crate::actor::{Actor, Body};
use crate::config::GameConfig;
use crate::error::{ConfigError, SessionError};
use crate::geometry::Rect;
use crate::level::{Campaign, Level};
use crate::puzzle::{Gate, Trigger};
use crate::timer::{LoopTimer, TimerView};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Playing,
    LevelComplete,
    GameOver,
    GameComplete,
}

/// Input requested for the next tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Input {
    pub direction: Option<Direction>,
    pub interact: bool,
}

impl Input {
    pub fn moving(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            interact: false,
        }
    }

    pub fn interact() -> Self {
        Self {
            direction: None,
            interact: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestartScope {
    CurrentLevel,
    FirstLevel,
}

/// What a tick produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub phase: GamePhase,
    /// Whether the current level has been completed.
    pub completed: bool,
    pub loop_boundary_crossed: bool,
    /// Everything that happened since the previous tick, commands included.
    pub events: Vec<SessionEvent>,
}

#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    campaign: Campaign,
    level_index: usize,
    level: Level,
    live: Actor,
    /// Append-only; index = creation order.
    echoes: Vec<Actor>,
    timer: LoopTimer,
    phase: GamePhase,
    pending_input: Input,
    pending_events: Vec<SessionEvent>,
    /// Clock value of the most recent tick or command.
    last_now: Duration,
}

impl Session {
    /// Starts the first level of `campaign` at `now`.
    pub fn new(
        campaign: Campaign,
        config: GameConfig,
        now: Duration,
    ) -> Result<Self, SessionError> {
        config.validate()?;

        let spec = campaign.get(0).ok_or(ConfigError::EmptyCampaign)?;
        let level = Level::from_spec(spec, &config)?;
        let timer = LoopTimer::new(config.loop_duration(), level.max_loops(), now)?;
        let live = Actor::live(level.start(), config.actor_box());
        let started = SessionEvent::LevelStarted {
            level: level.id(),
            index: 0,
        };

        Ok(Self {
            config,
            campaign,
            level_index: 0,
            level,
            live,
            echoes: Vec::new(),
            timer,
            phase: GamePhase::Playing,
            pending_input: Input::default(),
            pending_events: vec![started],
            last_now: now,
        })
    }

    // ===== commands =====

    /// Queues input for the next tick.
    ///
    /// A later direction replaces an earlier one; interact requests accumulate.
    pub fn apply_input(&mut self, direction: Option<Direction>, interact: bool) {
        if direction.is_some() {
            self.pending_input.direction = direction;
        }
        self.pending_input.interact |= interact;
    }

    pub fn pause(&mut self, now: Duration) {
        if !self.timer.is_paused() {
            self.timer.pause(now);
            self.pending_events.push(SessionEvent::Paused);
        }
    }

    pub fn unpause(&mut self, now: Duration) {
        if self.timer.is_paused() {
            self.timer.unpause(now);
            self.pending_events.push(SessionEvent::Resumed);
        }
    }

    /// Loads the level after the current one. Fails without side effects
    /// when the current level is the last.
    pub fn advance_to_next_level(&mut self, now: Duration) -> Result<(), SessionError> {
        self.load_level(self.level_index + 1, now)
    }

    pub fn select_level(&mut self, index: usize, now: Duration) -> Result<(), SessionError> {
        self.load_level(index, now)
    }

    /// Rebuilds actors, timer, and level objects for the chosen level.
    pub fn restart(&mut self, now: Duration, scope: RestartScope) -> Result<(), SessionError> {
        let index = match scope {
            RestartScope::CurrentLevel => self.level_index,
            RestartScope::FirstLevel => 0,
        };
        self.load_level(index, now)
    }

    /// Leaves a terminal phase.
    ///
    /// After a completed level: next level, or GameComplete after the last.
    /// After GameOver or GameComplete: back to the first level.
    pub fn continue_after_completion(
        &mut self,
        now: Duration,
    ) -> Result<GamePhase, SessionError> {
        match self.phase {
            GamePhase::Playing => {}
            GamePhase::LevelComplete => match self.advance_to_next_level(now) {
                Ok(()) => {}
                Err(SessionError::InvalidLevelIndex { .. }) => {
                    self.phase = GamePhase::GameComplete;
                    self.pending_events.push(SessionEvent::GameComplete);
                }
                Err(error) => return Err(error),
            },
            GamePhase::GameOver | GamePhase::GameComplete => {
                self.restart(now, RestartScope::FirstLevel)?;
            }
        }
        Ok(self.phase)
    }

    fn load_level(&mut self, index: usize, now: Duration) -> Result<(), SessionError> {
        let spec = self
            .campaign
            .get(index)
            .ok_or(SessionError::InvalidLevelIndex {
                requested: index,
                available: self.campaign.len(),
            })?;
        let level = Level::from_spec(spec, &self.config)?;
        let timer = LoopTimer::new(self.config.loop_duration(), level.max_loops(), now)?;

        self.live = Actor::live(level.start(), self.config.actor_box());
        self.echoes.clear();
        self.pending_events.push(SessionEvent::LevelStarted {
            level: level.id(),
            index,
        });
        self.level = level;
        self.level_index = index;
        self.timer = timer;
        self.phase = GamePhase::Playing;
        self.pending_input = Input::default();
        self.last_now = now;
        Ok(())
    }

    // ===== tick =====

    /// Runs one tick to completion at clock value `now`.
    ///
    /// `now` values below the previous one are treated as the previous one.
    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        let now = now.max(self.last_now);
        self.last_now = now;

        let mut events = std::mem::take(&mut self.pending_events);
        let input = std::mem::take(&mut self.pending_input);

        if self.phase != GamePhase::Playing
            || (self.timer.is_paused() && self.config.freeze_while_paused)
        {
            return self.outcome(false, events);
        }

        // On a tick that crosses the boundary, input still belongs to the
        // ending loop; its recording must stay replayable within that loop.
        let loop_time = self.timer.loop_time(now).min(self.last_instant_of_loop());

        if let Some(direction) = input.direction {
            self.live.attempt_move(
                direction,
                self.config.speed,
                self.level.puzzle().blockers(),
                &self.config.bounds,
                loop_time,
            );
        }
        if input.interact
            && let Some(trigger) = self
                .live
                .attempt_interact(self.level.puzzle_mut(), loop_time)
        {
            events.push(SessionEvent::Interacted {
                actor: ActorRef::Live,
                trigger,
            });
        }

        for (index, echo) in self.echoes.iter_mut().enumerate() {
            let step = echo.step(loop_time, self.level.puzzle_mut());
            events.extend(step.activated.into_iter().map(|trigger| {
                SessionEvent::Interacted {
                    actor: ActorRef::Echo(index),
                    trigger,
                }
            }));
        }

        self.evaluate_puzzle(&mut events);

        if self.level.puzzle().exit_reached(&self.live.rect()) && self.level.mark_completed() {
            self.phase = GamePhase::LevelComplete;
            events.push(SessionEvent::LevelCompleted {
                level: self.level.id(),
            });
            return self.outcome(false, events);
        }

        // A stalled clock may have skipped whole loops; each one still
        // produces its (possibly empty) echo.
        let mut crossed = false;
        while self.timer.should_reset_loop(now) && !self.timer.is_game_over() {
            self.reset_loop(&mut events);
            crossed = true;
        }

        if self.timer.is_game_over() {
            self.phase = GamePhase::GameOver;
            events.push(SessionEvent::GameOver {
                level: self.level.id(),
            });
        }

        self.outcome(crossed, events)
    }

    /// Latest loop-relative time an action can be stamped with.
    fn last_instant_of_loop(&self) -> Duration {
        self.timer
            .loop_duration()
            .saturating_sub(Duration::from_nanos(1))
    }

    fn evaluate_puzzle(&mut self, events: &mut Vec<SessionEvent>) {
        let actors: Vec<Rect> = std::iter::once(&self.live)
            .chain(&self.echoes)
            .map(Actor::rect)
            .collect();

        for change in self.level.puzzle_mut().evaluate(&actors) {
            events.push(SessionEvent::GateChanged {
                gate: change.gate,
                open: change.open,
            });
        }
    }

    fn reset_loop(&mut self, events: &mut Vec<SessionEvent>) {
        let completed_loop = self.timer.current_loop();

        if let Some(echo) = self.live.spawn_echo(completed_loop) {
            self.echoes.push(echo);
        }
        self.live.reset_to(self.level.start());
        self.level.puzzle_mut().reset_latches();
        self.timer.reset_loop();

        events.push(SessionEvent::LoopReset {
            completed_loop,
            echo: self.echoes.len().saturating_sub(1),
        });
        self.evaluate_puzzle(events);
    }

    fn outcome(&self, loop_boundary_crossed: bool, events: Vec<SessionEvent>) -> TickOutcome {
        TickOutcome {
            phase: self.phase,
            completed: self.level.is_completed(),
            loop_boundary_crossed,
            events,
        }
    }

    // ===== queries =====

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn live(&self) -> &Actor {
        &self.live
    }

    pub fn echoes(&self) -> &[Actor] {
        &self.echoes
    }

    /// Live actor first, then echoes in creation order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        std::iter::once(&self.live).chain(&self.echoes)
    }

    pub fn actor(&self, actor: ActorRef) -> Option<&Actor> {
        match actor {
            ActorRef::Live => Some(&self.live),
            ActorRef::Echo(index) => self.echoes.get(index),
        }
    }

    pub fn triggers(&self) -> &[Trigger] {
        self.level.puzzle().triggers()
    }

    pub fn gates(&self) -> &[Gate] {
        self.level.puzzle().gates()
    }

    pub fn timer(&self) -> &LoopTimer {
        &self.timer
    }

    /// Timer values at the clock of the most recent tick or command.
    pub fn timer_view(&self) -> TimerView {
        self.timer.snapshot(self.last_now)
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    /// Palette slot a renderer should use for echo `index`.
    pub fn echo_palette_slot(index: usize) -> usize {
        index.min(GameConfig::ECHO_PALETTE_SIZE - 1)
    }

    /// SHA-256 over everything a renderer can observe.
    ///
    /// Two sessions with equal roots show the same actors, the same trigger
    /// and gate states, and the same loop counters.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        hasher.update((self.level_index as u64).to_le_bytes());
        hasher.update([self.phase as u8, self.level.is_completed() as u8]);
        hasher.update(self.timer.current_loop().to_le_bytes());

        for actor in self.actors() {
            hash_body(&mut hasher, actor.body());
            let cursor = actor.cursor().map_or(u64::MAX, |cursor| cursor as u64);
            hasher.update(cursor.to_le_bytes());
        }

        for trigger in self.triggers() {
            hasher.update([trigger.is_active() as u8]);
        }
        for gate in self.gates() {
            hasher.update([gate.is_open() as u8]);
        }

        hasher.finalize().into()
    }
}

fn hash_body(hasher: &mut Sha256, body: &Body) {
    hasher.update(body.position.x.to_le_bytes());
    hasher.update(body.position.y.to_le_bytes());
    hasher.update(body.size.width.to_le_bytes());
    hasher.update(body.size.height.to_le_bytes());
    hasher.update([body.facing.code()]);
}
