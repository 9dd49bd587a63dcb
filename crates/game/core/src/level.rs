//! Declarative level descriptions and their instantiated form.
//!
//! A [`LevelSpec`] is plain data (deserializable with the `serde` feature);
//! [`Level::from_spec`] turns it into a fresh [`PuzzleGraph`] with every
//! trigger inactive and every gate closed. Restarting a level means building
//! it again from its spec.
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::geometry::{Bounds, Position, Rect};
use crate::puzzle::{Exit, Gate, GateId, PuzzleGraph, Trigger, TriggerId, TriggerKind, Wall};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallSpec {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Trigger placement; its box is one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerSpec {
    pub kind: TriggerKind,
    pub x: i32,
    pub y: i32,
    pub target: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateSpec {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub gate: u32,
}

/// Exit placement; its box is one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExitSpec {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSpec {
    pub id: u32,
    pub start: Position,
    pub max_loops: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walls: Vec<WallSpec>,
    /// Declaration order decides which trigger an interaction picks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub triggers: Vec<TriggerSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gates: Vec<GateSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exit: Option<ExitSpec>,
}

impl LevelSpec {
    pub fn new(id: u32, start: Position, max_loops: u32) -> Self {
        Self {
            id,
            start,
            max_loops,
            walls: Vec::new(),
            triggers: Vec::new(),
            gates: Vec::new(),
            exit: None,
        }
    }

    pub fn wall(mut self, x: i32, y: i32, width: u32, height: u32) -> Self {
        self.walls.push(WallSpec {
            x,
            y,
            width,
            height,
        });
        self
    }

    /// Adds four walls of `thickness` around `bounds`.
    pub fn bordered(self, bounds: Bounds, thickness: u32) -> Self {
        let right = bounds.width.saturating_sub(thickness) as i32;
        let bottom = bounds.height.saturating_sub(thickness) as i32;
        self.wall(0, 0, bounds.width, thickness)
            .wall(0, bottom, bounds.width, thickness)
            .wall(0, 0, thickness, bounds.height)
            .wall(right, 0, thickness, bounds.height)
    }

    pub fn trigger(mut self, kind: TriggerKind, x: i32, y: i32, target: u32) -> Self {
        self.triggers.push(TriggerSpec { kind, x, y, target });
        self
    }

    pub fn switch(self, x: i32, y: i32, target: u32) -> Self {
        self.trigger(TriggerKind::Switch, x, y, target)
    }

    pub fn pressure_plate(self, x: i32, y: i32, target: u32) -> Self {
        self.trigger(TriggerKind::PressurePlate, x, y, target)
    }

    pub fn terminal(self, x: i32, y: i32, target: u32) -> Self {
        self.trigger(TriggerKind::Terminal, x, y, target)
    }

    pub fn gate(mut self, x: i32, y: i32, width: u32, height: u32, gate: u32) -> Self {
        self.gates.push(GateSpec {
            x,
            y,
            width,
            height,
            gate,
        });
        self
    }

    pub fn exit(mut self, x: i32, y: i32) -> Self {
        self.exit = Some(ExitSpec { x, y });
        self
    }
}

/// A level instantiated for play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    id: u32,
    start: Position,
    max_loops: u32,
    puzzle: PuzzleGraph,
    /// Latches once the live actor reaches the exit.
    completed: bool,
}

impl Level {
    pub fn from_spec(spec: &LevelSpec, config: &GameConfig) -> Result<Self, ConfigError> {
        if spec.max_loops == 0 {
            return Err(ConfigError::ZeroMaxLoops { level: spec.id });
        }

        let tile = config.tile_box();
        let walls = spec
            .walls
            .iter()
            .map(|wall| Wall::new(Rect::new(wall.x, wall.y, wall.width, wall.height)))
            .collect();
        let triggers = spec
            .triggers
            .iter()
            .enumerate()
            .map(|(index, trigger)| {
                Trigger::new(
                    TriggerId(index as u32),
                    trigger.kind,
                    Rect::at(Position::new(trigger.x, trigger.y), tile),
                    GateId(trigger.target),
                )
            })
            .collect();
        let gates = spec
            .gates
            .iter()
            .map(|gate| {
                Gate::new(
                    GateId(gate.gate),
                    Rect::new(gate.x, gate.y, gate.width, gate.height),
                )
            })
            .collect();
        let exit = spec
            .exit
            .map(|exit| Exit::new(Rect::at(Position::new(exit.x, exit.y), tile)));

        Ok(Self {
            id: spec.id,
            start: spec.start,
            max_loops: spec.max_loops,
            puzzle: PuzzleGraph::new(walls, triggers, gates, exit),
            completed: false,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn max_loops(&self) -> u32 {
        self.max_loops
    }

    pub fn puzzle(&self) -> &PuzzleGraph {
        &self.puzzle
    }

    pub fn puzzle_mut(&mut self) -> &mut PuzzleGraph {
        &mut self.puzzle
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Sets the completed flag. Returns true only on the first call.
    pub fn mark_completed(&mut self) -> bool {
        !std::mem::replace(&mut self.completed, true)
    }
}

/// Ordered, non-empty list of levels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Campaign {
    levels: Vec<LevelSpec>,
}

impl Campaign {
    pub fn new(levels: Vec<LevelSpec>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::EmptyCampaign);
        }
        if let Some(level) = levels.iter().find(|level| level.max_loops == 0) {
            return Err(ConfigError::ZeroMaxLoops { level: level.id });
        }
        Ok(Self { levels })
    }

    pub fn get(&self, index: usize) -> Option<&LevelSpec> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Never true for a constructed campaign.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelSpec> {
        self.levels.iter()
    }
}
