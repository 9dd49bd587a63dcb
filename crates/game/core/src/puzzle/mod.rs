//! Puzzle object graph: triggers feeding gates.
//!
//! Switches and terminals latch on interaction and hold until the next loop
//! reset. Pressure plates have no memory: they are recomputed from actor
//! overlap on every evaluation. A gate is open exactly when at least one
//! active trigger targets its id.
mod capability;
mod objects;

pub use capability::{Capabilities, ObjectKind};
pub use objects::{Exit, Gate, GateId, Trigger, TriggerId, TriggerKind, Wall};

use crate::geometry::Rect;

/// A gate whose open state flipped during an evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateChange {
    pub gate: GateId,
    pub open: bool,
}

/// Static level objects plus their activation state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PuzzleGraph {
    walls: Vec<Wall>,
    /// Declared order; interaction picks the first overlapping entry.
    triggers: Vec<Trigger>,
    gates: Vec<Gate>,
    exit: Option<Exit>,
}

impl PuzzleGraph {
    pub fn new(
        walls: Vec<Wall>,
        triggers: Vec<Trigger>,
        gates: Vec<Gate>,
        exit: Option<Exit>,
    ) -> Self {
        Self {
            walls,
            triggers,
            gates,
            exit,
        }
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn exit(&self) -> Option<&Exit> {
        self.exit.as_ref()
    }

    pub fn trigger(&self, id: TriggerId) -> Option<&Trigger> {
        self.triggers.iter().find(|trigger| trigger.id() == id)
    }

    /// Returns true if any gate with `id` is currently open.
    pub fn is_gate_open(&self, id: GateId) -> bool {
        self.gates
            .iter()
            .any(|gate| gate.id() == id && gate.is_open())
    }

    /// Boxes that stop live movement: walls and closed gates.
    pub fn blockers(&self) -> impl Iterator<Item = Rect> + '_ {
        let walls = self
            .walls
            .iter()
            .filter(|wall| wall.capabilities().contains(Capabilities::BLOCKING))
            .map(Wall::rect);
        let gates = self
            .gates
            .iter()
            .filter(|gate| gate.capabilities().contains(Capabilities::BLOCKING))
            .map(Gate::rect);
        walls.chain(gates)
    }

    /// Activates the first interactive trigger overlapping `actor`.
    ///
    /// Pressure plates are passive and never match. Returns the activated
    /// trigger, or `None` if nothing was in reach.
    pub fn interact(&mut self, actor: &Rect) -> Option<TriggerId> {
        let trigger = self.triggers.iter_mut().find(|trigger| {
            trigger.capabilities().contains(Capabilities::INTERACTIVE)
                && trigger.rect().intersects(actor)
        })?;

        trigger.set_active(true);
        Some(trigger.id())
    }

    /// Recomputes pressure plates from `actors`, then every gate.
    ///
    /// Gate state is a pure OR over the triggers' state after the plate pass,
    /// so the result does not depend on gate order. Returns the gates that
    /// flipped.
    pub fn evaluate(&mut self, actors: &[Rect]) -> Vec<GateChange> {
        for plate in self
            .triggers
            .iter_mut()
            .filter(|trigger| trigger.capabilities().contains(Capabilities::PRESSURE))
        {
            let pressed = actors.iter().any(|actor| actor.intersects(&plate.rect()));
            plate.set_active(pressed);
        }

        let mut changes = Vec::new();
        for gate in &mut self.gates {
            let open = self
                .triggers
                .iter()
                .any(|trigger| trigger.is_active() && trigger.target() == gate.id());

            if gate.is_open() != open {
                gate.set_open(open);
                changes.push(GateChange {
                    gate: gate.id(),
                    open,
                });
            }
        }
        changes
    }

    /// Releases every latched trigger (switches and terminals).
    pub fn reset_latches(&mut self) {
        for trigger in &mut self.triggers {
            if trigger.kind().is_latching() {
                trigger.set_active(false);
            }
        }
    }

    /// Returns true if `actor` overlaps the exit.
    pub fn exit_reached(&self, actor: &Rect) -> bool {
        self.exit
            .as_ref()
            .is_some_and(|exit| exit.rect().intersects(actor))
    }
}
