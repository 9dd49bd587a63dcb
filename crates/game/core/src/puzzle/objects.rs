use std::fmt;

use super::{Capabilities, ObjectKind};
use crate::geometry::Rect;

/// Position of a trigger in its level's declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerId(pub u32);

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trigger#{}", self.0)
    }
}

/// Identifier shared by a gate and every trigger that targets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateId(pub u32);

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gate#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TriggerKind {
    Switch,
    PressurePlate,
    Terminal,
}

impl TriggerKind {
    pub const fn object_kind(self) -> ObjectKind {
        match self {
            TriggerKind::Switch => ObjectKind::Switch,
            TriggerKind::PressurePlate => ObjectKind::PressurePlate,
            TriggerKind::Terminal => ObjectKind::Terminal,
        }
    }

    /// Latching triggers keep their state until the next loop reset.
    pub const fn is_latching(self) -> bool {
        matches!(self, TriggerKind::Switch | TriggerKind::Terminal)
    }
}

/// Switch, pressure plate, or terminal feeding a gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trigger {
    id: TriggerId,
    kind: TriggerKind,
    rect: Rect,
    target: GateId,
    active: bool,
}

impl Trigger {
    pub fn new(id: TriggerId, kind: TriggerKind, rect: Rect, target: GateId) -> Self {
        Self {
            id,
            kind,
            rect,
            target,
            active: false,
        }
    }

    pub fn id(&self) -> TriggerId {
        self.id
    }

    pub fn kind(&self) -> TriggerKind {
        self.kind
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn target(&self) -> GateId {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.object_kind().capabilities()
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gate {
    id: GateId,
    rect: Rect,
    open: bool,
}

impl Gate {
    /// Gates start closed.
    pub fn new(id: GateId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            open: false,
        }
    }

    pub fn id(&self) -> GateId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// `BLOCKING` while closed, nothing while open.
    pub fn capabilities(&self) -> Capabilities {
        if self.open {
            Capabilities::empty()
        } else {
            ObjectKind::Gate.capabilities()
        }
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.open = open;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wall {
    rect: Rect,
}

impl Wall {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn capabilities(&self) -> Capabilities {
        ObjectKind::Wall.capabilities()
    }
}

/// Stateless goal detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exit {
    rect: Rect,
}

impl Exit {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
}
