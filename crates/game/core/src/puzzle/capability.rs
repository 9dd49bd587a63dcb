use bitflags::bitflags;

bitflags! {
    /// What an object can do to an actor that overlaps it.
    ///
    /// Collision and interaction code filters on these sets instead of
    /// inspecting concrete object types.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// Stops live movement into the object's box.
        const BLOCKING    = 1 << 0;
        /// Activated by an explicit interact request.
        const INTERACTIVE = 1 << 1;
        /// Active while any actor stands on it.
        const PRESSURE    = 1 << 2;
        /// Completes the level when the live actor reaches it.
        const GOAL        = 1 << 3;
    }
}

/// Every kind of object a level can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ObjectKind {
    Wall,
    Switch,
    PressurePlate,
    Terminal,
    Gate,
    Exit,
}

impl ObjectKind {
    /// Static capability set of this kind.
    ///
    /// Gates report `BLOCKING` here; an open gate drops it at runtime
    /// (see [`Gate::capabilities`](super::Gate::capabilities)).
    pub const fn capabilities(self) -> Capabilities {
        match self {
            ObjectKind::Wall | ObjectKind::Gate => Capabilities::BLOCKING,
            ObjectKind::Switch | ObjectKind::Terminal => Capabilities::INTERACTIVE,
            ObjectKind::PressurePlate => Capabilities::PRESSURE,
            ObjectKind::Exit => Capabilities::GOAL,
        }
    }
}
