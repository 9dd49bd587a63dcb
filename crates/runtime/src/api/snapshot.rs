//! Read-only copies of session state handed to clients.
use serde::Serialize;

use echoes_core::{Body, GamePhase, GateId, Session, TimerView, TriggerId, TriggerKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EchoView {
    pub body: Body,
    /// Loop the echo was recorded in.
    pub loop_index: u32,
    /// Tint index, see [`Session::echo_palette_slot`].
    pub palette_slot: usize,
    pub exhausted: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TriggerView {
    pub id: TriggerId,
    pub kind: TriggerKind,
    pub target: GateId,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GateView {
    pub id: GateId,
    pub open: bool,
}

/// Everything a HUD or renderer needs, captured between two ticks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub level_index: usize,
    pub level_count: usize,
    pub level_id: u32,
    pub phase: GamePhase,
    pub completed: bool,
    pub timer: TimerView,
    pub live: Body,
    pub echoes: Vec<EchoView>,
    pub triggers: Vec<TriggerView>,
    pub gates: Vec<GateView>,
    pub state_root: [u8; 32],
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        let echoes = session
            .echoes()
            .iter()
            .enumerate()
            .map(|(index, echo)| EchoView {
                body: *echo.body(),
                loop_index: echo.loop_index().unwrap_or_default(),
                palette_slot: Session::echo_palette_slot(index),
                exhausted: echo.is_exhausted(),
            })
            .collect();
        let triggers = session
            .triggers()
            .iter()
            .map(|trigger| TriggerView {
                id: trigger.id(),
                kind: trigger.kind(),
                target: trigger.target(),
                active: trigger.is_active(),
            })
            .collect();
        let gates = session
            .gates()
            .iter()
            .map(|gate| GateView {
                id: gate.id(),
                open: gate.is_open(),
            })
            .collect();

        Self {
            level_index: session.level_index(),
            level_count: session.campaign().len(),
            level_id: session.level().id(),
            phase: session.phase(),
            completed: session.level().is_completed(),
            timer: session.timer_view(),
            live: *session.live().body(),
            echoes,
            triggers,
            gates,
            state_root: session.state_root(),
        }
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    pub fn is_gate_open(&self, id: GateId) -> bool {
        self.gates.iter().any(|gate| gate.id == id && gate.open)
    }
}
