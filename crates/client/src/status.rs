//! Text rendering of snapshots and events.

use std::fmt::Write;

use echoes_core::{ActorRef, GamePhase, SessionEvent};
use echoes_runtime::SessionSnapshot;

/// One-line HUD: level, loop counter, time left, echoes, gates.
pub fn status_line(snapshot: &SessionSnapshot) -> String {
    let timer = &snapshot.timer;
    let mut line = format!(
        "level {}/{} | loop {}/{} | {:.1}s left | player {} | echoes {}",
        snapshot.level_index + 1,
        snapshot.level_count,
        timer.current_loop.min(timer.max_loops),
        timer.max_loops,
        timer.remaining.as_secs_f32(),
        snapshot.live.position,
        snapshot.echoes.len(),
    );

    if !snapshot.gates.is_empty() {
        line.push_str(" |");
        for gate in &snapshot.gates {
            let state = if gate.open { "open" } else { "closed" };
            let _ = write!(line, " {}={}", gate.id, state);
        }
    }
    if timer.paused {
        line.push_str(" | paused");
    }
    if let Some(banner) = phase_banner(snapshot.phase) {
        line.push_str(" | ");
        line.push_str(banner);
    }

    line
}

fn phase_banner(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Playing => None,
        GamePhase::LevelComplete => Some("LEVEL COMPLETE (c to continue)"),
        GamePhase::GameOver => Some("GAME OVER (c to retry)"),
        GamePhase::GameComplete => Some("YOU WIN (c to play again)"),
    }
}

/// Message for events worth showing to the player; `None` for noise.
pub fn event_message(event: &SessionEvent) -> Option<String> {
    let message = match event {
        SessionEvent::LevelStarted { level, .. } => format!("level {level} started"),
        SessionEvent::Interacted { actor, trigger } => match actor {
            ActorRef::Live => format!("you activated {trigger}"),
            ActorRef::Echo(index) => format!("echo {} activated {trigger}", index + 1),
        },
        SessionEvent::GateChanged { gate, open } => {
            let state = if *open { "opened" } else { "closed" };
            format!("{gate} {state}")
        }
        SessionEvent::LevelCompleted { level } => format!("level {level} complete"),
        SessionEvent::LoopReset {
            completed_loop,
            echo,
        } => format!("loop {completed_loop} over, echo {} joins you", echo + 1),
        SessionEvent::GameOver { .. } => "out of loops".to_string(),
        SessionEvent::GameComplete => "all levels complete".to_string(),
        SessionEvent::Paused | SessionEvent::Resumed => return None,
    };
    Some(message)
}
