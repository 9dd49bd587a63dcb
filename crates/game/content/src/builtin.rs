//! The campaign the game ships with.
//!
//! Kept in sync with `data/campaign.ron`; the loader tests compare the two.
use echoes_core::{Bounds, Campaign, ConfigError, GameConfig, LevelSpec, Position};

/// Thickness of the walls framing every built-in level.
pub const BORDER_THICKNESS: u32 = 20;

const START: Position = Position::new(100, 300);
const SCREEN: Bounds = Bounds::new(GameConfig::SCREEN_WIDTH, GameConfig::SCREEN_HEIGHT);

/// One pressure plate holding one gate: an echo has to stand on the plate
/// while the live actor walks through.
pub fn plate_level() -> LevelSpec {
    LevelSpec::new(1, START, 3)
        .bordered(SCREEN, BORDER_THICKNESS)
        .wall(200, 100, 20, 400)
        .wall(400, 100, 20, 300)
        .wall(600, 200, 20, 300)
        .pressure_plate(300, 200, 1)
        .gate(400, 400, 20, 100, 1)
        .exit(700, 300)
}

/// A plate and a terminal, each holding its own gate.
pub fn plate_and_terminal_level() -> LevelSpec {
    LevelSpec::new(2, START, 4)
        .bordered(SCREEN, BORDER_THICKNESS)
        .wall(200, 100, 20, 200)
        .wall(200, 400, 20, 100)
        .wall(400, 200, 20, 300)
        .wall(600, 100, 20, 200)
        .wall(600, 400, 20, 100)
        .pressure_plate(300, 200, 1)
        .terminal(300, 400, 2)
        .gate(400, 300, 20, 100, 1)
        .gate(600, 300, 20, 100, 2)
        .exit(700, 300)
}

pub fn levels() -> Vec<LevelSpec> {
    vec![plate_level(), plate_and_terminal_level()]
}

pub fn campaign() -> Result<Campaign, ConfigError> {
    Campaign::new(levels())
}
