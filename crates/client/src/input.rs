//! Line-oriented input for the headless client.
//!
//! Each line of stdin is one command. Movement keys follow the usual
//! `wasd` / `hjkl` layout; words work too (`up`, `left 4`).

use echoes_core::{Direction, RestartScope};

/// Upper bound on the repeat count of a single movement line.
pub const MAX_REPEAT: u32 = 120;

/// High-level outcome of parsing one input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineCommand {
    Quit,
    Help,
    Status,
    /// Move `steps` ticks in `direction`.
    Move { direction: Direction, steps: u32 },
    /// Keep moving until released; `None` releases.
    Hold(Option<Direction>),
    Interact,
    Pause,
    Resume,
    Continue,
    Restart(RestartScope),
    /// Zero-based level index.
    SelectLevel(usize),
    /// Blank line.
    None,
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  w/a/s/d, h/j/k/l, up/down/left/right [n]   move (n ticks, default 1)
  hold <direction> | release                 keep moving / stop
  e, interact                                use a switch or terminal
  p, pause | r, resume                       toggle the loop timer
  c, continue                                next level / play again
  restart [all]                              restart this level (or the campaign)
  level <n>                                  jump to level n (1-based)
  status | help | q, quit";

pub fn parse_line(line: &str) -> LineCommand {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return LineCommand::None;
    };
    let head = head.to_ascii_lowercase();
    let arg = words.next();

    if let Some(direction) = direction_key(&head) {
        return movement(direction, arg);
    }

    match head.as_str() {
        "q" | "quit" | "exit" => LineCommand::Quit,
        "?" | "help" => LineCommand::Help,
        "status" | "." => LineCommand::Status,
        "e" | "interact" => LineCommand::Interact,
        "p" | "pause" => LineCommand::Pause,
        "r" | "resume" => LineCommand::Resume,
        "c" | "continue" => LineCommand::Continue,
        "release" => LineCommand::Hold(None),
        "hold" => match arg.and_then(|word| direction_key(&word.to_ascii_lowercase())) {
            Some(direction) => LineCommand::Hold(Some(direction)),
            None => LineCommand::Unknown(line.trim().to_string()),
        },
        "restart" => match arg {
            Some("all") => LineCommand::Restart(RestartScope::FirstLevel),
            _ => LineCommand::Restart(RestartScope::CurrentLevel),
        },
        "level" => match arg.and_then(|word| word.parse::<usize>().ok()) {
            Some(number) if number > 0 => LineCommand::SelectLevel(number - 1),
            _ => LineCommand::Unknown(line.trim().to_string()),
        },
        _ => LineCommand::Unknown(line.trim().to_string()),
    }
}

fn direction_key(word: &str) -> Option<Direction> {
    let direction = match word {
        "w" | "k" => Direction::Up,
        "s" | "j" => Direction::Down,
        "a" | "h" => Direction::Left,
        "d" | "l" => Direction::Right,
        _ => word.parse().ok()?,
    };
    direction.is_cardinal().then_some(direction)
}

fn movement(direction: Direction, count: Option<&str>) -> LineCommand {
    let steps = count
        .and_then(|word| word.parse::<u32>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_REPEAT);
    LineCommand::Move { direction, steps }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_words_map_to_directions() {
        for (line, direction) in [
            ("w", Direction::Up),
            ("J", Direction::Down),
            ("left", Direction::Left),
            ("RIGHT", Direction::Right),
        ] {
            assert_eq!(
                parse_line(line),
                LineCommand::Move {
                    direction,
                    steps: 1
                },
                "line {line:?}"
            );
        }
    }

    #[test]
    fn repeat_count_is_clamped() {
        assert_eq!(
            parse_line("d 4"),
            LineCommand::Move {
                direction: Direction::Right,
                steps: 4
            }
        );
        assert_eq!(
            parse_line("down 100000"),
            LineCommand::Move {
                direction: Direction::Down,
                steps: MAX_REPEAT
            }
        );
        assert_eq!(
            parse_line("up 0"),
            LineCommand::Move {
                direction: Direction::Up,
                steps: 1
            }
        );
    }

    #[test]
    fn none_is_not_a_movement() {
        assert_eq!(parse_line("none"), LineCommand::Unknown("none".into()));
        assert_eq!(parse_line("hold none"), LineCommand::Unknown("hold none".into()));
    }

    #[test]
    fn flow_commands() {
        assert_eq!(parse_line("  "), LineCommand::None);
        assert_eq!(parse_line("e"), LineCommand::Interact);
        assert_eq!(parse_line("hold l"), LineCommand::Hold(Some(Direction::Right)));
        assert_eq!(parse_line("release"), LineCommand::Hold(None));
        assert_eq!(
            parse_line("restart"),
            LineCommand::Restart(RestartScope::CurrentLevel)
        );
        assert_eq!(
            parse_line("restart all"),
            LineCommand::Restart(RestartScope::FirstLevel)
        );
        assert_eq!(parse_line("level 2"), LineCommand::SelectLevel(1));
        assert_eq!(parse_line("level 0"), LineCommand::Unknown("level 0".into()));
        assert_eq!(parse_line("Q"), LineCommand::Quit);
    }
}
