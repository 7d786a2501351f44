//! Typed commands to intents

use battler_core::engine::Intent;
use battler_core::state::Screen;
use battler_core::types::{MoveType, Stat, MOVE_BUTTONS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Help,
    Quit,
}

pub fn help(screen: Screen) -> &'static str {
    match screen {
        Screen::Setup => {
            "name <name> | type <type> | + <stat> | - <stat> | start | quit\n\
             stats: speed health defense strength luck"
        }
        Screen::Battle => "attack | defend | special | next | new | quit",
        Screen::LevelUp => "+ <stat> | - <stat> | confirm | quit",
        Screen::Victory => "new | quit",
    }
}

/// Parse one input line for the given screen.
///
/// Screen checks beyond picking the right intent are left to the state
/// machine, which reports them as notices.
pub fn parse_command(line: &str, screen: Screen) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let intent = match word.to_ascii_lowercase().as_str() {
        "" => return Err(String::from("type 'help' for commands")),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        "dismiss" | "ok" => Intent::DismissNotice,
        "name" => Intent::SetName {
            name: rest.to_string(),
        },
        "type" => {
            if rest.is_empty() {
                return Err(String::from("usage: type <creature type>"));
            }
            Intent::SelectType {
                creature_type: rest.to_ascii_lowercase(),
            }
        }
        "+" | "-" => {
            let stat = Stat::parse(rest).ok_or_else(|| format!("unknown stat '{}'", rest))?;
            let delta = if word == "+" { 1 } else { -1 };
            match screen {
                Screen::LevelUp => Intent::AdjustLevelUp { stat, delta },
                _ => Intent::AdjustStat { stat, delta },
            }
        }
        "start" => Intent::StartGame,
        "move" => Intent::SubmitMove {
            move_type: MoveType::new(&rest.to_ascii_lowercase()),
        },
        m if MOVE_BUTTONS.contains(&m) => Intent::SubmitMove {
            move_type: MoveType::new(m),
        },
        "confirm" => Intent::ConfirmLevelUp,
        "next" => Intent::NextMatch,
        "new" => Intent::NewGame,
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(Command::Intent(intent))
}
