use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error, info};
use rand::Rng;

use crate::game::{Direction, Game, Phase};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Restart,
    Faster,
    Slower,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

impl Command {
    pub fn from_key_event(key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        let command = match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => Command::TogglePause,
            KeyCode::Enter => Command::Restart,
            KeyCode::Char('+') | KeyCode::Char('=') => Command::Faster,
            KeyCode::Char('-') | KeyCode::Char('_') => Command::Slower,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,

            KeyCode::Up => Command::Steer(Direction::North),
            KeyCode::Down => Command::Steer(Direction::South),
            KeyCode::Left => Command::Steer(Direction::West),
            KeyCode::Right => Command::Steer(Direction::East),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'a' => Command::Steer(Direction::West),
                'd' => Command::Steer(Direction::East),
                's' => Command::Steer(Direction::North),
                'z' => Command::Steer(Direction::South),
                _ => {
                    debug!("Ignoring key {:?}", key);
                    return None;
                }
            },
            _ => {
                debug!("Ignoring key {:?}", key);
                return None;
            }
        };
        Some(command)
    }
}

/// Applies one command to the game as soon as it arrives. Turns land in the
/// direction field, so the last accepted one before a tick is the one used.
pub fn apply<R: Rng>(command: Command, game: &mut Game<R>) -> Control {
    match command {
        Command::Quit => return Control::Exit,
        Command::TogglePause => {
            let phase = game.toggle_pause();
            info!("Pause toggled, now {:?}", phase);
        }
        Command::Restart => {
            if game.phase() == Phase::Over {
                if let Err(e) = game.restart() {
                    error!("Restart failed: {}", e);
                }
            }
        }
        Command::Faster => {
            let speed = game.faster();
            info!("Speed {} frames per tick", speed);
        }
        Command::Slower => {
            let speed = game.slower();
            info!("Speed {} frames per tick", speed);
        }
        Command::Steer(direction) => {
            if !game.steer(direction) {
                debug!("Turn {:?} rejected while heading {:?}", direction, game.direction());
            }
        }
    }
    Control::Continue
}
