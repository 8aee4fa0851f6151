use std::io::{self, Write};

use crossterm::{execute, style::Print};
use log::{debug, warn};

use crate::game::StepResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Eat,
    GameOver,
}

impl Cue {
    /// Cues to play for a step, in order. Filling the board is still a meal.
    pub fn for_step(result: StepResult) -> &'static [Cue] {
        match result {
            StepResult::Nommed(_) => &[Cue::Eat],
            StepResult::Collision => &[Cue::GameOver],
            StepResult::BoardFull => &[Cue::Eat, Cue::GameOver],
            StepResult::Frozen | StepResult::Slithered => &[],
        }
    }
}

/// Fire-and-forget sound output.
pub trait Chime {
    fn play(&mut self, cue: Cue);
}

/// Rings the terminal bell on game over. Eating is silent, a bell for every
/// morsel drowns everything else out.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalBell::new(io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }
}

impl<W: Write> Chime for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        match cue {
            Cue::Eat => debug!("Chime: eat"),
            Cue::GameOver => {
                if let Err(e) = execute!(self.out, Print('\x07')) {
                    warn!("Could not ring the bell: {}", e);
                }
            }
        }
    }
}
