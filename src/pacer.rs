use std::time::Duration;

use crate::config::MAX_CATCH_UP_FRAMES;
use crate::game::Phase;

/// What a single frame should do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameWork {
    pub tick: bool,
    pub draw: bool,
}

/// Turns elapsed wall time into display frames and decides which of them
/// advance the game. Knows nothing about the clock, so it can be driven by
/// hand.
#[derive(Debug)]
pub struct FramePacer {
    frame_duration: Duration,
    accumulated: Duration,
    frame: u64,
}

impl FramePacer {
    pub fn new(frame_duration: Duration) -> Self {
        FramePacer {
            frame_duration,
            accumulated: Duration::ZERO,
            frame: 0,
        }
    }

    /// Adds elapsed time and returns how many whole frames are due. Anything
    /// past [`MAX_CATCH_UP_FRAMES`] is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut due = 0;
        while self.accumulated >= self.frame_duration {
            self.accumulated -= self.frame_duration;
            due += 1;
            if due == MAX_CATCH_UP_FRAMES {
                self.accumulated = Duration::ZERO;
                break;
            }
        }
        due
    }

    /// Time left before the next frame is due.
    pub fn until_next_frame(&self) -> Duration {
        self.frame_duration.saturating_sub(self.accumulated)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Counts one frame. Every `speed`-th frame ticks a running game and
    /// redraws anything that is not paused.
    pub fn frame(&mut self, phase: Phase, speed: u32) -> FrameWork {
        self.frame += 1;
        let eligible = self.frame % u64::from(speed.max(1)) == 0;
        match phase {
            Phase::Paused => FrameWork::default(),
            Phase::Running => FrameWork {
                tick: eligible,
                draw: eligible,
            },
            Phase::Over => FrameWork {
                tick: false,
                draw: eligible,
            },
        }
    }
}
