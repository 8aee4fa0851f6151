//! Constants and the tunable game configuration.
use std::fmt;
use std::time::Duration;

use ratatui::style::Color;

use crate::grid::Grid;

pub const LOG_FILE: &str = "tilesnek.log";
pub const LOG_LEVEL_ENV: &str = "TILESNEK_LOG";

/// Terminal columns used to draw one tile. Terminal cells are roughly twice as
/// tall as they are wide, so two columns keep tiles square-ish.
pub const TILE_COLS: u16 = 2;

pub const BACKGROUND: Color = Color::Rgb(0x11, 0x11, 0x11);
pub const SNAKE_COLOR: Color = Color::Rgb(0x00, 0xff, 0x00);
pub const FOOD_COLOR: Color = Color::Rgb(0xff, 0x00, 0x00);
pub const SCORE_COLOR: Color = Color::Rgb(0x00, 0xff, 0x00);
pub const GAME_OVER_COLOR: Color = Color::Rgb(0xff, 0x00, 0x00);
pub const RESTART_COLOR: Color = Color::Rgb(0x00, 0xff, 0x00);

/// Half-width block drawn in a tile's second column, leaving a gap between tiles.
pub const TILE_INSET_SYMBOL: &str = "▌";

pub const GAME_OVER_TEXT: &str = "GAME OVER!";
pub const RESTART_TEXT: &str = "Press Enter to Restart";

/// Upper bound on frames replayed after a single wake-up of the loop.
pub const MAX_CATCH_UP_FRAMES: u32 = 8;

/// Largest board side, in tiles. Keeps the bordered board within terminal
/// coordinates.
pub const MAX_GRID_SIDE: u16 = 255;

/// Rejection-sampling attempts before food placement falls back to a scan.
pub const FOOD_SAMPLE_ATTEMPTS: u32 = 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Side of the square drawing surface, in pixels.
    pub canvas_px: u16,
    /// Side of one tile, in pixels.
    pub tile_px: u16,
    /// Frames per tick; lower is faster.
    pub initial_speed: u32,
    /// Length of one display frame.
    pub frame_duration: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            canvas_px: 400,
            tile_px: 20,
            initial_speed: 10,
            frame_duration: Duration::from_micros(16_667),
        }
    }
}

impl GameConfig {
    /// Checks the geometry and derives the playable grid from it.
    pub fn validate(&self) -> Result<Grid, ConfigError> {
        // A single-tile board leaves no room for food next to the snake.
        if self.tile_px == 0 || (self.canvas_px as u32) < 2 * self.tile_px as u32 {
            return Err(ConfigError::TileTooLarge {
                canvas_px: self.canvas_px,
                tile_px: self.tile_px,
            });
        }
        if self.canvas_px % self.tile_px != 0 {
            return Err(ConfigError::NotTileMultiple {
                canvas_px: self.canvas_px,
                tile_px: self.tile_px,
            });
        }
        let side = self.canvas_px / self.tile_px;
        if side > MAX_GRID_SIDE {
            return Err(ConfigError::TooManyTiles { side });
        }
        if self.initial_speed == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.frame_duration.is_zero() {
            return Err(ConfigError::ZeroFrame);
        }
        Ok(Grid::from_canvas(self.canvas_px, self.tile_px))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    TileTooLarge { canvas_px: u16, tile_px: u16 },
    NotTileMultiple { canvas_px: u16, tile_px: u16 },
    TooManyTiles { side: u16 },
    ZeroSpeed,
    ZeroFrame,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TileTooLarge { canvas_px, tile_px } => write!(
                f,
                "tile size {}px leaves fewer than two tiles per side on a {}px canvas",
                tile_px, canvas_px
            ),
            ConfigError::NotTileMultiple { canvas_px, tile_px } => write!(
                f,
                "canvas size {}px is not a multiple of the {}px tile size",
                canvas_px, tile_px
            ),
            ConfigError::TooManyTiles { side } => write!(
                f,
                "{} tiles per side exceeds the limit of {}",
                side, MAX_GRID_SIDE
            ),
            ConfigError::ZeroSpeed => write!(f, "initial speed must be at least 1"),
            ConfigError::ZeroFrame => write!(f, "frame duration must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}
