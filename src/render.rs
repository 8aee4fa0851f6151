use ratatui::prelude::*;

use crate::config::{
    BACKGROUND, FOOD_COLOR, GAME_OVER_COLOR, GAME_OVER_TEXT, RESTART_COLOR, RESTART_TEXT,
    SCORE_COLOR, SNAKE_COLOR, TILE_COLS, TILE_INSET_SYMBOL,
};
use crate::game::{Game, Phase};
use crate::grid::{Grid, Tile};

/// Terminal cells needed to show the whole board.
pub fn board_size(grid: Grid) -> (u16, u16) {
    let side = u16::try_from(grid.size()).unwrap_or(u16::MAX);
    (side.saturating_mul(TILE_COLS), side)
}

fn paint_tile(buf: &mut Buffer, board: Rect, tile: Tile, color: Color) {
    let x = board.x + tile.x as u16 * TILE_COLS;
    let y = board.y + tile.y as u16;
    if !board.contains(Position::new(x, y)) {
        return;
    }
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(" ").set_bg(color);
    }
    // The second column only half fills, which separates neighbouring tiles.
    if !board.contains(Position::new(x + 1, y)) {
        return;
    }
    if let Some(cell) = buf.cell_mut((x + 1, y)) {
        cell.set_symbol(TILE_INSET_SYMBOL).set_fg(color).set_bg(BACKGROUND);
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = board_size(self.grid());
        let board = Rect::new(area.x, area.y, width, height).intersection(area);
        if board.is_empty() {
            return;
        }

        for y in board.top()..board.bottom() {
            for x in board.left()..board.right() {
                buf[(x, y)].reset();
                buf[(x, y)].set_bg(BACKGROUND);
            }
        }

        for segment in self.snake() {
            paint_tile(buf, board, *segment, SNAKE_COLOR);
        }
        paint_tile(buf, board, self.food(), FOOD_COLOR);

        let score_row = Rect::new(
            board.x + 1,
            board.bottom() - 1,
            board.width.saturating_sub(1),
            1,
        );
        Line::from(format!("Score: {}", self.score()))
            .style(Style::new().fg(SCORE_COLOR).bg(BACKGROUND))
            .render(score_row, buf);

        if self.phase() == Phase::Over {
            buf.set_style(board, Style::new().add_modifier(Modifier::DIM));

            let middle = board.y + board.height / 2;
            let banner = Rect::new(board.x, middle.saturating_sub(1), board.width, 1);
            Line::from(GAME_OVER_TEXT)
                .style(
                    Style::new()
                        .fg(GAME_OVER_COLOR)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center)
                .render(banner.intersection(board), buf);

            let prompt = Rect::new(board.x, middle + 1, board.width, 1);
            Line::from(RESTART_TEXT)
                .style(Style::new().fg(RESTART_COLOR))
                .alignment(Alignment::Center)
                .render(prompt.intersection(board), buf);
        }
    }
}
