use std::io::{self, Stdout};
use std::time::Instant;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use rand::Rng;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::audio::{Chime, Cue, TerminalBell};
use crate::config::GameConfig;
use crate::game::Game;
use crate::input::{self, Command, Control};
use crate::pacer::FramePacer;
use crate::render::board_size;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run(config: GameConfig) -> Result<(), io::Error> {
    let grid = config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;
    let game = Game::new(grid, config.initial_speed)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    info!("Board {}x{}, {} frames per tick", grid.size(), grid.size(), game.speed());

    let mut tui = TuiGuard::new()?;
    let result = run_loop(
        tui.terminal_mut(),
        game,
        FramePacer::new(config.frame_duration),
        TerminalBell::stdout(),
    );
    if let Err(e) = &result {
        error!("Game loop failed: {}", e);
    }
    result
}

fn run_loop<R: Rng>(
    terminal: &mut Term,
    mut game: Game<R>,
    mut pacer: FramePacer,
    mut chime: impl Chime,
) -> Result<(), io::Error> {
    let mut needs_draw = true;
    let mut last_wake = Instant::now();

    loop {
        if needs_draw {
            terminal.draw(|frame| draw(frame, &game))?;
            needs_draw = false;
        }

        if event::poll(pacer.until_next_frame())? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(command) = Command::from_key_event(key) {
                        if input::apply(command, &mut game) == Control::Exit {
                            info!(
                                "Exiting with score {} after {} frames",
                                game.score(),
                                pacer.frame_count()
                            );
                            return Ok(());
                        }
                    }
                }
                Event::Resize(..) => needs_draw = true,
                _ => {}
            }
        }

        let now = Instant::now();
        let due = pacer.advance(now - last_wake);
        last_wake = now;
        needs_draw |= run_frames(&mut game, &mut pacer, &mut chime, due);
    }
}

/// Plays `frames` display frames against the game. Returns whether any of
/// them asked for a redraw.
fn run_frames<R: Rng>(
    game: &mut Game<R>,
    pacer: &mut FramePacer,
    chime: &mut impl Chime,
    frames: u32,
) -> bool {
    let mut draw = false;
    for _ in 0..frames {
        let work = pacer.frame(game.phase(), game.speed());
        if work.tick {
            for cue in Cue::for_step(game.tick()) {
                chime.play(*cue);
            }
        }
        draw |= work.draw;
    }
    draw
}

fn draw<R>(frame: &mut Frame, game: &Game<R>) {
    let area = frame.area();
    let (board_w, board_h) = board_size(game.grid());
    let (outer_w, outer_h) = (board_w.saturating_add(2), board_h.saturating_add(2));

    if area.width < outer_w || area.height < outer_h {
        frame.render_widget(
            Paragraph::new(format!("Resize to {}x{}", outer_w, outer_h))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("SNAKE")),
            area,
        );
        return;
    }

    let outer = Rect::new(
        area.x + (area.width - outer_w) / 2,
        area.y + (area.height - outer_h) / 2,
        outer_w,
        outer_h,
    );
    let block = Block::default()
        .title("SNAKE")
        .title_bottom(" p pause  +/- speed  q quit ")
        .borders(Borders::ALL);
    let inner = block.inner(outer);
    frame.render_widget(block, outer);
    frame.render_widget(game, inner);
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self, io::Error> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
