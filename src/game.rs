use std::collections::VecDeque;

use log::{debug, info};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::food::{place_food, BoardFull};
use crate::grid::{Grid, Tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// No movement yet. Only seen before the first input of a fresh game.
    Idle,
    North,
    East,
    South,
    West,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Idle => (0, 0),
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    fn axis(&self) -> Option<Axis> {
        match self {
            Direction::Idle => None,
            Direction::East | Direction::West => Some(Axis::Horizontal),
            Direction::North | Direction::South => Some(Axis::Vertical),
        }
    }

    /// A turn is allowed onto the other axis, or from standstill. Staying on
    /// the current axis would either change nothing or reverse into the neck.
    fn can_turn_to(&self, new_direction: Direction) -> bool {
        match (self.axis(), new_direction.axis()) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(current), Some(new)) => current != new,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Over,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// Not running, nothing moved.
    Frozen,
    /// Moved one tile.
    Slithered,
    /// Ate the food; carries the new score.
    Nommed(u32),
    /// Left the board or ran into itself.
    Collision,
    /// Grew onto the last free tile.
    BoardFull,
}

pub struct Game<R = ThreadRng> {
    grid: Grid,
    snake: VecDeque<Tile>,
    food: Tile,
    /// Direction the next tick will move in.
    direction: Direction,
    /// Direction of the last completed move.
    heading: Direction,
    score: u32,
    phase: Phase,
    speed: u32,
    rng: R,
}

impl Game<ThreadRng> {
    pub fn new(grid: Grid, speed: u32) -> Result<Self, BoardFull> {
        Game::new_with_rng(grid, speed, rand::thread_rng())
    }
}

impl<R: Rng> Game<R> {
    /// A fresh game starts without a direction; the player has to steer before
    /// the first tick or the head lands on itself.
    pub fn new_with_rng(grid: Grid, speed: u32, mut rng: R) -> Result<Self, BoardFull> {
        let snake = VecDeque::from([grid.center()]);
        let food = place_food(grid, &snake, &mut rng)?;
        Ok(Game {
            grid,
            snake,
            food,
            direction: Direction::Idle,
            heading: Direction::Idle,
            score: 0,
            phase: Phase::Running,
            speed: speed.max(1),
            rng,
        })
    }
}

impl<R> Game<R> {
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Segments, head first.
    pub fn snake(&self) -> &VecDeque<Tile> {
        &self.snake
    }

    pub fn head(&self) -> Tile {
        self.snake[0]
    }

    pub fn food(&self) -> Tile {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }
}

impl<R: Rng> Game<R> {
    /// Advances the snake by one tile.
    pub fn tick(&mut self) -> StepResult {
        if self.phase != Phase::Running {
            return StepResult::Frozen;
        }

        let (dx, dy) = self.direction.delta();
        let new_head = self.head().offset(dx, dy);

        if !self.grid.contains(new_head) || self.snake.contains(&new_head) {
            self.phase = Phase::Over;
            info!("Game over at {:?}, final score {}", new_head, self.score);
            return StepResult::Collision;
        }

        self.snake.push_front(new_head);
        self.heading = self.direction;

        if new_head != self.food {
            self.snake.pop_back();
            return StepResult::Slithered;
        }

        self.score += 1;
        match place_food(self.grid, &self.snake, &mut self.rng) {
            Ok(food) => {
                self.food = food;
                info!("Nommed, score {}, next food at {:?}", self.score, food);
                StepResult::Nommed(self.score)
            }
            Err(BoardFull) => {
                self.phase = Phase::Over;
                info!("Board filled, final score {}", self.score);
                StepResult::BoardFull
            }
        }
    }

    /// Requests a new direction for the next tick. Returns whether it was taken.
    ///
    /// Turns are judged against the last move, so two quick presses between
    /// ticks cannot fold the head back onto the neck. Before the first move
    /// the pending direction is the reference.
    pub fn steer(&mut self, new_direction: Direction) -> bool {
        let reference = match self.heading {
            Direction::Idle => self.direction,
            heading => heading,
        };
        if self.phase == Phase::Over || !reference.can_turn_to(new_direction) {
            return false;
        }
        self.direction = new_direction;
        true
    }

    /// Flips between running and paused. A finished game stays finished.
    pub fn toggle_pause(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Over => {
                debug!("Pause ignored, game is over");
                Phase::Over
            }
        };
        self.phase
    }

    pub fn faster(&mut self) -> u32 {
        self.speed = self.speed.saturating_sub(1).max(1);
        self.speed
    }

    pub fn slower(&mut self) -> u32 {
        self.speed = self.speed.saturating_add(1);
        self.speed
    }

    /// Puts a single-tile snake back at the centre heading east with a zero
    /// score. Speed is kept.
    pub fn restart(&mut self) -> Result<(), BoardFull> {
        self.snake = VecDeque::from([self.grid.center()]);
        self.direction = Direction::East;
        self.heading = Direction::East;
        self.score = 0;
        self.food = place_food(self.grid, &self.snake, &mut self.rng)?;
        self.phase = Phase::Running;
        info!("Restarted, food at {:?}", self.food);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game_with(snake: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> Game<StdRng> {
        let mut game = Game::new_with_rng(Grid::new(20), 10, StdRng::seed_from_u64(11)).unwrap();
        game.snake = snake.iter().map(|&t| Tile::from(t)).collect();
        game.direction = direction;
        game.heading = direction;
        game.food = food.into();
        game
    }

    fn assert_no_duplicates(game: &Game<StdRng>) {
        let segments: std::collections::HashSet<_> = game.snake.iter().collect();
        assert_eq!(segments.len(), game.snake.len(), "snake overlaps itself");
    }

    #[test]
    fn test_new_game() {
        let game = Game::new_with_rng(Grid::new(20), 10, StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(game.snake, VecDeque::from([Tile::new(10, 10)]));
        assert_eq!(game.direction, Direction::Idle);
        assert_eq!(game.phase, Phase::Running);
        assert_eq!(game.score, 0);
        assert_eq!(game.speed, 10);
        assert_ne!(game.food, game.head());
    }

    #[test]
    fn test_slither_east() {
        let mut game = game_with(&[(10, 10)], Direction::East, (0, 0));

        assert_eq!(game.tick(), StepResult::Slithered);
        assert_eq!(game.snake, VecDeque::from([Tile::new(11, 10)]));
        assert_eq!(game.food, Tile::new(0, 0));
        assert_eq!(game.score, 0);
        assert_eq!(game.phase, Phase::Running);
    }

    #[test]
    fn test_slither_keeps_length() {
        let mut game = game_with(&[(5, 5), (4, 5), (3, 5)], Direction::South, (0, 0));

        assert_eq!(game.tick(), StepResult::Slithered);
        assert_eq!(
            game.snake,
            VecDeque::from([Tile::new(5, 6), Tile::new(5, 5), Tile::new(4, 5)])
        );
        assert_no_duplicates(&game);
    }

    #[test]
    fn test_nomming_grows_and_scores() {
        let mut game = game_with(&[(5, 5), (4, 5)], Direction::East, (6, 5));

        assert_eq!(game.tick(), StepResult::Nommed(1));
        assert_eq!(game.snake.len(), 3);
        assert_eq!(game.head(), Tile::new(6, 5));
        assert_eq!(game.score, 1);
        assert!(!game.snake.contains(&game.food));
        assert!(game.grid.contains(game.food));
        assert_no_duplicates(&game);
    }

    #[test]
    fn test_wall_collision() {
        let mut game = game_with(&[(0, 10)], Direction::West, (5, 5));

        assert_eq!(game.tick(), StepResult::Collision);
        assert_eq!(game.phase, Phase::Over);
        assert_eq!(game.snake, VecDeque::from([Tile::new(0, 10)]));
        assert_eq!(game.score, 0);

        // Over freezes everything.
        assert_eq!(game.tick(), StepResult::Frozen);
        assert_eq!(game.snake, VecDeque::from([Tile::new(0, 10)]));
    }

    #[test]
    fn test_wall_collision_all_edges() {
        for (start, direction) in [
            ((19, 3), Direction::East),
            ((3, 0), Direction::North),
            ((3, 19), Direction::South),
        ] {
            let mut game = game_with(&[start], direction, (10, 10));
            assert_eq!(game.tick(), StepResult::Collision);
        }
    }

    #[test]
    fn test_self_collision() {
        // Head at (5,5) turning north into a loop.
        let snake = [(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)];
        let mut game = game_with(&snake, Direction::North, (0, 0));

        assert_eq!(game.tick(), StepResult::Collision);
        assert_eq!(game.phase, Phase::Over);
        assert_eq!(game.snake.len(), 5);
    }

    #[test]
    fn test_tail_counts_as_body() {
        // Chasing the tail still collides, the tail has not moved yet.
        let snake = [(5, 5), (6, 5), (6, 6), (5, 6)];
        let mut game = game_with(&snake, Direction::South, (0, 0));

        assert_eq!(game.tick(), StepResult::Collision);
    }

    #[test]
    fn test_idle_first_tick_ends_game() {
        let mut game = Game::new_with_rng(Grid::new(20), 10, StdRng::seed_from_u64(5)).unwrap();

        assert_eq!(game.tick(), StepResult::Collision);
        assert_eq!(game.phase, Phase::Over);
    }

    #[test]
    fn test_change_direction() {
        let mut game = game_with(&[(5, 5), (4, 5)], Direction::East, (0, 0));

        // Can't reverse direction
        assert!(!game.steer(Direction::West));
        assert_eq!(game.direction, Direction::East);

        // Same axis is a no-op
        assert!(!game.steer(Direction::East));

        assert!(game.steer(Direction::North));
        assert_eq!(game.direction, Direction::North);
        game.tick();
        assert!(!game.steer(Direction::South));
        assert_eq!(game.direction, Direction::North);
    }

    #[test]
    fn test_reversal_rejected_between_ticks() {
        let mut game = game_with(&[(5, 5), (4, 5)], Direction::Idle, (0, 0));

        assert!(game.steer(Direction::East));
        assert!(!game.steer(Direction::West));
        assert_eq!(game.direction, Direction::East);
    }

    #[test]
    fn test_last_valid_turn_wins() {
        let mut game = game_with(&[(5, 5), (4, 5)], Direction::East, (0, 0));

        assert!(game.steer(Direction::North));
        assert!(game.steer(Direction::South));
        assert_eq!(game.direction, Direction::South);

        assert!(game.steer(Direction::North));
        assert_eq!(game.direction, Direction::North);
    }

    #[test]
    fn test_quick_double_turn_cannot_reverse() {
        let mut game = game_with(&[(5, 5), (4, 5)], Direction::East, (0, 0));

        assert!(game.steer(Direction::North));
        assert!(!game.steer(Direction::West));
        assert_eq!(game.direction, Direction::North);

        assert_eq!(game.tick(), StepResult::Slithered);
        assert_eq!(game.phase, Phase::Running);
        assert_eq!(game.snake, VecDeque::from([Tile::new(5, 4), Tile::new(5, 5)]));

        // After the move north, west is a real turn.
        assert!(game.steer(Direction::West));
        assert_eq!(game.tick(), StepResult::Slithered);
        assert_eq!(game.head(), Tile::new(4, 4));
    }

    #[test]
    fn test_heading_follows_moves() {
        let mut game = Game::new_with_rng(Grid::new(20), 10, StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(game.heading, Direction::Idle);

        game.steer(Direction::South);
        game.tick();
        assert_eq!(game.heading, Direction::South);

        game.phase = Phase::Over;
        game.restart().unwrap();
        assert_eq!(game.heading, Direction::East);
        assert!(!game.steer(Direction::West));
    }

    #[test]
    fn test_idle_accepts_any_direction() {
        for direction in [Direction::North, Direction::East, Direction::South, Direction::West] {
            let mut game = game_with(&[(5, 5)], Direction::Idle, (0, 0));
            assert!(game.steer(direction));
            assert_eq!(game.direction, direction);
        }

        let mut game = game_with(&[(5, 5)], Direction::East, (0, 0));
        assert!(!game.steer(Direction::Idle));
    }

    #[test]
    fn test_steer_while_paused_and_over() {
        let mut game = game_with(&[(5, 5)], Direction::East, (0, 0));

        game.toggle_pause();
        assert!(game.steer(Direction::North));
        assert_eq!(game.direction, Direction::North);

        game.phase = Phase::Over;
        assert!(!game.steer(Direction::East));
        assert_eq!(game.direction, Direction::North);
    }

    #[test]
    fn test_pause_freezes_state() {
        let mut game = game_with(&[(5, 5), (4, 5)], Direction::East, (6, 5));

        assert_eq!(game.toggle_pause(), Phase::Paused);
        for _ in 0..100 {
            assert_eq!(game.tick(), StepResult::Frozen);
        }
        assert_eq!(game.snake, VecDeque::from([Tile::new(5, 5), Tile::new(4, 5)]));
        assert_eq!(game.food, Tile::new(6, 5));
        assert_eq!(game.score, 0);

        assert_eq!(game.toggle_pause(), Phase::Running);
        assert_eq!(game.tick(), StepResult::Nommed(1));
    }

    #[test]
    fn test_pause_ignored_when_over() {
        let mut game = game_with(&[(0, 0)], Direction::West, (5, 5));
        game.tick();

        assert_eq!(game.toggle_pause(), Phase::Over);
        assert_eq!(game.phase, Phase::Over);
    }

    #[test]
    fn test_speed_bounds() {
        let mut game = game_with(&[(5, 5)], Direction::East, (0, 0));
        game.speed = 2;

        assert_eq!(game.faster(), 1);
        assert_eq!(game.faster(), 1);
        assert_eq!(game.slower(), 2);
        for _ in 0..50 {
            game.slower();
        }
        assert_eq!(game.speed, 52);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = game_with(&[(0, 3), (1, 3), (2, 3)], Direction::West, (9, 9));
        game.score = 7;
        game.speed = 4;
        game.tick();
        assert_eq!(game.phase, Phase::Over);

        game.restart().unwrap();

        assert_eq!(game.snake, VecDeque::from([Tile::new(10, 10)]));
        assert_eq!(game.direction, Direction::East);
        assert_eq!(game.score, 0);
        assert_eq!(game.phase, Phase::Running);
        assert_eq!(game.speed, 4);
        assert_ne!(game.food, Tile::new(10, 10));
    }

    #[test]
    fn test_restart_from_paused() {
        let mut game = game_with(&[(3, 3), (3, 4)], Direction::North, (9, 9));
        game.score = 2;
        game.toggle_pause();

        game.restart().unwrap();
        assert_eq!(game.phase, Phase::Running);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_board_full_ends_game() {
        let mut game = Game::new_with_rng(Grid::new(2), 1, StdRng::seed_from_u64(9)).unwrap();
        game.snake = VecDeque::from([Tile::new(1, 0), Tile::new(0, 0), Tile::new(0, 1)]);
        game.direction = Direction::South;
        game.food = Tile::new(1, 1);

        assert_eq!(game.tick(), StepResult::BoardFull);
        assert_eq!(game.phase, Phase::Over);
        assert_eq!(game.score, 1);
        assert_eq!(game.snake.len(), 4);
    }

    #[test]
    fn test_long_run_never_overlaps() {
        let mut game = Game::new_with_rng(Grid::new(8), 1, StdRng::seed_from_u64(21)).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let turns = [Direction::North, Direction::East, Direction::South, Direction::West];
        game.steer(Direction::East);

        for _ in 0..500 {
            if game.phase == Phase::Over {
                game.restart().unwrap();
            }
            game.steer(turns[rng.gen_range(0..turns.len())]);
            let before = game.snake.len();
            match game.tick() {
                StepResult::Slithered => assert_eq!(game.snake.len(), before),
                StepResult::Nommed(_) => assert_eq!(game.snake.len(), before + 1),
                _ => {}
            }
            if game.phase == Phase::Running {
                assert_no_duplicates(&game);
                assert!(!game.snake.contains(&game.food));
            }
        }
    }
}
