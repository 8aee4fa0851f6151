use std::collections::VecDeque;
use std::fmt;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::config::FOOD_SAMPLE_ATTEMPTS;
use crate::grid::{Grid, Tile};

/// Every tile of the board is covered by the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardFull;

impl fmt::Display for BoardFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no free tile left for food")
    }
}

impl std::error::Error for BoardFull {}

/// Picks a tile uniformly at random among those not covered by `snake`.
///
/// Samples the whole board and rejects occupied tiles. After
/// [`FOOD_SAMPLE_ATTEMPTS`] misses it picks directly from the free tiles, so a
/// nearly full board still terminates and a full one reports [`BoardFull`].
pub fn place_food(
    grid: Grid,
    snake: &VecDeque<Tile>,
    rng: &mut impl Rng,
) -> Result<Tile, BoardFull> {
    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let tile = Tile::new(rng.gen_range(0..grid.size()), rng.gen_range(0..grid.size()));
        if !snake.contains(&tile) {
            return Ok(tile);
        }
    }

    grid.tiles()
        .filter(|tile| !snake.contains(tile))
        .choose(rng)
        .ok_or(BoardFull)
}
