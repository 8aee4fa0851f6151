/// A tile coordinate, column first. Signed so that a step off the board is
/// representable and can be rejected by [`Grid::contains`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Tile { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Tile {
        Tile {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Tile {
    fn from((x, y): (i32, i32)) -> Self {
        Tile { x, y }
    }
}

/// The playable N×N area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    size: i32,
}

impl Grid {
    pub fn new(size: u16) -> Self {
        Grid { size: size as i32 }
    }

    /// Derives the tile count from the surface and tile pixel sizes.
    pub fn from_canvas(canvas_px: u16, tile_px: u16) -> Self {
        Grid::new(canvas_px / tile_px)
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn contains(&self, tile: Tile) -> bool {
        (0..self.size).contains(&tile.x) && (0..self.size).contains(&tile.y)
    }

    pub fn center(&self) -> Tile {
        Tile::new(self.size / 2, self.size / 2)
    }

    /// Every tile, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Tile::new(x, y)))
    }
}
