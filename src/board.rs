use crate::palette::{TileColor, PALETTE};
use crate::rules::{GRID_SIZE, TILE_COUNT};
use rand::seq::SliceRandom;
use rand::Rng;

/// Grid keys, row-major, laid out like the left-hand block of a keyboard
pub const KEY_ROWS: [[char; GRID_SIZE]; GRID_SIZE] = [
    ['1', '2', '3', '4'],
    ['q', 'w', 'e', 'r'],
    ['a', 's', 'd', 'f'],
    ['z', 'x', 'c', 'v'],
];

/// Tile index for a grid key
pub fn tile_for_key(c: char) -> Option<usize> {
    let c = c.to_ascii_lowercase();
    KEY_ROWS.iter().flatten().position(|k| *k == c)
}

pub fn key_for_tile(index: usize) -> Option<char> {
    KEY_ROWS.iter().flatten().nth(index).copied()
}

/// The colored tiles. Every palette color appears exactly twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [TileColor; TILE_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        let mut tiles = [PALETTE[0]; TILE_COUNT];
        for (i, tile) in tiles.iter_mut().enumerate() {
            *tile = PALETTE[i % PALETTE.len()];
        }
        Self { tiles }
    }
}

impl Board {
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut board = Self::default();
        board.shuffle(rng);
        board
    }

    /// Recolor every tile from a fresh palette permutation
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut colors = PALETTE;
        colors.shuffle(rng);
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            *tile = colors[i % colors.len()];
        }
    }

    pub fn color_at(&self, index: usize) -> Option<TileColor> {
        self.tiles.get(index).copied()
    }

    /// Rows of the grid, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[TileColor]> {
        self.tiles.chunks(GRID_SIZE)
    }
}
