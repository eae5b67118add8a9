//! The face-down draw pool.

use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileColor, MAX_RANK, MIN_RANK};
use crate::core::rng::GameRng;

/// Copies of each numbered tile in a standard box.
pub const COPIES_PER_TILE: usize = 2;

/// Jokers in a standard box.
pub const JOKERS_PER_BOX: usize = 2;

/// Total tiles in a standard box.
pub const BOX_SIZE: usize = COPIES_PER_TILE * 13 * 4 + JOKERS_PER_BOX;

/// Every tile in a standard box, unshuffled.
#[must_use]
pub fn standard_box() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(BOX_SIZE);
    for _ in 0..COPIES_PER_TILE {
        for color in TileColor::ALL {
            for rank in MIN_RANK..=MAX_RANK {
                tiles.push(Tile::number(rank, color));
            }
        }
    }
    tiles.extend(std::iter::repeat(Tile::Joker).take(JOKERS_PER_BOX));
    tiles
}

/// Ordered face-down tiles. Draws take the last tile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePool {
    tiles: Vec<Tile>,
}

impl TilePool {
    #[must_use]
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// A shuffled standard box.
    #[must_use]
    pub fn shuffled_box(rng: &mut GameRng) -> Self {
        let mut tiles = standard_box();
        rng.shuffle(&mut tiles);
        Self { tiles }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Take the tile at the end of the pool.
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    /// Take up to `n` tiles from the end of the pool.
    pub fn draw_many(&mut self, n: usize) -> Vec<Tile> {
        let at = self.tiles.len().saturating_sub(n);
        let mut drawn = self.tiles.split_off(at);
        drawn.reverse();
        drawn
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
