//! Tiles, tile multisets, set validation, and the draw pool.

pub mod counts;
pub mod pool;
pub mod set;
pub mod tile;

pub use counts::TileCounts;
pub use pool::{standard_box, TilePool, BOX_SIZE};
pub use set::{classify, is_valid_set, represented_ranks, set_value, SetKind, MIN_SET_SIZE};
pub use tile::{Tile, TileColor, TileError, JOKER_CODE, MAX_RANK, MIN_RANK};
