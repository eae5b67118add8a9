//! Seeded shuffling for deals.
//!
//! Every game owns one ChaCha8 stream. The first deal and every redeal draw
//! from it in order, so a match is reproducible from its seed alone.
//!
//! The stream position is a single 128-bit counter; capturing it is O(1)
//! no matter how many boxes have been shuffled, and a stored game picks
//! the stream up where it left off.
//!
//! ```
//! use tile_rummy::core::GameRng;
//! use tile_rummy::tiles::standard_box;
//!
//! let mut first = standard_box();
//! let mut second = standard_box();
//! GameRng::new(7).shuffle(&mut first);
//! GameRng::new(7).shuffle(&mut second);
//! assert_eq!(first, second);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// The dealing stream of one game.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Start a stream from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed the stream was started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Permute `items` using the next values of the stream.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.stream);
    }

    /// Where the stream currently is.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    /// Rebuild a stream at a captured position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut stream = ChaCha8Rng::seed_from_u64(state.seed);
        stream.set_word_pos(state.word_pos);
        Self {
            stream,
            seed: state.seed,
        }
    }
}

/// Captured position of a [`GameRng`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// Words consumed from the ChaCha8 stream.
    pub word_pos: u128,
}
