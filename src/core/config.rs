//! Match configuration.
//!
//! `GameOptions` carries the per-match settings chosen at creation time
//! together with the rule constants that vary between house rules.
//!
//! ```
//! use tile_rummy::core::GameOptions;
//!
//! let options = GameOptions::default()
//!     .with_play_to(200)
//!     .with_hide_tile_count(true);
//! assert_eq!(options.play_to, 200);
//! assert_eq!(options.initial_meld_minimum, 30);
//! ```

use serde::{Deserialize, Serialize};

/// Fewest players at a table.
pub const MIN_PLAYERS: usize = 2;

/// Most players at a table.
pub const MAX_PLAYERS: usize = 4;

/// Per-match settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameOptions {
    /// Cumulative score that ends the match.
    pub play_to: i64,

    /// Hide opponents' tile counts, not just their tiles.
    pub hide_tile_count: bool,

    /// Tiles dealt to each seat at the start of a round.
    pub starting_hand_size: usize,

    /// Minimum value of a player's first meld.
    pub initial_meld_minimum: u32,

    /// Value of a joker left in hand when a round is scored.
    pub joker_penalty: i64,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            play_to: 100,
            hide_tile_count: false,
            starting_hand_size: 14,
            initial_meld_minimum: 30,
            joker_penalty: 30,
        }
    }
}

impl GameOptions {
    /// Set the cumulative score that ends the match.
    #[must_use]
    pub fn with_play_to(mut self, play_to: i64) -> Self {
        self.play_to = play_to;
        self
    }

    /// Hide opponents' hand sizes while a round is on.
    #[must_use]
    pub fn with_hide_tile_count(mut self, hide: bool) -> Self {
        self.hide_tile_count = hide;
        self
    }

    /// Set the number of tiles dealt to each seat.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the value a player's first meld must reach.
    #[must_use]
    pub fn with_initial_meld_minimum(mut self, minimum: u32) -> Self {
        self.initial_meld_minimum = minimum;
        self
    }

    /// Set the value of a joker left in hand.
    #[must_use]
    pub fn with_joker_penalty(mut self, penalty: i64) -> Self {
        self.joker_penalty = penalty;
        self
    }
}
