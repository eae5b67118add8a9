//! Per-seat player state.
//!
//! Seating is fixed for the whole match: a player's index in
//! `Game::players` is their seat, and turns rotate through seats in order.

use serde::{Deserialize, Serialize};

use super::ids::UserId;
use crate::tiles::{Tile, TileCounts};

/// One seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub user_id: UserId,
    pub display_name: String,

    /// Hand in the player's chosen display order.
    pub tiles: Vec<Tile>,

    /// Set once the player's first meld is committed.
    pub has_played_initial_meld: bool,

    /// Whether the player's most recent turn ended in a pass.
    pub passed_last_turn: bool,
}

impl PlayerState {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new(user_id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            tiles: Vec::new(),
            has_played_initial_meld: false,
            passed_last_turn: false,
        }
    }

    /// Set the hand.
    #[must_use]
    pub fn with_tiles(mut self, tiles: Vec<Tile>) -> Self {
        self.tiles = tiles;
        self
    }

    /// Penalty value of the tiles left in hand.
    #[must_use]
    pub fn hand_value(&self, joker_penalty: i64) -> i64 {
        self.tiles.iter().map(|t| t.value(joker_penalty)).sum()
    }

    /// The hand as a multiset.
    #[must_use]
    pub fn tile_counts(&self) -> TileCounts {
        self.tiles.iter().collect()
    }

    /// Clear per-round state ahead of a new deal.
    pub fn reset_for_round(&mut self, tiles: Vec<Tile>) {
        self.tiles = tiles;
        self.has_played_initial_meld = false;
        self.passed_last_turn = false;
    }
}
