//! Per-viewer redacted view of a game.
//!
//! While a round is being played, a viewer sees only their own tiles;
//! opponents show a tile count, or nothing when `hide_tile_count` is set.
//! Once the round is scored every hand is revealed. The pool is only ever
//! exposed as a count, and the staged proposal is shown only to the player
//! who staged it.

use serde::{Deserialize, Serialize};

use super::ids::{GameId, UserId};
use super::player::PlayerState;
use super::state::{Game, GameState, RoundScore, UpdateSets};
use crate::tiles::Tile;

/// One seat as seen by a viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub user_id: UserId,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<Tile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_tiles: Option<usize>,
    pub has_played_initial_meld: bool,
    pub passed_last_turn: bool,
}

/// A game as seen by one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub game_id: GameId,
    pub host_user_id: UserId,
    pub play_to: i64,
    pub hide_tile_count: bool,
    pub player_states: Vec<PlayerView>,
    pub action_to_user_id: UserId,
    pub sets: Vec<Vec<Tile>>,
    pub tile_pool_count: usize,
    pub state: GameState,
    pub latest_update_sets: Option<UpdateSets>,
    pub last_valid_update_sets: Option<UpdateSets>,
    pub round_scores: Vec<RoundScore>,
}

impl GameView {
    /// The viewer's entry, or another seat's, by user id.
    #[must_use]
    pub fn player(&self, user: UserId) -> Option<&PlayerView> {
        self.player_states.iter().find(|p| p.user_id == user)
    }
}

impl Game {
    /// Redacted view for `viewer`. Unseated viewers see no hands.
    #[must_use]
    pub fn view_for(&self, viewer: UserId) -> GameView {
        let reveal_all = self.state != GameState::RoundActive;
        let player_states = self
            .players
            .iter()
            .map(|p| self.player_view(p, viewer, reveal_all))
            .collect();

        let staged_visible =
            self.state == GameState::RoundActive && self.action_to_user_id() == viewer;
        let (latest_update_sets, last_valid_update_sets) = if staged_visible {
            (self.staged.latest().cloned(), self.staged.last_valid().cloned())
        } else {
            (None, None)
        };

        GameView {
            game_id: self.game_id,
            host_user_id: self.host_user_id,
            play_to: self.options.play_to,
            hide_tile_count: self.options.hide_tile_count,
            player_states,
            action_to_user_id: self.action_to_user_id(),
            sets: self.sets.clone(),
            tile_pool_count: self.pool.len(),
            state: self.state,
            latest_update_sets,
            last_valid_update_sets,
            round_scores: self.round_scores.iter().cloned().collect(),
        }
    }

    fn player_view(&self, player: &PlayerState, viewer: UserId, reveal_all: bool) -> PlayerView {
        let visible = reveal_all || player.user_id == viewer;
        let tiles = visible.then(|| player.tiles.clone());
        let number_of_tiles =
            (visible || !self.options.hide_tile_count).then(|| player.tiles.len());
        PlayerView {
            user_id: player.user_id,
            display_name: player.display_name.clone(),
            tiles,
            number_of_tiles,
            has_played_initial_meld: player.has_played_initial_meld,
            passed_last_turn: player.passed_last_turn,
        }
    }
}
