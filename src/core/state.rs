//! Match state.
//!
//! ## Game
//!
//! The complete state of one match:
//! - Seated players with their hands and flags
//! - Table sets and the hidden draw pool
//! - Turn pointer, round starter and pass counter
//! - The staged proposal of the player holding the turn
//! - Round score history and action history
//! - RNG used for dealing
//!
//! Score and action history use `im` persistent vectors, so cloning a game
//! for a working copy does not copy history.
//!
//! ## Staged Proposal
//!
//! Before committing a turn the acting player may stage candidate table
//! arrangements any number of times. The engine remembers the most recent
//! one and whether it was fully legal, without forcing a commit.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::GameOptions;
use super::ids::{GameId, UserId};
use super::player::PlayerState;
use super::rng::GameRng;
use crate::tiles::{Tile, TileCounts, TilePool};

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    /// Turns are being played.
    #[default]
    RoundActive,
    /// A round was scored and the next round has not been dealt.
    RoundComplete,
    /// Some player reached the target score. Terminal.
    Complete,
}

/// A candidate arrangement of the table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSets {
    /// Proposed table sets.
    pub sets: Vec<Vec<Tile>>,
    /// Tiles moved from the hand onto the table.
    pub tiles_added: Vec<Tile>,
    /// Hand left after the move.
    pub remaining_tiles: Vec<Tile>,
}

impl UpdateSets {
    #[must_use]
    pub fn new(sets: Vec<Vec<Tile>>, tiles_added: Vec<Tile>, remaining_tiles: Vec<Tile>) -> Self {
        Self {
            sets,
            tiles_added,
            remaining_tiles,
        }
    }
}

/// The staged proposal of the player holding the turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StagedProposal {
    /// Nothing staged.
    #[default]
    Absent,
    /// The latest proposal conserves tiles but has an invalid set.
    PendingInvalid(UpdateSets),
    /// The latest proposal is legal and can be committed.
    PendingValid(UpdateSets),
}

impl StagedProposal {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, StagedProposal::Absent)
    }

    /// The most recently staged proposal, legal or not.
    #[must_use]
    pub fn latest(&self) -> Option<&UpdateSets> {
        match self {
            StagedProposal::Absent => None,
            StagedProposal::PendingInvalid(u) | StagedProposal::PendingValid(u) => Some(u),
        }
    }

    /// The staged proposal if it is legal.
    #[must_use]
    pub fn last_valid(&self) -> Option<&UpdateSets> {
        match self {
            StagedProposal::PendingValid(u) => Some(u),
            _ => None,
        }
    }
}

/// Scores of one completed round, by user.
pub type RoundScore = BTreeMap<UserId, i64>;

/// Full state of one match.
///
/// Fields are crate-visible so the rules engine and builder can mutate
/// them; outside the crate a game is read through its accessors or a
/// redacted [`GameView`](super::view::GameView).
#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) game_id: GameId,
    pub(crate) host_user_id: UserId,
    pub(crate) options: GameOptions,
    pub(crate) players: Vec<PlayerState>,

    /// Seat holding the turn.
    pub(crate) action_to: usize,
    /// Seat that opened the current round.
    pub(crate) round_starter: usize,
    /// Current round, starting at 1.
    pub(crate) round_number: u32,
    /// Turn within the current round, starting at 1.
    pub(crate) turn_number: u32,

    pub(crate) sets: Vec<Vec<Tile>>,
    pub(crate) pool: TilePool,
    pub(crate) state: GameState,
    pub(crate) staged: StagedProposal,

    /// Passes in a row since the last draw or meld.
    pub(crate) consecutive_passes: usize,

    pub(crate) round_scores: Vector<RoundScore>,
    pub(crate) history: Vector<ActionRecord>,
    pub(crate) rng: GameRng,
}

impl Game {
    #[must_use]
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    #[must_use]
    pub fn host_user_id(&self) -> UserId {
        self.host_user_id
    }

    #[must_use]
    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Players in seating order.
    #[must_use]
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seat of a user, if seated.
    #[must_use]
    pub fn seat_of(&self, user: UserId) -> Option<usize> {
        self.players.iter().position(|p| p.user_id == user)
    }

    #[must_use]
    pub fn player(&self, user: UserId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.user_id == user)
    }

    /// User holding the turn.
    #[must_use]
    pub fn action_to_user_id(&self) -> UserId {
        self.players[self.action_to].user_id
    }

    /// User who opened the current round.
    #[must_use]
    pub fn round_starter(&self) -> UserId {
        self.players[self.round_starter].user_id
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Seat after `seat`, wrapping around.
    #[must_use]
    pub fn next_seat(&self, seat: usize) -> usize {
        (seat + 1) % self.players.len()
    }

    /// Sets on the table.
    #[must_use]
    pub fn sets(&self) -> &[Vec<Tile>] {
        &self.sets
    }

    #[must_use]
    pub fn tile_pool_count(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == GameState::Complete
    }

    #[must_use]
    pub fn staged(&self) -> &StagedProposal {
        &self.staged
    }

    #[must_use]
    pub fn consecutive_passes(&self) -> usize {
        self.consecutive_passes
    }

    /// Completed round scores, oldest first.
    #[must_use]
    pub fn round_scores(&self) -> &Vector<RoundScore> {
        &self.round_scores
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Total score per user across completed rounds.
    #[must_use]
    pub fn cumulative_scores(&self) -> BTreeMap<UserId, i64> {
        crate::rules::scoring::cumulative_scores(
            self.players.iter().map(|p| p.user_id),
            self.round_scores.iter(),
        )
    }

    /// Every tile in the match: table, hands and pool.
    ///
    /// Always equal to one standard box.
    #[must_use]
    pub fn tile_census(&self) -> TileCounts {
        let mut census: TileCounts = self.pool.tiles().iter().collect();
        census.extend_sets(&self.sets);
        for player in &self.players {
            census.extend(player.tiles.iter().copied());
        }
        census
    }

    /// Deal a freshly shuffled box and open a round with `starter` to act.
    pub(crate) fn redeal(&mut self, starter: usize) {
        let mut pool = TilePool::shuffled_box(&mut self.rng);
        let hand_size = self.options.starting_hand_size;
        for player in &mut self.players {
            player.reset_for_round(pool.draw_many(hand_size));
        }
        self.pool = pool;
        self.sets.clear();
        self.staged = StagedProposal::Absent;
        self.consecutive_passes = 0;
        self.state = GameState::RoundActive;
        self.action_to = starter;
        self.round_starter = starter;
        self.round_number += 1;
        self.turn_number = 1;
    }
}
