//! Game construction.
//!
//! `GameBuilder` seats players, checks table rules and deals. All rule
//! violations are reported together.
//!
//! ```
//! use tile_rummy::core::{GameBuilder, GameId, GameOptions, UserId};
//!
//! let game = GameBuilder::new(GameId::new(1), UserId::new(10))
//!     .player(UserId::new(10), "Ann")
//!     .player(UserId::new(11), "Bo")
//!     .options(GameOptions::default().with_play_to(50))
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(game.players()[0].tiles.len(), 14);
//! ```
//!
//! ## Fixtures
//!
//! [`GameBuilder::build_dealt`] skips the shuffle and places explicit
//! hands, table, pool, staged proposal and prior scores. Fixture tiles are
//! taken as given and need not form a complete box.

use im::Vector;

use super::config::{GameOptions, MAX_PLAYERS, MIN_PLAYERS};
use super::ids::{GameId, UserId};
use super::player::PlayerState;
use super::rng::GameRng;
use super::state::{Game, GameState, RoundScore, StagedProposal};
use crate::error::ValidationError;
use crate::tiles::{Tile, TilePool, BOX_SIZE};

/// Builder for a new match.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    game_id: GameId,
    host_user_id: UserId,
    players: Vec<(UserId, String)>,
    options: GameOptions,
    seed: u64,
}

impl GameBuilder {
    #[must_use]
    pub fn new(game_id: GameId, host_user_id: UserId) -> Self {
        Self {
            game_id,
            host_user_id,
            players: Vec::new(),
            options: GameOptions::default(),
            seed: 0,
        }
    }

    /// Seat a player. Seats are assigned in call order.
    #[must_use]
    pub fn player(mut self, user_id: UserId, display_name: impl Into<String>) -> Self {
        self.players.push((user_id, display_name.into()));
        self
    }

    #[must_use]
    pub fn options(mut self, options: GameOptions) -> Self {
        self.options = options;
        self
    }

    /// Seed for the deal.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check table rules, collecting every violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut messages = Vec::new();
        let count = self.players.len();

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            messages.push(format!(
                "Players must number between {} and {}.",
                MIN_PLAYERS, MAX_PLAYERS
            ));
        }

        let distinct = self
            .players
            .iter()
            .enumerate()
            .all(|(i, (id, _))| self.players[..i].iter().all(|(other, _)| other != id));
        if !distinct {
            messages.push("Players must be distinct.".to_string());
        }

        if !self.players.iter().any(|(id, _)| *id == self.host_user_id) {
            messages.push("Host must be a player.".to_string());
        }

        if self.options.play_to <= 0 {
            messages.push("Play to must be positive.".to_string());
        }

        if self.options.starting_hand_size.saturating_mul(count) > BOX_SIZE {
            messages.push("Starting hand size is too large.".to_string());
        }

        match ValidationError::from_messages(messages) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Shuffle a standard box and deal the first round. The first seat acts.
    pub fn build(self) -> Result<Game, ValidationError> {
        self.validate()?;
        let mut game = self.into_game();
        game.redeal(0);
        Ok(game)
    }

    /// Build a mid-round game from explicit fixtures.
    pub fn build_dealt(self, deal: Deal) -> Result<Game, ValidationError> {
        self.validate()?;
        let count = self.players.len();
        if deal.hands.len() != count {
            return Err(ValidationError::new("Deal must have one hand per player."));
        }
        if deal.action_to >= count || deal.round_starter.is_some_and(|s| s >= count) {
            return Err(ValidationError::new("Deal seat is out of range."));
        }

        let mut game = self.into_game();
        for (seat, (player, hand)) in game.players.iter_mut().zip(deal.hands).enumerate() {
            player.tiles = hand;
            player.has_played_initial_meld = flag(&deal.has_played_initial_meld, seat);
            player.passed_last_turn = flag(&deal.passed_last_turn, seat);
        }

        let users: Vec<UserId> = game.players.iter().map(|p| p.user_id).collect();
        game.round_scores = deal
            .round_scores
            .iter()
            .map(|scores| users.iter().copied().zip(scores.iter().copied()).collect::<RoundScore>())
            .collect::<Vector<_>>();

        game.sets = deal.sets;
        game.pool = TilePool::new(deal.pool);
        game.staged = deal.staged;
        game.state = deal.state;
        game.action_to = deal.action_to;
        game.round_starter = deal.round_starter.unwrap_or(0);
        game.round_number = game.round_scores.len() as u32 + 1;
        game.turn_number = 1;
        game.consecutive_passes = trailing_passes(&game);
        Ok(game)
    }

    fn into_game(self) -> Game {
        let players = self
            .players
            .into_iter()
            .map(|(id, name)| PlayerState::new(id, name))
            .collect();
        Game {
            game_id: self.game_id,
            host_user_id: self.host_user_id,
            options: self.options,
            players,
            action_to: 0,
            round_starter: 0,
            round_number: 0,
            turn_number: 0,
            sets: Vec::new(),
            pool: TilePool::default(),
            state: GameState::RoundActive,
            staged: StagedProposal::Absent,
            consecutive_passes: 0,
            round_scores: Vector::new(),
            history: Vector::new(),
            rng: GameRng::new(self.seed),
        }
    }
}

fn flag(flags: &[bool], seat: usize) -> bool {
    flags.get(seat).copied().unwrap_or(false)
}

/// Passes in a row ending with the seat just before the one to act.
fn trailing_passes(game: &Game) -> usize {
    let count = game.player_count();
    let mut passes = 0;
    let mut seat = game.action_to;
    while passes < count {
        seat = (seat + count - 1) % count;
        if !game.players[seat].passed_last_turn {
            break;
        }
        passes += 1;
    }
    passes
}

/// Explicit mid-round layout for [`GameBuilder::build_dealt`].
#[derive(Clone, Debug, Default)]
pub struct Deal {
    /// One hand per seat.
    pub hands: Vec<Vec<Tile>>,
    pub sets: Vec<Vec<Tile>>,
    /// Pool in draw order; the last tile is drawn first.
    pub pool: Vec<Tile>,
    /// Per seat; missing seats default to false.
    pub has_played_initial_meld: Vec<bool>,
    /// Per seat; missing seats default to false.
    pub passed_last_turn: Vec<bool>,
    pub staged: StagedProposal,
    /// Prior round scores, each listed in seat order.
    pub round_scores: Vec<Vec<i64>>,
    pub state: GameState,
    /// Seat to act.
    pub action_to: usize,
    /// Seat that opened the round; defaults to the first seat.
    pub round_starter: Option<usize>,
}

impl Deal {
    #[must_use]
    pub fn new(hands: Vec<Vec<Tile>>) -> Self {
        Self {
            hands,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sets(mut self, sets: Vec<Vec<Tile>>) -> Self {
        self.sets = sets;
        self
    }

    #[must_use]
    pub fn with_pool(mut self, pool: Vec<Tile>) -> Self {
        self.pool = pool;
        self
    }

    #[must_use]
    pub fn with_initial_meld(mut self, flags: Vec<bool>) -> Self {
        self.has_played_initial_meld = flags;
        self
    }

    #[must_use]
    pub fn with_passed_last_turn(mut self, flags: Vec<bool>) -> Self {
        self.passed_last_turn = flags;
        self
    }

    #[must_use]
    pub fn with_staged(mut self, staged: StagedProposal) -> Self {
        self.staged = staged;
        self
    }

    #[must_use]
    pub fn with_round_scores(mut self, scores: Vec<Vec<i64>>) -> Self {
        self.round_scores = scores;
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: GameState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_action_to(mut self, seat: usize) -> Self {
        self.action_to = seat;
        self
    }

    #[must_use]
    pub fn with_round_starter(mut self, seat: usize) -> Self {
        self.round_starter = Some(seat);
        self
    }
}
