//! Turn engine.
//!
//! `RulesEngine` is the seam between the service layer and the rules: it
//! lists legal actions, applies a turn-ending action and reports the end
//! of the match. `RummyEngine` implements it and also handles the
//! operations that do not end a turn (staging, rearranging, dealing the
//! next round).
//!
//! ## Round Lifecycle
//!
//! ```text
//! ROUND_ACTIVE -> ROUND_COMPLETE -> ROUND_ACTIVE -> ... -> COMPLETE
//! ```
//!
//! After every turn-ending action:
//! - the round ends if the actor's hand is empty, or every seat has passed
//!   in a row since the last draw or meld
//! - otherwise the turn moves to the next seat
//!
//! A finished round is scored and credited to the player who emptied their
//! hand, or to the lowest hand after a universal pass. That player holds
//! `actionToUserId` until the next deal. The match is complete once any
//! cumulative score reaches `play_to`.
//!
//! All operations mutate the game only after their checks pass, so a
//! rejected request leaves the game untouched.

use tracing::{debug, info};

use super::scoring;
use super::validator;
use crate::core::{
    Action, ActionOutcome, ActionRecord, Game, GameState, StagedProposal, UpdateSets, UserId,
};
use crate::error::ValidationError;
use crate::tiles::Tile;

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(UserId),
    /// Several players tied on the top score.
    Winners(Vec<UserId>),
}

impl GameResult {
    /// Check if a user won.
    #[must_use]
    pub fn is_winner(&self, user: UserId) -> bool {
        match self {
            GameResult::Winner(u) => *u == user,
            GameResult::Winners(us) => us.contains(&user),
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty when the user cannot end a turn
/// - `apply_action`: validates first; a rejected action changes nothing
/// - `is_terminal`: `None` while the match continues
pub trait RulesEngine {
    /// Turn-ending actions `user` could take right now.
    fn legal_actions(&self, game: &Game, user: UserId) -> Vec<Action>;

    /// Validate and apply a turn-ending action, then advance the turn.
    fn apply_action(
        &self,
        game: &mut Game,
        user: UserId,
        action: Action,
    ) -> Result<ActionOutcome, ValidationError>;

    /// Check if the match is over.
    fn is_terminal(&self, game: &Game) -> Option<GameResult>;
}

/// Tile-rummy rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct RummyEngine;

impl RummyEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Stage a proposal for the player holding the turn.
    ///
    /// Replaces whatever was staged. The proposal is stored as pending-valid
    /// when every set is a valid group or run, else as pending-invalid.
    /// Hands, table and turn are unchanged.
    pub fn save_latest_update_sets(
        &self,
        game: &mut Game,
        user: UserId,
        proposal: UpdateSets,
    ) -> Result<(), ValidationError> {
        validator::validate_save(game, user, &proposal)?;
        game.staged = if validator::all_sets_valid(&proposal.sets) {
            StagedProposal::PendingValid(proposal)
        } else {
            StagedProposal::PendingInvalid(proposal)
        };
        let valid = matches!(game.staged, StagedProposal::PendingValid(_));
        debug!(user_id = %user, valid, "staged update sets");
        Ok(())
    }

    /// Replace a player's hand order.
    pub fn rearrange_tiles(
        &self,
        game: &mut Game,
        user: UserId,
        tiles: Vec<Tile>,
    ) -> Result<(), ValidationError> {
        validator::validate_rearrange(game, user, &tiles)?;
        let seat = validator::require_player(game, user)?;
        game.players[seat].tiles = tiles;
        Ok(())
    }

    /// Deal the next round after a scored round.
    ///
    /// The seat after the previous round's starter opens the new round.
    pub fn start_next_round(&self, game: &mut Game, user: UserId) -> Result<(), ValidationError> {
        validator::validate_next_round(game, user)?;
        let starter = game.next_seat(game.round_starter);
        game.redeal(starter);
        info!(
            game_id = %game.game_id,
            round = game.round_number,
            starter = %game.action_to_user_id(),
            "dealt next round"
        );
        Ok(())
    }

    fn finalize(
        &self,
        game: &mut Game,
        user: UserId,
        seat: usize,
    ) -> Result<ActionOutcome, ValidationError> {
        let proposal = validator::validate_finalize(game, user)?.clone();
        let tiles_added = proposal.tiles_added.len();

        let player = &mut game.players[seat];
        player.tiles = proposal.remaining_tiles;
        player.has_played_initial_meld = true;
        player.passed_last_turn = false;
        game.sets = proposal.sets;
        game.consecutive_passes = 0;
        Ok(ActionOutcome::Melded { tiles_added })
    }

    fn pick_up_or_pass(&self, game: &mut Game, seat: usize) -> ActionOutcome {
        match game.pool.draw() {
            Some(tile) => {
                game.players[seat].tiles.push(tile);
                game.players[seat].passed_last_turn = false;
                game.consecutive_passes = 0;
                ActionOutcome::Drew
            }
            None => {
                game.players[seat].passed_last_turn = true;
                game.consecutive_passes += 1;
                ActionOutcome::Passed
            }
        }
    }

    /// Move the turn on, or close the round.
    fn advance_turn(&self, game: &mut Game, actor: usize) {
        if game.players[actor].tiles.is_empty() {
            self.end_round(game, actor);
        } else if game.consecutive_passes >= game.player_count() {
            let winner = scoring::pass_round_winner(
                &game.players,
                game.round_starter,
                game.options.joker_penalty,
            );
            self.end_round(game, winner);
        } else {
            game.action_to = game.next_seat(actor);
            game.turn_number += 1;
        }
    }

    fn end_round(&self, game: &mut Game, winner: usize) {
        let score = scoring::compute_round_score(&game.players, winner, game.options.joker_penalty);
        game.round_scores.push_back(score);
        game.action_to = winner;
        game.staged = StagedProposal::Absent;

        let totals = game.cumulative_scores();
        game.state = if scoring::target_reached(&totals, game.options.play_to) {
            GameState::Complete
        } else {
            GameState::RoundComplete
        };
        info!(
            game_id = %game.game_id,
            round = game.round_number,
            winner = %game.action_to_user_id(),
            state = ?game.state,
            "round complete"
        );
    }
}

impl RulesEngine for RummyEngine {
    fn legal_actions(&self, game: &Game, user: UserId) -> Vec<Action> {
        if validator::require_round_active(game).is_err()
            || validator::require_turn(game, user).is_err()
        {
            return Vec::new();
        }
        let mut actions = vec![Action::PickUpOrPass];
        if validator::validate_finalize(game, user).is_ok() {
            actions.push(Action::FinalizeUpdateSets);
        }
        actions
    }

    fn apply_action(
        &self,
        game: &mut Game,
        user: UserId,
        action: Action,
    ) -> Result<ActionOutcome, ValidationError> {
        validator::require_round_active(game)?;
        validator::require_turn(game, user)?;
        // holding the turn implies a seat
        let seat = validator::require_player(game, user)?;
        let outcome = match action {
            Action::FinalizeUpdateSets => self.finalize(game, user, seat)?,
            Action::PickUpOrPass => self.pick_up_or_pass(game, seat),
        };
        game.staged = StagedProposal::Absent;
        game.history.push_back(ActionRecord {
            user_id: user,
            action,
            outcome: outcome.clone(),
            round: game.round_number,
            turn: game.turn_number,
        });
        debug!(user_id = %user, ?outcome, "applied action");

        self.advance_turn(game, seat);
        Ok(outcome)
    }

    fn is_terminal(&self, game: &Game) -> Option<GameResult> {
        if !game.is_complete() {
            return None;
        }
        let mut leaders = scoring::leaders(&game.cumulative_scores());
        match leaders.len() {
            0 => None,
            1 => leaders.pop().map(GameResult::Winner),
            _ => Some(GameResult::Winners(leaders)),
        }
    }
}
