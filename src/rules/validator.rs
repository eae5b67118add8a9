//! Legality checks for each operation.
//!
//! Every check is pure: it reads the game and either returns `Ok` or a
//! [`ValidationError`] carrying the first rule the request broke. Checks
//! run in a fixed order so the reported message is stable.

use crate::core::{Game, GameState, StagedProposal, UpdateSets, UserId};
use crate::error::ValidationError;
use crate::tiles::{is_valid_set, set_value, Tile, TileCounts};

type Check = Result<(), ValidationError>;

fn fail<T>(message: impl Into<String>) -> Result<T, ValidationError> {
    Err(ValidationError::new(message))
}

/// The round must be in play.
pub fn require_round_active(game: &Game) -> Check {
    if game.state() != GameState::RoundActive {
        return fail("Round is not active.");
    }
    Ok(())
}

/// `user` must hold the turn.
pub fn require_turn(game: &Game, user: UserId) -> Check {
    if game.action_to_user_id() != user {
        return fail("Action is not to you.");
    }
    Ok(())
}

/// `user` must be seated; returns their seat.
pub fn require_player(game: &Game, user: UserId) -> Result<usize, ValidationError> {
    match game.seat_of(user) {
        Some(seat) => Ok(seat),
        None => fail("You are not a player in this game."),
    }
}

/// Tile conservation for a proposal against the acting player's hand and
/// the current table.
pub fn validate_update_sets(game: &Game, user: UserId, proposal: &UpdateSets) -> Check {
    let hand = match game.player(user) {
        Some(player) => player.tile_counts(),
        None => return fail("You are not a player in this game."),
    };
    let added: TileCounts = proposal.tiles_added.iter().collect();

    let Some(expected_remaining) = hand.difference(&added) else {
        return fail("Update sets: includes a tile not in hand.");
    };

    let mut table = TileCounts::new();
    table.extend_sets(game.sets());
    let mut proposed = TileCounts::new();
    proposed.extend_sets(&proposal.sets);
    if proposed != table.union(&added) {
        return fail(
            "Update sets: tiles in updated sets are not equal to existing sets plus tiles added.",
        );
    }

    let remaining: TileCounts = proposal.remaining_tiles.iter().collect();
    if remaining != expected_remaining {
        return fail("Update sets: remaining tiles is invalid.");
    }
    Ok(())
}

/// Full precondition for staging a proposal.
pub fn validate_save(game: &Game, user: UserId, proposal: &UpdateSets) -> Check {
    require_round_active(game)?;
    require_turn(game, user)?;
    validate_update_sets(game, user, proposal)
}

/// Whether every proposed set is a valid group or run.
#[must_use]
pub fn all_sets_valid(sets: &[Vec<Tile>]) -> bool {
    sets.iter().all(|set| is_valid_set(set))
}

/// Full precondition for committing the staged proposal.
///
/// Returns the proposal to commit.
pub fn validate_finalize(game: &Game, user: UserId) -> Result<&UpdateSets, ValidationError> {
    require_round_active(game)?;
    require_turn(game, user)?;

    let proposal = match game.staged() {
        StagedProposal::Absent => return fail("Finalize update sets: no changes made."),
        StagedProposal::PendingInvalid(_) => {
            return fail("Finalize update sets: latest state is invalid.")
        }
        StagedProposal::PendingValid(proposal) => proposal,
    };
    if proposal.tiles_added.is_empty() {
        return fail("Finalize update sets: no changes made.");
    }

    validate_update_sets(game, user, proposal)?;

    let has_melded = game
        .player(user)
        .is_some_and(|p| p.has_played_initial_meld);
    if !has_melded {
        validate_initial_meld(game.sets(), &proposal.sets, game.options().initial_meld_minimum)?;
    }
    Ok(proposal)
}

/// A first meld may not touch existing table sets and must reach `minimum`.
///
/// Every existing set must reappear unchanged in the proposal, each
/// matching a different proposed set. The remaining proposed sets are the
/// new meld, valued at the ranks their tiles represent.
pub fn validate_initial_meld(
    existing: &[Vec<Tile>],
    proposed: &[Vec<Tile>],
    minimum: u32,
) -> Check {
    let mut matched = vec![false; proposed.len()];
    for set in existing {
        let found = proposed
            .iter()
            .enumerate()
            .find(|(i, candidate)| !matched[*i] && *candidate == set);
        match found {
            Some((i, _)) => matched[i] = true,
            None => {
                return fail("Finalize update sets: cannot modify existing sets on initial play")
            }
        }
    }

    let value: u32 = proposed
        .iter()
        .zip(&matched)
        .filter(|(_, used)| !**used)
        .filter_map(|(set, _)| set_value(set))
        .sum();
    if value < minimum {
        return fail(format!(
            "Finalize update sets: sum of tiles in initial play must be at least {} (is only {})",
            minimum, value
        ));
    }
    Ok(())
}

/// Precondition for reordering a hand.
pub fn validate_rearrange(game: &Game, user: UserId, tiles: &[Tile]) -> Check {
    let seat = require_player(game, user)?;
    if game.is_complete() {
        return fail("Game is complete.");
    }
    if game.state() == GameState::RoundActive
        && game.action_to_user_id() == user
        && !game.staged().is_absent()
    {
        return fail("Cannot rearrange tiles while have update sets in progress.");
    }
    let proposed: TileCounts = tiles.iter().collect();
    if proposed != game.players()[seat].tile_counts() {
        return fail("Rearranged tiles are not equivalent to tiles in hand.");
    }
    Ok(())
}

/// Precondition for dealing the next round.
pub fn validate_next_round(game: &Game, user: UserId) -> Check {
    require_player(game, user)?;
    match game.state() {
        GameState::RoundComplete => Ok(()),
        GameState::Complete => fail("Game is complete."),
        GameState::RoundActive => fail("Round is not complete."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Deal, GameBuilder, GameId};
    use crate::tiles::TileColor;

    const ANN: UserId = UserId(1);
    const BO: UserId = UserId(2);

    fn t(rank: u8, color: TileColor) -> Tile {
        Tile::number(rank, color)
    }

    fn game(deal: Deal) -> Game {
        GameBuilder::new(GameId::new(1), ANN)
            .player(ANN, "Ann")
            .player(BO, "Bo")
            .build_dealt(deal)
            .unwrap()
    }

    fn messages(result: Check) -> Vec<String> {
        result.unwrap_err().messages().to_vec()
    }

    fn table() -> Vec<Vec<Tile>> {
        use TileColor::*;
        vec![vec![t(10, Yellow), t(10, Red), t(10, Blue)]]
    }

    #[test]
    fn test_conservation_accepts_extension() {
        use TileColor::*;
        let game = game(Deal::new(vec![vec![t(10, Black), t(1, Red)], vec![]]).with_sets(table()));
        let proposal = UpdateSets::new(
            vec![vec![t(10, Yellow), t(10, Red), t(10, Blue), t(10, Black)]],
            vec![t(10, Black)],
            vec![t(1, Red)],
        );
        assert!(validate_save(&game, ANN, &proposal).is_ok());
    }

    #[test]
    fn test_conservation_checks_run_in_order() {
        use TileColor::*;
        let game = game(Deal::new(vec![vec![t(10, Black), t(1, Red)], vec![]]).with_sets(table()));

        // tile not in hand, even though the other checks would also fail
        let proposal = UpdateSets::new(vec![], vec![t(2, Red)], vec![]);
        assert_eq!(
            messages(validate_save(&game, ANN, &proposal)),
            ["Update sets: includes a tile not in hand."]
        );

        let proposal = UpdateSets::new(vec![], vec![t(10, Black)], vec![]);
        assert_eq!(
            messages(validate_save(&game, ANN, &proposal)),
            ["Update sets: tiles in updated sets are not equal to existing sets plus tiles added."]
        );

        let proposal = UpdateSets::new(
            vec![vec![t(10, Yellow), t(10, Red), t(10, Blue), t(10, Black)]],
            vec![t(10, Black)],
            vec![],
        );
        assert_eq!(
            messages(validate_save(&game, ANN, &proposal)),
            ["Update sets: remaining tiles is invalid."]
        );
    }

    #[test]
    fn test_save_requires_turn() {
        let game = game(Deal::new(vec![vec![], vec![]]));
        let proposal = UpdateSets::default();
        assert_eq!(
            messages(validate_save(&game, BO, &proposal)),
            ["Action is not to you."]
        );
    }

    #[test]
    fn test_save_requires_active_round() {
        let game = game(Deal::new(vec![vec![], vec![]]).with_state(GameState::RoundComplete));
        assert_eq!(
            messages(validate_save(&game, ANN, &UpdateSets::default())),
            ["Round is not active."]
        );
    }

    #[test]
    fn test_initial_meld_cannot_touch_table() {
        use TileColor::*;
        let proposed = vec![vec![t(10, Yellow), t(10, Red), t(10, Blue), t(10, Black)]];
        assert_eq!(
            messages(validate_initial_meld(&table(), &proposed, 30)),
            ["Finalize update sets: cannot modify existing sets on initial play"]
        );
    }

    #[test]
    fn test_initial_meld_minimum() {
        use TileColor::*;
        let mut proposed = table();
        proposed.push(vec![t(8, Red), t(9, Red), t(10, Red)]);
        assert_eq!(
            messages(validate_initial_meld(&table(), &proposed, 30)),
            ["Finalize update sets: sum of tiles in initial play must be at least 30 (is only 27)"]
        );

        proposed.push(vec![t(1, Blue), t(2, Blue), t(3, Blue)]);
        assert!(validate_initial_meld(&table(), &proposed, 30).is_ok());
    }

    #[test]
    fn test_initial_meld_values_jokers_at_represented_rank() {
        use TileColor::*;
        let proposed = vec![vec![t(10, Red), Tile::Joker, t(12, Red)]];
        assert!(validate_initial_meld(&[], &proposed, 33).is_ok());
        assert!(validate_initial_meld(&[], &proposed, 34).is_err());
    }

    #[test]
    fn test_initial_meld_matches_each_set_once() {
        use TileColor::*;
        let existing = vec![
            vec![t(1, Red), t(2, Red), t(3, Red)],
            vec![t(1, Red), t(2, Red), t(3, Red)],
        ];
        let proposed = vec![
            vec![t(1, Red), t(2, Red), t(3, Red)],
            vec![t(11, Red), t(12, Red), t(13, Red)],
        ];
        assert_eq!(
            messages(validate_initial_meld(&existing, &proposed, 30)),
            ["Finalize update sets: cannot modify existing sets on initial play"]
        );
    }

    #[test]
    fn test_finalize_requires_staged_valid_proposal() {
        use TileColor::*;
        let hand = vec![t(1, Black), t(2, Red), t(3, Black)];
        let base = Deal::new(vec![hand.clone(), vec![]])
            .with_sets(table())
            .with_initial_meld(vec![true, true]);

        let absent = game(base.clone());
        assert_eq!(
            validate_finalize(&absent, ANN).unwrap_err().messages(),
            ["Finalize update sets: no changes made."]
        );

        let mut sets = table();
        sets.push(hand.clone());
        let invalid = game(base.with_staged(StagedProposal::PendingInvalid(UpdateSets::new(
            sets,
            hand,
            vec![],
        ))));
        assert_eq!(
            validate_finalize(&invalid, ANN).unwrap_err().messages(),
            ["Finalize update sets: latest state is invalid."]
        );
    }

    #[test]
    fn test_rearrange_checks() {
        use TileColor::*;
        let hand = vec![t(1, Black), t(2, Red)];
        let g = game(Deal::new(vec![hand.clone(), vec![]]));

        assert!(validate_rearrange(&g, ANN, &[t(2, Red), t(1, Black)]).is_ok());
        assert_eq!(
            messages(validate_rearrange(&g, UserId(9), &hand)),
            ["You are not a player in this game."]
        );
        assert_eq!(
            messages(validate_rearrange(&g, ANN, &[t(1, Black)])),
            ["Rearranged tiles are not equivalent to tiles in hand."]
        );
        assert_eq!(
            messages(validate_rearrange(&g, ANN, &[t(1, Black), t(2, Red), t(3, Red)])),
            ["Rearranged tiles are not equivalent to tiles in hand."]
        );
    }

    #[test]
    fn test_rearrange_blocked_only_for_actor_with_staged_proposal() {
        use TileColor::*;
        let staged = StagedProposal::PendingInvalid(UpdateSets::default());
        let g = game(Deal::new(vec![vec![t(1, Black)], vec![t(2, Red)]]).with_staged(staged));

        assert_eq!(
            messages(validate_rearrange(&g, ANN, &[t(1, Black)])),
            ["Cannot rearrange tiles while have update sets in progress."]
        );
        assert!(validate_rearrange(&g, BO, &[t(2, Red)]).is_ok());
    }

    #[test]
    fn test_next_round_requires_complete_round() {
        let active = game(Deal::new(vec![vec![], vec![]]));
        assert_eq!(
            messages(validate_next_round(&active, ANN)),
            ["Round is not complete."]
        );

        let done = game(Deal::new(vec![vec![], vec![]]).with_state(GameState::Complete));
        assert_eq!(messages(validate_next_round(&done, BO)), ["Game is complete."]);

        let between = game(Deal::new(vec![vec![], vec![]]).with_state(GameState::RoundComplete));
        assert!(validate_next_round(&between, BO).is_ok());
        assert_eq!(
            messages(validate_next_round(&between, UserId(9))),
            ["You are not a player in this game."]
        );
    }
}
