//! Turn-ending actions through the service: finalizing staged sets and
//! picking up or passing.

mod common;

use common::{dealt_game, dealt_game_with, message, service_with, t, U1, U2};
use tile_rummy::core::{
    Action, ActionRequest, Deal, GameId, GameOptions, GameState, PlayerView, StagedProposal,
    UpdateSets,
};
use tile_rummy::error::EngineError;
use tile_rummy::service::GameService;
use tile_rummy::tiles::Tile;
use tile_rummy::tiles::TileColor::*;

fn seat(
    user: tile_rummy::core::UserId,
    name: &str,
    tiles: Vec<Tile>,
    melded: bool,
    passed: bool,
) -> PlayerView {
    PlayerView {
        user_id: user,
        display_name: name.to_string(),
        number_of_tiles: Some(tiles.len()),
        tiles: Some(tiles),
        has_played_initial_meld: melded,
        passed_last_turn: passed,
    }
}

fn ten_group() -> Vec<Tile> {
    vec![t(10, Yellow), t(10, Red), t(10, Blue)]
}

fn ten_quad() -> Vec<Tile> {
    vec![t(10, Yellow), t(10, Red), t(10, Blue), t(10, Black)]
}

/// Deal where U1 empties their hand by laying down 10 BLACK.
fn going_out_deal() -> Deal {
    Deal::new(vec![vec![t(10, Black)], vec![t(5, Red), t(7, Blue)]])
        .with_sets(vec![ten_group()])
        .with_initial_meld(vec![true, true])
        .with_staged(StagedProposal::PendingValid(UpdateSets::new(
            vec![ten_quad()],
            vec![t(10, Black)],
            vec![],
        )))
}

/// Playing a game that does not exist is a not-found error.
#[test]
fn test_play_unknown_game() {
    let service = GameService::in_memory();

    let err = service
        .play_request(U1, GameId::new(1), ActionRequest::pick_up_tile_or_pass())
        .unwrap_err();

    assert!(matches!(err, EngineError::NotFound(_)));
    assert_eq!(err.to_string(), "Game does not exist with id: 1");
}

/// Only the player holding the turn may act.
#[test]
fn test_play_not_your_turn() {
    let (service, game_id) = service_with(dealt_game(Deal::new(vec![vec![], vec![]])));

    let err = service.play(U2, game_id, Action::PickUpOrPass).unwrap_err();

    assert_eq!(err.to_string(), "Validation errors: \"Action is not to you.\"");
}

/// Someone outside the game is told the action is not theirs, whichever
/// turn-ending path they take.
#[test]
fn test_play_by_outsider() {
    let outsider = tile_rummy::core::UserId(99);
    let deal = Deal::new(vec![vec![t(1, Red)], vec![t(2, Red)]]).with_pool(vec![t(3, Red)]);
    let (service, game_id) = service_with(dealt_game(deal));

    for action in [Action::PickUpOrPass, Action::FinalizeUpdateSets] {
        let err = service.play(outsider, game_id, action).unwrap_err();
        assert_eq!(message(&err), "Action is not to you.");
    }
    let proposal = UpdateSets::new(vec![], vec![], vec![]);
    let err = service
        .save_latest_update_sets(outsider, game_id, proposal)
        .unwrap_err();
    assert_eq!(message(&err), "Action is not to you.");

    let view = service.get(U1, game_id).unwrap();
    assert_eq!(view.tile_pool_count, 1);
    assert_eq!(view.action_to_user_id, U1);
}

/// A request must select exactly one action.
#[test]
fn test_play_request_needs_one_action() {
    let (service, game_id) = service_with(dealt_game(Deal::new(vec![vec![t(1, Red)], vec![]])));
    let both = ActionRequest {
        pick_up_tile_or_pass: true,
        finalize_update_sets: true,
    };

    let err = service.play_request(U1, game_id, both).unwrap_err();

    assert_eq!(message(&err), "Exactly one action must be selected.");
    assert_eq!(service.get(U1, game_id).unwrap().action_to_user_id, U1);
}

/// A first meld may not change sets already on the table.
#[test]
fn test_finalize_initial_meld_modifying_existing_set() {
    let deal = Deal::new(vec![
        vec![t(8, Blue), t(11, Yellow), t(12, Yellow), t(1, Red)],
        vec![],
    ])
    .with_sets(vec![
        vec![t(8, Black), t(8, Red), t(8, Yellow)],
        vec![t(8, Yellow), t(9, Yellow), t(10, Yellow)],
    ])
    .with_initial_meld(vec![false, true])
    .with_staged(StagedProposal::PendingValid(UpdateSets::new(
        vec![
            vec![t(8, Black), t(8, Red), t(8, Yellow), t(8, Blue)],
            vec![t(8, Yellow), t(9, Yellow), t(10, Yellow), t(11, Yellow), t(12, Yellow)],
        ],
        vec![t(8, Blue), t(11, Yellow), t(12, Yellow)],
        vec![t(1, Red)],
    )));
    let (service, game_id) = service_with(dealt_game(deal));

    let err = service.play(U1, game_id, Action::FinalizeUpdateSets).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Validation errors: \"Finalize update sets: cannot modify existing sets on initial play\""
    );
}

/// A first meld must reach the minimum value.
#[test]
fn test_finalize_initial_meld_below_minimum() {
    let deal = Deal::new(vec![
        vec![t(9, Black), t(9, Red), t(9, Blue), t(5, Yellow)],
        vec![],
    ])
    .with_staged(StagedProposal::PendingValid(UpdateSets::new(
        vec![vec![t(9, Black), t(9, Red), t(9, Blue)]],
        vec![t(9, Black), t(9, Red), t(9, Blue)],
        vec![t(5, Yellow)],
    )));
    let (service, game_id) = service_with(dealt_game(deal));

    let err = service.play(U1, game_id, Action::FinalizeUpdateSets).unwrap_err();

    assert_eq!(
        message(&err),
        "Finalize update sets: sum of tiles in initial play must be at least 30 (is only 27)"
    );
}

/// The minimum is configurable.
#[test]
fn test_finalize_initial_meld_custom_minimum() {
    let deal = Deal::new(vec![
        vec![t(9, Black), t(9, Red), t(9, Blue), t(5, Yellow)],
        vec![],
    ])
    .with_staged(StagedProposal::PendingValid(UpdateSets::new(
        vec![vec![t(9, Black), t(9, Red), t(9, Blue)]],
        vec![t(9, Black), t(9, Red), t(9, Blue)],
        vec![t(5, Yellow)],
    )));
    let options = GameOptions::default().with_initial_meld_minimum(25);
    let (service, game_id) = service_with(dealt_game_with(options, deal));

    let view = service.play(U1, game_id, Action::FinalizeUpdateSets).unwrap();

    assert_eq!(view.action_to_user_id, U2);
    assert!(view.player(U1).unwrap().has_played_initial_meld);
}

/// An invalid staged proposal cannot be finalized.
#[test]
fn test_finalize_latest_state_invalid() {
    let deal = Deal::new(vec![vec![t(1, Black), t(2, Red), t(3, Black)], vec![]])
        .with_sets(vec![ten_group()])
        .with_initial_meld(vec![true, true])
        .with_staged(StagedProposal::PendingInvalid(UpdateSets::new(
            vec![ten_group(), vec![t(1, Black), t(2, Red), t(3, Black)]],
            vec![t(1, Black), t(2, Red), t(3, Black)],
            vec![],
        )));
    let (service, game_id) = service_with(dealt_game(deal));

    let err = service.play(U1, game_id, Action::FinalizeUpdateSets).unwrap_err();

    assert_eq!(message(&err), "Finalize update sets: latest state is invalid.");
}

/// Finalizing with nothing staged is rejected.
#[test]
fn test_finalize_no_changes() {
    let deal = Deal::new(vec![vec![t(1, Black), t(2, Red), t(3, Black)], vec![]])
        .with_sets(vec![ten_group()])
        .with_initial_meld(vec![true, true]);
    let (service, game_id) = service_with(dealt_game(deal));

    let err = service.play(U1, game_id, Action::FinalizeUpdateSets).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Validation errors: \"Finalize update sets: no changes made.\""
    );
}

/// A staged rearrangement that adds no tiles does not count as a play.
#[test]
fn test_finalize_rearrangement_without_added_tiles() {
    let deal = Deal::new(vec![vec![t(1, Black)], vec![]])
        .with_sets(vec![ten_group()])
        .with_initial_meld(vec![true, true])
        .with_staged(StagedProposal::PendingValid(UpdateSets::new(
            vec![vec![t(10, Blue), t(10, Red), t(10, Yellow)]],
            vec![],
            vec![t(1, Black)],
        )));
    let (service, game_id) = service_with(dealt_game(deal));

    let err = service.play(U1, game_id, Action::FinalizeUpdateSets).unwrap_err();

    assert_eq!(message(&err), "Finalize update sets: no changes made.");
}

/// A valid first meld is committed and the turn moves on.
#[test]
fn test_finalize_initial_meld() {
    let deal = Deal::new(vec![
        vec![t(10, Black), t(10, Red), t(10, Blue), t(5, Yellow)],
        vec![],
    ])
    .with_initial_meld(vec![false, false])
    .with_staged(StagedProposal::PendingValid(UpdateSets::new(
        vec![vec![t(10, Black), t(10, Red), t(10, Blue)]],
        vec![t(10, Black), t(10, Red), t(10, Blue)],
        vec![t(5, Yellow)],
    )));
    let (service, game_id) = service_with(dealt_game(deal));

    let view = service.play(U1, game_id, Action::FinalizeUpdateSets).unwrap();

    assert_eq!(view.action_to_user_id, U2);
    assert_eq!(view.state, GameState::RoundActive);
    assert_eq!(view.sets, vec![vec![t(10, Black), t(10, Red), t(10, Blue)]]);
    assert_eq!(view.last_valid_update_sets, None);
    assert_eq!(view.player(U1), Some(&seat(U1, "test1", vec![t(5, Yellow)], true, false)));

    let opponent = view.player(U2).unwrap();
    assert_eq!(opponent.tiles, None);
    assert_eq!(opponent.number_of_tiles, Some(0));
    assert!(!opponent.has_played_initial_meld);
}

/// After the first meld, tiles may be added to existing sets.
#[test]
fn test_finalize_after_initial_meld() {
    let deal = Deal::new(vec![vec![t(10, Black), t(1, Red)], vec![]])
        .with_sets(vec![ten_group()])
        .with_initial_meld(vec![true, true])
        .with_staged(StagedProposal::PendingValid(UpdateSets::new(
            vec![ten_quad()],
            vec![t(10, Black)],
            vec![t(1, Red)],
        )));
    let (service, game_id) = service_with(dealt_game(deal));

    let view = service.play(U1, game_id, Action::FinalizeUpdateSets).unwrap();

    assert_eq!(view.action_to_user_id, U2);
    assert_eq!(view.state, GameState::RoundActive);
    assert_eq!(view.sets, vec![ten_quad()]);
    assert_eq!(view.last_valid_update_sets, None);
    assert_eq!(view.player(U1), Some(&seat(U1, "test1", vec![t(1, Red)], true, false)));
}

/// Emptying the hand ends and scores the round.
#[test]
fn test_finalize_completes_round() {
    let (service, game_id) = service_with(dealt_game(going_out_deal()));

    let view = service.play(U1, game_id, Action::FinalizeUpdateSets).unwrap();

    assert_eq!(view.action_to_user_id, U1);
    assert_eq!(view.state, GameState::RoundComplete);
    assert_eq!(view.sets, vec![ten_quad()]);
    assert_eq!(view.last_valid_update_sets, None);
    assert_eq!(
        view.player_states,
        vec![
            seat(U1, "test1", vec![], true, false),
            seat(U2, "test2", vec![t(5, Red), t(7, Blue)], true, false),
        ]
    );
    assert_eq!(view.round_scores.len(), 1);
    assert_eq!(view.round_scores[0][&U1], 12);
    assert_eq!(view.round_scores[0][&U2], -12);
}

/// Reaching the target score completes the game.
#[test]
fn test_finalize_completes_game() {
    let deal =
        going_out_deal().with_round_scores(vec![vec![20, -20], vec![-10, 10], vec![80, -80]]);
    let options = GameOptions::default().with_play_to(100);
    let (service, game_id) = service_with(dealt_game_with(options, deal));

    let view = service.play(U1, game_id, Action::FinalizeUpdateSets).unwrap();

    assert_eq!(view.action_to_user_id, U1);
    assert_eq!(view.state, GameState::Complete);
    assert_eq!(view.sets, vec![ten_quad()]);
    let scores: Vec<(i64, i64)> = view
        .round_scores
        .iter()
        .map(|round| (round[&U1], round[&U2]))
        .collect();
    assert_eq!(scores, vec![(20, -20), (-10, 10), (80, -80), (12, -12)]);
}

/// Drawing takes the last tile of the pool.
#[test]
fn test_pick_up_tile() {
    let deal = Deal::new(vec![vec![t(10, Blue)], vec![t(7, Yellow)]])
        .with_pool(vec![t(5, Blue), t(11, Yellow)]);
    let (service, game_id) = service_with(dealt_game(deal));

    let view = service
        .play_request(U1, game_id, ActionRequest::pick_up_tile_or_pass())
        .unwrap();

    assert_eq!(view.action_to_user_id, U2);
    assert_eq!(view.state, GameState::RoundActive);
    assert_eq!(view.tile_pool_count, 1);
    assert_eq!(
        view.player(U1),
        Some(&seat(U1, "test1", vec![t(10, Blue), t(11, Yellow)], false, false))
    );
}

/// Drawing discards whatever the player had staged.
#[test]
fn test_pick_up_discards_staged_proposal() {
    let deal = Deal::new(vec![vec![t(10, Black), t(1, Red)], vec![t(7, Yellow)]])
        .with_sets(vec![ten_group()])
        .with_pool(vec![t(5, Blue)])
        .with_initial_meld(vec![true, true])
        .with_staged(StagedProposal::PendingValid(UpdateSets::new(
            vec![ten_quad()],
            vec![t(10, Black)],
            vec![t(1, Red)],
        )));
    let (service, game_id) = service_with(dealt_game(deal));

    service.play(U1, game_id, Action::PickUpOrPass).unwrap();
    let view = service.get(U1, game_id).unwrap();

    assert_eq!(view.sets, vec![ten_group()]);
    assert_eq!(view.player(U1).unwrap().number_of_tiles, Some(3));
    assert_eq!(view.last_valid_update_sets, None);
}

/// With an empty pool the player passes.
#[test]
fn test_pass_with_empty_pool() {
    let deal = Deal::new(vec![vec![t(10, Blue)], vec![t(7, Yellow)]]);
    let (service, game_id) = service_with(dealt_game(deal));

    let view = service.play(U1, game_id, Action::PickUpOrPass).unwrap();

    assert_eq!(view.action_to_user_id, U2);
    assert_eq!(view.state, GameState::RoundActive);
    assert_eq!(view.player(U1), Some(&seat(U1, "test1", vec![t(10, Blue)], false, true)));
}

/// When every player passes in a row the lowest hand wins the round.
#[test]
fn test_pass_completes_round() {
    let deal = Deal::new(vec![vec![t(10, Blue)], vec![t(7, Yellow)]])
        .with_passed_last_turn(vec![false, true]);
    let (service, game_id) = service_with(dealt_game(deal));

    let view = service.play(U1, game_id, Action::PickUpOrPass).unwrap();

    assert_eq!(view.action_to_user_id, U2);
    assert_eq!(view.state, GameState::RoundComplete);
    assert_eq!(
        view.player_states,
        vec![
            seat(U1, "test1", vec![t(10, Blue)], false, true),
            seat(U2, "test2", vec![t(7, Yellow)], false, true),
        ]
    );
    assert_eq!(view.round_scores.len(), 1);
    assert_eq!(view.round_scores[0][&U1], -10);
    assert_eq!(view.round_scores[0][&U2], 10);
}

/// A pass round can also finish the game.
#[test]
fn test_pass_completes_game() {
    let deal = Deal::new(vec![vec![t(10, Blue)], vec![t(7, Yellow)]])
        .with_passed_last_turn(vec![false, true])
        .with_round_scores(vec![vec![-20, 20], vec![5, -5], vec![-80, 80]]);
    let (service, game_id) = service_with(dealt_game(deal));

    let view = service.play(U1, game_id, Action::PickUpOrPass).unwrap();

    assert_eq!(view.action_to_user_id, U2);
    assert_eq!(view.state, GameState::Complete);
    assert_eq!(view.round_scores.len(), 4);
    assert_eq!(view.round_scores[3][&U2], 10);
}

/// No turn-ending action is accepted once the round is over.
#[test]
fn test_play_after_round_complete() {
    let (service, game_id) = service_with(dealt_game(going_out_deal()));
    service.play(U1, game_id, Action::FinalizeUpdateSets).unwrap();

    let err = service.play(U1, game_id, Action::PickUpOrPass).unwrap_err();

    assert_eq!(message(&err), "Round is not active.");
}
