//! Round and match scoring.
//!
//! Rounds are zero-sum. Each losing player scores minus the value of the
//! tiles left in their hand; the round winner scores the total of those
//! penalties. Tiles are worth their rank and a joker is worth the
//! configured penalty.

use std::collections::BTreeMap;

use crate::core::{PlayerState, RoundScore, UserId};

/// Score one round.
///
/// `winner` is the seat credited with the round.
#[must_use]
pub fn compute_round_score(
    players: &[PlayerState],
    winner: usize,
    joker_penalty: i64,
) -> RoundScore {
    let mut scores = RoundScore::new();
    let mut pot = 0;
    for (seat, player) in players.iter().enumerate() {
        if seat == winner {
            continue;
        }
        let penalty = player.hand_value(joker_penalty);
        pot += penalty;
        scores.insert(player.user_id, -penalty);
    }
    scores.insert(players[winner].user_id, pot);
    scores
}

/// Seat credited with a round that ended because every player passed.
///
/// The lowest hand value wins; ties go to the first tied seat counting
/// from the round starter.
#[must_use]
pub fn pass_round_winner(
    players: &[PlayerState],
    round_starter: usize,
    joker_penalty: i64,
) -> usize {
    let count = players.len();
    (0..count)
        .map(|offset| (round_starter + offset) % count)
        .min_by_key(|&seat| players[seat].hand_value(joker_penalty))
        .unwrap_or(round_starter)
}

/// Total per user across rounds. Every user in `users` appears, starting at 0.
pub fn cumulative_scores<'a>(
    users: impl IntoIterator<Item = UserId>,
    rounds: impl IntoIterator<Item = &'a RoundScore>,
) -> BTreeMap<UserId, i64> {
    let mut totals: BTreeMap<UserId, i64> = users.into_iter().map(|u| (u, 0)).collect();
    for round in rounds {
        for (user, score) in round {
            *totals.entry(*user).or_insert(0) += score;
        }
    }
    totals
}

/// Users sharing the highest total.
#[must_use]
pub fn leaders(totals: &BTreeMap<UserId, i64>) -> Vec<UserId> {
    let Some(best) = totals.values().copied().max() else {
        return Vec::new();
    };
    totals
        .iter()
        .filter(|(_, score)| **score == best)
        .map(|(&user, _)| user)
        .collect()
}

/// Whether any total has reached the target.
#[must_use]
pub fn target_reached(totals: &BTreeMap<UserId, i64>, play_to: i64) -> bool {
    totals.values().any(|&score| score >= play_to)
}
