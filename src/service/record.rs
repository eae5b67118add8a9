//! Compact persistence form of a game.
//!
//! Tiles are stored as their 0-52 integer codes and seats as indices, so a
//! record round-trips through `bincode` without the JSON tile shape. The
//! RNG is stored by position, so a restored game deals the same future
//! rounds as the game it was taken from.

use serde::{Deserialize, Serialize};

use crate::core::{
    ActionRecord, Game, GameId, GameOptions, GameRng, GameRngState, GameState, PlayerState,
    RoundScore, StagedProposal, UpdateSets, UserId,
};
use crate::error::{EngineError, Result};
use crate::tiles::{Tile, TilePool};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub user_id: UserId,
    pub display_name: String,
    pub tiles: Vec<u8>,
    pub has_played_initial_meld: bool,
    pub passed_last_turn: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSetsRecord {
    pub sets: Vec<Vec<u8>>,
    pub tiles_added: Vec<u8>,
    pub remaining_tiles: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StagedRecord {
    Absent,
    PendingInvalid(UpdateSetsRecord),
    PendingValid(UpdateSetsRecord),
}

/// Everything needed to restore a [`Game`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: GameId,
    pub host_user_id: UserId,
    pub options: GameOptions,
    pub players: Vec<PlayerRecord>,
    pub action_to: u32,
    pub round_starter: u32,
    pub round_number: u32,
    pub turn_number: u32,
    pub sets: Vec<Vec<u8>>,
    pub pool: Vec<u8>,
    pub state: GameState,
    pub staged: StagedRecord,
    pub consecutive_passes: u32,
    pub round_scores: Vec<RoundScore>,
    pub history: Vec<ActionRecord>,
    pub rng: GameRngState,
}

impl GameRecord {
    /// Serialize with bincode.
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| EngineError::Codec(e.to_string()))
    }

    /// Deserialize from bincode.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| EngineError::Codec(e.to_string()))
    }
}

fn codes(tiles: &[Tile]) -> Vec<u8> {
    tiles.iter().map(|t| t.code()).collect()
}

fn set_codes(sets: &[Vec<Tile>]) -> Vec<Vec<u8>> {
    sets.iter().map(|s| codes(s)).collect()
}

fn tiles(codes: &[u8]) -> Result<Vec<Tile>> {
    codes
        .iter()
        .map(|&c| Tile::from_code(c).map_err(|e| EngineError::Codec(e.to_string())))
        .collect()
}

fn set_tiles(sets: &[Vec<u8>]) -> Result<Vec<Vec<Tile>>> {
    sets.iter().map(|s| tiles(s)).collect()
}

impl From<&UpdateSets> for UpdateSetsRecord {
    fn from(u: &UpdateSets) -> Self {
        Self {
            sets: set_codes(&u.sets),
            tiles_added: codes(&u.tiles_added),
            remaining_tiles: codes(&u.remaining_tiles),
        }
    }
}

impl TryFrom<&UpdateSetsRecord> for UpdateSets {
    type Error = EngineError;

    fn try_from(r: &UpdateSetsRecord) -> Result<Self> {
        Ok(UpdateSets::new(
            set_tiles(&r.sets)?,
            tiles(&r.tiles_added)?,
            tiles(&r.remaining_tiles)?,
        ))
    }
}

impl From<&Game> for GameRecord {
    fn from(game: &Game) -> Self {
        let players = game
            .players
            .iter()
            .map(|p| PlayerRecord {
                user_id: p.user_id,
                display_name: p.display_name.clone(),
                tiles: codes(&p.tiles),
                has_played_initial_meld: p.has_played_initial_meld,
                passed_last_turn: p.passed_last_turn,
            })
            .collect();
        let staged = match &game.staged {
            StagedProposal::Absent => StagedRecord::Absent,
            StagedProposal::PendingInvalid(u) => StagedRecord::PendingInvalid(u.into()),
            StagedProposal::PendingValid(u) => StagedRecord::PendingValid(u.into()),
        };
        Self {
            game_id: game.game_id,
            host_user_id: game.host_user_id,
            options: game.options.clone(),
            players,
            action_to: game.action_to as u32,
            round_starter: game.round_starter as u32,
            round_number: game.round_number,
            turn_number: game.turn_number,
            sets: set_codes(&game.sets),
            pool: codes(game.pool.tiles()),
            state: game.state,
            staged,
            consecutive_passes: game.consecutive_passes as u32,
            round_scores: game.round_scores.iter().cloned().collect(),
            history: game.history.iter().cloned().collect(),
            rng: game.rng.state(),
        }
    }
}

impl TryFrom<GameRecord> for Game {
    type Error = EngineError;

    fn try_from(record: GameRecord) -> Result<Self> {
        let seat_count = record.players.len();
        let action_to = record.action_to as usize;
        let round_starter = record.round_starter as usize;
        if action_to >= seat_count || round_starter >= seat_count {
            return Err(EngineError::Codec("seat index out of range".to_string()));
        }

        let players = record
            .players
            .iter()
            .map(|p| {
                Ok(PlayerState {
                    user_id: p.user_id,
                    display_name: p.display_name.clone(),
                    tiles: tiles(&p.tiles)?,
                    has_played_initial_meld: p.has_played_initial_meld,
                    passed_last_turn: p.passed_last_turn,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let staged = match &record.staged {
            StagedRecord::Absent => StagedProposal::Absent,
            StagedRecord::PendingInvalid(u) => StagedProposal::PendingInvalid(u.try_into()?),
            StagedRecord::PendingValid(u) => StagedProposal::PendingValid(u.try_into()?),
        };

        Ok(Game {
            game_id: record.game_id,
            host_user_id: record.host_user_id,
            options: record.options,
            players,
            action_to,
            round_starter,
            round_number: record.round_number,
            turn_number: record.turn_number,
            sets: set_tiles(&record.sets)?,
            pool: TilePool::new(tiles(&record.pool)?),
            state: record.state,
            staged,
            consecutive_passes: record.consecutive_passes as usize,
            round_scores: record.round_scores.into_iter().collect(),
            history: record.history.into_iter().collect(),
            rng: GameRng::from_state(&record.rng),
        })
    }
}
