//! Shared fixtures for integration tests.

#![allow(dead_code)]

use tile_rummy::core::{Deal, Game, GameBuilder, GameId, GameOptions, UserId};
use tile_rummy::error::EngineError;
use tile_rummy::service::GameService;
use tile_rummy::tiles::{Tile, TileColor};

pub const U1: UserId = UserId(1);
pub const U2: UserId = UserId(2);
pub const U3: UserId = UserId(3);
pub const U4: UserId = UserId(4);

pub fn t(rank: u8, color: TileColor) -> Tile {
    Tile::number(rank, color)
}

/// A two-player game from explicit fixtures, seated as "test1" and "test2".
pub fn dealt_game(deal: Deal) -> Game {
    dealt_game_with(GameOptions::default(), deal)
}

pub fn dealt_game_with(options: GameOptions, deal: Deal) -> Game {
    GameBuilder::new(GameId::new(1), U1)
        .player(U1, "test1")
        .player(U2, "test2")
        .options(options)
        .build_dealt(deal)
        .expect("fixture deal is valid")
}

/// An in-memory service holding `game`.
pub fn service_with(game: Game) -> (GameService, GameId) {
    let service = GameService::in_memory();
    let game_id = game.game_id();
    service.insert_game(game, U1).expect("insert fixture game");
    (service, game_id)
}

/// The single validation message of `err`.
pub fn message(err: &EngineError) -> &str {
    match err.validation_messages() {
        Some([only]) => only.as_str(),
        other => panic!("expected one validation message, got {:?}", other),
    }
}
