pub mod game_players;
pub mod games;
