pub mod games;

pub use games::{require_game, GameStore};
