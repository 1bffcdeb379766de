pub mod game_state;

pub use game_state::{
    CreateGameRequest, MoveRequest, MoveResponse, NewGameResponse, SnapshotResponse,
};
