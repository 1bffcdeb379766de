pub mod game_flow;
pub mod games;

pub use game_flow::GameFlowService;
pub use games::GameService;
