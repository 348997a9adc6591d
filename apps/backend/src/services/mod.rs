pub mod game_flow;
pub mod rooms;
pub mod session;

pub use game_flow::GameFlowService;
pub use rooms::RoomService;
pub use session::PlayerSession;
