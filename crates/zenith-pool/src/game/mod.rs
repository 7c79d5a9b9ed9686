pub mod rack;
pub mod session;
pub mod state;

pub use session::{AiTurn, Session};
pub use state::{Action, GameState, Transition};
