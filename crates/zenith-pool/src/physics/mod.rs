pub mod ball;
pub mod motion;
pub mod table;

pub use ball::{Ball, BallColor};
pub use motion::{advance, check_pocket, resolve_collision, step_contacts, ContactReport};
pub use table::{Pocket, Table};
