pub mod instance;

pub use instance::{BallBuffer, BallInstance, FLAG_POCKETED, FLAG_STRIPED};
