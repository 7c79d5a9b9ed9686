pub mod ai;
pub mod api;
pub mod bridge;
pub mod core;
pub mod game;
pub mod input;
pub mod physics;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use ai::shot::{difficulty_label, Shot, ShotSelector};
pub use api::config::{ConfigError, PoolConfig};
pub use api::events::MatchEvent;
pub use api::types::{GameEvent, GameMode, GameStatus, Player, SoundCue, SoundKind};
pub use bridge::protocol::ProtocolLayout;
pub use self::core::rng::Rng;
pub use self::core::time::{FixedTimestep, Scheduler, TimerHandle};
pub use game::session::{AiTurn, Session};
pub use game::state::{Action, GameState, Transition};
pub use input::aim::{AimGesture, AimPreview};
pub use input::queue::{InputEvent, InputQueue};
pub use physics::ball::{Ball, BallColor};
pub use physics::motion::{advance, check_pocket, resolve_collision};
pub use physics::table::{Pocket, Table};
pub use renderer::instance::{BallBuffer, BallInstance};
