use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::api::config::AudioConfig;

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The seat that plays after this one.
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player arrays such as scores.
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Who controls each seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Two humans.
    PvP,
    /// Human on seat One, AI on seat Two.
    PvE,
    /// AI on both seats.
    EvE,
}

impl GameMode {
    /// Whether the given seat is driven by the shot selector.
    pub fn is_ai_seat(self, player: Player) -> bool {
        match self {
            GameMode::PvP => false,
            GameMode::PvE => player == Player::Two,
            GameMode::EvE => true,
        }
    }

    /// Wire code used by the browser bridge.
    pub fn code(self) -> u32 {
        match self {
            GameMode::PvP => 0,
            GameMode::PvE => 1,
            GameMode::EvE => 2,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(GameMode::PvP),
            1 => Some(GameMode::PvE),
            2 => Some(GameMode::EvE),
            _ => None,
        }
    }
}

/// Top-level session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    GameOver,
}

impl GameStatus {
    pub fn code(self) -> u32 {
        match self {
            GameStatus::Menu => 0,
            GameStatus::Playing => 1,
            GameStatus::GameOver => 2,
        }
    }
}

/// What the audio consumer should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SoundKind {
    /// Ball against ball or cushion; volume follows the impulse.
    Collision = 1,
    /// Ball dropping into a pocket.
    Pocket = 2,
}

/// A sound cue for the audio consumer. Fire-and-forget.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SoundCue {
    pub kind: f32,
    pub volume: f32,
}

impl SoundCue {
    pub const FLOATS: usize = 2;

    /// Map a collision impulse to a cue. Returns `None` when it would be inaudible.
    pub fn collision(impulse: f32, audio: &AudioConfig) -> Option<Self> {
        let volume = (impulse * audio.volume_scale).min(audio.max_volume);
        if volume < audio.min_volume {
            return None;
        }
        Some(Self {
            kind: SoundKind::Collision as u32 as f32,
            volume,
        })
    }

    pub fn pocket(audio: &AudioConfig) -> Self {
        Self {
            kind: SoundKind::Pocket as u32 as f32,
            volume: audio.pocket_volume,
        }
    }
}

/// A game event as written to the shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}
