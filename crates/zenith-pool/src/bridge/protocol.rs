/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Balls: 16 × 8 floats]
/// [Sounds: max_sounds × 2 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Ball slots are fixed; sound and event capacities come from the config
/// and are read by TypeScript through the capacity exports.
use crate::api::config::BridgeConfig;
use crate::api::types::{GameEvent, SoundCue};
use crate::renderer::instance::BallInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_STATUS: usize = 3;
pub const HEADER_MODE: usize = 4;
pub const HEADER_CURRENT_PLAYER: usize = 5;
pub const HEADER_SCORE_ONE: usize = 6;
pub const HEADER_SCORE_TWO: usize = 7;
/// -1 while nobody has won.
pub const HEADER_WINNER: usize = 8;
pub const HEADER_IS_MOVING: usize = 9;
pub const HEADER_AIM_ACTIVE: usize = 10;
pub const HEADER_AIM_ANGLE: usize = 11;
pub const HEADER_AIM_POWER: usize = 12;
pub const HEADER_BALL_COUNT: usize = 13;
pub const HEADER_SOUND_COUNT: usize = 14;
pub const HEADER_EVENT_COUNT: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Ball slots: the cue ball plus fifteen object balls.
pub const MAX_BALLS: usize = 16;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum sound cues per frame.
    pub max_sounds: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of ball data section in floats.
    pub ball_data_floats: usize,
    /// Size of sound data section in floats.
    pub sound_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where ball data begins.
    pub ball_data_offset: usize,
    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_sounds: usize, max_events: usize) -> Self {
        let ball_data_floats = MAX_BALLS * BallInstance::FLOATS;
        let sound_data_floats = max_sounds * SoundCue::FLOATS;
        let event_data_floats = max_events * GameEvent::FLOATS;

        let ball_data_offset = HEADER_FLOATS;
        let sound_data_offset = ball_data_offset + ball_data_floats;
        let event_data_offset = sound_data_offset + sound_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_sounds,
            max_events,
            ball_data_floats,
            sound_data_floats,
            event_data_floats,
            ball_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(config.max_sounds, config.max_events)
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}
