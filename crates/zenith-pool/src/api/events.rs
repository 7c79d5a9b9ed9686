//! Domain events emitted by state transitions.
//!
//! Render, audio and UI layers subscribe to these instead of the simulation
//! calling into them.

use crate::api::config::AudioConfig;
use crate::api::types::{GameEvent, GameMode, Player, SoundCue};

/// Wire kinds for [`GameEvent::kind`].
pub mod kinds {
    pub const SCORE_CHANGED: f32 = 1.0;
    pub const TURN_CHANGED: f32 = 2.0;
    pub const GAME_OVER: f32 = 3.0;
    pub const BALL_POTTED: f32 = 4.0;
    pub const MATCH_STARTED: f32 = 5.0;
    pub const CUE_BALL_SCRATCHED: f32 = 6.0;
    pub const DIFFICULTY_CHANGED: f32 = 7.0;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchEvent {
    /// A new match began.
    MatchStarted { mode: GameMode },
    /// A ball bounced off a cushion hard enough to be heard.
    WallHit { impulse: f32 },
    /// Two balls collided hard enough to be heard.
    BallHit { impulse: f32 },
    /// The cue ball dropped and was put back on its spot.
    CueBallScratched,
    /// An object ball dropped; `player` is the shooter credited with it.
    BallPotted { number: u8, player: Player },
    /// Scores as of the end of a shot.
    ScoreChanged { scores: [u32; 2] },
    /// The table came to rest; `player` shoots next (may be the same seat).
    TurnChanged { player: Player },
    /// The 8-ball dropped.
    GameOver { winner: Player },
    DifficultyChanged { difficulty: f32 },
}

impl MatchEvent {
    /// Wire form for the shared buffer. Pure audio events have none.
    pub fn to_game_event(&self) -> Option<GameEvent> {
        let event = match *self {
            MatchEvent::MatchStarted { mode } => GameEvent {
                kind: kinds::MATCH_STARTED,
                a: mode.code() as f32,
                ..GameEvent::default()
            },
            MatchEvent::WallHit { .. } | MatchEvent::BallHit { .. } => return None,
            MatchEvent::CueBallScratched => GameEvent {
                kind: kinds::CUE_BALL_SCRATCHED,
                ..GameEvent::default()
            },
            MatchEvent::BallPotted { number, player } => GameEvent {
                kind: kinds::BALL_POTTED,
                a: number as f32,
                b: player.index() as f32,
                c: 0.0,
            },
            MatchEvent::ScoreChanged { scores } => GameEvent {
                kind: kinds::SCORE_CHANGED,
                a: scores[0] as f32,
                b: scores[1] as f32,
                c: 0.0,
            },
            MatchEvent::TurnChanged { player } => GameEvent {
                kind: kinds::TURN_CHANGED,
                a: player.index() as f32,
                ..GameEvent::default()
            },
            MatchEvent::GameOver { winner } => GameEvent {
                kind: kinds::GAME_OVER,
                a: winner.index() as f32,
                ..GameEvent::default()
            },
            MatchEvent::DifficultyChanged { difficulty } => GameEvent {
                kind: kinds::DIFFICULTY_CHANGED,
                a: difficulty,
                ..GameEvent::default()
            },
        };
        Some(event)
    }

    /// The sound this event should trigger, if any.
    pub fn sound(&self, audio: &AudioConfig) -> Option<SoundCue> {
        match *self {
            MatchEvent::WallHit { impulse } | MatchEvent::BallHit { impulse } => {
                SoundCue::collision(impulse, audio)
            }
            MatchEvent::CueBallScratched | MatchEvent::BallPotted { .. } => {
                Some(SoundCue::pocket(audio))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SoundKind;

    #[test]
    fn score_event_carries_both_scores() {
        let ev = MatchEvent::ScoreChanged { scores: [3, 5] }.to_game_event().unwrap();
        assert_eq!(ev.kind, kinds::SCORE_CHANGED);
        assert_eq!(ev.a, 3.0);
        assert_eq!(ev.b, 5.0);
    }

    #[test]
    fn audio_only_events_have_no_wire_form() {
        assert!(MatchEvent::WallHit { impulse: 2.0 }.to_game_event().is_none());
        assert!(MatchEvent::BallHit { impulse: 2.0 }.to_game_event().is_none());
    }

    #[test]
    fn pockets_and_hits_make_sounds() {
        let audio = AudioConfig::default();
        let pot = MatchEvent::BallPotted { number: 3, player: Player::One }.sound(&audio).unwrap();
        assert_eq!(pot.kind, SoundKind::Pocket as u32 as f32);
        let hit = MatchEvent::BallHit { impulse: 4.0 }.sound(&audio).unwrap();
        assert_eq!(hit.kind, SoundKind::Collision as u32 as f32);
        assert!(MatchEvent::TurnChanged { player: Player::Two }.sound(&audio).is_none());
    }
}
