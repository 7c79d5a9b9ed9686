//! Match state and its pure transition function.

use serde::{Deserialize, Serialize};

use crate::ai::shot::Shot;
use crate::api::config::{AudioConfig, PoolConfig};
use crate::api::events::MatchEvent;
use crate::api::types::{GameMode, Player};
use crate::core::geometry::from_polar;
use crate::game::rack;
use crate::physics::ball::Ball;
use crate::physics::motion::{check_pocket, step_contacts};
use crate::physics::table::Table;

/// Difficulty every match starts at.
pub const DEFAULT_AI_DIFFICULTY: f32 = 0.1;

/// Number of the ball that ends the match when pocketed.
pub const EIGHT_BALL: u8 = 8;

/// Everything a renderer or rule check needs to know about a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Object balls in rack order. Pocketed balls stay in the list.
    pub balls: Vec<Ball>,
    pub cue_ball: Ball,
    pub current_player: Player,
    pub mode: GameMode,
    pub scores: [u32; 2],
    /// Whether anything was moving at the end of the last tick.
    pub is_moving: bool,
    pub potted_this_shot: bool,
    pub winner: Option<Player>,
    pub ai_difficulty: f32,
}

/// Input to [`GameState::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Advance the table by one tick.
    Tick,
    /// Strike the cue ball.
    Shoot(Shot),
}

/// Result of a transition: the replacement state and what happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<MatchEvent>,
}

impl GameState {
    /// A freshly racked table with Player One to break.
    pub fn new(mode: GameMode, config: &PoolConfig) -> Self {
        Self {
            balls: rack::rack(&config.table),
            cue_ball: rack::cue_ball(&config.table),
            current_player: Player::One,
            mode,
            scores: [0, 0],
            is_moving: false,
            potted_this_shot: false,
            winner: None,
            ai_difficulty: DEFAULT_AI_DIFFICULTY,
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        self.mode.is_ai_seat(self.current_player)
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_ai_turn()
    }

    /// True while nobody has won and the table is at rest.
    pub fn awaiting_shot(&self) -> bool {
        self.winner.is_none() && !self.is_moving
    }

    /// Compute the state that follows `action`. `self` is left untouched.
    pub fn step(&self, action: Action, table: &Table, audio: &AudioConfig) -> Transition {
        match action {
            Action::Tick => self.tick(table, audio),
            Action::Shoot(shot) => self.shoot(shot),
        }
    }

    fn shoot(&self, shot: Shot) -> Transition {
        let mut next = self.clone();
        next.cue_ball.velocity = from_polar(shot.angle, shot.power);
        next.is_moving = true;
        next.potted_this_shot = false;
        Transition {
            state: next,
            events: Vec::new(),
        }
    }

    fn tick(&self, table: &Table, audio: &AudioConfig) -> Transition {
        let mut next = self.clone();
        let mut events = Vec::new();
        if self.winner.is_some() {
            return Transition {
                state: next,
                events,
            };
        }

        let report = step_contacts(&mut next.cue_ball, &mut next.balls, table);
        events.extend(
            report
                .wall_impulses
                .iter()
                .filter(|&&impulse| impulse > audio.wall_threshold)
                .map(|&impulse| MatchEvent::WallHit { impulse }),
        );
        events.extend(
            report
                .ball_impulses
                .iter()
                .filter(|&&impulse| impulse > audio.ball_threshold)
                .map(|&impulse| MatchEvent::BallHit { impulse }),
        );
        let mut any_moving = report.any_moving;

        // Scratch: straight back to the spot. The table is treated as at
        // rest for this tick even if object balls are still rolling.
        if check_pocket(&mut next.cue_ball, &table.pockets) {
            events.push(MatchEvent::CueBallScratched);
            next.cue_ball.respawn(table.cue_spawn);
            any_moving = false;
        }

        let shooter = self.current_player;
        for ball in next.balls.iter_mut() {
            if check_pocket(ball, &table.pockets) {
                events.push(MatchEvent::BallPotted {
                    number: ball.number,
                    player: shooter,
                });
                next.potted_this_shot = true;
                next.scores[shooter.index()] += 1;
            }
        }

        let turn_done = self.is_moving && !any_moving;
        if turn_done && !next.potted_this_shot {
            next.current_player = shooter.other();
        }

        let eight_down = next
            .balls
            .iter()
            .any(|b| b.number == EIGHT_BALL && b.in_pocket);
        if eight_down {
            next.winner = Some(shooter);
            events.push(MatchEvent::GameOver { winner: shooter });
        }

        if turn_done {
            events.push(MatchEvent::ScoreChanged {
                scores: next.scores,
            });
            events.push(MatchEvent::TurnChanged {
                player: next.current_player,
            });
        }

        next.is_moving = any_moving;
        Transition {
            state: next,
            events,
        }
    }
}
