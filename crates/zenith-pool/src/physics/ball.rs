use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Linear RGB display colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BallColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// A ball on (or in) the table.
///
/// A pocketed ball has zero velocity and is skipped by every physics
/// operation. Balls are never removed; pocketing only sets the flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u8,
    /// 0 is the cue ball.
    pub number: u8,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: BallColor,
    pub is_striped: bool,
    pub in_pocket: bool,
}

impl Ball {
    /// A ball at rest.
    pub fn new(number: u8, position: Vec2, radius: f32, color: BallColor) -> Self {
        Self {
            id: number,
            number,
            position,
            velocity: Vec2::ZERO,
            radius,
            color,
            is_striped: false,
            in_pocket: false,
        }
    }

    pub fn with_stripe(mut self, striped: bool) -> Self {
        self.is_striped = striped;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn is_cue(&self) -> bool {
        self.number == 0
    }

    /// True if either velocity component is at or above `min_velocity`.
    pub fn is_moving(&self, min_velocity: f32) -> bool {
        self.velocity.x.abs() >= min_velocity || self.velocity.y.abs() >= min_velocity
    }

    /// Mark as captured. Velocity is cleared so the invariant holds.
    pub fn sink(&mut self) {
        self.in_pocket = true;
        self.velocity = Vec2::ZERO;
    }

    /// Put a pocketed ball back on the table at rest.
    pub fn respawn(&mut self, position: Vec2) {
        self.in_pocket = false;
        self.position = position;
        self.velocity = Vec2::ZERO;
    }
}
