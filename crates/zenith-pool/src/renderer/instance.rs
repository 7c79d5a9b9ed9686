use bytemuck::{Pod, Zeroable};

use crate::game::state::GameState;
use crate::physics::ball::Ball;

/// Flag bit: ball is a stripe.
pub const FLAG_STRIPED: u32 = 1 << 0;
/// Flag bit: ball is in a pocket and should not be drawn on the felt.
pub const FLAG_POCKETED: u32 = 1 << 1;

/// Per-ball render data written to the shared buffer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Ball number; 0 is the cue ball.
    pub number: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Bitwise OR of `FLAG_*`, stored as a float.
    pub flags: f32,
}

impl BallInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_ball(ball: &Ball) -> Self {
        let mut flags = 0;
        if ball.is_striped {
            flags |= FLAG_STRIPED;
        }
        if ball.in_pocket {
            flags |= FLAG_POCKETED;
        }
        Self {
            x: ball.position.x,
            y: ball.position.y,
            radius: ball.radius,
            number: ball.number as f32,
            r: ball.color.r,
            g: ball.color.g,
            b: ball.color.b,
            flags: flags as f32,
        }
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags as u32) & flag != 0
    }
}

/// Ball instances for one frame: cue ball first, then rack order.
pub struct BallBuffer {
    pub instances: Vec<BallInstance>,
}

impl BallBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(16),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Rebuild from a match state.
    pub fn fill(&mut self, state: &GameState) {
        self.clear();
        self.instances.push(BallInstance::from_ball(&state.cue_ball));
        self.instances
            .extend(state.balls.iter().map(BallInstance::from_ball));
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for BallBuffer {
    fn default() -> Self {
        Self::new()
    }
}
