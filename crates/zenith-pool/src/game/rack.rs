//! Ball catalogue and the opening triangle.

use glam::Vec2;

use crate::api::config::TableConfig;
use crate::physics::ball::{Ball, BallColor};

/// Number of object balls in a full rack.
pub const OBJECT_BALLS: u8 = 15;

/// Solid colours for balls 1..=8; stripes 9..=15 reuse 1..=7.
const SOLIDS: [u32; 8] = [
    0xfbbf24, // 1 yellow
    0x3b82f6, // 2 blue
    0xef4444, // 3 red
    0xa855f7, // 4 purple
    0xf97316, // 5 orange
    0x22c55e, // 6 green
    0x7f1d1d, // 7 maroon
    0x0f172a, // 8 black
];

fn from_hex(rgb: u32) -> BallColor {
    let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
    BallColor::new(channel(16), channel(8), channel(0))
}

/// Display colour for a ball number. 0 is the cue ball.
pub fn ball_color(number: u8) -> BallColor {
    match number {
        0 => BallColor::new(1.0, 1.0, 1.0),
        1..=8 => from_hex(SOLIDS[number as usize - 1]),
        _ => from_hex(SOLIDS[(number as usize - 9) % 7]),
    }
}

pub fn is_striped(number: u8) -> bool {
    number > 8
}

/// The cue ball on its spawn spot.
pub fn cue_ball(table: &TableConfig) -> Ball {
    Ball::new(0, table.cue_spawn_point(), table.ball_radius, ball_color(0))
}

/// Fifteen object balls in a five-row triangle, apex toward the cue ball.
/// Numbers run 1..=15 in row-major order.
pub fn rack(table: &TableConfig) -> Vec<Ball> {
    let apex = table.rack_apex_point();
    let r = table.ball_radius;
    let mut balls = Vec::with_capacity(OBJECT_BALLS as usize);
    let mut number = 1u8;

    for row in 0..5 {
        let x = apex.x + row as f32 * 2.0 * r * table.rack_spacing;
        for slot in 0..=row {
            let y = apex.y - row as f32 * r + slot as f32 * 2.0 * r;
            balls.push(
                Ball::new(number, Vec2::new(x, y), r, ball_color(number))
                    .with_stripe(is_striped(number)),
            );
            number += 1;
        }
    }
    balls
}
