//! Per-tick integration and contact resolution.
//!
//! One tick is one unit of simulated time: positions move by exactly one
//! velocity step (explicit Euler, no substeps).

use crate::core::geometry::distance;
use crate::physics::ball::Ball;
use crate::physics::table::{Pocket, Table};

/// Move a ball one tick, apply felt friction and bounce it off the cushions.
///
/// Returns the pre-bounce axis speed of the hardest cushion hit this tick,
/// or 0 when no cushion was touched. The value is only an audio signal.
pub fn advance(ball: &mut Ball, table: &Table) -> f32 {
    if ball.in_pocket {
        return 0.0;
    }
    let p = &table.physics;

    ball.position += ball.velocity;
    ball.velocity *= p.friction;

    // Snap creeping axes to rest.
    if ball.velocity.x.abs() < p.min_velocity {
        ball.velocity.x = 0.0;
    }
    if ball.velocity.y.abs() < p.min_velocity {
        ball.velocity.y = 0.0;
    }

    let r = ball.radius;
    let mut impulse = 0.0_f32;

    if ball.position.x - r < 0.0 {
        impulse = ball.velocity.x.abs();
        ball.position.x = r;
        ball.velocity.x *= -p.wall_bounce;
    } else if ball.position.x + r > table.width {
        impulse = ball.velocity.x.abs();
        ball.position.x = table.width - r;
        ball.velocity.x *= -p.wall_bounce;
    }

    if ball.position.y - r < 0.0 {
        impulse = impulse.max(ball.velocity.y.abs());
        ball.position.y = r;
        ball.velocity.y *= -p.wall_bounce;
    } else if ball.position.y + r > table.height {
        impulse = impulse.max(ball.velocity.y.abs());
        ball.position.y = table.height - r;
        ball.velocity.y *= -p.wall_bounce;
    }

    impulse
}

/// Resolve an equal-mass elastic contact between two balls.
///
/// Overlapping balls are pushed apart symmetrically until they just touch.
/// If they are approaching along the centre line their normal velocity
/// components are exchanged; tangential components are untouched.
/// Returns the exchanged normal speed, or 0 when no impulse was applied.
pub fn resolve_collision(a: &mut Ball, b: &mut Ball) -> f32 {
    if a.in_pocket || b.in_pocket {
        return 0.0;
    }

    let delta = b.position - a.position;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;
    if dist >= min_dist {
        return 0.0;
    }

    // Coincident centres: avoid dividing by zero.
    let normal = delta / if dist == 0.0 { 1.0 } else { dist };

    let separation = normal * ((min_dist - dist) / 2.0);
    a.position -= separation;
    b.position += separation;

    let v1n = a.velocity.dot(normal);
    let v2n = b.velocity.dot(normal);
    let impulse = v1n - v2n;

    if impulse > 0.0 {
        a.velocity -= normal * impulse;
        b.velocity += normal * impulse;
        return impulse;
    }
    0.0
}

/// Capture the ball if its centre lies inside a pocket.
/// Returns true only on the tick the ball is captured.
pub fn check_pocket(ball: &mut Ball, pockets: &[Pocket]) -> bool {
    if ball.in_pocket {
        return false;
    }
    for pocket in pockets {
        if distance(ball.position, pocket.position) < pocket.radius {
            ball.sink();
            return true;
        }
    }
    false
}

/// Impulses produced by one [`step_contacts`] pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactReport {
    /// Non-zero cushion impulses, cue ball first, then rack order.
    pub wall_impulses: Vec<f32>,
    /// Non-zero ball-ball impulses in pair order.
    pub ball_impulses: Vec<f32>,
    /// Whether any ball was still moving right after integration.
    pub any_moving: bool,
}

/// One tick of movement and contacts for the whole table.
///
/// Every cushion interaction happens before any ball-ball interaction.
/// Pairs are visited in a fixed nested order: for each object ball `i`,
/// cue-vs-`i` and then `i`-vs-`j` for every `j > i`. Each pair is tested
/// exactly once, even if an earlier pair already moved one of its balls.
pub fn step_contacts(cue: &mut Ball, balls: &mut [Ball], table: &Table) -> ContactReport {
    let min_velocity = table.physics.min_velocity;
    let mut report = ContactReport::default();

    if !cue.in_pocket {
        let impulse = advance(cue, table);
        if impulse > 0.0 {
            report.wall_impulses.push(impulse);
        }
        report.any_moving |= cue.is_moving(min_velocity);
    }
    for ball in balls.iter_mut() {
        let impulse = advance(ball, table);
        if impulse > 0.0 {
            report.wall_impulses.push(impulse);
        }
        report.any_moving |= ball.is_moving(min_velocity);
    }

    let n = balls.len();
    for i in 0..n {
        let impulse = resolve_collision(cue, &mut balls[i]);
        if impulse > 0.0 {
            report.ball_impulses.push(impulse);
        }
        for j in (i + 1)..n {
            let (head, tail) = balls.split_at_mut(j);
            let impulse = resolve_collision(&mut head[i], &mut tail[0]);
            if impulse > 0.0 {
                report.ball_impulses.push(impulse);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::from_polar;
    use crate::physics::ball::BallColor;
    use glam::Vec2;

    const GREY: BallColor = BallColor::new(0.5, 0.5, 0.5);

    fn ball(number: u8, x: f32, y: f32) -> Ball {
        Ball::new(number, Vec2::new(x, y), 10.0, GREY)
    }

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn slow_ball_snaps_to_rest_and_stays() {
        let table = Table::default();
        let mut b = ball(1, 300.0, 200.0).with_velocity(Vec2::new(0.1, -0.05));
        advance(&mut b, &table);
        assert_eq!(b.velocity, Vec2::ZERO);

        let resting = b.position;
        for _ in 0..100 {
            assert_eq!(advance(&mut b, &table), 0.0);
        }
        assert_eq!(b.velocity, Vec2::ZERO);
        assert_eq!(b.position, resting);
    }

    #[test]
    fn friction_scales_velocity_each_tick() {
        let table = Table::default();
        let mut b = ball(1, 300.0, 200.0).with_velocity(Vec2::new(10.0, 0.0));
        advance(&mut b, &table);
        assert_eq!(b.position, Vec2::new(310.0, 200.0));
        assert!(approx(b.velocity.x, 9.9, 1e-5));
    }

    #[test]
    fn right_cushion_clamps_and_reflects() {
        let table = Table::default();
        let mut b = ball(1, 785.0, 200.0).with_velocity(Vec2::new(10.0, 0.0));
        let impulse = advance(&mut b, &table);
        assert!(approx(impulse, 9.9, 1e-5), "impulse was {}", impulse);
        assert_eq!(b.position.x, 790.0);
        assert!(approx(b.velocity.x, -9.9 * 0.82, 1e-4));
    }

    #[test]
    fn corner_hit_reports_larger_axis() {
        let table = Table::default();
        let mut b = ball(1, 12.0, 12.0).with_velocity(Vec2::new(-5.0, -8.0));
        let impulse = advance(&mut b, &table);
        assert!(approx(impulse, 7.92, 1e-4), "impulse was {}", impulse);
        assert_eq!(b.position, Vec2::new(10.0, 10.0));
        assert!(b.velocity.x > 0.0 && b.velocity.y > 0.0);
    }

    #[test]
    fn balls_stay_inside_cushions() {
        let table = Table::default();
        let starts = [
            (15.0, 15.0, -40.0, -33.0),
            (790.0, 390.0, 55.0, 60.0),
            (400.0, 12.0, 3.0, -25.0),
            (11.0, 380.0, -18.0, 29.0),
        ];
        for (x, y, vx, vy) in starts {
            let mut b = ball(1, x, y).with_velocity(Vec2::new(vx, vy));
            for _ in 0..200 {
                advance(&mut b, &table);
                let (r, p) = (b.radius, b.position);
                assert!(p.x >= r && p.x <= table.width - r, "x={}", p.x);
                assert!(p.y >= r && p.y <= table.height - r, "y={}", p.y);
            }
        }
    }

    #[test]
    fn pocketed_ball_is_inert() {
        let table = Table::default();
        let mut b = ball(3, 300.0, 200.0);
        b.sink();
        let mut other = ball(4, 305.0, 200.0).with_velocity(Vec2::new(-3.0, 0.0));

        assert_eq!(advance(&mut b, &table), 0.0);
        assert_eq!(b.position, Vec2::new(300.0, 200.0));
        assert_eq!(resolve_collision(&mut b, &mut other), 0.0);
        assert_eq!(other.position, Vec2::new(305.0, 200.0));
        assert!(!check_pocket(&mut b, &table.pockets));
    }

    #[test]
    fn approaching_balls_exchange_normal_velocity() {
        let mut a = ball(1, 100.0, 100.0).with_velocity(Vec2::new(3.0, 1.0));
        let mut b = ball(2, 115.0, 100.0).with_velocity(Vec2::new(-1.0, 2.0));

        let impulse = resolve_collision(&mut a, &mut b);

        // d = v1n - v2n = 3 - (-1)
        assert!(approx(impulse, 4.0, 1e-5));
        assert!(approx(a.velocity.x, -1.0, 1e-5));
        assert!(approx(b.velocity.x, 3.0, 1e-5));
        // Tangential components untouched.
        assert_eq!(a.velocity.y, 1.0);
        assert_eq!(b.velocity.y, 2.0);
    }

    #[test]
    fn overlap_is_fully_corrected_in_one_call() {
        let mut a = ball(1, 50.0, 50.0);
        let mut b = ball(2, 60.0, 58.0);
        resolve_collision(&mut a, &mut b);
        let d = a.position.distance(b.position);
        assert!(approx(d, 20.0, 1e-4), "distance was {}", d);
    }

    #[test]
    fn receding_balls_separate_without_impulse() {
        let mut a = ball(1, 100.0, 100.0).with_velocity(Vec2::new(-2.0, 0.0));
        let mut b = ball(2, 110.0, 100.0).with_velocity(Vec2::new(2.0, 0.0));
        assert_eq!(resolve_collision(&mut a, &mut b), 0.0);
        assert_eq!(a.velocity, Vec2::new(-2.0, 0.0));
        assert!(approx(a.position.distance(b.position), 20.0, 1e-4));
    }

    #[test]
    fn coincident_centres_do_not_produce_nan() {
        let mut a = ball(1, 100.0, 100.0).with_velocity(Vec2::new(1.0, 0.0));
        let mut b = ball(2, 100.0, 100.0);
        resolve_collision(&mut a, &mut b);
        assert!(a.position.is_finite() && b.position.is_finite());
        assert!(a.velocity.is_finite() && b.velocity.is_finite());
    }

    #[test]
    fn separated_balls_are_untouched() {
        let mut a = ball(1, 100.0, 100.0).with_velocity(Vec2::new(1.0, 0.0));
        let mut b = ball(2, 125.0, 100.0);
        assert_eq!(resolve_collision(&mut a, &mut b), 0.0);
        assert_eq!(a.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn ball_near_corner_is_captured() {
        let table = Table::default();
        let mut b = ball(5, 15.0, 15.0).with_velocity(Vec2::new(-1.0, -1.0));
        assert!(check_pocket(&mut b, &table.pockets));
        assert!(b.in_pocket);
        assert_eq!(b.velocity, Vec2::ZERO);

        let mut far = ball(6, 20.0, 20.0);
        assert!(!check_pocket(&mut far, &table.pockets));
    }

    #[test]
    fn every_pocket_captures() {
        let table = Table::default();
        for pocket in &table.pockets {
            let mut b = ball(9, pocket.position.x, pocket.position.y);
            assert!(check_pocket(&mut b, &table.pockets));
        }
    }

    #[test]
    fn cue_strike_transfers_velocity_to_object_ball() {
        let table = Table::default();
        let mut cue = ball(0, 200.0, 200.0).with_velocity(from_polar(0.0, 20.0));
        let mut balls = vec![ball(1, 225.0, 200.0)];

        let report = step_contacts(&mut cue, &mut balls, &table);

        // Pre-impact cue speed after one tick of friction.
        let pre_impact = 20.0 * 0.99;
        assert!(approx(balls[0].velocity.x, pre_impact, 1e-3), "object vx={}", balls[0].velocity.x);
        assert!(approx(cue.velocity.x, 0.0, 1e-3), "cue vx={}", cue.velocity.x);
        assert_eq!(report.ball_impulses.len(), 1);
        assert!(report.any_moving);
        assert!(approx(cue.position.distance(balls[0].position), 20.0, 1e-3));
    }

    #[test]
    fn resting_table_reports_no_motion() {
        let table = Table::default();
        let mut cue = ball(0, 200.0, 200.0);
        let mut balls = vec![ball(1, 400.0, 200.0), ball(2, 500.0, 200.0)];
        let report = step_contacts(&mut cue, &mut balls, &table);
        assert!(!report.any_moving);
        assert!(report.wall_impulses.is_empty());
        assert!(report.ball_impulses.is_empty());
    }

    #[test]
    fn object_pairs_are_resolved() {
        let table = Table::default();
        let mut cue = ball(0, 100.0, 100.0);
        let mut balls = vec![
            ball(1, 400.0, 200.0).with_velocity(Vec2::new(6.0, 0.0)),
            ball(2, 425.0, 200.0),
        ];
        let report = step_contacts(&mut cue, &mut balls, &table);
        assert_eq!(report.ball_impulses.len(), 1);
        assert!(balls[1].velocity.x > 5.0);
    }
}
