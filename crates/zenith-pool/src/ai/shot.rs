//! Nearest-ball shot heuristic.

use crate::api::config::AiConfig;
use crate::core::geometry::{distance, heading};
use crate::core::rng::Rng;
use crate::physics::ball::Ball;

/// A cue strike: direction in radians and speed in table units per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub angle: f32,
    pub power: f32,
}

/// Picks a shot for a computer-controlled seat.
///
/// Aims straight at the closest live object ball. Pockets, blockers and
/// scratches are not considered.
#[derive(Debug, Clone)]
pub struct ShotSelector {
    config: AiConfig,
}

impl ShotSelector {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    /// Returns `None` when no object ball is left on the table.
    pub fn select(&self, cue: &Ball, targets: &[Ball], rng: &mut Rng) -> Option<Shot> {
        let mut nearest: Option<(&Ball, f32)> = None;
        for ball in targets.iter().filter(|b| !b.in_pocket && !b.is_cue()) {
            let d = distance(cue.position, ball.position);
            // Strict comparison: first-seen wins ties.
            if nearest.map_or(true, |(_, best)| d < best) {
                nearest = Some((ball, d));
            }
        }
        let (target, dist) = nearest?;

        let c = &self.config;
        let jitter = rng.next_signed(c.power_jitter / 2.0);
        let power = (c.base_power + (dist / c.distance_divisor).min(c.distance_cap) + jitter)
            .min(c.max_power);

        Some(Shot {
            angle: heading(cue.position, target.position),
            power,
        })
    }
}

impl Default for ShotSelector {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}

/// Display name for an AI difficulty in [0, 1].
pub fn difficulty_label(difficulty: f32) -> &'static str {
    if difficulty < 0.3 {
        "Beginner"
    } else if difficulty < 0.6 {
        "Advanced"
    } else if difficulty < 0.9 {
        "Expert"
    } else {
        "Master"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ball::BallColor;
    use glam::Vec2;
    use std::f32::consts::FRAC_PI_2;

    const GREY: BallColor = BallColor::new(0.5, 0.5, 0.5);

    fn ball(number: u8, x: f32, y: f32) -> Ball {
        Ball::new(number, Vec2::new(x, y), 10.0, GREY)
    }

    #[test]
    fn aims_at_nearest_live_ball() {
        let selector = ShotSelector::default();
        let mut rng = Rng::new(42);
        let cue = ball(0, 200.0, 200.0);
        let mut potted = ball(3, 210.0, 230.0);
        potted.sink();
        let targets = vec![ball(1, 500.0, 200.0), potted, ball(2, 200.0, 300.0)];

        let shot = selector.select(&cue, &targets, &mut rng).unwrap();
        assert!((shot.angle - FRAC_PI_2).abs() < 1e-5, "angle was {}", shot.angle);
    }

    #[test]
    fn power_stays_within_band() {
        let selector = ShotSelector::default();
        let mut rng = Rng::new(9);
        let cue = ball(0, 200.0, 200.0);
        // 100 away: base 19 + 2, jitter within +-0.75.
        let targets = vec![ball(1, 300.0, 200.0)];
        for _ in 0..200 {
            let shot = selector.select(&cue, &targets, &mut rng).unwrap();
            assert!(shot.power >= 20.25 && shot.power <= 21.75, "power was {}", shot.power);
        }
    }

    #[test]
    fn power_is_capped() {
        let config = AiConfig {
            base_power: 25.5,
            ..AiConfig::default()
        };
        let selector = ShotSelector::new(config);
        let mut rng = Rng::new(1);
        let cue = ball(0, 10.0, 10.0);
        let targets = vec![ball(1, 790.0, 390.0)];
        for _ in 0..50 {
            let shot = selector.select(&cue, &targets, &mut rng).unwrap();
            assert!(shot.power <= 26.0);
        }
    }

    #[test]
    fn ties_go_to_first_seen() {
        let selector = ShotSelector::default();
        let mut rng = Rng::new(3);
        let cue = ball(0, 200.0, 200.0);
        let targets = vec![ball(4, 250.0, 200.0), ball(5, 150.0, 200.0)];
        let shot = selector.select(&cue, &targets, &mut rng).unwrap();
        assert!(shot.angle.abs() < 1e-6);
    }

    #[test]
    fn cue_ball_is_never_a_target() {
        let selector = ShotSelector::default();
        let mut rng = Rng::new(3);
        let cue = ball(0, 200.0, 200.0);
        let targets = vec![ball(0, 220.0, 200.0)];
        assert!(selector.select(&cue, &targets, &mut rng).is_none());
    }

    #[test]
    fn empty_table_has_no_shot() {
        let selector = ShotSelector::default();
        let mut rng = Rng::new(3);
        let cue = ball(0, 200.0, 200.0);
        assert!(selector.select(&cue, &[], &mut rng).is_none());
    }

    #[test]
    fn same_seed_same_shot() {
        let selector = ShotSelector::default();
        let cue = ball(0, 200.0, 200.0);
        let targets = vec![ball(1, 420.0, 260.0)];
        let a = selector.select(&cue, &targets, &mut Rng::new(77));
        let b = selector.select(&cue, &targets, &mut Rng::new(77));
        assert_eq!(a, b);
    }

    #[test]
    fn labels_by_band() {
        assert_eq!(difficulty_label(0.1), "Beginner");
        assert_eq!(difficulty_label(0.3), "Advanced");
        assert_eq!(difficulty_label(0.75), "Expert");
        assert_eq!(difficulty_label(0.9), "Master");
        assert_eq!(difficulty_label(1.0), "Master");
    }
}
