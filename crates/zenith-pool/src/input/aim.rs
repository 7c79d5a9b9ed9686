//! Drag-to-aim: pull back from the cue ball, release to shoot.

use glam::Vec2;

use crate::ai::shot::Shot;
use crate::api::config::AimConfig;
use crate::core::geometry::{from_polar, heading};

/// Guide line length at zero power.
const GUIDE_BASE: f32 = 60.0;
/// Extra guide line length per unit of power.
const GUIDE_PER_POWER: f32 = 15.0;

/// What the renderer draws while a human is aiming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimPreview {
    /// Cue ball centre when aiming began.
    pub origin: Vec2,
    pub angle: f32,
    pub power: f32,
}

impl AimPreview {
    /// Far end of the aiming guide line.
    pub fn guide_end(&self) -> Vec2 {
        self.origin + from_polar(self.angle, GUIDE_BASE + self.power * GUIDE_PER_POWER)
    }

    pub fn shot(&self) -> Shot {
        Shot {
            angle: self.angle,
            power: self.power,
        }
    }
}

/// Transient aiming state. Never touches the match state itself.
#[derive(Debug, Clone)]
pub struct AimGesture {
    config: AimConfig,
    preview: Option<AimPreview>,
}

impl AimGesture {
    pub fn new(config: AimConfig) -> Self {
        Self {
            config,
            preview: None,
        }
    }

    /// Begin aiming: point toward the pointer with no power yet.
    pub fn press(&mut self, cue: Vec2, pointer: Vec2) {
        self.preview = Some(AimPreview {
            origin: cue,
            angle: heading(cue, pointer),
            power: 0.0,
        });
    }

    /// Pull back: the shot goes away from the pointer, harder the further it is.
    pub fn drag(&mut self, pointer: Vec2) {
        let Some(preview) = self.preview.as_mut() else {
            return;
        };
        let delta = pointer - preview.origin;
        preview.angle = (-delta.y).atan2(-delta.x);
        preview.power = (delta.length() / self.config.sensitivity).min(self.config.max_power);
    }

    /// End the gesture. Returns the shot if it was pulled back far enough.
    pub fn release(&mut self) -> Option<Shot> {
        let preview = self.preview.take()?;
        (preview.power > self.config.commit_threshold).then(|| preview.shot())
    }

    pub fn cancel(&mut self) {
        self.preview = None;
    }

    pub fn is_active(&self) -> bool {
        self.preview.is_some()
    }

    pub fn preview(&self) -> Option<AimPreview> {
        self.preview
    }
}

impl Default for AimGesture {
    fn default() -> Self {
        Self::new(AimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const CUE: Vec2 = Vec2::new(200.0, 200.0);

    #[test]
    fn press_points_at_pointer() {
        let mut aim = AimGesture::default();
        aim.press(CUE, Vec2::new(300.0, 200.0));
        let p = aim.preview().unwrap();
        assert_eq!(p.angle, 0.0);
        assert_eq!(p.power, 0.0);
    }

    #[test]
    fn drag_reverses_direction_and_scales_power() {
        let mut aim = AimGesture::default();
        aim.press(CUE, CUE);
        aim.drag(Vec2::new(110.0, 200.0));
        let p = aim.preview().unwrap();
        assert!(p.angle.abs() < 1e-6, "angle was {}", p.angle);
        assert!((p.power - 10.0).abs() < 1e-5);

        aim.drag(Vec2::new(300.0, 200.0));
        let p = aim.preview().unwrap();
        assert!((p.angle.abs() - PI).abs() < 1e-5);
    }

    #[test]
    fn power_is_capped() {
        let mut aim = AimGesture::default();
        aim.press(CUE, CUE);
        aim.drag(Vec2::new(200.0, 800.0));
        assert_eq!(aim.preview().unwrap().power, 26.0);
    }

    #[test]
    fn release_commits_only_above_threshold() {
        let mut aim = AimGesture::default();
        aim.press(CUE, CUE);
        aim.drag(Vec2::new(197.0, 200.0));
        assert!(aim.release().is_none());
        assert!(!aim.is_active());

        aim.press(CUE, CUE);
        aim.drag(Vec2::new(110.0, 200.0));
        let shot = aim.release().unwrap();
        assert!((shot.power - 10.0).abs() < 1e-5);
        assert!(!aim.is_active());
    }

    #[test]
    fn click_without_drag_does_not_shoot() {
        let mut aim = AimGesture::default();
        aim.press(CUE, Vec2::new(350.0, 200.0));
        assert!(aim.release().is_none());
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut aim = AimGesture::default();
        aim.drag(Vec2::new(10.0, 10.0));
        assert!(aim.preview().is_none());
    }

    #[test]
    fn guide_grows_with_power() {
        let p = AimPreview {
            origin: CUE,
            angle: 0.0,
            power: 4.0,
        };
        assert_eq!(p.guide_end(), Vec2::new(320.0, 200.0));
    }
}
