use glam::Vec2;

use crate::api::config::{PhysicsConfig, PoolConfig, TableConfig};

/// A capture zone. Fixed for the whole session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pocket {
    pub position: Vec2,
    pub radius: f32,
}

/// Table geometry plus the integration constants that act on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub width: f32,
    pub height: f32,
    /// Corners first (top-left, top-middle, top-right, bottom-left,
    /// bottom-middle, bottom-right); this order is the capture tie-break.
    pub pockets: [Pocket; 6],
    pub physics: PhysicsConfig,
    /// Where the cue ball respawns after a scratch.
    pub cue_spawn: Vec2,
}

impl Table {
    pub fn new(geometry: &TableConfig, physics: PhysicsConfig) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
            pockets: Self::pocket_layout(geometry),
            physics,
            cue_spawn: geometry.cue_spawn_point(),
        }
    }

    pub fn from_config(config: &PoolConfig) -> Self {
        Self::new(&config.table, config.physics)
    }

    /// Four corner pockets and two mid-rail pockets nudged outward.
    fn pocket_layout(t: &TableConfig) -> [Pocket; 6] {
        let (w, h, r) = (t.width, t.height, t.pocket_radius);
        let at = |x: f32, y: f32| Pocket { position: Vec2::new(x, y), radius: r };
        [
            at(0.0, 0.0),
            at(w / 2.0, -t.side_pocket_offset),
            at(w, 0.0),
            at(0.0, h),
            at(w / 2.0, h + t.side_pocket_offset),
            at(w, h),
        ]
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::from_config(&PoolConfig::default())
    }
}
