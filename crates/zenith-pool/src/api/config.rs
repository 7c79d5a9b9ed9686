use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Errors raised while loading a [`PoolConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Full engine configuration. Every section falls back to its defaults,
/// so `{}` is a valid config document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub table: TableConfig,
    pub physics: PhysicsConfig,
    pub ai: AiConfig,
    pub aim: AimConfig,
    pub audio: AudioConfig,
    pub tick: TickConfig,
    pub bridge: BridgeConfig,
}

/// Table geometry, in table units (origin top-left, Y down).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub width: f32,
    pub height: f32,
    pub ball_radius: f32,
    pub pocket_radius: f32,
    /// How far the two mid-rail pockets sit outside the rail.
    pub side_pocket_offset: f32,
    /// Cue ball spawn as a fraction of (width, height).
    pub cue_spawn: Vec2,
    /// Rack apex as a fraction of (width, height).
    pub rack_apex: Vec2,
    /// Row spacing of the rack, as a fraction of the ball diameter.
    pub rack_spacing: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            ball_radius: 10.0,
            pocket_radius: 22.0,
            side_pocket_offset: 2.0,
            cue_spawn: Vec2::new(0.25, 0.5),
            rack_apex: Vec2::new(0.7, 0.5),
            rack_spacing: 0.95,
        }
    }
}

impl TableConfig {
    /// Cue ball spawn point in table units.
    pub fn cue_spawn_point(&self) -> Vec2 {
        self.cue_spawn * Vec2::new(self.width, self.height)
    }

    /// Rack apex in table units.
    pub fn rack_apex_point(&self) -> Vec2 {
        self.rack_apex * Vec2::new(self.width, self.height)
    }
}

/// Per-tick integration constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Velocity retention per tick (felt friction).
    pub friction: f32,
    /// Axis speeds below this snap to zero.
    pub min_velocity: f32,
    /// Velocity retention on a cushion bounce.
    pub wall_bounce: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: 0.99,
            min_velocity: 0.12,
            wall_bounce: 0.82,
        }
    }
}

/// Shot selector tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub base_power: f32,
    pub distance_divisor: f32,
    pub distance_cap: f32,
    /// Total width of the uniform power perturbation.
    pub power_jitter: f32,
    pub max_power: f32,
    /// Seconds between the table coming to rest and the AI shot.
    pub think_delay: f32,
    pub seed: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_power: 19.0,
            distance_divisor: 50.0,
            distance_cap: 6.0,
            power_jitter: 1.5,
            max_power: 26.0,
            think_delay: 0.4,
            seed: 0x5EED_CAFE,
        }
    }
}

/// Drag-to-aim tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Pointer distance per unit of power.
    pub sensitivity: f32,
    pub max_power: f32,
    /// Releases at or below this power are discarded.
    pub commit_threshold: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            sensitivity: 9.0,
            max_power: 26.0,
            commit_threshold: 0.5,
        }
    }
}

/// Impulse → sound mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Wall impulses at or below this are silent.
    pub wall_threshold: f32,
    /// Ball-ball impulses at or below this are silent.
    pub ball_threshold: f32,
    pub volume_scale: f32,
    pub max_volume: f32,
    pub min_volume: f32,
    pub pocket_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            wall_threshold: 0.4,
            ball_threshold: 0.2,
            volume_scale: 0.08,
            max_volume: 0.5,
            min_volume: 0.01,
            pocket_volume: 0.4,
        }
    }
}

/// Fixed-rate tick driver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Seconds per simulation tick.
    pub fixed_dt: f32,
    /// Cap on ticks run for a single frame (prevents a spiral of death).
    pub max_steps_per_frame: u32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
        }
    }
}

/// Shared-buffer capacities for the browser bridge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub max_sounds: usize,
    pub max_events: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_sounds: 32,
            max_events: 32,
        }
    }
}

fn require(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason })
    }
}

impl PoolConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PoolConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.table;
        require(t.width > 0.0, "table.width", "must be positive")?;
        require(t.height > 0.0, "table.height", "must be positive")?;
        require(t.ball_radius > 0.0, "table.ball_radius", "must be positive")?;
        require(t.pocket_radius > 0.0, "table.pocket_radius", "must be positive")?;
        require(
            t.width > 2.0 * t.ball_radius && t.height > 2.0 * t.ball_radius,
            "table.ball_radius",
            "ball does not fit on the table",
        )?;

        let p = &self.physics;
        require(p.friction > 0.0 && p.friction <= 1.0, "physics.friction", "must be in (0, 1]")?;
        require(
            p.wall_bounce > 0.0 && p.wall_bounce <= 1.0,
            "physics.wall_bounce",
            "must be in (0, 1]",
        )?;
        require(p.min_velocity >= 0.0, "physics.min_velocity", "must not be negative")?;

        require(self.ai.max_power > 0.0, "ai.max_power", "must be positive")?;
        require(self.ai.distance_divisor > 0.0, "ai.distance_divisor", "must be positive")?;
        require(self.ai.think_delay >= 0.0, "ai.think_delay", "must not be negative")?;

        require(self.aim.sensitivity > 0.0, "aim.sensitivity", "must be positive")?;
        require(self.aim.max_power > 0.0, "aim.max_power", "must be positive")?;

        require(self.tick.fixed_dt > 0.0, "tick.fixed_dt", "must be positive")?;
        require(self.tick.max_steps_per_frame > 0, "tick.max_steps_per_frame", "must be positive")?;

        require(self.bridge.max_sounds > 0, "bridge.max_sounds", "must be positive")?;
        require(self.bridge.max_events > 0, "bridge.max_events", "must be positive")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PoolConfig::from_json("{}").unwrap();
        assert_eq!(config, PoolConfig::default());
        assert_eq!(config.table.width, 800.0);
        assert_eq!(config.physics.friction, 0.99);
        assert_eq!(config.ai.max_power, 26.0);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let json = r#"{
            "table": { "width": 1000.0, "side_pocket_offset": 0.0 },
            "ai": { "think_delay": 1.0 }
        }"#;
        let config = PoolConfig::from_json(json).unwrap();
        assert_eq!(config.table.width, 1000.0);
        assert_eq!(config.table.height, 400.0);
        assert_eq!(config.table.side_pocket_offset, 0.0);
        assert_eq!(config.ai.think_delay, 1.0);
        assert_eq!(config.ai.base_power, 19.0);
    }

    #[test]
    fn spawn_points_scale_with_table() {
        let table = TableConfig::default();
        assert_eq!(table.cue_spawn_point(), Vec2::new(200.0, 200.0));
        assert_eq!(table.rack_apex_point(), Vec2::new(560.0, 200.0));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = PoolConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {:?}", err);
    }

    #[test]
    fn friction_above_one_is_rejected() {
        let err = PoolConfig::from_json(r#"{ "physics": { "friction": 1.5 } }"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "physics.friction"),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn oversized_ball_is_rejected() {
        let json = r#"{ "table": { "width": 15.0, "height": 15.0 } }"#;
        assert!(PoolConfig::from_json(json).is_err());
    }
}
