//! Game balance tunables
//!
//! Every number the difficulty formulas read lives here so a host can ship a
//! JSON override without rebuilding. Missing sections fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Player kinematics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// First jump velocity (negative = up)
    pub jump_velocity: f32,
    /// Velocity for every jump after the first while airborne
    pub double_jump_velocity: f32,
    /// Jump slots available between ground contacts
    pub max_jumps: u8,
    /// Upward kick applied once on death
    pub death_impulse: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            gravity: 1200.0,
            jump_velocity: -500.0,
            double_jump_velocity: -400.0,
            max_jumps: 2,
            death_impulse: -200.0,
        }
    }
}

/// World speed curve
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    pub initial: f32,
    /// Natural acceleration (units/s per second)
    pub increment: f32,
    pub max: f32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            initial: 300.0,
            increment: 0.5,
            max: 600.0,
        }
    }
}

/// Obstacle spacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub min_gap: f32,
    pub max_gap: f32,
    /// Cumulative-distribution weights: cactus, rock, bird, spike
    pub weights: [f32; 4],
    /// Bird altitude band above the world floor
    pub bird_altitude: (f32, f32),
    /// Vertical bob per 60 Hz frame
    pub bird_bob_amplitude: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            min_gap: 300.0,
            max_gap: 600.0,
            weights: [0.35, 0.25, 0.25, 0.15],
            bird_altitude: (100.0, 180.0),
            bird_bob_amplitude: 0.5,
        }
    }
}

/// Coin patterns and the magnet that pulls them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinConfig {
    pub min_gap: f32,
    pub max_gap: f32,
    /// Chance a due pattern actually spawns on a given tick
    pub spawn_chance: f64,
    pub pattern_len: usize,
    pub spacing: f32,
    /// Pattern baseline above the world floor
    pub baseline_altitude: f32,
    pub arc_height: f32,
    pub zigzag_lift: f32,
    pub value: u64,
    pub magnet_radius: f32,
    pub magnet_speed: f32,
}

impl Default for CoinConfig {
    fn default() -> Self {
        Self {
            min_gap: 150.0,
            max_gap: 300.0,
            spawn_chance: 0.4,
            pattern_len: 5,
            spacing: 30.0,
            baseline_altitude: 100.0,
            arc_height: 50.0,
            zigzag_lift: 30.0,
            value: 10,
            magnet_radius: 200.0,
            magnet_speed: 500.0,
        }
    }
}

/// Power-up pickups and their effects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub min_gap: f32,
    pub max_gap: f32,
    pub spawn_chance: f64,
    /// Altitude band above the world floor
    pub altitude: (f32, f32),
    /// Magnet and speed boost lifetime (ms)
    pub duration_ms: f32,
    pub boost_multiplier: f32,
    /// Concurrent speed boosts allowed to compound
    pub max_boost_stack: usize,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            min_gap: 1000.0,
            max_gap: 2000.0,
            spawn_chance: 0.02,
            altitude: (80.0, 150.0),
            duration_ms: 5000.0,
            boost_multiplier: 1.5,
            max_boost_stack: 1,
        }
    }
}

/// Scoring formula
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub distance_multiplier: f64,
    pub milestones: Vec<u64>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            distance_multiplier: 0.1,
            milestones: vec![100, 250, 500, 1000, 2500, 5000, 10000],
        }
    }
}

/// All tunables for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub player: PlayerConfig,
    pub speed: SpeedConfig,
    pub obstacles: ObstacleConfig,
    pub coins: CoinConfig,
    pub power_ups: PowerUpConfig,
    pub score: ScoreConfig,
}

impl RunnerConfig {
    /// Parse a JSON override; absent fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load from a JSON file, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Bad config {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read config {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
