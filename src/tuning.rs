//! Data-driven game balance
//!
//! Every number the simulations consult lives in an explicitly constructed
//! tuning struct that the session owns. Defaults reproduce the classic feel;
//! a JSON file can override any subset of fields.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{SHOOTER_HEIGHT, SHOOTER_WIDTH, SNAKE_CELL, SNAKE_HEIGHT, SNAKE_WIDTH};

/// Errors that can occur while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read file.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON.
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        /// Path to the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Read and parse a JSON config file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Load a config from the file named by `env_var`, falling back to defaults.
///
/// An unset variable is the normal case and is not logged as a problem.
pub fn load_from_env<T: DeserializeOwned + Default>(env_var: &str, label: &str) -> T {
    let Ok(path) = std::env::var(env_var) else {
        log::debug!("{} not set, using default {}", env_var, label);
        return T::default();
    };
    match load_json(Path::new(&path)) {
        Ok(value) => {
            log::info!("Loaded {} from {}", label, path);
            value
        }
        Err(e) => {
            log::warn!("{}; using default {}", e, label);
            T::default()
        }
    }
}

/// Player ship balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: i32,
    /// Pixels per tick along one axis
    pub speed: f32,
    pub radius: f32,
    /// Extra gap kept between the hull and the playfield edge
    pub edge_margin: f32,
    pub shoot_delay: u32,
    pub rapid_shoot_delay: u32,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub invulnerable_ticks: u32,
    pub hit_flash_ticks: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            speed: 6.0,
            radius: 20.0,
            edge_margin: 10.0,
            shoot_delay: 12,
            rapid_shoot_delay: 4,
            bullet_speed: 12.0,
            bullet_damage: 25,
            invulnerable_ticks: 40,
            hit_flash_ticks: 20,
        }
    }
}

/// Power-up effects and drop rates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTuning {
    pub rapid_fire_ticks: u32,
    pub shield_ticks: u32,
    pub health_restore: i32,
    pub radius: f32,
    pub fall_speed: f32,
    pub drop_chance: f64,
    pub combo_drop_chance: f64,
    /// Combo count above which `combo_drop_chance` applies
    pub combo_drop_threshold: u32,
    /// Power-ups scattered by a defeated boss
    pub boss_drops: u32,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            rapid_fire_ticks: 420,
            shield_ticks: 480,
            health_restore: 40,
            radius: 20.0,
            fall_speed: 2.0,
            drop_chance: 0.2,
            combo_drop_chance: 0.3,
            combo_drop_threshold: 5,
            boss_drops: 4,
        }
    }
}

/// Spawn cadence, difficulty ramp and boss triggering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorTuning {
    /// Spawn interval before difficulty is applied
    pub spawn_base: u32,
    /// Ticks shaved off the spawn interval per difficulty point
    pub spawn_difficulty_factor: f64,
    /// Spawn interval never drops below this
    pub spawn_floor: u32,
    pub double_spawn_base: f64,
    pub double_spawn_per_difficulty: f64,
    pub powerup_interval: u32,
    pub difficulty_interval: u32,
    pub difficulty_step: f64,
    pub initial_kills_for_boss: u32,
    pub kills_for_boss_growth: f64,
    pub kills_for_boss_cap: u32,
    /// Wave from which shooters become more common
    pub shooter_wave: u32,
}

impl Default for DirectorTuning {
    fn default() -> Self {
        Self {
            spawn_base: 45,
            spawn_difficulty_factor: 8.0,
            spawn_floor: 15,
            double_spawn_base: 0.4,
            double_spawn_per_difficulty: 0.1,
            powerup_interval: 750,
            difficulty_interval: 900,
            difficulty_step: 0.15,
            initial_kills_for_boss: 20,
            kills_for_boss_growth: 1.3,
            kills_for_boss_cap: 30,
            shooter_wave: 3,
        }
    }
}

/// Numbers for one enemy kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: i32,
    /// Pixels per tick
    pub speed: f32,
    pub radius: f32,
    pub contact_damage: i32,
    /// Base score before difficulty and combo
    pub score: u32,
}

/// Regular enemy balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub normal: EnemyStats,
    pub shooter: EnemyStats,
    /// Shooters back off when the player is closer than this
    pub shooter_retreat_distance: f32,
    /// Shooters close in when the player is farther than this
    pub shooter_approach_distance: f32,
    /// Retreat speed relative to normal speed
    pub shooter_retreat_factor: f32,
    pub shooter_fire_interval: u32,
    pub shooter_bullet_speed: f32,
    pub shooter_bullet_damage: i32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            normal: EnemyStats {
                health: 50,
                speed: 2.8,
                radius: 16.0,
                contact_damage: 15,
                score: 10,
            },
            shooter: EnemyStats {
                health: 70,
                speed: 2.0,
                radius: 18.0,
                contact_damage: 12,
                score: 25,
            },
            shooter_retreat_distance: 250.0,
            shooter_approach_distance: 350.0,
            shooter_retreat_factor: 0.7,
            shooter_fire_interval: 90,
            shooter_bullet_speed: 6.0,
            shooter_bullet_damage: 18,
        }
    }
}

/// Cooldown, projectile speed and damage of one boss attack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolleyTuning {
    pub cooldown: u32,
    pub speed: f32,
    pub damage: i32,
}

impl VolleyTuning {
    const fn new(cooldown: u32, speed: f32, damage: i32) -> Self {
        Self { cooldown, speed, damage }
    }
}

/// Wave boss balance. Per-phase tables are indexed phase one to three.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub base_health: i32,
    pub health_per_wave: i32,
    pub radius: f32,
    /// Spawn height (above the playfield)
    pub start_y: f32,
    /// Altitude it descends to before attacking
    pub target_y: f32,
    pub entry_speed: f32,
    /// Extra distance from the side walls at which it turns around
    pub edge_margin: f32,
    /// Base score for a kill
    pub score: u32,
    /// Damage dealt by touching it
    pub contact_damage: i32,
    pub phase_speed: [f32; 3],
    pub normal_volleys: [VolleyTuning; 3],
    pub special_volleys: [VolleyTuning; 3],
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            base_health: 500,
            health_per_wave: 150,
            radius: 55.0,
            start_y: -120.0,
            target_y: 130.0,
            entry_speed: 4.0,
            edge_margin: 60.0,
            score: 300,
            contact_damage: 35,
            phase_speed: [5.0, 6.0, 7.0],
            normal_volleys: [
                VolleyTuning::new(45, 7.0, 22),
                VolleyTuning::new(35, 8.0, 28),
                VolleyTuning::new(25, 5.0, 35),
            ],
            special_volleys: [
                VolleyTuning::new(200, 5.0, 20),
                VolleyTuning::new(160, 6.0, 25),
                VolleyTuning::new(130, 10.0, 40),
            ],
        }
    }
}

/// Complete space shooter balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterTuning {
    pub width: f32,
    pub height: f32,
    pub player: PlayerTuning,
    pub powerups: PowerUpTuning,
    pub director: DirectorTuning,
    pub enemies: EnemyTuning,
    pub boss: BossTuning,
    /// Ticks a combo survives without a kill
    pub combo_window: u32,
    /// Combo multiplier gained per combo step
    pub combo_step: f64,
    /// Acceleration applied to homing projectiles each tick
    pub homing_accel: f32,
    /// Off-screen margin after which bullets are culled
    pub bullet_margin: f32,
    /// Off-screen margin after which enemies are culled
    pub enemy_margin: f32,
    pub star_count: usize,
}

impl Default for ShooterTuning {
    fn default() -> Self {
        Self {
            width: SHOOTER_WIDTH,
            height: SHOOTER_HEIGHT,
            player: PlayerTuning::default(),
            powerups: PowerUpTuning::default(),
            director: DirectorTuning::default(),
            enemies: EnemyTuning::default(),
            boss: BossTuning::default(),
            combo_window: 120,
            combo_step: 0.1,
            homing_accel: 0.4,
            bullet_margin: 100.0,
            enemy_margin: 150.0,
            star_count: 150,
        }
    }
}

/// Complete snake balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeTuning {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Steps per second at score zero
    pub base_speed: f32,
    /// Speed gained per `speed_points` scored
    pub speed_step: f32,
    pub speed_points: u32,
    pub max_speed: f32,
    pub food_points: u32,
    pub bonus_points: u32,
    /// A bonus appears whenever the score reaches a multiple of this
    pub bonus_every: u32,
    pub bonus_lifetime: u32,
    /// Food never spawns closer than this many cells to an edge
    pub food_margin: i32,
    pub initial_length: usize,
}

impl Default for SnakeTuning {
    fn default() -> Self {
        Self {
            grid_width: (SNAKE_WIDTH / SNAKE_CELL) as i32,
            grid_height: (SNAKE_HEIGHT / SNAKE_CELL) as i32,
            base_speed: 10.0,
            speed_step: 0.3,
            speed_points: 100,
            max_speed: 25.0,
            food_points: 10,
            bonus_points: 50,
            bonus_every: 50,
            bonus_lifetime: 300,
            food_margin: 2,
            initial_length: 3,
        }
    }
}
