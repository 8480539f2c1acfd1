//! Retro Arcade - Snake and Space Shooter
//!
//! Core modules:
//! - `sim`: Space shooter simulation (actors, collisions, waves, session state)
//! - `snake`: Grid snake simulation
//! - `renderer`: macroquad drawing for both games
//! - `platform`: Input polling and the fixed-step frame clock
//! - `audio`: Procedural sound effects and playback
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod snake;
pub mod tuning;

pub use highscores::HighScoreFile;
pub use settings::Settings;
pub use tuning::{ConfigError, ShooterTuning, SnakeTuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Shooter simulation rate. All shooter timers are expressed in these ticks.
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Shooter playfield
    pub const SHOOTER_WIDTH: f32 = 1000.0;
    pub const SHOOTER_HEIGHT: f32 = 700.0;

    /// Snake board
    pub const SNAKE_WIDTH: f32 = 800.0;
    pub const SNAKE_HEIGHT: f32 = 600.0;
    pub const SNAKE_CELL: f32 = 20.0;

    /// Snake high score file, relative to the working directory
    pub const SNAKE_HIGHSCORE_FILE: &str = "snake_highscore.txt";

    /// Environment variables naming optional JSON config files
    pub const TUNING_ENV: &str = "ARCADE_TUNING";
    pub const SETTINGS_ENV: &str = "ARCADE_SETTINGS";
}

/// Unit vector for an angle (radians, screen coordinates)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// True when two circles overlap (strict, touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Seed derived from the wall clock, for interactive runs
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_to_and_direction_agree() {
        let from = Vec2::new(10.0, 10.0);
        let to = Vec2::new(10.0, 50.0);
        let dir = direction(angle_to(from, to));
        assert!(dir.x.abs() < 1e-5);
        assert!((dir.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert!(circles_overlap(a, 5.0, b, 5.1));
        assert!(!circles_overlap(a, 5.0, b, 5.0));
    }
}
