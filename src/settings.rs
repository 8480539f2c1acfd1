//! Player preferences
//!
//! Read-only at runtime: loaded once from the JSON file named by
//! `ARCADE_SETTINGS`, otherwise defaults.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_ENV;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 150,
            QualityPreset::Medium => 600,
            QualityPreset::High => 2000,
        }
    }

    /// Whether to draw bullet trails
    pub fn trails_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }

    /// Whether to draw the snake board's shaded background
    pub fn gradient_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions, engine exhaust)
    pub particles: bool,
    /// Show FPS counter
    pub show_fps: bool,

    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Start with sound muted
    pub start_muted: bool,

    /// Shooter starts each run in auto-fire mode
    pub auto_fire: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            show_fps: false,
            master_volume: 0.8,
            sfx_volume: 0.4,
            start_muted: false,
            auto_fire: true,
        }
    }
}

impl Settings {
    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Load settings from the file named by `ARCADE_SETTINGS`
    pub fn load() -> Self {
        let settings: Self = crate::tuning::load_from_env(SETTINGS_ENV, "settings");
        log::info!("Quality preset: {}", settings.quality.as_str());
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_off_means_zero_budget() {
        let settings = Settings {
            quality: QualityPreset::High,
            particles: false,
            ..Settings::default()
        };
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "quality": "Low", "start_muted": true }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.start_muted);
        assert!(settings.auto_fire);
        assert!(!settings.quality.trails_enabled());
        assert!(!settings.quality.gradient_enabled());
        assert_eq!(settings.max_particles(), 150);
    }
}
