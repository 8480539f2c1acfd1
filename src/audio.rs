//! Audio system using macroquad's sound playback
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is synthesized once at start-up into a 16-bit mono WAV buffer
//! and handed to the mixer; playback is fire-and-forget.

use std::f32::consts::TAU;

use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Settings;

/// Sample rate of every synthesized effect
pub const SAMPLE_RATE: u32 = 22050;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fires
    Shoot,
    /// Enemy or boss destroyed
    Explosion,
    /// Power-up collected
    PowerUp,
    /// Player takes a hit
    Damage,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Shoot,
        SoundEffect::Explosion,
        SoundEffect::PowerUp,
        SoundEffect::Damage,
    ];

    pub fn duration_ms(&self) -> u32 {
        match self {
            SoundEffect::Shoot => 100,
            SoundEffect::Explosion => 200,
            SoundEffect::PowerUp => 150,
            SoundEffect::Damage => 120,
        }
    }

    /// Per-effect loudness before the user's volume settings
    pub fn gain(&self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.3,
            SoundEffect::Explosion => 0.4,
            SoundEffect::PowerUp => 0.5,
            SoundEffect::Damage => 0.6,
        }
    }
}

/// Number of samples in an effect
pub fn sample_count(effect: SoundEffect) -> usize {
    (effect.duration_ms() as usize * SAMPLE_RATE as usize) / 1000
}

/// Render an effect to 16-bit PCM. Every effect fades out linearly.
pub fn synthesize(effect: SoundEffect) -> Vec<i16> {
    let n = sample_count(effect);
    let rate = SAMPLE_RATE as f32;
    // Fixed seed so the explosion sounds the same every run
    let mut noise = Pcg32::seed_from_u64(0xB00A);

    (0..n)
        .map(|i| {
            let t = i as f32 / rate;
            let progress = i as f32 / n as f32;
            let envelope = 1.0 - progress;
            let wave = match effect {
                // Falling-amplitude A4
                SoundEffect::Shoot => (TAU * 440.0 * t).sin(),
                // White noise
                SoundEffect::Explosion => noise.random_range(-1.0f32..=1.0),
                // Rising sweep, one octave
                SoundEffect::PowerUp => (TAU * (440.0 + progress * 440.0) * t).sin(),
                // Low thud
                SoundEffect::Damage => (TAU * 110.0 * t).sin(),
            };
            (wave * envelope * i16::MAX as f32) as i16
        })
        .collect()
}

/// Wrap mono 16-bit samples in a RIFF/WAVE container
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + data_len as usize);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

/// Audio manager for the game
pub struct AudioManager {
    sounds: Vec<(SoundEffect, Sound)>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    /// A manager with nothing loaded; `play` is a no-op
    pub fn silent(settings: &Settings) -> Self {
        Self {
            sounds: Vec::new(),
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.start_muted,
        }
    }

    /// Synthesize and upload every effect. Effects that fail to load are
    /// skipped with a warning.
    pub async fn load(settings: &Settings) -> Self {
        let mut manager = Self::silent(settings);
        for effect in SoundEffect::ALL {
            let wav = encode_wav(&synthesize(effect), SAMPLE_RATE);
            match load_sound_from_bytes(&wav).await {
                Ok(sound) => manager.sounds.push((effect, sound)),
                Err(e) => log::warn!("Failed to load {:?} sound: {:?}", effect, e),
            }
        }
        log::info!("Loaded {} sound effects", manager.sounds.len());
        manager
    }

    pub fn toggle_muted(&mut self) {
        self.muted = !self.muted;
        log::info!("Sound {}", if self.muted { "off" } else { "on" });
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume for an effect
    pub fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume * effect.gain()
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let volume = self.effective_volume(effect);
        if volume <= 0.0 {
            return;
        }
        if let Some((_, sound)) = self.sounds.iter().find(|(e, _)| *e == effect) {
            play_sound(sound, PlaySoundParams { looped: false, volume });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_lengths() {
        assert_eq!(synthesize(SoundEffect::Shoot).len(), 2205);
        assert_eq!(synthesize(SoundEffect::Explosion).len(), 4410);
        assert_eq!(synthesize(SoundEffect::PowerUp).len(), 3307);
        assert_eq!(synthesize(SoundEffect::Damage).len(), 2646);
    }

    #[test]
    fn test_effects_fade_out() {
        for effect in SoundEffect::ALL {
            let samples = synthesize(effect);
            let tail = samples[samples.len() - 20..].iter().map(|s| s.unsigned_abs()).max();
            assert!(tail.unwrap_or(0) < 400, "{:?} does not fade", effect);
            assert!(samples.iter().any(|s| s.unsigned_abs() > 10_000), "{:?} is silent", effect);
        }
    }

    #[test]
    fn test_explosion_is_reproducible() {
        assert_eq!(synthesize(SoundEffect::Explosion), synthesize(SoundEffect::Explosion));
    }

    #[test]
    fn test_wav_header() {
        let wav = encode_wav(&[0, 1, -1], SAMPLE_RATE);
        assert_eq!(wav.len(), 44 + 6);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 36 + 6);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 22050);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(&wav[44..], &[0, 0, 1, 0, 0xFF, 0xFF]);
    }

    #[test]
    fn test_mute_zeroes_volume() {
        let mut audio = AudioManager::silent(&Settings::default());
        assert!(audio.effective_volume(SoundEffect::Damage) > 0.0);
        audio.toggle_muted();
        assert_eq!(audio.effective_volume(SoundEffect::Damage), 0.0);
        // Nothing loaded, nothing to play
        audio.play(SoundEffect::Damage);
    }
}
