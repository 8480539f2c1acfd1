//! Moving entities and the cooldown timer
//!
//! Everything here integrates `pos += vel` once per tick and is culled either
//! by lifetime or by leaving the playfield.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{angle_to, direction};

/// Number of past positions a bullet remembers for its trail
pub const TRAIL_LENGTH: usize = 8;

/// Lifetime of explosion/engine particles in ticks
pub const PARTICLE_LIFE: u32 = 60;

/// A decrementing tick counter gating a repeatable action.
///
/// `0` means ready. Ticking never underflows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    remaining: u32,
}

impl Cooldown {
    /// A cooldown that is ready immediately
    pub const fn ready() -> Self {
        Self { remaining: 0 }
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Advance one tick
    #[inline]
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn set(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    /// If ready, restart with `ticks` and report true
    pub fn trigger(&mut self, ticks: u32) -> bool {
        if self.is_ready() {
            self.remaining = ticks;
            true
        } else {
            false
        }
    }
}

/// The visible play rectangle, origin top-left, y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Inside the visible rectangle
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Outside the rectangle grown by `margin` on every side
    pub fn is_beyond(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }

    /// Clamp a point so a circle of `inset` radius stays inside
    pub fn clamp_inside(&self, pos: Vec2, inset: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(inset, (self.width - inset).max(inset)),
            pos.y.clamp(inset, (self.height - inset).max(inset)),
        )
    }
}

/// Colour family for bullets and particles; the renderer maps it to RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tint {
    Yellow,
    Orange,
    Red,
    Purple,
    Pink,
    Cyan,
    Blue,
    Green,
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A projectile
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Speed cap (also the launch speed)
    pub speed: f32,
    pub radius: f32,
    pub damage: i32,
    pub owner: BulletOwner,
    /// Steers toward a target each tick
    pub homing: bool,
    pub tint: Tint,
    /// Previous positions, oldest first
    pub trail: Vec<Vec2>,
}

impl Bullet {
    /// Launch from `origin` at `angle` (radians)
    pub fn at_angle(origin: Vec2, angle: f32, speed: f32, damage: i32, owner: BulletOwner) -> Self {
        let radius = match owner {
            BulletOwner::Player => 4.0,
            BulletOwner::Enemy => 5.0,
        };
        let tint = match owner {
            BulletOwner::Player => Tint::Yellow,
            BulletOwner::Enemy => Tint::Red,
        };
        Self {
            pos: origin,
            vel: direction(angle) * speed,
            speed,
            radius,
            damage,
            owner,
            homing: false,
            tint,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Launch from `origin` straight at `target`
    pub fn aimed(origin: Vec2, target: Vec2, speed: f32, damage: i32, owner: BulletOwner) -> Self {
        Self::at_angle(origin, angle_to(origin, target), speed, damage, owner)
    }

    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    pub fn homing(mut self) -> Self {
        self.homing = true;
        self
    }

    /// Advance one tick. Homing bullets accelerate toward `target` first and
    /// are clamped back to their speed cap.
    pub fn integrate(&mut self, target: Option<Vec2>, homing_accel: f32) {
        if self.homing {
            if let Some(target) = target {
                self.vel += direction(angle_to(self.pos, target)) * homing_accel;
                let speed = self.vel.length();
                if speed > self.speed {
                    self.vel = self.vel / speed * self.speed;
                }
            }
        }

        self.trail.push(self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }

        self.pos += self.vel;
    }
}

/// A short-lived visual speck (explosions, engine exhaust)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tint: Tint,
    pub size: f32,
    pub gravity: f32,
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Random direction, speed 2..6
    pub fn burst(pos: Vec2, tint: Tint, size: f32, rng: &mut impl Rng) -> Self {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(2.0..6.0);
        Self::with_velocity(pos, direction(angle) * speed, tint, size, rng)
    }

    pub fn with_velocity(pos: Vec2, vel: Vec2, tint: Tint, size: f32, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            vel,
            tint,
            size,
            gravity: rng.random_range(0.0..0.3),
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.life = self.life.saturating_sub(1);
        self.size = (self.size * self.life_fraction()).max(1.0);
        self.vel *= 0.97;
    }

    /// Remaining life in 0..=1
    pub fn life_fraction(&self) -> f32 {
        self.life as f32 / self.max_life as f32
    }

    pub fn is_dead(&self) -> bool {
        self.life == 0
    }
}

/// Background star; wraps from the bottom edge back to the top
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
    pub brightness: u8,
    pub twinkle: f32,
}

impl Star {
    pub fn random(field: &Playfield, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(rng.random_range(0.0..=field.width), rng.random_range(0.0..=field.height)),
            speed: rng.random_range(0.5..3.0),
            size: rng.random_range(1..=3) as f32,
            brightness: rng.random_range(100..=255),
            twinkle: rng.random_range(0.0..TAU),
        }
    }

    pub fn update(&mut self, field: &Playfield, rng: &mut impl Rng) {
        self.pos.y += self.speed;
        if self.pos.y > field.height {
            self.pos.y = 0.0;
            self.pos.x = rng.random_range(0.0..=field.width);
        }
        self.twinkle += 0.05;
    }

    /// Current brightness after twinkling (half to full)
    pub fn shine(&self) -> u8 {
        let factor = (self.twinkle.sin() + 1.0) / 2.0;
        (self.brightness as f32 * (0.5 + 0.5 * factor)) as u8
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    RapidFire,
    Shield,
    Health,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
        PowerUpKind::Health,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PowerUpKind::RapidFire => "R",
            PowerUpKind::Shield => "S",
            PowerUpKind::Health => "+",
        }
    }

    pub fn tint(&self) -> Tint {
        match self {
            PowerUpKind::RapidFire => Tint::Orange,
            PowerUpKind::Shield => Tint::Cyan,
            PowerUpKind::Health => Tint::Green,
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub radius: f32,
    /// Degrees, for the orbiting sparkles
    pub spin: f32,
    pub pulse: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind, radius: f32) -> Self {
        Self {
            pos,
            kind,
            radius,
            spin: 0.0,
            pulse: 0.0,
        }
    }

    pub fn update(&mut self, fall_speed: f32) {
        self.pos.y += fall_speed;
        self.spin += 4.0;
        self.pulse += 0.1;
    }
}
