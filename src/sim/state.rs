//! Session state for the space shooter
//!
//! Everything one run needs lives in `GameState`: actors, projectiles, the
//! wave/difficulty scalars, lifetime statistics and the session's own RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Boss, Enemy, Player};
use super::entity::{Bullet, Particle, Playfield, PowerUp, PowerUpKind, Star, Tint};
use crate::tuning::ShooterTuning;

/// Distance of the player's spawn point above the bottom edge
pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;

/// Top-level session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen; the starfield scrolls, nothing else runs
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen, stars keep moving
    Paused,
    /// Run ended
    GameOver,
}

/// Something the front end should react to (sounds, quitting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Shot,
    Explosion,
    PowerUpCollected,
    PlayerDamaged,
    BossSpawned,
    BossDefeated,
    GameOver { new_high_score: bool },
    QuitRequested,
}

/// Statistics kept for the lifetime of the process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub high_score: u64,
    pub total_kills: u32,
    pub bosses_defeated: u32,
    pub games_played: u32,
    pub powerups_collected: u32,
}

/// Complete shooter session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance numbers for this session
    pub tuning: ShooterTuning,
    pub field: Playfield,
    pub phase: SessionPhase,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub powerups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub score: u64,
    /// Current wave (1-based)
    pub wave: u32,
    /// Kills since the last boss
    pub kills: u32,
    pub kills_for_boss: u32,
    pub combo: u32,
    /// Ticks left before the combo lapses
    pub combo_timer: u32,
    /// Difficulty multiplier (starts at 1.0)
    pub difficulty: f64,
    pub enemy_spawn_timer: u32,
    pub powerup_spawn_timer: u32,
    pub difficulty_timer: u32,
    /// Fire continuously at the pointer instead of on click
    pub auto_fire: bool,
    pub stats: SessionStats,
    /// The last finished run beat the session high score
    pub new_high_score: bool,
    /// Seed the session RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    auto_fire_default: bool,
    particle_budget: usize,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session sitting at the menu
    pub fn new(seed: u64, tuning: ShooterTuning) -> Self {
        let field = Playfield::new(tuning.width, tuning.height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..tuning.star_count)
            .map(|_| Star::random(&field, &mut rng))
            .collect();
        let player = Player::new(player_spawn(&field), &tuning.player);
        let kills_for_boss = tuning.director.initial_kills_for_boss;

        Self {
            tuning,
            field,
            phase: SessionPhase::Menu,
            player,
            bullets: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            powerups: Vec::new(),
            particles: Vec::new(),
            stars,
            score: 0,
            wave: 1,
            kills: 0,
            kills_for_boss,
            combo: 0,
            combo_timer: 0,
            difficulty: 1.0,
            enemy_spawn_timer: 0,
            powerup_spawn_timer: 0,
            difficulty_timer: 0,
            auto_fire: true,
            stats: SessionStats::default(),
            new_high_score: false,
            seed,
            rng,
            auto_fire_default: true,
            particle_budget: usize::MAX,
            events: Vec::new(),
        }
    }

    /// Cap on live particles (0 disables them)
    pub fn with_particle_budget(mut self, budget: usize) -> Self {
        self.particle_budget = budget;
        self
    }

    /// Auto-fire mode each new run starts in
    pub fn with_auto_fire(mut self, auto_fire: bool) -> Self {
        self.auto_fire_default = auto_fire;
        self.auto_fire = auto_fire;
        self
    }

    /// Begin a fresh run. Stars and lifetime statistics are kept.
    pub fn start_run(&mut self) {
        self.player = Player::new(player_spawn(&self.field), &self.tuning.player);
        self.bullets.clear();
        self.enemies.clear();
        self.boss = None;
        self.powerups.clear();
        self.particles.clear();
        self.score = 0;
        self.wave = 1;
        self.kills = 0;
        self.kills_for_boss = self.tuning.director.initial_kills_for_boss;
        self.combo = 0;
        self.combo_timer = 0;
        self.difficulty = 1.0;
        self.enemy_spawn_timer = 0;
        self.powerup_spawn_timer = 0;
        self.difficulty_timer = 0;
        self.auto_fire = self.auto_fire_default;
        self.new_high_score = false;
        self.stats.games_played += 1;
        self.phase = SessionPhase::Playing;
        log::info!("Run {} started", self.stats.games_played);
    }

    /// Queue an event for the front end
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current score multiplier from the combo
    pub fn combo_multiplier(&self) -> f64 {
        1.0 + self.combo as f64 * self.tuning.combo_step
    }

    /// Points for a kill worth `base`, at the current difficulty and combo
    pub fn kill_reward(&self, base: u32) -> u64 {
        (base as f64 * self.difficulty * self.combo_multiplier()).floor() as u64
    }

    /// Spray `count` particles, respecting the particle budget
    pub fn explosion(&mut self, pos: Vec2, tint: Tint, count: usize, size: f32) {
        let room = self.particle_budget.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let particle = Particle::burst(pos, tint, size, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Add a single particle if the budget allows
    pub fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() < self.particle_budget {
            self.particles.push(particle);
        }
    }

    /// Drop a random power-up at `pos`
    pub fn spawn_powerup(&mut self, pos: Vec2) {
        let kind = PowerUpKind::random(&mut self.rng);
        self.powerups
            .push(PowerUp::new(pos, kind, self.tuning.powerups.radius));
    }

    /// Scatter the boss's loot around `center`
    pub fn spawn_boss_drops(&mut self, center: Vec2) {
        for _ in 0..self.tuning.powerups.boss_drops {
            let offset = Vec2::new(
                self.rng.random_range(-60..=60) as f32,
                self.rng.random_range(-60..=60) as f32,
            );
            self.spawn_powerup(center + offset);
        }
    }

    /// Health of the player as a 0..=1 fraction
    pub fn player_health_fraction(&self) -> f32 {
        self.player.health.fraction()
    }
}

fn player_spawn(field: &Playfield) -> Vec2 {
    Vec2::new(field.width / 2.0, field.height - PLAYER_SPAWN_OFFSET)
}
