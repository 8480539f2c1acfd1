//! Wave and spawn director
//!
//! Timers that decide when enemies, power-ups and the boss appear, and how
//! fast the difficulty multiplier climbs.

use glam::Vec2;
use rand::Rng;

use super::actor::{Boss, Enemy, EnemyKind};
use super::state::{GameEvent, GameState};
use crate::tuning::DirectorTuning;

/// Height above the playfield at which timed power-ups appear
pub const POWERUP_SPAWN_Y: f32 = -50.0;
/// Horizontal inset for timed power-ups
pub const POWERUP_SPAWN_INSET: i32 = 120;

/// Edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSide {
    Top,
    Left,
    Right,
}

impl SpawnSide {
    /// Top appears twice so it is picked half the time
    const TABLE: [SpawnSide; 4] = [SpawnSide::Top, SpawnSide::Left, SpawnSide::Right, SpawnSide::Top];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::TABLE[rng.random_range(0..Self::TABLE.len())]
    }
}

/// Ticks between enemy spawns at a given difficulty
pub fn enemy_spawn_interval(difficulty: f64, tuning: &DirectorTuning) -> u32 {
    let shaved = (difficulty * tuning.spawn_difficulty_factor).floor() as i64;
    (tuning.spawn_base as i64 - shaved).max(tuning.spawn_floor as i64) as u32
}

/// Chance that a spawn brings a second enemy along
pub fn double_spawn_chance(difficulty: f64, tuning: &DirectorTuning) -> f64 {
    (tuning.double_spawn_base + difficulty * tuning.double_spawn_per_difficulty).clamp(0.0, 1.0)
}

/// Kill threshold for the boss after the current one
pub fn next_kills_for_boss(current: u32, tuning: &DirectorTuning) -> u32 {
    ((current as f64 * tuning.kills_for_boss_growth).floor() as u32).min(tuning.kills_for_boss_cap)
}

/// Normal:shooter odds for the current wave
pub fn enemy_weights(wave: u32, tuning: &DirectorTuning) -> (u32, u32) {
    if wave < tuning.shooter_wave { (6, 3) } else { (5, 4) }
}

/// Advance every director timer by one tick
pub fn direct(state: &mut GameState) {
    if state.boss.is_none() {
        state.enemy_spawn_timer += 1;
        if state.enemy_spawn_timer > enemy_spawn_interval(state.difficulty, &state.tuning.director) {
            state.enemy_spawn_timer = 0;
            spawn_enemy(state);
            let chance = double_spawn_chance(state.difficulty, &state.tuning.director);
            if state.rng.random_bool(chance) {
                spawn_enemy(state);
            }
        }
    }

    state.powerup_spawn_timer += 1;
    if state.powerup_spawn_timer > state.tuning.director.powerup_interval {
        state.powerup_spawn_timer = 0;
        let max_x = (state.field.width as i32 - POWERUP_SPAWN_INSET).max(POWERUP_SPAWN_INSET);
        let x = state.rng.random_range(POWERUP_SPAWN_INSET..=max_x) as f32;
        state.spawn_powerup(Vec2::new(x, POWERUP_SPAWN_Y));
    }

    state.difficulty_timer += 1;
    if state.difficulty_timer > state.tuning.director.difficulty_interval {
        state.difficulty_timer = 0;
        state.difficulty += state.tuning.director.difficulty_step;
        log::info!("Difficulty raised to {:.2}", state.difficulty);
    }

    if state.boss.is_none() && state.kills >= state.kills_for_boss {
        spawn_boss(state);
        state.kills = 0;
        state.kills_for_boss = next_kills_for_boss(state.kills_for_boss, &state.tuning.director);
    }
}

/// Spawn one enemy just off a random edge
pub fn spawn_enemy(state: &mut GameState) {
    let w = state.field.width as i32;
    let h = state.field.height as i32;
    let rng = &mut state.rng;

    let side = SpawnSide::random(rng);
    let (x, y) = match side {
        SpawnSide::Top => (rng.random_range(50..=(w - 50).max(50)), rng.random_range(-100..=-50)),
        SpawnSide::Left => (rng.random_range(-100..=-50), rng.random_range(50..=(h / 2).max(50))),
        SpawnSide::Right => (rng.random_range(w + 50..=w + 100), rng.random_range(50..=(h / 2).max(50))),
    };

    let (normal, shooter) = enemy_weights(state.wave, &state.tuning.director);
    let kind = if rng.random_range(0..normal + shooter) < normal {
        EnemyKind::Normal
    } else {
        EnemyKind::Shooter
    };

    log::debug!("Spawning {:?} from {:?}", kind, side);
    state.enemies.push(Enemy::new(
        kind,
        Vec2::new(x as f32, y as f32),
        &state.tuning.enemies,
    ));
}

/// Bring in the boss for the current wave
pub fn spawn_boss(state: &mut GameState) {
    let boss = Boss::new(state.wave, state.difficulty, &state.field, &state.tuning.boss);
    log::info!("Boss incoming for wave {} ({} hp)", state.wave, boss.health.max());
    state.boss = Some(boss);
    state.emit(GameEvent::BossSpawned);
}
