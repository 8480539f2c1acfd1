//! Fixed timestep simulation tick
//!
//! Drives the session state machine and, while playing, advances every
//! entity by one step before resolving collisions and running the director.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::director;
use super::entity::{BulletOwner, Particle, Tint};
use super::state::{GameEvent, GameState, SessionPhase};
use crate::direction;

/// Power-ups are dropped once they fall this far below the playfield
pub const POWERUP_CULL_MARGIN: f32 = 100.0;

/// Input commands for a single tick.
///
/// Buttons are one-shot flags: the platform layer sets them for exactly one
/// tick per key press.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement axes, each in -1..=1 (y down)
    pub movement: Vec2,
    /// Pointer position in playfield coordinates
    pub pointer: Vec2,
    /// Manual fire (click)
    pub fire: bool,
    /// Start / restart
    pub confirm: bool,
    /// Escape: pause while playing, leave the game-over screen, quit from the menu
    pub back: bool,
    /// Pause toggle
    pub pause: bool,
    /// Switch between auto-fire and manual fire
    pub toggle_auto_fire: bool,
}

impl TickInput {
    /// Drop button presses once a tick has consumed them; axes and pointer stay
    pub fn clear_one_shots(&mut self) {
        self.fire = false;
        self.confirm = false;
        self.back = false;
        self.pause = false;
        self.toggle_auto_fire = false;
    }
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // The starfield scrolls in every phase
    for star in state.stars.iter_mut() {
        star.update(&state.field, &mut state.rng);
    }

    match state.phase {
        SessionPhase::Menu => {
            if input.confirm {
                state.start_run();
            } else if input.back {
                state.emit(GameEvent::QuitRequested);
            }
            return;
        }
        SessionPhase::Paused => {
            if input.pause || input.back {
                state.phase = SessionPhase::Playing;
                log::info!("Resumed");
            }
            return;
        }
        SessionPhase::GameOver => {
            if input.confirm {
                state.start_run();
            } else if input.back {
                state.phase = SessionPhase::Menu;
            }
            return;
        }
        SessionPhase::Playing => {
            if input.pause || input.back {
                state.phase = SessionPhase::Paused;
                log::info!("Paused");
                return;
            }
        }
    }

    if input.toggle_auto_fire {
        state.auto_fire = !state.auto_fire;
        log::info!("Auto-fire {}", if state.auto_fire { "on" } else { "off" });
    }

    step_playing(state, input);
}

fn step_playing(state: &mut GameState, input: &TickInput) {
    let field = state.field;

    // Player; exhaust trails the velocity the ship had coming into this tick
    let prev_vel = state.player.vel;
    state
        .player
        .update(input.movement, input.pointer, &field, &state.tuning.player);
    engine_exhaust(state, prev_vel);

    if state.auto_fire || input.fire {
        if let Some(bullet) = state.player.try_shoot(input.pointer, &state.tuning.player) {
            state.bullets.push(bullet);
            state.emit(GameEvent::Shot);
        }
    }

    // Combo lapses one tick after its timer runs out
    if state.combo_timer > 0 {
        state.combo_timer -= 1;
    } else {
        state.combo = 0;
    }

    let player_pos = state.player.pos;

    // Projectiles
    let homing_accel = state.tuning.homing_accel;
    for bullet in state.bullets.iter_mut() {
        let target = if !bullet.homing {
            None
        } else {
            match bullet.owner {
                BulletOwner::Enemy => Some(player_pos),
                BulletOwner::Player => state
                    .enemies
                    .iter()
                    .map(|e| e.pos)
                    .min_by(|a, b| a.distance(bullet.pos).total_cmp(&b.distance(bullet.pos))),
            }
        };
        bullet.integrate(target, homing_accel);
    }
    let bullet_margin = state.tuning.bullet_margin;
    state.bullets.retain(|b| !field.is_beyond(b.pos, bullet_margin));

    // Enemies
    let mut volley = Vec::new();
    for enemy in state.enemies.iter_mut() {
        enemy.update(player_pos, &state.tuning.enemies);
        if let Some(bullet) = enemy.try_shoot(player_pos, &field, &state.tuning.enemies) {
            volley.push(bullet);
        }
    }
    let enemy_margin = state.tuning.enemy_margin;
    state.enemies.retain(|e| !field.is_beyond(e.pos, enemy_margin));

    // Boss
    if let Some(boss) = state.boss.as_mut() {
        let before = boss.phase();
        boss.update(&field, &state.tuning.boss);
        if boss.phase() != before {
            log::info!("Boss enters phase {}", boss.phase().number());
        }
        volley.extend(boss.attack(player_pos, &state.tuning.boss, &mut state.rng));
    }
    state.bullets.extend(volley);

    // Pickups and effects
    let fall_speed = state.tuning.powerups.fall_speed;
    for powerup in state.powerups.iter_mut() {
        powerup.update(fall_speed);
    }
    state
        .powerups
        .retain(|p| p.pos.y <= field.height + POWERUP_CULL_MARGIN);

    for particle in state.particles.iter_mut() {
        particle.update();
    }
    state.particles.retain(|p| !p.is_dead());

    collision::resolve(state);
    director::direct(state);

    if !state.player.health.is_alive() {
        end_run(state);
    }
}

/// Exhaust sparks behind a moving ship, drifting opposite `prev_vel`
fn engine_exhaust(state: &mut GameState, prev_vel: Vec2) {
    let player = &state.player;
    if !player.is_moving() || !state.rng.random_bool(0.5) {
        return;
    }

    let behind = player.pos - direction(player.aim) * player.radius * 0.8;
    let jitter = Vec2::new(
        state.rng.random_range(-3.0..=3.0),
        state.rng.random_range(-3.0..=3.0),
    );
    let tint = if player.rapid_fire.is_active() {
        Tint::Cyan
    } else {
        Tint::Orange
    };
    let size = state.rng.random_range(2..=4) as f32;
    let vel = -prev_vel;

    let particle = Particle::with_velocity(behind + jitter, vel, tint, size, &mut state.rng);
    state.push_particle(particle);
}

fn end_run(state: &mut GameState) {
    state.phase = SessionPhase::GameOver;
    let new_high_score = state.score > state.stats.high_score;
    state.new_high_score = new_high_score;
    if new_high_score {
        state.stats.high_score = state.score;
    }
    log::info!(
        "Game over: score {}, wave {} (seed {}){}",
        state.score,
        state.wave,
        state.seed,
        if new_high_score { " (new high score)" } else { "" }
    );
    state.emit(GameEvent::GameOver { new_high_score });
}
