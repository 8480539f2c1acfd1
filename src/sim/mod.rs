//! Space shooter simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (timers count ticks at `SIM_HZ`)
//! - Seeded RNG only, owned by the session
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod director;
pub mod entity;
pub mod state;
pub mod tick;

pub use actor::{Boss, BossPhase, BossStage, Enemy, EnemyKind, Health, Player};
pub use entity::{
    Bullet, BulletOwner, Cooldown, Particle, Playfield, PowerUp, PowerUpKind, Star, Tint,
};
pub use state::{GameEvent, GameState, SessionPhase, SessionStats};
pub use tick::{TickInput, tick};
