//! Collision and damage resolution
//!
//! Runs once per tick after everything has moved. Projectiles are spent
//! through a keep-mask and actors are pruned with `retain`, so no collection
//! is mutated while it is being walked.

use rand::Rng;

use super::entity::{BulletOwner, Tint};
use super::state::{GameEvent, GameState};
use crate::circles_overlap;

/// Resolve every overlap for this tick
pub fn resolve(state: &mut GameState) {
    let mut spent = vec![false; state.bullets.len()];
    enemy_bullets_vs_player(state, &mut spent);
    player_bullets_vs_targets(state, &mut spent);

    let mut index = 0;
    state.bullets.retain(|_| {
        let keep = !spent[index];
        index += 1;
        keep
    });

    reward_kills(state);
    body_contacts(state);
    collect_powerups(state);
}

fn enemy_bullets_vs_player(state: &mut GameState, spent: &mut [bool]) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    let hits: Vec<(usize, glam::Vec2, i32)> = state
        .bullets
        .iter()
        .enumerate()
        .filter(|(_, b)| {
            b.owner == BulletOwner::Enemy && circles_overlap(b.pos, b.radius, player_pos, player_radius)
        })
        .map(|(i, b)| (i, b.pos, b.damage))
        .collect();

    for (i, pos, damage) in hits {
        spent[i] = true;
        if state.player.take_damage(damage, &state.tuning.player) {
            state.explosion(pos, Tint::Yellow, 12, 3.0);
            state.emit(GameEvent::PlayerDamaged);
        }
    }
}

fn player_bullets_vs_targets(state: &mut GameState, spent: &mut [bool]) {
    for i in 0..state.bullets.len() {
        let bullet = &state.bullets[i];
        if bullet.owner != BulletOwner::Player || spent[i] {
            continue;
        }
        let (pos, radius, damage) = (bullet.pos, bullet.radius, bullet.damage);

        // First live enemy in order takes the hit
        if let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.health.is_alive() && circles_overlap(pos, radius, e.pos, e.radius))
        {
            enemy.health.damage(damage);
            spent[i] = true;
            state.explosion(pos, Tint::Yellow, 10, 2.0);
            continue;
        }

        if let Some(boss) = state.boss.as_mut() {
            if boss.health.is_alive() && circles_overlap(pos, radius, boss.pos, boss.radius) {
                boss.health.damage(damage);
                spent[i] = true;
                state.explosion(pos, Tint::Orange, 12, 3.0);
            }
        }
    }
}

/// Register a kill: bump the combo and return the points earned
fn register_kill(state: &mut GameState, base: u32) -> u64 {
    state.combo += 1;
    state.combo_timer = state.tuning.combo_window;
    let points = state.kill_reward(base);
    state.score += points;
    points
}

fn reward_kills(state: &mut GameState) {
    let (dead, alive): (Vec<_>, Vec<_>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|e| !e.health.is_alive());
    state.enemies = alive;

    for enemy in dead {
        let points = register_kill(state, enemy.score);
        state.kills += 1;
        state.stats.total_kills += 1;
        state.explosion(enemy.pos, enemy.tint(), 35, 6.0);
        state.emit(GameEvent::Explosion);
        log::debug!("{:?} destroyed for {} points (combo {})", enemy.kind, points, state.combo);

        let drops = &state.tuning.powerups;
        let chance = if state.combo > drops.combo_drop_threshold {
            drops.combo_drop_chance
        } else {
            drops.drop_chance
        };
        if state.rng.random_bool(chance.clamp(0.0, 1.0)) {
            state.spawn_powerup(enemy.pos);
        }
    }

    let boss_dead = state.boss.as_ref().is_some_and(|b| !b.health.is_alive());
    if !boss_dead {
        return;
    }
    let Some(boss) = state.boss.take() else {
        return;
    };

    let base = state.tuning.boss.score;
    let points = register_kill(state, base);
    state.stats.bosses_defeated += 1;
    state.explosion(boss.pos, Tint::Orange, 100, 10.0);
    state.spawn_boss_drops(boss.pos);
    state.wave += 1;
    state.kills = 0;
    state.emit(GameEvent::Explosion);
    state.emit(GameEvent::BossDefeated);
    log::info!("Boss defeated for {} points, wave {} begins", points, state.wave);
}

fn body_contacts(state: &mut GameState) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let mut hits = Vec::new();

    for enemy in state.enemies.iter_mut() {
        if !circles_overlap(enemy.pos, enemy.radius, player_pos, player_radius) {
            continue;
        }
        if state.player.take_damage(enemy.contact_damage, &state.tuning.player) {
            hits.push((enemy.pos, enemy.tint()));
        }
        // Rammed enemies are destroyed whether or not the hit landed
        enemy.health.deplete();
    }
    state.enemies.retain(|e| e.health.is_alive());

    for (pos, tint) in hits {
        state.explosion(pos, tint, 25, 5.0);
        state.emit(GameEvent::PlayerDamaged);
    }

    let boss_contact = state
        .boss
        .as_ref()
        .is_some_and(|b| circles_overlap(b.pos, b.radius, player_pos, player_radius));
    if boss_contact && state.player.take_damage(state.tuning.boss.contact_damage, &state.tuning.player) {
        state.emit(GameEvent::PlayerDamaged);
    }
}

fn collect_powerups(state: &mut GameState) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.powerups)
        .into_iter()
        .partition(|p| circles_overlap(p.pos, p.radius, player_pos, player_radius));
    state.powerups = kept;

    for powerup in taken {
        state.player.apply_powerup(powerup.kind, &state.tuning.powerups);
        state.stats.powerups_collected += 1;
        state.explosion(powerup.pos, powerup.kind.tint(), 20, 4.0);
        state.emit(GameEvent::PowerUpCollected);
        log::debug!("Picked up {:?}", powerup.kind);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::actor::{Boss, Enemy, EnemyKind};
    use crate::sim::director;
    use crate::sim::entity::{Bullet, PowerUp, PowerUpKind};
    use crate::tuning::ShooterTuning;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, ShooterTuning::default());
        state.start_run();
        state
    }

    fn player_bullet_at(pos: Vec2) -> Bullet {
        Bullet::at_angle(pos, 0.0, 12.0, 25, BulletOwner::Player)
    }

    #[test]
    fn test_two_hits_destroy_normal_enemy() {
        let mut state = playing_state();
        let target = Vec2::new(500.0, 300.0);
        state.enemies.push(Enemy::new(EnemyKind::Normal, target, &state.tuning.enemies));

        state.bullets.push(player_bullet_at(target));
        resolve(&mut state);
        assert_eq!(state.enemies[0].health.current(), 25);
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 0);

        state.bullets.push(player_bullet_at(target));
        resolve(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.combo, 1);
        assert_eq!(state.combo_timer, 120);
        assert_eq!(state.score, 11);
        assert_eq!(state.kills, 1);
        assert_eq!(state.stats.total_kills, 1);
        assert!(state.drain_events().contains(&GameEvent::Explosion));
    }

    #[test]
    fn test_reward_after_difficulty_rise() {
        let mut state = playing_state();
        for _ in 0..=state.tuning.director.difficulty_interval {
            director::direct(&mut state);
        }
        assert!(state.difficulty > 1.0);
        state.enemies.clear();
        state.powerups.clear();
        state.score = 0;
        state.combo = 9;

        let target = Vec2::new(500.0, 300.0);
        let mut enemy = Enemy::new(EnemyKind::Normal, target, &state.tuning.enemies);
        enemy.health.damage(30);
        state.enemies.push(enemy);
        state.bullets.push(player_bullet_at(target));

        resolve(&mut state);
        assert_eq!(state.combo, 10);
        assert_eq!(state.score, 23);
    }

    #[test]
    fn test_bullet_hits_only_first_enemy() {
        let mut state = playing_state();
        let target = Vec2::new(400.0, 200.0);
        state.enemies.push(Enemy::new(EnemyKind::Normal, target, &state.tuning.enemies));
        state.enemies.push(Enemy::new(EnemyKind::Normal, target, &state.tuning.enemies));
        state.bullets.push(player_bullet_at(target));

        resolve(&mut state);
        assert_eq!(state.enemies[0].health.current(), 25);
        assert_eq!(state.enemies[1].health.current(), 50);
    }

    #[test]
    fn test_enemy_absorbs_bullet_before_boss() {
        let mut state = playing_state();
        let mut boss = Boss::new(1, 1.0, &state.field, &state.tuning.boss);
        boss.pos = Vec2::new(500.0, 130.0);
        let boss_max = boss.health.max();
        state.boss = Some(boss);
        state.enemies.push(Enemy::new(
            EnemyKind::Shooter,
            Vec2::new(500.0, 130.0),
            &state.tuning.enemies,
        ));
        state.bullets.push(player_bullet_at(Vec2::new(500.0, 130.0)));

        resolve(&mut state);
        assert_eq!(state.enemies[0].health.current(), 45);
        assert_eq!(state.boss.as_ref().map(|b| b.health.current()), Some(boss_max));
    }

    #[test]
    fn test_shield_blocks_all_contacts() {
        let mut state = playing_state();
        state.player.apply_powerup(PowerUpKind::Shield, &state.tuning.powerups);
        let pos = state.player.pos;
        for _ in 0..5 {
            state.enemies.push(Enemy::new(EnemyKind::Normal, pos, &state.tuning.enemies));
            state.bullets.push(Bullet::at_angle(pos, 0.0, 6.0, 18, BulletOwner::Enemy));
        }

        resolve(&mut state);
        assert_eq!(state.player.health.current(), 100);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_only_first_hit_lands_before_invulnerability() {
        let mut state = playing_state();
        let pos = state.player.pos;
        state.bullets.push(Bullet::at_angle(pos, 0.0, 6.0, 18, BulletOwner::Enemy));
        state.bullets.push(Bullet::at_angle(pos, 0.0, 6.0, 18, BulletOwner::Enemy));

        resolve(&mut state);
        assert_eq!(state.player.health.current(), 82);
        assert!(state.player.invulnerable.is_active());
        let damaged = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::PlayerDamaged)
            .count();
        assert_eq!(damaged, 1);
    }

    #[test]
    fn test_boss_contact_leaves_boss_alive() {
        let mut state = playing_state();
        let mut boss = Boss::new(1, 1.0, &state.field, &state.tuning.boss);
        boss.pos = state.player.pos;
        state.boss = Some(boss);

        resolve(&mut state);
        assert_eq!(state.player.health.current(), 65);
        assert!(state.boss.is_some());
    }

    #[test]
    fn test_boss_kill_advances_wave() {
        let mut state = playing_state();
        state.kills = 7;
        let mut boss = Boss::new(1, 1.0, &state.field, &state.tuning.boss);
        boss.pos = Vec2::new(500.0, 130.0);
        boss.health.damage(boss.health.max() - 10);
        state.boss = Some(boss);
        state.bullets.push(player_bullet_at(Vec2::new(500.0, 130.0)));

        resolve(&mut state);
        assert!(state.boss.is_none());
        assert_eq!(state.wave, 2);
        assert_eq!(state.kills, 0);
        assert_eq!(state.combo, 1);
        assert_eq!(state.score, 330);
        assert_eq!(state.stats.bosses_defeated, 1);
        assert_eq!(state.powerups.len(), 4);
        assert!(state.drain_events().contains(&GameEvent::BossDefeated));
    }

    #[test]
    fn test_guaranteed_drop_spawns_powerup() {
        let mut tuning = ShooterTuning::default();
        tuning.powerups.drop_chance = 1.0;
        let mut state = GameState::new(9, tuning);
        state.start_run();
        let target = Vec2::new(300.0, 200.0);
        let mut enemy = Enemy::new(EnemyKind::Normal, target, &state.tuning.enemies);
        enemy.health.damage(30);
        state.enemies.push(enemy);
        state.bullets.push(player_bullet_at(target));

        resolve(&mut state);
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].pos, target);
    }

    #[test]
    fn test_powerup_pickup_applies_effect() {
        let mut state = playing_state();
        let pos = state.player.pos;
        state.powerups.push(PowerUp::new(pos, PowerUpKind::RapidFire, 20.0));
        state.powerups.push(PowerUp::new(Vec2::new(50.0, 50.0), PowerUpKind::Shield, 20.0));

        resolve(&mut state);
        assert!(state.player.rapid_fire.is_active());
        assert!(!state.player.shield.is_active());
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.stats.powerups_collected, 1);
    }
}
