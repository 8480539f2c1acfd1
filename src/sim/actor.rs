//! Health-bearing actors: the player ship, regular enemies and the boss

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Bullet, BulletOwner, Cooldown, Playfield, PowerUpKind, Tint};
use crate::tuning::{BossTuning, EnemyStats, EnemyTuning, PlayerTuning, PowerUpTuning, VolleyTuning};
use crate::{angle_to, direction};

/// Scale applied to each axis when moving diagonally
pub const DIAGONAL_FACTOR: f32 = 0.707;

/// Hit points clamped to `[0, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    #[inline]
    pub fn current(&self) -> i32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn damage(&mut self, amount: i32) {
        self.current = (self.current - amount.max(0)).clamp(0, self.max);
    }

    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount.max(0)).clamp(0, self.max);
    }

    /// Drop straight to zero (destroyed without a fight)
    pub fn deplete(&mut self) {
        self.current = 0;
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Displacement applied last tick (zero before the first update)
    pub vel: Vec2,
    pub radius: f32,
    pub health: Health,
    /// Aim angle toward the pointer (radians)
    pub aim: f32,
    pub shoot_cooldown: Cooldown,
    pub rapid_fire: Cooldown,
    pub shield: Cooldown,
    pub invulnerable: Cooldown,
    pub hit_flash: Cooldown,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &PlayerTuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: tuning.radius,
            health: Health::new(tuning.max_health),
            aim: -std::f32::consts::FRAC_PI_2,
            shoot_cooldown: Cooldown::ready(),
            rapid_fire: Cooldown::ready(),
            shield: Cooldown::ready(),
            invulnerable: Cooldown::ready(),
            hit_flash: Cooldown::ready(),
        }
    }

    /// Move from raw input axes (each in -1..=1), aim at the pointer and
    /// advance every timer by one tick.
    pub fn update(&mut self, axes: Vec2, pointer: Vec2, field: &Playfield, tuning: &PlayerTuning) {
        let mut delta = Vec2::new(axes.x.signum_or_zero(), axes.y.signum_or_zero()) * tuning.speed;
        if delta.x != 0.0 && delta.y != 0.0 {
            delta *= DIAGONAL_FACTOR;
        }

        self.pos = field.clamp_inside(self.pos + delta, self.radius + tuning.edge_margin);
        self.vel = delta;
        self.aim = angle_to(self.pos, pointer);

        self.shoot_cooldown.tick();
        self.invulnerable.tick();
        self.hit_flash.tick();
        self.rapid_fire.tick();
        self.shield.tick();
    }

    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }

    /// Current delay between shots
    pub fn shoot_delay(&self, tuning: &PlayerTuning) -> u32 {
        if self.rapid_fire.is_active() {
            tuning.rapid_shoot_delay
        } else {
            tuning.shoot_delay
        }
    }

    /// Fire at `target` if the gun is ready
    pub fn try_shoot(&mut self, target: Vec2, tuning: &PlayerTuning) -> Option<Bullet> {
        let delay = self.shoot_delay(tuning);
        if self.shoot_cooldown.trigger(delay) {
            Some(Bullet::aimed(
                self.pos,
                target,
                tuning.bullet_speed,
                tuning.bullet_damage,
                BulletOwner::Player,
            ))
        } else {
            None
        }
    }

    /// Shield or invulnerability frames are up
    pub fn is_protected(&self) -> bool {
        self.shield.is_active() || self.invulnerable.is_active()
    }

    /// Apply damage unless protected. Returns true if health was lost.
    pub fn take_damage(&mut self, amount: i32, tuning: &PlayerTuning) -> bool {
        if self.is_protected() {
            return false;
        }
        self.health.damage(amount);
        self.invulnerable.set(tuning.invulnerable_ticks);
        self.hit_flash.set(tuning.hit_flash_ticks);
        true
    }

    pub fn apply_powerup(&mut self, kind: PowerUpKind, tuning: &PowerUpTuning) {
        match kind {
            PowerUpKind::RapidFire => self.rapid_fire.set(tuning.rapid_fire_ticks),
            PowerUpKind::Shield => self.shield.set(tuning.shield_ticks),
            PowerUpKind::Health => self.health.heal(tuning.health_restore),
        }
    }
}

trait SignumOrZero {
    fn signum_or_zero(self) -> Self;
}

impl SignumOrZero for f32 {
    fn signum_or_zero(self) -> f32 {
        if self > 0.0 {
            1.0
        } else if self < 0.0 {
            -1.0
        } else {
            0.0
        }
    }
}

/// Regular enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Flies straight at the player
    Normal,
    /// Keeps its distance and fires aimed shots
    Shooter,
}

impl EnemyKind {
    pub fn stats<'a>(&self, tuning: &'a EnemyTuning) -> &'a EnemyStats {
        match self {
            EnemyKind::Normal => &tuning.normal,
            EnemyKind::Shooter => &tuning.shooter,
        }
    }

    pub fn tint(&self) -> Tint {
        match self {
            EnemyKind::Normal => Tint::Red,
            EnemyKind::Shooter => Tint::Purple,
        }
    }
}

/// A regular enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: Health,
    pub speed: f32,
    pub radius: f32,
    pub contact_damage: i32,
    /// Base score before difficulty and combo
    pub score: u32,
    /// Angle toward the player, for drawing
    pub heading: f32,
    /// Cosmetic spin (degrees)
    pub spin: f32,
    pub shoot_cooldown: Cooldown,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, tuning: &EnemyTuning) -> Self {
        let stats = kind.stats(tuning);
        Self {
            kind,
            pos,
            health: Health::new(stats.health),
            speed: stats.speed,
            radius: stats.radius,
            contact_damage: stats.contact_damage,
            score: stats.score,
            heading: 0.0,
            spin: 0.0,
            shoot_cooldown: Cooldown::ready(),
        }
    }

    pub fn tint(&self) -> Tint {
        self.kind.tint()
    }

    /// Movement policy, recomputed from the player's current position
    pub fn update(&mut self, player_pos: Vec2, tuning: &EnemyTuning) {
        self.heading = angle_to(self.pos, player_pos);
        let toward = direction(self.heading);

        match self.kind {
            EnemyKind::Normal => {
                self.pos += toward * self.speed;
            }
            EnemyKind::Shooter => {
                let dist = self.pos.distance(player_pos);
                if dist < tuning.shooter_retreat_distance {
                    self.pos -= toward * self.speed * tuning.shooter_retreat_factor;
                } else if dist > tuning.shooter_approach_distance {
                    self.pos += toward * self.speed;
                }
            }
        }

        self.spin += 3.0;
        self.shoot_cooldown.tick();
    }

    /// Shooters fire while inside the playfield
    pub fn try_shoot(
        &mut self,
        player_pos: Vec2,
        field: &Playfield,
        tuning: &EnemyTuning,
    ) -> Option<Bullet> {
        match self.kind {
            EnemyKind::Normal => None,
            EnemyKind::Shooter => {
                if !field.contains(self.pos)
                    || !self.shoot_cooldown.trigger(tuning.shooter_fire_interval)
                {
                    return None;
                }
                Some(
                    Bullet::aimed(
                        self.pos,
                        player_pos,
                        tuning.shooter_bullet_speed,
                        tuning.shooter_bullet_damage,
                        BulletOwner::Enemy,
                    )
                    .with_tint(Tint::Purple),
                )
            }
        }
    }
}

/// Boss behaviour tier, advanced by health fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BossPhase {
    One,
    Two,
    Three,
}

impl BossPhase {
    /// Phase implied by the remaining health fraction
    pub fn for_fraction(fraction: f32) -> Self {
        if fraction < 0.25 {
            BossPhase::Three
        } else if fraction < 0.6 {
            BossPhase::Two
        } else {
            BossPhase::One
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            BossPhase::One => 1,
            BossPhase::Two => 2,
            BossPhase::Three => 3,
        }
    }

    /// Row in the per-phase tuning tables
    fn index(&self) -> usize {
        self.number() as usize - 1
    }

    fn normal_tint(&self) -> Tint {
        match self {
            BossPhase::One => Tint::Orange,
            BossPhase::Two => Tint::Red,
            BossPhase::Three => Tint::Pink,
        }
    }

    fn special_tint(&self) -> Tint {
        match self {
            BossPhase::One => Tint::Yellow,
            BossPhase::Two => Tint::Cyan,
            BossPhase::Three => Tint::Red,
        }
    }
}

/// Where the boss is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossStage {
    /// Descending to its altitude; no sideways motion, no attacks
    Entering,
    Active(BossPhase),
}

/// The wave boss
#[derive(Debug, Clone)]
pub struct Boss {
    pub pos: Vec2,
    pub health: Health,
    pub radius: f32,
    pub stage: BossStage,
    /// +1 moving right, -1 moving left
    pub heading: f32,
    pub normal_cooldown: Cooldown,
    pub special_cooldown: Cooldown,
    /// Cosmetic rotation (degrees); also offsets the spiral attack
    pub rotation: f32,
}

impl Boss {
    /// Health scales with the wave and the current difficulty
    pub fn new(wave: u32, difficulty: f64, field: &Playfield, tuning: &BossTuning) -> Self {
        let base = tuning.base_health + tuning.health_per_wave * wave as i32;
        let max = (base as f64 * difficulty.max(1.0)).round() as i32;
        Self {
            pos: Vec2::new(field.width / 2.0, tuning.start_y),
            health: Health::new(max),
            radius: tuning.radius,
            stage: BossStage::Entering,
            heading: 1.0,
            normal_cooldown: Cooldown::ready(),
            special_cooldown: Cooldown::ready(),
            rotation: 0.0,
        }
    }

    pub fn is_entering(&self) -> bool {
        self.stage == BossStage::Entering
    }

    /// Current phase; an entering boss counts as phase one
    pub fn phase(&self) -> BossPhase {
        match self.stage {
            BossStage::Entering => BossPhase::One,
            BossStage::Active(phase) => phase,
        }
    }

    /// Move, re-derive the phase and tick both attack cooldowns
    pub fn update(&mut self, field: &Playfield, tuning: &BossTuning) {
        match self.stage {
            BossStage::Entering => {
                if self.pos.y < tuning.target_y {
                    self.pos.y = (self.pos.y + tuning.entry_speed).min(tuning.target_y);
                } else {
                    self.stage = BossStage::Active(BossPhase::for_fraction(self.health.fraction()));
                }
            }
            BossStage::Active(phase) => {
                // Health never regenerates, but the max() keeps phases one-way regardless
                let phase = phase.max(BossPhase::for_fraction(self.health.fraction()));
                self.stage = BossStage::Active(phase);

                self.pos.x += tuning.phase_speed[phase.index()] * self.heading;
                let left = self.radius + tuning.edge_margin;
                let right = field.width - self.radius - tuning.edge_margin;
                if self.pos.x <= left {
                    self.pos.x = left;
                    self.heading = 1.0;
                } else if self.pos.x >= right {
                    self.pos.x = right;
                    self.heading = -1.0;
                }
            }
        }

        self.rotation += 3.0;
        self.normal_cooldown.tick();
        self.special_cooldown.tick();
    }

    /// Fire whichever attacks are off cooldown
    pub fn attack(
        &mut self,
        player_pos: Vec2,
        tuning: &BossTuning,
        rng: &mut impl Rng,
    ) -> Vec<Bullet> {
        let BossStage::Active(phase) = self.stage else {
            return Vec::new();
        };

        let mut bullets = Vec::new();

        let normal = tuning.normal_volleys[phase.index()];
        if self.normal_cooldown.trigger(normal.cooldown) {
            self.normal_attack(phase, &normal, player_pos, rng, &mut bullets);
        }

        let special = tuning.special_volleys[phase.index()];
        if self.special_cooldown.trigger(special.cooldown) {
            self.special_attack(phase, &special, &mut bullets);
        }

        bullets
    }

    fn normal_attack(
        &self,
        phase: BossPhase,
        volley: &VolleyTuning,
        player_pos: Vec2,
        rng: &mut impl Rng,
        out: &mut Vec<Bullet>,
    ) {
        let tint = phase.normal_tint();
        let aim = angle_to(self.pos, player_pos);
        let fan: &[f32] = match phase {
            BossPhase::One => &[-0.3, 0.0, 0.3],
            BossPhase::Two => &[-0.5, -0.25, 0.0, 0.25, 0.5],
            BossPhase::Three => {
                // Homing missiles from jittered launch points
                for _ in 0..3 {
                    let jitter = Vec2::new(
                        rng.random_range(-20..=20) as f32,
                        rng.random_range(-20..=20) as f32,
                    );
                    out.push(
                        Bullet::aimed(
                            self.pos + jitter,
                            player_pos,
                            volley.speed,
                            volley.damage,
                            BulletOwner::Enemy,
                        )
                        .with_tint(tint)
                        .homing(),
                    );
                }
                return;
            }
        };

        for offset in fan {
            out.push(
                Bullet::at_angle(self.pos, aim + offset, volley.speed, volley.damage, BulletOwner::Enemy)
                    .with_tint(tint),
            );
        }
    }

    fn special_attack(&self, phase: BossPhase, volley: &VolleyTuning, out: &mut Vec<Bullet>) {
        let tint = phase.special_tint();
        let shot = |origin: Vec2, angle: f32| {
            Bullet::at_angle(origin, angle, volley.speed, volley.damage, BulletOwner::Enemy)
                .with_tint(tint)
        };

        match phase {
            BossPhase::One => {
                // Radial burst
                for i in 0..16 {
                    out.push(shot(self.pos, TAU / 16.0 * i as f32));
                }
            }
            BossPhase::Two => {
                // Spiral, rotated by the boss's spin
                let offset = self.rotation * 0.05;
                for i in 0..20 {
                    out.push(shot(self.pos, TAU / 20.0 * i as f32 + offset));
                }
            }
            BossPhase::Three => {
                // Walls fanning out to both sides
                let left = self.pos - Vec2::new(30.0, 0.0);
                let right = self.pos + Vec2::new(30.0, 0.0);
                for i in 0..7 {
                    let spread = (i as f32 - 3.0) * 60.0;
                    out.push(shot(left, angle_to(left, self.pos + Vec2::new(-600.0, spread))));
                    out.push(shot(right, angle_to(right, self.pos + Vec2::new(600.0, spread))));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> Playfield {
        Playfield::new(1000.0, 700.0)
    }

    fn enemies() -> EnemyTuning {
        EnemyTuning::default()
    }

    fn boss_tuning() -> BossTuning {
        BossTuning::default()
    }

    #[test]
    fn test_health_is_clamped() {
        let mut h = Health::new(50);
        h.damage(80);
        assert_eq!(h.current(), 0);
        assert!(!h.is_alive());
        h.heal(500);
        assert_eq!(h.current(), 50);
        h.damage(-10);
        assert_eq!(h.current(), 50);
    }

    #[test]
    fn test_player_velocity_zero_before_first_update() {
        let player = Player::new(Vec2::new(500.0, 600.0), &PlayerTuning::default());
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(!player.is_moving());
    }

    #[test]
    fn test_diagonal_speed_normalized() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(Vec2::new(500.0, 350.0), &tuning);
        player.update(Vec2::new(1.0, 1.0), Vec2::ZERO, &field(), &tuning);
        let expected = tuning.speed * DIAGONAL_FACTOR;
        assert!((player.vel.x - expected).abs() < 1e-4);
        assert!((player.vel.y - expected).abs() < 1e-4);
        assert!((player.vel.length() - tuning.speed).abs() < 0.01);
    }

    #[test]
    fn test_player_stays_inside_playfield() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(Vec2::new(35.0, 35.0), &tuning);
        for _ in 0..20 {
            player.update(Vec2::new(-1.0, -1.0), Vec2::ZERO, &field(), &tuning);
        }
        let inset = tuning.radius + tuning.edge_margin;
        assert!(player.pos.x >= inset && player.pos.y >= inset);
    }

    #[test]
    fn test_shield_blocks_damage() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        player.apply_powerup(PowerUpKind::Shield, &PowerUpTuning::default());
        for _ in 0..10 {
            assert!(!player.take_damage(50, &tuning));
        }
        assert_eq!(player.health.current(), tuning.max_health);
    }

    #[test]
    fn test_hit_grants_invulnerability() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        assert!(player.take_damage(15, &tuning));
        assert!(!player.take_damage(15, &tuning));
        assert_eq!(player.health.current(), 85);
        assert_eq!(player.invulnerable.remaining(), tuning.invulnerable_ticks);
    }

    #[test]
    fn test_rapid_fire_shortens_delay() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        assert_eq!(player.shoot_delay(&tuning), 12);
        player.apply_powerup(PowerUpKind::RapidFire, &PowerUpTuning::default());
        assert_eq!(player.shoot_delay(&tuning), 4);
        assert!(player.try_shoot(Vec2::new(0.0, -10.0), &tuning).is_some());
        assert!(player.try_shoot(Vec2::new(0.0, -10.0), &tuning).is_none());
    }

    #[test]
    fn test_health_powerup_caps_at_max() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        player.take_damage(20, &tuning);
        player.apply_powerup(PowerUpKind::Health, &PowerUpTuning::default());
        assert_eq!(player.health.current(), 100);
    }

    #[test]
    fn test_normal_enemy_pursues() {
        let mut enemy = Enemy::new(EnemyKind::Normal, Vec2::new(0.0, 0.0), &enemies());
        let player = Vec2::new(100.0, 0.0);
        enemy.update(player, &enemies());
        assert!((enemy.pos.x - 2.8).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_stats_come_from_tuning() {
        let mut tuning = enemies();
        tuning.normal.health = 90;
        tuning.normal.speed = 4.0;
        tuning.normal.score = 13;
        let mut enemy = Enemy::new(EnemyKind::Normal, Vec2::ZERO, &tuning);
        assert_eq!(enemy.health.max(), 90);
        assert_eq!(enemy.score, 13);
        assert_eq!(enemy.contact_damage, 15);
        enemy.update(Vec2::new(100.0, 0.0), &tuning);
        assert!((enemy.pos.x - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_shooter_keeps_distance_band() {
        let player = Vec2::new(500.0, 350.0);

        let mut close = Enemy::new(EnemyKind::Shooter, Vec2::new(400.0, 350.0), &enemies());
        close.update(player, &enemies());
        assert!(close.pos.x < 400.0);

        let mut far = Enemy::new(EnemyKind::Shooter, Vec2::new(0.0, 350.0), &enemies());
        far.update(player, &enemies());
        assert!(far.pos.x > 0.0);

        let mut held = Enemy::new(EnemyKind::Shooter, Vec2::new(200.0, 350.0), &enemies());
        held.update(player, &enemies());
        assert_eq!(held.pos, Vec2::new(200.0, 350.0));
    }

    #[test]
    fn test_shooter_fires_on_cooldown_only_on_screen() {
        let field = field();
        let player = Vec2::new(500.0, 600.0);
        let mut offscreen = Enemy::new(EnemyKind::Shooter, Vec2::new(-80.0, 100.0), &enemies());
        assert!(offscreen.try_shoot(player, &field, &enemies()).is_none());

        let mut shooter = Enemy::new(EnemyKind::Shooter, Vec2::new(500.0, 100.0), &enemies());
        assert!(shooter.try_shoot(player, &field, &enemies()).is_some());
        for _ in 0..enemies().shooter_fire_interval - 1 {
            shooter.update(Vec2::new(500.0, 400.0), &enemies());
            assert!(shooter.try_shoot(player, &field, &enemies()).is_none());
        }
        shooter.update(Vec2::new(500.0, 400.0), &enemies());
        assert!(shooter.try_shoot(player, &field, &enemies()).is_some());

        let mut normal = Enemy::new(EnemyKind::Normal, Vec2::new(500.0, 100.0), &enemies());
        assert!(normal.try_shoot(player, &field, &enemies()).is_none());
    }

    #[test]
    fn test_boss_enters_then_activates() {
        let field = field();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut boss = Boss::new(1, 1.0, &field, &boss_tuning());
        assert_eq!(boss.health.max(), 650);
        assert!(boss.attack(Vec2::new(500.0, 600.0), &boss_tuning(), &mut rng).is_empty());

        let start_x = boss.pos.x;
        while boss.is_entering() {
            boss.update(&field, &boss_tuning());
            assert_eq!(boss.pos.x, start_x);
        }
        assert_eq!(boss.pos.y, boss_tuning().target_y);
        assert_eq!(boss.stage, BossStage::Active(BossPhase::One));

        // Both attacks are ready on activation
        let volley = boss.attack(Vec2::new(500.0, 600.0), &boss_tuning(), &mut rng);
        assert_eq!(volley.len(), 3 + 16);
    }

    #[test]
    fn test_boss_bounces_between_edges() {
        let field = field();
        let mut boss = Boss::new(1, 1.0, &field, &boss_tuning());
        boss.pos.y = boss_tuning().target_y;
        boss.stage = BossStage::Active(BossPhase::One);
        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        for _ in 0..400 {
            boss.update(&field, &boss_tuning());
            min_x = min_x.min(boss.pos.x);
            max_x = max_x.max(boss.pos.x);
        }
        let tuning = boss_tuning();
        assert_eq!(min_x, tuning.radius + tuning.edge_margin);
        assert_eq!(max_x, field.width - tuning.radius - tuning.edge_margin);
    }

    #[test]
    fn test_boss_volleys_come_from_tuning() {
        let field = field();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut tuning = boss_tuning();
        tuning.base_health = 1000;
        tuning.normal_volleys[0].cooldown = 10;
        tuning.normal_volleys[0].damage = 7;
        let mut boss = Boss::new(2, 1.5, &field, &tuning);
        assert_eq!(boss.health.max(), 1950);

        boss.stage = BossStage::Active(BossPhase::One);
        let volley = boss.attack(Vec2::new(500.0, 600.0), &tuning, &mut rng);
        assert!(volley.iter().any(|b| b.damage == 7));
        for _ in 0..10 {
            boss.update(&field, &tuning);
        }
        // Only the shortened normal volley is ready again
        assert_eq!(boss.attack(Vec2::new(500.0, 600.0), &tuning, &mut rng).len(), 3);
    }

    #[test]
    fn test_boss_phase_thresholds() {
        assert_eq!(BossPhase::for_fraction(1.0), BossPhase::One);
        assert_eq!(BossPhase::for_fraction(0.6), BossPhase::One);
        assert_eq!(BossPhase::for_fraction(0.59), BossPhase::Two);
        assert_eq!(BossPhase::for_fraction(0.25), BossPhase::Two);
        assert_eq!(BossPhase::for_fraction(0.24), BossPhase::Three);
    }

    #[test]
    fn test_boss_phase_volleys() {
        let field = field();
        let mut rng = Pcg32::seed_from_u64(4);
        let player = Vec2::new(500.0, 600.0);

        let mut boss = Boss::new(1, 1.0, &field, &boss_tuning());
        boss.stage = BossStage::Active(BossPhase::Two);
        assert_eq!(boss.attack(player, &boss_tuning(), &mut rng).len(), 5 + 20);

        let mut boss = Boss::new(1, 1.0, &field, &boss_tuning());
        boss.stage = BossStage::Active(BossPhase::Three);
        let volley = boss.attack(player, &boss_tuning(), &mut rng);
        assert_eq!(volley.len(), 3 + 14);
        assert_eq!(volley.iter().filter(|b| b.homing).count(), 3);

        // Cooldowns now gate both attacks until they run out
        assert!(boss.attack(player, &boss_tuning(), &mut rng).is_empty());
        for _ in 0..25 {
            boss.update(&field, &boss_tuning());
        }
        assert_eq!(boss.attack(player, &boss_tuning(), &mut rng).len(), 3);
    }

    #[test]
    fn test_healed_boss_stays_in_phase_three() {
        let field = field();
        let mut boss = Boss::new(1, 1.0, &field, &boss_tuning());
        boss.stage = BossStage::Active(BossPhase::One);
        boss.health.damage(boss.health.max() - 10);
        boss.update(&field, &boss_tuning());
        assert_eq!(boss.phase(), BossPhase::Three);

        boss.health.heal(boss.health.max());
        boss.update(&field, &boss_tuning());
        assert_eq!(boss.phase(), BossPhase::Three);
    }

    proptest! {
        #[test]
        fn test_boss_phase_never_regresses(changes in prop::collection::vec(-300i32..300, 1..60)) {
            let field = field();
            let mut boss = Boss::new(2, 1.0, &field, &boss_tuning());
            boss.stage = BossStage::Active(BossPhase::One);
            let mut last = boss.phase();
            for change in changes {
                if change < 0 {
                    boss.health.damage(-change);
                } else {
                    boss.health.heal(change);
                }
                boss.update(&field, &boss_tuning());
                prop_assert!(boss.phase() >= last);
                prop_assert!(boss.health.current() >= 0 && boss.health.current() <= boss.health.max());
                last = boss.phase();
            }
        }
    }
}
