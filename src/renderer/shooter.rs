//! Space shooter scene

use macroquad::color::Color;
use macroquad::shapes::{draw_circle, draw_circle_lines, draw_line, draw_poly, draw_poly_lines};
use macroquad::text::draw_text;
use macroquad::time::get_fps;
use macroquad::window::clear_background;

use super::shapes::{
    BLACK, GRAY, WHITE, arrow, centered_text, faded, health_bar, panel, rgba, shade, tint_color,
};
use crate::consts::SIM_HZ;
use crate::settings::Settings;
use crate::sim::{
    Boss, Bullet, Enemy, EnemyKind, GameState, Particle, Player, PowerUp, SessionPhase, Tint,
};

/// Draw one frame of the shooter
pub fn draw(state: &GameState, settings: &Settings, muted: bool) {
    clear_background(rgba(5, 5, 20, 1.0));
    draw_stars(state);

    match state.phase {
        SessionPhase::Menu => draw_menu(state),
        SessionPhase::Playing | SessionPhase::Paused | SessionPhase::GameOver => {
            draw_world(state, settings);
            draw_hud(state, settings, muted);
            match state.phase {
                SessionPhase::Paused => draw_paused(state),
                SessionPhase::GameOver => draw_game_over(state),
                _ => {}
            }
        }
    }
}

fn draw_stars(state: &GameState) {
    for star in &state.stars {
        let v = star.shine();
        draw_circle(star.pos.x, star.pos.y, star.size, Color::from_rgba(v, v, v, 255));
    }
}

fn draw_world(state: &GameState, settings: &Settings) {
    for particle in &state.particles {
        draw_particle(particle);
    }
    for powerup in &state.powerups {
        draw_powerup(powerup);
    }
    let trails = settings.quality.trails_enabled();
    for bullet in &state.bullets {
        draw_bullet(bullet, trails);
    }
    for enemy in &state.enemies {
        draw_enemy(enemy);
    }
    if let Some(boss) = &state.boss {
        draw_boss(boss);
    }
    if state.player.health.is_alive() {
        draw_player(&state.player);
    }
}

fn draw_particle(p: &Particle) {
    let life = p.life_fraction();
    draw_circle(p.pos.x, p.pos.y, (p.size * life).max(0.5), tint_color(p.tint, life));
}

fn draw_bullet(bullet: &Bullet, trails: bool) {
    if trails {
        let n = bullet.trail.len() as f32;
        for (i, point) in bullet.trail.iter().enumerate() {
            let t = (i + 1) as f32 / (n + 1.0);
            draw_circle(point.x, point.y, bullet.radius * t, tint_color(bullet.tint, t * 0.5));
        }
    }
    draw_circle(bullet.pos.x, bullet.pos.y, bullet.radius, tint_color(bullet.tint, 1.0));
    if bullet.homing {
        draw_circle_lines(bullet.pos.x, bullet.pos.y, bullet.radius + 2.0, 1.0, WHITE);
    }
}

fn draw_powerup(p: &PowerUp) {
    let glow = 0.6 + 0.4 * p.pulse.sin();
    let color = tint_color(p.kind.tint(), 1.0);
    draw_circle(p.pos.x, p.pos.y, p.radius + 4.0, faded(color, 0.25 * glow));
    draw_circle(p.pos.x, p.pos.y, p.radius, faded(color, 0.8));
    draw_circle_lines(p.pos.x, p.pos.y, p.radius, 2.0, WHITE);
    for k in 0..3 {
        let spark = p.pos + crate::direction((p.spin + k as f32 * 120.0).to_radians()) * (p.radius + 6.0);
        draw_circle(spark.x, spark.y, 2.0, WHITE);
    }
    centered_text(p.kind.icon(), p.pos.x, p.pos.y + 6.0, 20.0, BLACK);
}

fn draw_enemy(enemy: &Enemy) {
    let color = tint_color(enemy.tint(), 1.0);
    let (x, y, r) = (enemy.pos.x, enemy.pos.y, enemy.radius);
    match enemy.kind {
        EnemyKind::Normal => {
            draw_poly(x, y, 4, r, enemy.spin, color);
            draw_poly_lines(x, y, 4, r, enemy.spin, 1.5, WHITE);
        }
        EnemyKind::Shooter => {
            draw_poly(x, y, 6, r, enemy.spin, color);
            arrow(enemy.pos, enemy.heading, r * 0.8, r * 0.4, WHITE);
        }
    }
    if enemy.health.fraction() < 1.0 {
        health_bar(x - r, y - r - 8.0, r * 2.0, 4.0, enemy.health.fraction());
    }
}

fn draw_boss(boss: &Boss) {
    let (x, y, r) = (boss.pos.x, boss.pos.y, boss.radius);
    let phase = boss.phase().number();
    let body = match phase {
        1 => tint_color(Tint::Purple, 1.0),
        2 => tint_color(Tint::Pink, 1.0),
        _ => tint_color(Tint::Red, 1.0),
    };
    draw_circle(x, y, r + 10.0, faded(body, 0.2));
    draw_poly(x, y, 8, r, boss.rotation, body);
    draw_poly_lines(x, y, 8, r, boss.rotation, 3.0, WHITE);
    draw_circle(x, y, r * 0.35, rgba(255, 255, 255, 0.9));
    draw_circle(x, y, r * 0.2, BLACK);

    health_bar(x - 80.0, y - r - 24.0, 160.0, 10.0, boss.health.fraction());
    let label = if boss.is_entering() {
        "BOSS INCOMING".to_string()
    } else {
        format!("BOSS - PHASE {}", phase)
    };
    centered_text(&label, x, y - r - 30.0, 20.0, WHITE);
}

fn draw_player(player: &Player) {
    let pos = player.pos;
    let flashing = player.hit_flash.is_active();
    let blink = player.invulnerable.remaining() / 4 % 2 == 1;
    let alpha = if blink { 0.4 } else { 1.0 };
    let hull = if flashing { rgba(255, 80, 80, alpha) } else { rgba(80, 200, 255, alpha) };

    if player.shield.is_active() {
        draw_circle(pos.x, pos.y, player.radius + 10.0, tint_color(Tint::Cyan, 0.2));
        draw_circle_lines(pos.x, pos.y, player.radius + 10.0, 2.0, tint_color(Tint::Cyan, 0.9));
    }
    arrow(pos, player.aim, player.radius * 1.3, player.radius * 0.8, hull);
    draw_circle(pos.x, pos.y, player.radius * 0.35, faded(WHITE, alpha));
}

fn seconds(ticks: u32) -> f32 {
    ticks as f32 / SIM_HZ as f32
}

fn draw_hud(state: &GameState, settings: &Settings, muted: bool) {
    panel(10.0, 10.0, 240.0, 190.0);
    let mut y = 34.0;
    let mut line = |text: String, color: Color| {
        draw_text(&text, 22.0, y, 22.0, color);
        y += 22.0;
    };
    line(format!("Score: {}", state.score), WHITE);
    line(format!("High: {}", state.stats.high_score), GRAY);
    line(format!("Wave: {}", state.wave), WHITE);
    if state.combo > 1 {
        let combo = format!("Combo x{} ({:.1})", state.combo, state.combo_multiplier());
        line(combo, tint_color(Tint::Yellow, 1.0));
    } else {
        line("Combo -".to_string(), GRAY);
    }
    line(format!("Difficulty: {:.1}", state.difficulty), WHITE);
    if state.boss.is_some() {
        line("Boss fight!".to_string(), tint_color(Tint::Red, 1.0));
    } else {
        line(format!("Kills: {}/{}", state.kills, state.kills_for_boss), WHITE);
    }
    let mode = if state.auto_fire { "Fire: AUTO [F]" } else { "Fire: CLICK [F]" };
    line(mode.to_string(), GRAY);
    line(format!("Sound: {} [M]", if muted { "off" } else { "on" }), GRAY);

    // Player health and active effects along the bottom
    let h = state.field.height;
    panel(10.0, h - 60.0, 320.0, 50.0);
    draw_text("HP", 20.0, h - 28.0, 22.0, WHITE);
    health_bar(55.0, h - 42.0, 200.0, 16.0, state.player_health_fraction());
    let mut x = 265.0;
    for (cooldown, tint, tag) in [
        (state.player.rapid_fire, Tint::Orange, "R"),
        (state.player.shield, Tint::Cyan, "S"),
    ] {
        if cooldown.is_active() {
            let label = format!("{}{:.0}", tag, seconds(cooldown.remaining()).ceil());
            draw_text(&label, x, h - 28.0, 20.0, tint_color(tint, 1.0));
            x += 30.0;
        }
    }

    if settings.show_fps {
        let fps = format!("FPS: {}", get_fps());
        draw_text(&fps, state.field.width - 110.0, 28.0, 22.0, tint_color(Tint::Green, 1.0));
    }
}

fn draw_menu(state: &GameState) {
    let cx = state.field.width / 2.0;
    let h = state.field.height;
    centered_text("SPACE SHOOTER", cx, h * 0.25, 64.0, tint_color(Tint::Cyan, 1.0));
    centered_text("WASD / arrows to move, mouse to aim", cx, h * 0.38, 24.0, WHITE);
    centered_text("F toggles auto-fire, P pauses, M mutes", cx, h * 0.38 + 30.0, 24.0, WHITE);
    centered_text("Press SPACE or ENTER to start", cx, h * 0.55, 30.0, tint_color(Tint::Yellow, 1.0));
    centered_text("ESC to quit", cx, h * 0.55 + 34.0, 22.0, GRAY);

    let s = &state.stats;
    if s.games_played > 0 {
        let stats = [
            format!("High score: {}", s.high_score),
            format!("Games played: {}", s.games_played),
            format!("Total kills: {}", s.total_kills),
            format!("Bosses defeated: {}", s.bosses_defeated),
            format!("Power-ups collected: {}", s.powerups_collected),
        ];
        for (i, text) in stats.iter().enumerate() {
            centered_text(text, cx, h * 0.72 + i as f32 * 24.0, 20.0, GRAY);
        }
    }
}

fn draw_paused(state: &GameState) {
    let (w, h) = (state.field.width, state.field.height);
    shade(w, h, 0.5);
    centered_text("PAUSED", w / 2.0, h / 2.0, 64.0, WHITE);
    centered_text("P or ESC to resume", w / 2.0, h / 2.0 + 40.0, 24.0, GRAY);
}

fn draw_game_over(state: &GameState) {
    let (w, h) = (state.field.width, state.field.height);
    shade(w, h, 0.6);
    centered_text("GAME OVER", w / 2.0, h * 0.4, 64.0, tint_color(Tint::Red, 1.0));
    centered_text(&format!("Score: {}", state.score), w / 2.0, h * 0.4 + 50.0, 30.0, WHITE);
    centered_text(&format!("Wave reached: {}", state.wave), w / 2.0, h * 0.4 + 84.0, 24.0, WHITE);
    if state.new_high_score {
        centered_text("NEW HIGH SCORE!", w / 2.0, h * 0.4 + 120.0, 30.0, tint_color(Tint::Yellow, 1.0));
    }
    centered_text("SPACE to play again, ESC for menu", w / 2.0, h * 0.4 + 160.0, 24.0, GRAY);
    draw_line(w * 0.3, h * 0.4 + 10.0, w * 0.7, h * 0.4 + 10.0, 2.0, faded(WHITE, 0.4));
}
