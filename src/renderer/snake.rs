//! Snake scene

use macroquad::shapes::{draw_line, draw_rectangle, draw_rectangle_lines};
use macroquad::text::draw_text;
use macroquad::window::clear_background;

use super::shapes::{GRAY, WHITE, centered_text, faded, rgba, segment_shade, shade};
use crate::consts::SNAKE_CELL;
use crate::settings::Settings;
use crate::snake::{SnakePhase, SnakeState};

const TOP_BAR: f32 = 30.0;

/// Draw one frame of snake. `time` (seconds) drives the bonus pulse.
pub fn draw(state: &SnakeState, settings: &Settings, time: f32) {
    let grid = state.grid();
    let (w, h) = (grid.x as f32 * SNAKE_CELL, grid.y as f32 * SNAKE_CELL);

    draw_background(w, h, settings);
    draw_grid(w, h);

    // Food
    let food = state.food;
    draw_rectangle(
        food.x as f32 * SNAKE_CELL + 2.0,
        food.y as f32 * SNAKE_CELL + 2.0,
        SNAKE_CELL - 4.0,
        SNAKE_CELL - 4.0,
        rgba(230, 40, 40, 1.0),
    );

    if let Some(bonus) = state.bonus {
        let pulse = 3.0 * (time * 8.0).sin();
        let (x, y) = (bonus.pos.x as f32 * SNAKE_CELL, bonus.pos.y as f32 * SNAKE_CELL);
        draw_rectangle(
            x - pulse,
            y - pulse,
            SNAKE_CELL + pulse * 2.0,
            SNAKE_CELL + pulse * 2.0,
            rgba(255, 215, 0, 1.0),
        );
        centered_text("50", x + SNAKE_CELL / 2.0, y + SNAKE_CELL * 0.75, 14.0, rgba(0, 0, 0, 1.0));
    }

    // Body, head brightest
    let len = state.len();
    for (i, cell) in state.body.iter().enumerate() {
        let brightness = segment_shade(i, len);
        let color = if i == 0 {
            rgba(120, 255, 120, 1.0)
        } else {
            rgba(0, (200.0 * brightness) as u8 + 40, 0, 1.0)
        };
        let (x, y) = (cell.x as f32 * SNAKE_CELL, cell.y as f32 * SNAKE_CELL);
        let size = SNAKE_CELL - 2.0;
        draw_rectangle(x + 1.0, y + 1.0, size, size, color);
        draw_rectangle_lines(x + 1.0, y + 1.0, size, size, 1.0, rgba(0, 60, 0, 1.0));
    }

    draw_top_bar(state, w);

    match state.phase {
        SnakePhase::Playing => {}
        SnakePhase::Paused => {
            shade(w, h, 0.4);
            centered_text("PAUSED", w / 2.0, h / 2.0, 64.0, WHITE);
        }
        SnakePhase::GameOver => draw_game_over(state, w, h),
    }
}

fn draw_background(w: f32, h: f32, settings: &Settings) {
    if !settings.quality.gradient_enabled() {
        clear_background(rgba(10, 10, 10, 1.0));
        return;
    }
    // Horizontal bands, darkest at the bottom
    let bands = 30;
    let band = h / bands as f32;
    for i in 0..bands {
        let t = i as f32 / bands as f32;
        let v = (30.0 * (1.0 - t)) as u8;
        draw_rectangle(0.0, i as f32 * band, w, band + 1.0, rgba(v / 2, v / 2, v + 10, 1.0));
    }
}

fn draw_grid(w: f32, h: f32) {
    let color = faded(GRAY, 0.15);
    let mut x = 0.0;
    while x <= w {
        draw_line(x, 0.0, x, h, 1.0, color);
        x += SNAKE_CELL;
    }
    let mut y = 0.0;
    while y <= h {
        draw_line(0.0, y, w, y, 1.0, color);
        y += SNAKE_CELL;
    }
}

fn draw_top_bar(state: &SnakeState, w: f32) {
    draw_rectangle(0.0, 0.0, w, TOP_BAR, rgba(0, 0, 0, 0.6));
    let text = format!(
        "Score: {}   HI: {}   Level: {}   Speed: {:.1}",
        state.score,
        state.high_score,
        state.level,
        state.speed()
    );
    draw_text(&text, 10.0, 21.0, 22.0, WHITE);
}

fn draw_game_over(state: &SnakeState, w: f32, h: f32) {
    shade(w, h, 0.6);
    centered_text("GAME OVER", w / 2.0, h * 0.4, 64.0, rgba(230, 40, 40, 1.0));
    centered_text(&format!("Score: {}", state.score), w / 2.0, h * 0.4 + 50.0, 30.0, WHITE);
    if state.new_high_score {
        centered_text("NEW HIGH SCORE!", w / 2.0, h * 0.4 + 90.0, 30.0, rgba(255, 215, 0, 1.0));
    }
    centered_text("R / ENTER / SPACE to restart, ESC to quit", w / 2.0, h * 0.4 + 130.0, 22.0, GRAY);
}
