//! Keyboard and mouse polling
//!
//! Reads macroquad's input state once per frame and folds it into the
//! simulation input types. Presses are OR-ed into a pending input so a frame
//! that runs no simulation step does not lose them.

use glam::Vec2;
use macroquad::input::{
    KeyCode, MouseButton, is_key_down, is_key_pressed, is_mouse_button_pressed, mouse_position,
};
use macroquad::window::{screen_height, screen_width};

use crate::sim::{Playfield, TickInput};
use crate::snake::{Dir, SnakeInput};

fn any_down(keys: &[KeyCode]) -> bool {
    keys.iter().any(|k| is_key_down(*k))
}

fn any_pressed(keys: &[KeyCode]) -> bool {
    keys.iter().any(|k| is_key_pressed(*k))
}

/// WASD / arrow keys as axes in -1..=1 (y down)
pub fn movement_axes() -> Vec2 {
    let mut axes = Vec2::ZERO;
    if any_down(&[KeyCode::A, KeyCode::Left]) {
        axes.x -= 1.0;
    }
    if any_down(&[KeyCode::D, KeyCode::Right]) {
        axes.x += 1.0;
    }
    if any_down(&[KeyCode::W, KeyCode::Up]) {
        axes.y -= 1.0;
    }
    if any_down(&[KeyCode::S, KeyCode::Down]) {
        axes.y += 1.0;
    }
    axes
}

/// Mouse position mapped from window pixels into playfield coordinates
pub fn pointer_in(field: &Playfield) -> Vec2 {
    let (x, y) = mouse_position();
    let (w, h) = (screen_width().max(1.0), screen_height().max(1.0));
    Vec2::new(x * field.width / w, y * field.height / h)
}

/// Fold this frame's shooter input into `pending`
pub fn poll_shooter(pending: &mut TickInput, field: &Playfield) {
    pending.movement = movement_axes();
    pending.pointer = pointer_in(field);
    pending.fire |= is_mouse_button_pressed(MouseButton::Left);
    pending.confirm |= any_pressed(&[KeyCode::Space, KeyCode::Enter]);
    pending.back |= is_key_pressed(KeyCode::Escape);
    pending.pause |= is_key_pressed(KeyCode::P);
    pending.toggle_auto_fire |= is_key_pressed(KeyCode::F);
}

/// Sound toggle, shared by both games
pub fn mute_pressed() -> bool {
    is_key_pressed(KeyCode::M)
}

/// This frame's snake input; the last arrow pressed wins
pub fn poll_snake() -> SnakeInput {
    let turns = [
        (KeyCode::Up, Dir::Up),
        (KeyCode::Down, Dir::Down),
        (KeyCode::Left, Dir::Left),
        (KeyCode::Right, Dir::Right),
    ];
    let turn = turns
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|(_, dir)| *dir)
        .last();

    SnakeInput {
        turn,
        pause: is_key_pressed(KeyCode::P),
        restart: any_pressed(&[KeyCode::R, KeyCode::Enter, KeyCode::Space]),
        quit: is_key_pressed(KeyCode::Escape),
    }
}
