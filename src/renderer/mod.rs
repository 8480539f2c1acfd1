//! Macroquad rendering
//!
//! Scenes read simulation state and draw it in playfield coordinates; the
//! window is created at playfield size. Nothing here mutates game state.

pub mod shapes;
pub mod shooter;
pub mod snake;
