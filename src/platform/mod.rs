//! Platform abstraction layer
//!
//! Handles the window-side concerns the simulations never see:
//! - Time/ticks (`time::FixedStep`)
//! - Input events (`input`, polled from macroquad once per frame)

pub mod input;
pub mod time;

pub use time::FixedStep;
