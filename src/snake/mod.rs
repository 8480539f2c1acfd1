//! Grid snake
//!
//! The board wraps at every edge. The snake steps at a score-dependent rate
//! driven by the frame clock; input is buffered between steps.

pub mod state;
pub mod tick;

pub use state::{Bonus, Dir, SnakePhase, SnakeState};
pub use tick::{SnakeInput, StepOutcome, handle_input, queue_turn, step};
