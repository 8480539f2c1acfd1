//! Snake input handling and the grid step

use super::state::{Bonus, Dir, SnakePhase, SnakeState};

/// One frame of snake input (one-shot flags)
#[derive(Debug, Clone, Default)]
pub struct SnakeInput {
    pub turn: Option<Dir>,
    pub pause: bool,
    /// R / Enter / Space
    pub restart: bool,
    pub quit: bool,
}

/// What a step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not playing; nothing moved
    Idle,
    Moved,
    Ate,
    AteBonus,
    Died { new_high_score: bool },
}

/// Apply one frame of input. Returns false when the player asked to quit.
pub fn handle_input(state: &mut SnakeState, input: &SnakeInput) -> bool {
    if input.quit {
        return false;
    }

    match state.phase {
        SnakePhase::GameOver => {
            if input.restart {
                state.reset();
            }
        }
        SnakePhase::Playing | SnakePhase::Paused => {
            if let Some(turn) = input.turn {
                queue_turn(state, turn);
            }
            if input.pause {
                state.phase = match state.phase {
                    SnakePhase::Playing => SnakePhase::Paused,
                    _ => SnakePhase::Playing,
                };
                log::info!("Snake {:?}", state.phase);
            }
        }
    }
    true
}

/// Buffer a turn for the next step; the latest valid press wins.
/// Reversing onto the neck is ignored, and pressing the current heading
/// cancels any buffered turn.
pub fn queue_turn(state: &mut SnakeState, turn: Dir) {
    if turn == state.direction.opposite() {
        return;
    }
    state.pending_turn = if turn == state.direction { None } else { Some(turn) };
}

/// Advance the snake one cell
pub fn step(state: &mut SnakeState) -> StepOutcome {
    if state.phase != SnakePhase::Playing {
        return StepOutcome::Idle;
    }
    state.steps += 1;

    if let Some(turn) = state.pending_turn.take() {
        state.direction = turn;
    }

    if let Some(bonus) = state.bonus.as_mut() {
        bonus.remaining = bonus.remaining.saturating_sub(1);
        if bonus.remaining == 0 {
            state.bonus = None;
        }
    }

    let head = state.wrapped_step(state.head(), state.direction);
    if state.occupies(head) {
        state.phase = SnakePhase::GameOver;
        state.record_high_score();
        log::info!("Snake crashed with {} points, length {}", state.score, state.len());
        return StepOutcome::Died {
            new_high_score: state.new_high_score,
        };
    }
    state.body.push_front(head);

    if state.bonus.is_some_and(|b| b.pos == head) {
        state.score += state.tuning.bonus_points;
        state.bonus = None;
        return StepOutcome::AteBonus;
    }

    if head == state.food {
        state.score += state.tuning.food_points;
        match state.random_free_cell() {
            Some(food) => state.food = food,
            None => log::warn!("No room left for food"),
        }
        if state.score % state.tuning.bonus_every.max(1) == 0 {
            state.level += 1;
            if let Some(pos) = state.random_free_cell() {
                state.bonus = Some(Bonus {
                    pos,
                    remaining: state.tuning.bonus_lifetime,
                });
            }
            log::debug!("Level {}", state.level);
        }
        return StepOutcome::Ate;
    }

    state.body.pop_back();
    StepOutcome::Moved
}
