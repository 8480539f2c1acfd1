//! Snake board state

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::highscores::HighScoreFile;
use crate::tuning::SnakeTuning;

/// Heading on the grid (y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub fn delta(&self) -> IVec2 {
        match self {
            Dir::Up => IVec2::new(0, -1),
            Dir::Down => IVec2::new(0, 1),
            Dir::Left => IVec2::new(-1, 0),
            Dir::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(&self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakePhase {
    Playing,
    Paused,
    GameOver,
}

/// Temporary high-value food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bonus {
    pub pos: IVec2,
    /// Steps left before it vanishes
    pub remaining: u32,
}

/// Complete snake session
#[derive(Debug, Clone)]
pub struct SnakeState {
    pub tuning: SnakeTuning,
    /// Head first
    pub body: VecDeque<IVec2>,
    /// Direction applied on the last step
    pub direction: Dir,
    /// Turn to apply on the next step
    pub pending_turn: Option<Dir>,
    pub food: IVec2,
    pub bonus: Option<Bonus>,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub phase: SnakePhase,
    /// The finished run set a new record
    pub new_high_score: bool,
    pub steps: u64,
    pub rng: Pcg32,
    store: HighScoreFile,
}

impl SnakeState {
    pub fn new(seed: u64, tuning: SnakeTuning, store: HighScoreFile) -> Self {
        let mut state = Self {
            tuning,
            body: VecDeque::new(),
            direction: Dir::Right,
            pending_turn: None,
            food: IVec2::ZERO,
            bonus: None,
            score: 0,
            high_score: 0,
            level: 1,
            phase: SnakePhase::Playing,
            new_high_score: false,
            steps: 0,
            rng: Pcg32::seed_from_u64(seed),
            store,
        };
        state.reset();
        state
    }

    /// Start over: centred snake heading right, fresh food, reloaded high score
    pub fn reset(&mut self) {
        let center = self.grid() / 2;
        let length = self.tuning.initial_length.max(1) as i32;
        self.body = (0..length).map(|i| center - IVec2::new(i, 0)).collect();
        self.direction = Dir::Right;
        self.pending_turn = None;
        self.bonus = None;
        self.score = 0;
        self.level = 1;
        self.phase = SnakePhase::Playing;
        self.new_high_score = false;
        self.high_score = self.store.load();
        if let Some(food) = self.random_free_cell() {
            self.food = food;
        }
        log::info!("Snake reset (high score {})", self.high_score);
    }

    /// Grid size in cells
    pub fn grid(&self) -> IVec2 {
        IVec2::new(self.tuning.grid_width.max(1), self.tuning.grid_height.max(1))
    }

    pub fn head(&self) -> IVec2 {
        self.body.front().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Steps per second at the current score
    pub fn speed(&self) -> f32 {
        let t = &self.tuning;
        let bumps = (self.score / t.speed_points.max(1)) as f32;
        (t.base_speed + bumps * t.speed_step).min(t.max_speed)
    }

    /// Where the head lands after one step in `dir`, wrapping at the edges
    pub fn wrapped_step(&self, from: IVec2, dir: Dir) -> IVec2 {
        (from + dir.delta()).rem_euclid(self.grid())
    }

    pub fn occupies(&self, cell: IVec2) -> bool {
        self.body.contains(&cell)
    }

    /// A random cell inside the food margin that holds nothing, if one exists
    pub fn random_free_cell(&mut self) -> Option<IVec2> {
        let grid = self.grid();
        let margin = self.tuning.food_margin.max(0);
        let (lo, hi) = (IVec2::splat(margin), grid - IVec2::splat(margin + 1));
        if lo.x > hi.x || lo.y > hi.y {
            return None;
        }

        let bonus = self.bonus.map(|b| b.pos);
        let free: Vec<IVec2> = (lo.y..=hi.y)
            .flat_map(|y| (lo.x..=hi.x).map(move |x| IVec2::new(x, y)))
            .filter(|cell| !self.occupies(*cell) && *cell != self.food && Some(*cell) != bonus)
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.random_range(0..free.len())])
    }

    /// Persist the score if it beats the stored record
    pub(crate) fn record_high_score(&mut self) {
        if self.store.save_if_beaten(self.score, self.high_score) {
            self.high_score = self.score;
            self.new_high_score = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(dir: &tempfile::TempDir) -> SnakeState {
        SnakeState::new(1, SnakeTuning::default(), HighScoreFile::new(dir.path().join("hs.txt")))
    }

    #[test]
    fn test_reset_layout() {
        let dir = tempfile::tempdir().unwrap();
        let state = fresh(&dir);
        let body: Vec<IVec2> = state.body.iter().copied().collect();
        assert_eq!(body, vec![IVec2::new(20, 15), IVec2::new(19, 15), IVec2::new(18, 15)]);
        assert_eq!(state.direction, Dir::Right);
        assert_eq!(state.level, 1);
        assert!(!state.occupies(state.food));
        assert!(state.food.x >= 2 && state.food.x <= 37);
        assert!(state.food.y >= 2 && state.food.y <= 27);
    }

    #[test]
    fn test_reset_reloads_high_score() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreFile::new(dir.path().join("hs.txt"));
        store.save(480);
        let state = SnakeState::new(1, SnakeTuning::default(), store);
        assert_eq!(state.high_score, 480);
    }

    #[test]
    fn test_speed_curve() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = fresh(&dir);
        assert_eq!(state.speed(), 10.0);
        state.score = 199;
        assert!((state.speed() - 10.3).abs() < 1e-5);
        state.score = 100_000;
        assert_eq!(state.speed(), 25.0);
    }

    #[test]
    fn test_wrapped_step() {
        let dir = tempfile::tempdir().unwrap();
        let state = fresh(&dir);
        assert_eq!(state.wrapped_step(IVec2::new(39, 4), Dir::Right), IVec2::new(0, 4));
        assert_eq!(state.wrapped_step(IVec2::new(0, 4), Dir::Left), IVec2::new(39, 4));
        assert_eq!(state.wrapped_step(IVec2::new(7, 0), Dir::Up), IVec2::new(7, 29));
        assert_eq!(state.wrapped_step(IVec2::new(7, 29), Dir::Down), IVec2::new(7, 0));
    }

    #[test]
    fn test_no_free_cell_on_full_board() {
        let dir = tempfile::tempdir().unwrap();
        let tuning = SnakeTuning {
            grid_width: 5,
            grid_height: 5,
            food_margin: 2,
            ..SnakeTuning::default()
        };
        let mut state = SnakeState::new(1, tuning, HighScoreFile::new(dir.path().join("hs.txt")));
        // Only the centre cell is inside the margin and the head sits on it
        assert_eq!(state.head(), IVec2::new(2, 2));
        assert_eq!(state.random_free_cell(), None);
    }
}
