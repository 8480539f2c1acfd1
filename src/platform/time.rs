//! Fixed-step frame clock
//!
//! Turns variable frame times into a whole number of simulation steps.

use crate::consts::MAX_SUBSTEPS;

/// Longest frame we are willing to simulate (seconds); anything longer is
/// treated as a hitch and truncated.
pub const MAX_FRAME_TIME: f32 = 0.1;

/// Accumulator that hands out fixed steps
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FixedStep {
    pub fn new(step_secs: f32) -> Self {
        Self {
            step: step_secs.max(f32::EPSILON),
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Clock ticking `hz` times per second
    pub fn from_hz(hz: f32) -> Self {
        Self::new(1.0 / hz.max(f32::EPSILON))
    }

    pub fn with_max_substeps(mut self, max: u32) -> Self {
        self.max_substeps = max.max(1);
        self
    }

    /// Change the step length (snake speeds up); banked time is kept
    pub fn set_step(&mut self, step_secs: f32) {
        self.step = step_secs.max(f32::EPSILON);
    }

    pub fn set_hz(&mut self, hz: f32) {
        self.set_step(1.0 / hz.max(f32::EPSILON));
    }

    /// Bank `dt` seconds and return how many steps to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_TIME);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }

        // Prevent spiral of death: drop whatever the cap left over
        if steps == self.max_substeps && self.accumulator >= self.step {
            self.accumulator %= self.step;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_frames_accumulate() {
        let mut clock = FixedStep::new(0.02);
        assert_eq!(clock.advance(0.015), 0);
        assert_eq!(clock.advance(0.015), 1);
        assert_eq!(clock.advance(0.011), 1);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut clock = FixedStep::new(0.005).with_max_substeps(4);
        assert_eq!(clock.advance(0.05), 4);
        // The dropped backlog does not come back next frame
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn test_hitches_are_truncated() {
        let mut clock = FixedStep::new(0.03);
        assert_eq!(clock.advance(3.0), 3);
    }

    #[test]
    fn test_set_hz_changes_rate() {
        let mut clock = FixedStep::from_hz(10.0);
        assert_eq!(clock.advance(0.06), 0);
        clock.set_hz(25.0);
        assert_eq!(clock.advance(0.0), 1);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut clock = FixedStep::new(0.01);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(0.011), 1);
    }
}
