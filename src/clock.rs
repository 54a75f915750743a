//! Fixed timestep clock
//!
//! Turns irregular frame callback timestamps into a whole number of
//! constant-size simulation steps. Leftover time carries over in the
//! accumulator, so simulated time tracks wall time within one step.

use crate::consts::{FPS_STEP_MS, MIN_STEP_MS, STUTTER_THRESHOLD_MS};

/// What a frame callback should do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameAdvance {
    /// Gap too large (tab suspended, first frame); no update, no render
    Skipped { dt: f64 },
    /// Run this many fixed updates (possibly zero), then render once
    Stepped(u32),
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    previous_tick_time: f64,
    delta_accumulator: f64,
    step_ms: f64,
    stutter_threshold_ms: f64,
    max_steps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FPS_STEP_MS, STUTTER_THRESHOLD_MS)
    }
}

impl FrameClock {
    pub fn new(step_ms: f64, stutter_threshold_ms: f64) -> Self {
        let step_ms = step_ms.max(MIN_STEP_MS);
        // Any gap below the threshold fits in this many steps
        let max_steps = (stutter_threshold_ms / step_ms)
            .ceil()
            .clamp(1.0, f64::from(u32::MAX)) as u32;
        Self {
            previous_tick_time: 0.0,
            delta_accumulator: 0.0,
            step_ms,
            stutter_threshold_ms,
            max_steps,
        }
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    pub fn previous_tick_time(&self) -> f64 {
        self.previous_tick_time
    }

    pub fn delta_accumulator(&self) -> f64 {
        self.delta_accumulator
    }

    /// Most updates a single callback may run
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Consume one callback timestamp (milliseconds)
    pub fn advance(&mut self, tick_time: f64) -> FrameAdvance {
        if !tick_time.is_finite() {
            return FrameAdvance::Skipped { dt: 0.0 };
        }
        let dt = (tick_time - self.previous_tick_time).max(0.0);
        self.previous_tick_time = tick_time;

        if dt >= self.stutter_threshold_ms {
            return FrameAdvance::Skipped { dt };
        }

        self.delta_accumulator += dt;
        let mut steps = 0;
        while self.delta_accumulator >= self.step_ms && steps < self.max_steps {
            self.delta_accumulator -= self.step_ms;
            steps += 1;
        }
        FrameAdvance::Stepped(steps)
    }
}
