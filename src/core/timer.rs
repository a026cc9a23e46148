//=========================================================================
// Game Timer
//=========================================================================
//
// Frame timer driven by the monotonic clock.
//
// Keeps the last two samples and derives the elapsed seconds between
// them. `reset()` collapses both samples onto "now", so the first delta
// after a reset only covers the time since the reset.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== GameTimer ===========================================================

/// Measures per-frame elapsed time.
#[derive(Debug, Clone, Copy)]
pub struct GameTimer {
    baseline: Instant,
    previous: Instant,
    current: Instant,
}

impl GameTimer {
    /// Creates a timer whose baseline is the moment of construction.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            baseline: now,
            previous: now,
            current: now,
        }
    }

    /// Establishes a new baseline at the current instant.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.baseline = now;
        self.previous = now;
        self.current = now;
    }

    /// Samples the clock.
    pub fn tick(&mut self) {
        self.previous = self.current;
        self.current = Instant::now();
    }

    /// Elapsed time between the last two samples.
    pub fn delta(&self) -> Duration {
        // Instant is monotonic, the saturation only guards equal samples.
        self.current.saturating_duration_since(self.previous)
    }

    /// Elapsed seconds between the last two samples. Never negative.
    pub fn delta_seconds(&self) -> f32 {
        self.delta().as_secs_f32()
    }

    /// Seconds between the last reset and the latest sample.
    pub fn total_seconds(&self) -> f32 {
        self.current
            .saturating_duration_since(self.baseline)
            .as_secs_f32()
    }
}

impl Default for GameTimer {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
