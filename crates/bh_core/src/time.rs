//! Fixed-timestep frame clock.
//!
//! One gameplay "tick" is one fixed 60 Hz step. The driver measures the
//! wall-clock delta once per display frame with `begin_frame`, then drains
//! whole steps with `while should_step()`. Sprite animation clocks run off
//! `now_ms` instead of the tick counter, so their cadence is independent of
//! the simulation rate.

use std::time::Instant;

pub struct FrameClock {
    pub fixed_dt: f64,
    pub max_accumulator: f64,
    accumulator: f64,
    pub steps_this_frame: u32,
    pub frame_count: u64,
    last_instant: Instant,
    start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            fixed_dt: 1.0 / 60.0,
            max_accumulator: 0.25,
            accumulator: 0.0,
            steps_this_frame: 0,
            frame_count: 0,
            last_instant: now,
            start: now,
        }
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let mut real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // Spiral-of-death cap
        if real_dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                real_dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            real_dt = self.max_accumulator;
        }

        self.accumulator += real_dt;
        self.steps_this_frame = 0;
        self.frame_count += 1;
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }

    /// Monotonic milliseconds since the clock was created. This is the
    /// timestamp handed to sprite animation clocks each tick.
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_steps_before_first_interval_elapses() {
        let mut clock = FrameClock::new();
        // begin_frame immediately after construction accumulates ~0 time.
        clock.begin_frame();
        assert!(!clock.should_step());
        assert_eq!(clock.steps_this_frame, 0);
    }

    #[test]
    fn accumulated_time_drains_in_whole_steps() {
        let mut clock = FrameClock::new();
        clock.accumulator = clock.fixed_dt * 3.5;
        let mut steps = 0;
        while clock.should_step() {
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert_eq!(clock.steps_this_frame, 3);
        assert!(clock.accumulator < clock.fixed_dt);
    }

    #[test]
    fn now_ms_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
