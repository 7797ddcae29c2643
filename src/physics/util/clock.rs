use std::{fmt::Debug, time::Duration};

use bevy::{
    core::FrameCount,
    time::{Real, Time},
};

/// The animation clock.
/// Wall clock time since the app started, never paused, never capped on slow frames.
#[derive(Default, Clone, Copy)]
pub struct Clock {
    time: Time<Real>,
    frame: FrameCount,
}

impl Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock")
            .field("elapsed", &self.time.elapsed())
            .field("frame", &self.frame.0)
            .finish()
    }
}

impl Clock {
    pub fn new(time: Time<Real>, frame: FrameCount) -> Self {
        Self { time, frame }
    }
    pub fn get_current_time(&self) -> Duration {
        self.time.elapsed()
    }
    /// Seconds since the clock started, the `t` every orbit is evaluated at.
    /// Kept in f64 so fast moons don't jitter after hours of runtime.
    pub fn get_elapsed_seconds(&self) -> f64 {
        self.time.elapsed_seconds_f64()
    }
    pub fn get_current_frame(&self) -> u32 {
        self.frame.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic() {
        let mut time = Time::<Real>::default();
        let mut last = Clock::new(time, FrameCount(0)).get_current_time();
        for frame in 1..=10 {
            time.advance_by(Duration::from_millis(16));
            let clock = Clock::new(time, FrameCount(frame));
            assert!(clock.get_current_time() > last);
            last = clock.get_current_time();
        }
        let clock = Clock::new(time, FrameCount(10));
        assert_eq!(clock.get_current_frame(), 10);
        assert_eq!(clock.get_current_time(), Duration::from_millis(160));
        assert!((clock.get_elapsed_seconds() - 0.16).abs() < 1e-12);
    }

    #[test]
    fn test_long_runs_keep_precision() {
        let mut time = Time::<Real>::default();
        // Ten hours plus one millisecond
        time.advance_by(Duration::from_secs(36_000) + Duration::from_millis(1));
        let clock = Clock::new(time, FrameCount(0));
        assert!((clock.get_elapsed_seconds() - 36_000.001).abs() < 1e-9);
    }
}
