use std::time::{Duration, Instant};

/// Measures the time between consecutive ticks.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// hand the application a multi-second step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::ZERO, Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self { last: Instant::now(), dt_min, dt_max }
    }

    /// Restarts measurement from now, e.g. after the window was created.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Seconds since the previous tick, clamped.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).clamp(self.dt_min, self.dt_max);
        self.last = now;
        dt.as_secs_f32()
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
    fn tick_respects_max_clamp() {
        let mut clock = FrameClock::with_clamps(Duration::ZERO, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        assert!(clock.tick() <= 0.001 + f32::EPSILON);
    }
}
