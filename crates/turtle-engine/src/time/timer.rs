use std::time::{Duration, Instant};

/// Length of the window the average delta is computed over, in seconds.
const AVERAGE_WINDOW: f32 = 1.0;

/// Frame timing as seen by the application.
///
/// Delta samples accumulate into a one-second window. When the window has
/// elapsed, the average delta and FPS are recomputed and the window restarts,
/// so both values change at most once per second.
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
    delta: f32,
    average_delta: f32,
    fps: u32,
    window_elapsed: f32,
    window_frames: u32,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            delta: 0.0,
            average_delta: 0.0,
            fps: 0,
            window_elapsed: 0.0,
            window_frames: 0,
        }
    }

    pub(crate) fn tick(&mut self, dt: f32) {
        self.delta = dt;
        self.window_elapsed += dt;
        self.window_frames += 1;

        if self.window_elapsed >= AVERAGE_WINDOW {
            self.average_delta = self.window_elapsed / self.window_frames as f32;
            self.fps = (self.window_frames as f32 / self.window_elapsed).round() as u32;
            self.window_elapsed = 0.0;
            self.window_frames = 0;
        }
    }

    /// Seconds between the last two frames.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Mean delta over the last completed one-second window.
    pub fn average_delta(&self) -> f32 {
        self.average_delta
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Seconds since the session started.
    pub fn time(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Blocks the calling thread.
    pub fn sleep(&self, seconds: f32) {
        if seconds > 0.0 && seconds.is_finite() {
            std::thread::sleep(Duration::from_secs_f32(seconds));
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_updates_once_window_elapses() {
        let mut t = Timer::new();
        for _ in 0..63 {
            t.tick(1.0 / 64.0);
        }
        assert_eq!(t.average_delta(), 0.0);
        assert_eq!(t.fps(), 0);

        t.tick(1.0 / 64.0);
        assert_eq!(t.average_delta(), 1.0 / 64.0);
        assert_eq!(t.fps(), 64);
    }

    #[test]
    fn window_resets_after_update() {
        let mut t = Timer::new();
        t.tick(1.0);
        assert_eq!(t.average_delta(), 1.0);

        // A fresh window only reflects the new samples.
        t.tick(0.5);
        t.tick(0.5);
        assert_eq!(t.average_delta(), 0.5);
        assert_eq!(t.fps(), 2);
        assert_eq!(t.delta(), 0.5);
    }

    #[test]
    fn sleep_ignores_non_positive() {
        Timer::new().sleep(-1.0);
        Timer::new().sleep(f32::NAN);
    }
}
