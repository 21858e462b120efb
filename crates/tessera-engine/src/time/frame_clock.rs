use std::time::Instant;

/// Wall-clock span covered by one frame.
///
/// Consecutive frames tile the timeline: each `tstart` is the previous
/// frame's `tend`, so no time is dropped after a stall.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the clock started, at the previous tick.
    pub tstart: f32,

    /// Seconds since the clock started, at this tick.
    pub tend: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// `(tstart, tend)` in seconds since the clock started.
    #[inline]
    pub fn interval(&self) -> (f32, f32) {
        (self.tstart, self.tend)
    }

    /// Length of the interval in seconds. Not clamped.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.tend - self.tstart
    }
}

/// Produces one [`FrameTime`] per presented frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    /// `tend` of the last tick.
    last: f32,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { start: Instant::now(), last: 0.0, frame_index: 0 }
    }

    /// Advances the clock to now.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let tend = now.saturating_duration_since(self.start).as_secs_f32().max(self.last);

        let ft = FrameTime {
            tstart: self.last,
            tend,
            now,
            frame_index: self.frame_index,
        };

        self.last = tend;
        self.frame_index = self.frame_index.wrapping_add(1);

        ft
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
    use std::time::Duration;

    #[test]
    fn frames_are_counted_and_time_advances() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
        assert_eq!(a.tstart, 0.0);
        assert!(b.tend >= a.tend);
        assert!(b.dt() >= 0.0);
    }

    #[test]
    fn intervals_tile_the_timeline_across_a_stall() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        std::thread::sleep(Duration::from_millis(400));
        let b = clock.tick();
        let c = clock.tick();

        assert_eq!(b.tstart, a.tend);
        assert_eq!(c.tstart, b.tend);
        // the whole stall lands in one interval
        assert!(b.dt() >= 0.39);
    }

    #[test]
    fn summed_steps_equal_elapsed_time() {
        let mut clock = FrameClock::new();
        let mut sum = 0.0;
        let mut last = clock.tick();
        sum += last.dt();
        for i in 0..5 {
            std::thread::sleep(Duration::from_millis(if i == 2 { 300 } else { 2 }));
            last = clock.tick();
            sum += last.dt();
        }
        assert!((sum - last.tend).abs() < 1e-5, "sum {sum} vs tend {}", last.tend);
    }
}
