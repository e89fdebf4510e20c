//! Frame timing

/// Tracks the host-supplied elapsed time between frames.
///
/// Motion is frame-count based; the delta is only recorded for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    then: f32,
    delta: f32,
    frame: u64,
}

/// What a single `tick` observed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Index of the frame just started, beginning at 1
    pub frame: u64,
    /// Seconds since the previous tick
    pub delta: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now` seconds since the host started.
    pub fn tick(&mut self, now: f32) -> FrameTick {
        // A host clock that jumps backwards yields a zero delta rather than a negative one
        self.delta = (now - self.then).max(0.0);
        self.then = now;
        self.frame += 1;

        FrameTick {
            frame: self.frame,
            delta: self.delta,
        }
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn elapsed(&self) -> f32 {
        self.then
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_measures_from_zero() {
        let mut clock = FrameClock::new();
        let tick = clock.tick(0.5);
        assert_eq!(tick, FrameTick { frame: 1, delta: 0.5 });
    }

    #[test]
    fn test_delta_between_ticks() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        let tick = clock.tick(1.25);
        assert_eq!(tick.frame, 2);
        assert_eq!(tick.delta, 0.25);
        assert_eq!(clock.elapsed(), 1.25);
    }

    #[test]
    fn test_backwards_time_clamps_delta() {
        let mut clock = FrameClock::new();
        clock.tick(2.0);
        assert_eq!(clock.tick(1.0).delta, 0.0);
        assert_eq!(clock.frame(), 2);
    }
}
