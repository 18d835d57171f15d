/// Caps how often the field actually redraws, independent of how often
/// the host calls back.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval_ms: f64,
    last_ms: f64,
}

impl FrameThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: 0.0,
        }
    }

    /// Should a frame be drawn at `now_ms`?
    ///
    /// On success the last-frame mark becomes `now_ms` minus the overshoot
    /// past a whole number of intervals.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        let elapsed = now_ms - self.last_ms;

        if self.interval_ms <= 0.0 {
            self.last_ms = now_ms;
            return true;
        }

        if elapsed < self.interval_ms {
            return false;
        }

        self.last_ms = now_ms - elapsed % self.interval_ms;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIXTY_FPS: f64 = 1000.0 / 60.0;

    #[test]
    fn test_too_early_is_skipped() {
        let mut throttle = FrameThrottle::new(SIXTY_FPS);
        assert!(!throttle.ready(10.0));
        assert!(throttle.ready(20.0));
        assert!(!throttle.ready(25.0));
    }

    #[test]
    fn test_mark_snaps_to_interval_grid() {
        let mut throttle = FrameThrottle::new(10.0);
        assert!(throttle.ready(25.0));
        // last mark is 25 - 5 = 20, so 30 is due exactly
        assert!(!throttle.ready(29.9));
        assert!(throttle.ready(30.0));
    }

    #[test]
    fn test_zero_interval_always_draws() {
        let mut throttle = FrameThrottle::new(0.0);
        assert!(throttle.ready(0.0));
        assert!(throttle.ready(0.0));
        assert!(throttle.ready(1.0));
    }
}
