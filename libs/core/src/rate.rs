use std::time::{Duration, Instant};

/// Length of the rate-limiting window.
const WINDOW: Duration = Duration::from_millis(1000);

/// Frames allowed per window by default.
const DEFAULT_CAP: u32 = 6;

/// A fixed-window frame budget for the radio link.
///
/// The display's receiver drops or garbles frames when they arrive faster than
/// it can repaint, so senders budget themselves to a handful of frames per
/// second. Each call to [`attempt`] either spends one slot in the current
/// window or reports that the budget is exhausted; the window resets once more
/// than a second has passed since it opened.
///
/// # Examples
///
/// ```
/// use navhud_core::RateLimiter;
///
/// let mut limiter = RateLimiter::default();
/// for _ in 0..6 {
///     assert!(limiter.attempt());
/// }
/// assert!(!limiter.attempt());
/// ```
///
/// [`attempt`]: #method.attempt
#[derive(Debug, Copy, Clone)]
pub struct RateLimiter {
    cap: u32,
    count: u32,
    window_start: Instant,
}

impl RateLimiter {
    /// Creates a limiter allowing `cap` frames per one-second window.
    pub fn new(cap: u32) -> Self {
        RateLimiter {
            cap,
            count: 0,
            window_start: Instant::now(),
        }
    }

    /// Tries to spend one slot in the current window.
    ///
    /// Returns `true` if the frame may be sent, or `false` if the window's
    /// budget is already spent.
    pub fn attempt(&mut self) -> bool {
        self.attempt_at(Instant::now())
    }

    fn attempt_at(&mut self, now: Instant) -> bool {
        if now.duration_since(self.window_start) > WINDOW {
            self.window_start = now;
            self.count = 0;
        }

        if self.count < self.cap {
            self.count += 1;
            true
        } else {
            false
        }
    }
}

impl Default for RateLimiter {
    /// Creates a limiter with the standard budget of 6 frames per second.
    fn default() -> Self {
        RateLimiter::new(DEFAULT_CAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_is_spent_within_a_window() {
        let mut limiter = RateLimiter::default();
        let now = Instant::now();
        for _ in 0..6 {
            assert!(limiter.attempt_at(now));
        }
        assert!(!limiter.attempt_at(now));
        assert!(!limiter.attempt_at(now));
    }

    #[test]
    fn window_resets_after_a_second() {
        let mut limiter = RateLimiter::new(2);
        let start = Instant::now();
        assert!(limiter.attempt_at(start));
        assert!(limiter.attempt_at(start));
        assert!(!limiter.attempt_at(start));

        // Exactly one second later is still inside the window.
        let edge = start + Duration::from_millis(1000);
        assert!(!limiter.attempt_at(edge));

        let later = start + Duration::from_millis(1001);
        assert!(limiter.attempt_at(later));
        assert!(limiter.attempt_at(later));
        assert!(!limiter.attempt_at(later));
    }

    #[test]
    fn custom_cap_is_honored() {
        let mut limiter = RateLimiter::new(1);
        let now = Instant::now();
        assert!(limiter.attempt_at(now));
        assert!(!limiter.attempt_at(now));
    }
}
