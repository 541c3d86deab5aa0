use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Derives per-frame delta seconds from wall-clock instants.
///
/// The animation engines in this workspace are driven by elapsed
/// seconds, not instants; the clock converts between the two. Clock
/// jumps backwards produce a delta of zero rather than negative time.
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    /// Create a clock anchored at `now`.
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Seconds elapsed since the previous call (or construction),
    /// clamped to be non-negative. Advances the anchor to `now`.
    pub fn delta(&mut self, now: Instant) -> f64 {
        let dt = now
            .checked_duration_since(self.last)
            .unwrap_or(Duration::ZERO)
            .as_secs_f64();
        self.last = now;
        dt
    }
}

/// Measures ticks-per-second over a sliding time window.
///
/// Call [`mark`](RateMeter::mark) once per tick, then
/// [`rate`](RateMeter::rate) to read the current ticks-per-second.
/// Marks older than the window are discarded as new ones arrive.
pub struct RateMeter {
    marks: VecDeque<Instant>,
    window: Duration,
}

impl Default for RateMeter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl RateMeter {
    /// Create a meter with the given measurement window.
    pub fn new(window: Duration) -> Self {
        Self {
            marks: VecDeque::new(),
            window,
        }
    }

    /// Record a tick at `now` and discard marks that fell out of the
    /// window.
    pub fn mark(&mut self, now: Instant) {
        self.marks.push_back(now);
        let cutoff = now - self.window;
        while self.marks.front().is_some_and(|&t| t < cutoff) {
            self.marks.pop_front();
        }
    }

    /// Current ticks-per-second over the window.
    ///
    /// Returns `0.0` until at least two marks have been recorded.
    pub fn rate(&self) -> f64 {
        if self.marks.len() < 2 {
            return 0.0;
        }
        self.marks.len() as f64 / self.window.as_secs_f64()
    }
}
