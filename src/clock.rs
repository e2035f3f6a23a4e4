//! Time sources for the search loop.
//!
//! The searcher reads "now" and pauses through a [`Clock`] so the deadline
//! arithmetic can be driven deterministically. [`SystemClock`] is the real
//! thing; [`ManualClock`] only moves when it is told to (or when something
//! sleeps on it).

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Wall clock backed by `Instant::now` and `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// A clock that advances only through [`ManualClock::advance`] and [`Clock::sleep`].
///
/// Sleeping never blocks; it moves the clock forward by the requested amount.
///
/// ```
/// use std::time::Duration;
/// use element_searcher::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.sleep(Duration::from_millis(500));
///
/// assert_eq!(clock.now() - start, Duration::from_millis(500));
/// assert_eq!(clock.sleeps(), 1);
/// ```
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed_nanos: AtomicU64,
    sleeps: AtomicUsize,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            origin: Instant::now(),
            elapsed_nanos: AtomicU64::new(0),
            sleeps: AtomicUsize::new(0),
        }
    }

    /// Move the clock forward without counting a sleep.
    ///
    /// Resolution is one nanosecond; a single advance saturates at `u64::MAX`
    /// nanoseconds (about 584 years).
    pub fn advance(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .elapsed_nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |elapsed| {
                Some(elapsed.saturating_add(nanos))
            });
    }

    /// Time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }

    /// Number of times [`Clock::sleep`] was called.
    pub fn sleeps(&self) -> usize {
        self.sleeps.load(Ordering::SeqCst)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_starts_at_zero() {
        let clock = ManualClock::new();
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert_eq!(clock.sleeps(), 0);
    }

    #[test]
    fn test_manual_clock_advance_does_not_count_as_sleep() {
        let clock = ManualClock::new();
        let start = clock.now();
        clock.advance(Duration::from_secs(2));
        assert_eq!(clock.now() - start, Duration::from_secs(2));
        assert_eq!(clock.sleeps(), 0);
    }

    #[test]
    fn test_manual_clock_sleep_accumulates() {
        let clock = ManualClock::new();
        for _ in 0..4 {
            clock.sleep(Duration::from_millis(250));
        }
        assert_eq!(clock.elapsed(), Duration::from_secs(1));
        assert_eq!(clock.sleeps(), 4);
    }

    #[test]
    fn test_manual_clock_keeps_sub_millisecond_steps() {
        let clock = ManualClock::new();
        let start = clock.now();
        for _ in 0..4 {
            clock.sleep(Duration::from_micros(250));
        }
        clock.advance(Duration::from_nanos(1));

        assert_eq!(clock.elapsed(), Duration::from_nanos(1_000_001));
        assert_eq!(clock.now() - start, Duration::from_nanos(1_000_001));
    }

    #[test]
    fn test_clock_through_reference() {
        fn pause<C: Clock>(clock: C) {
            clock.sleep(Duration::from_millis(10));
        }

        let clock = ManualClock::new();
        pause(&clock);
        assert_eq!(clock.elapsed(), Duration::from_millis(10));
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let start = clock.now();
        clock.sleep(Duration::from_millis(5));
        assert!(clock.now() - start >= Duration::from_millis(5));
    }
}
