use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current Unix time in seconds.
///
/// Injected everywhere a token age is checked so tests can pin and advance
/// time deterministically.
pub trait Clock {
    /// Current Unix timestamp in seconds.
    fn now_unix(&self) -> i64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_unix(&self) -> i64 {
        (**self).now_unix()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before Unix epoch")
            .as_secs() as i64
    }
}

/// Test clock pinned to an explicit instant.
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<i64>,
}

impl FixedClock {
    /// Creates a clock pinned at the given Unix timestamp.
    pub fn at(now: i64) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Advances the clock by the given number of seconds.
    pub fn advance(&self, secs: i64) {
        self.now.set(self.now.get() + secs);
    }

    /// Repins the clock to an exact instant.
    pub fn set(&self, now: i64) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.now.get()
    }
}
