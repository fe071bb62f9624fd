//! Time values and clock implementations

use crate::traits::Clock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Milliseconds in one day
pub const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Length of `n` days in milliseconds (saturating)
pub fn days(n: u64) -> u64 {
    n.saturating_mul(MILLIS_PER_DAY)
}

/// Clock backed by the system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Clock that always reports the same instant
///
/// # Examples
///
/// ```
/// use roster_domain::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1_000);
/// assert_eq!(clock.now(), 1_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(Timestamp);

impl FixedClock {
    /// Create a clock frozen at `at`
    pub fn new(at: Timestamp) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
