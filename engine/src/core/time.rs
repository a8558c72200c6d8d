//! Time management for the simulation
//!
//! The simulation operates in discrete one-minute ticks over a fixed
//! one-day horizon. Patient timestamps are expressed in seconds on the
//! same simulated clock; no wall-clock time is ever read.

use serde::{Deserialize, Serialize};

/// Length of the simulated day, in minutes.
pub const MINUTES_PER_DAY: usize = 24 * 60;

/// Seconds per simulated minute.
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Manages simulation time in discrete one-minute ticks
///
/// # Example
/// ```
/// use triage_simulator_core_rs::SimClock;
///
/// let mut clock = SimClock::new();
/// assert_eq!(clock.current_minute(), 0);
/// assert_eq!(clock.current_seconds(), 0);
///
/// clock.advance_minute();
/// assert_eq!(clock.current_minute(), 1);
/// assert_eq!(clock.current_seconds(), 60);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    /// Minutes elapsed since simulation start
    current_minute: usize,
}

impl SimClock {
    /// Create a new clock at minute zero
    pub fn new() -> Self {
        Self { current_minute: 0 }
    }

    /// Advance time by one minute
    pub fn advance_minute(&mut self) {
        self.current_minute += 1;
    }

    /// Get the current minute (minutes since start)
    pub fn current_minute(&self) -> usize {
        self.current_minute
    }

    /// Get the current clock value in seconds
    ///
    /// Patient arrival and attention timestamps are compared against this
    /// value, so all wait-time arithmetic happens in seconds.
    pub fn current_seconds(&self) -> i64 {
        self.current_minute as i64 * SECONDS_PER_MINUTE
    }

    /// Check whether the one-day horizon has been reached
    pub fn is_exhausted(&self) -> bool {
        self.current_minute >= MINUTES_PER_DAY
    }
}
