//! Core simulation plumbing: clock management.

pub mod time;

pub use time::{SimClock, MINUTES_PER_DAY, SECONDS_PER_MINUTE};
