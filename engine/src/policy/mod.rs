//! Triage ordering policies
//!
//! Defines how waiting patients are ranked for dispatch. Two interchangeable
//! strategies exist, selected once per hospital instance:
//!
//! 1. **Static**: category ascending, then arrival time ascending. A total
//!    order that never changes as the clock advances.
//! 2. **WaitAdjusted**: a real-valued score `category - waited/1800` - a
//!    patient gains one full point of urgency per 30 minutes waited. Lower
//!    score wins; ties break on arrival time. The score depends on the clock
//!    value supplied at comparison time, so it is recomputed on every
//!    decision and never cached.
//!
//! The static order is also the natural order of [`PriorityKey`], which is
//! what the hospital queue and the per-area sets are keyed by. Because the
//! category is part of the key, a category reassignment must remove and
//! reinsert the key (O(log n)) rather than mutate in place.

use serde::{Deserialize, Serialize};

/// Seconds of waiting that cancel out one category level.
pub const WAIT_ADJUST_INTERVAL_SECONDS: f64 = 1800.0;

/// Maximum tolerable wait, in seconds, for a given category.
///
/// Unknown categories fall back to the most lenient threshold.
pub fn max_wait_seconds(category: u8) -> i64 {
    match category {
        1 => 600,
        2 => 1200,
        3 => 1800,
        4 => 3600,
        5 => 7200,
        _ => 7200,
    }
}

/// Ordering key for a waiting patient
///
/// Field order matters: deriving `Ord` yields exactly the static
/// comparator (category asc, arrival asc), with the id as a final
/// tie-break so the order is total even for simultaneous arrivals.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PriorityKey {
    /// Acuity category: 1 (most urgent) to 5 (least urgent)
    pub category: u8,

    /// Arrival timestamp (simulation-clock seconds)
    pub arrival_time: i64,

    /// Patient id
    pub id: String,
}

impl PriorityKey {
    /// Build the key for a patient
    pub fn of(patient: &crate::models::Patient) -> Self {
        Self {
            category: patient.category(),
            arrival_time: patient.arrival_time(),
            id: patient.id().to_string(),
        }
    }

    /// Wait-adjusted priority score against the supplied clock value
    ///
    /// Lower is more urgent. Only meaningful relative to `now`; never
    /// cache the result across clock advances.
    pub fn score(&self, now: i64) -> f64 {
        let waited = (now - self.arrival_time) as f64;
        self.category as f64 - waited / WAIT_ADJUST_INTERVAL_SECONDS
    }
}

/// Dispatch ordering strategy, selected once per hospital
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriagePolicy {
    /// Category ascending, arrival ascending. Clock-independent.
    #[default]
    Static,

    /// Score ascending (`category - waited/1800`), arrival tie-break.
    /// Recomputed against the current clock on every decision.
    WaitAdjusted,
}

impl TriagePolicy {
    /// Select the most urgent key from an ordered iterator of keys
    ///
    /// `keys` must iterate in static priority order (the natural order of
    /// `PriorityKey`), which is what `BTreeSet` iteration provides. For
    /// the static policy the first key wins outright. For the
    /// wait-adjusted policy every key is rescored against `now`; ties on
    /// score fall back to arrival time, which the incoming static order
    /// already respects.
    pub fn select_next<'a, I>(&self, keys: I, now: i64) -> Option<&'a PriorityKey>
    where
        I: IntoIterator<Item = &'a PriorityKey>,
    {
        let mut iter = keys.into_iter();
        match self {
            TriagePolicy::Static => iter.next(),
            TriagePolicy::WaitAdjusted => {
                let mut best: Option<(&PriorityKey, f64)> = None;
                for key in iter {
                    let score = key.score(now);
                    let better = match best {
                        None => true,
                        Some((best_key, best_score)) => {
                            score < best_score
                                || (score == best_score
                                    && key.arrival_time < best_key.arrival_time)
                        }
                    };
                    if better {
                        best = Some((key, score));
                    }
                }
                best.map(|(key, _)| key)
            }
        }
    }
}
