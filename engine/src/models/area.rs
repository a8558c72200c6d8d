//! Attention area model
//!
//! A named, capacity-bounded collection of waiting patients for one
//! physical subunit of the emergency room (adult emergency, pediatric,
//! urgent care). The area keeps patient *keys* sorted in static priority
//! order; the authoritative patient records live in the hospital registry.
//!
//! # Saturation policy
//!
//! Admission into a full area is a silent no-op reported through the
//! returned `bool` - a deliberate non-retrying backpressure policy, not an
//! error. Callers that care must check `is_saturated()` first or accept
//! the drop. The global hospital queue stays authoritative for dispatch,
//! so a dropped area admission only makes the per-area view drift.

use crate::policy::PriorityKey;
use std::collections::BTreeSet;

/// Default capacity for areas created lazily by the hospital.
pub const DEFAULT_AREA_CAPACITY: usize = 100;

/// A capacity-bounded admission area
///
/// # Example
/// ```
/// use triage_simulator_core_rs::{AttentionArea, Patient};
///
/// let mut area = AttentionArea::new("Adult_Emergency".to_string(), 3);
/// assert_eq!(area.name(), "adult_emergency");
///
/// let p = Patient::new(
///     "P0001".to_string(), "Ana".to_string(), "Torres".to_string(),
///     2, 0, "adult_emergency".to_string(),
/// );
/// assert!(area.admit(&p));
/// assert_eq!(area.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AttentionArea {
    /// Area name (lowercase-normalized)
    name: String,

    /// Maximum number of concurrently waiting patients
    capacity: usize,

    /// Waiting patients, sorted by the static comparator
    waiting: BTreeSet<PriorityKey>,
}

impl AttentionArea {
    /// Create a new empty area
    ///
    /// The name is lowercase-normalized so lookups are consistent.
    pub fn new(name: String, capacity: usize) -> Self {
        Self {
            name: name.to_lowercase(),
            capacity,
            waiting: BTreeSet::new(),
        }
    }

    /// Get the area name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of patients currently waiting in this area
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    /// Check if the area holds no waiting patients
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Check if the area is at capacity
    pub fn is_saturated(&self) -> bool {
        self.waiting.len() >= self.capacity
    }

    /// Admit a patient into the area
    ///
    /// Returns `false` without inserting when the area is saturated
    /// (silent-drop policy). Never queues or retries.
    pub fn admit(&mut self, patient: &crate::models::Patient) -> bool {
        if self.is_saturated() {
            return false;
        }
        self.waiting.insert(PriorityKey::of(patient))
    }

    /// Remove and return the id of the highest-priority waiting patient
    ///
    /// Not on the critical simulation path - the hospital-level queue is
    /// authoritative for dispatch - but available for area-local use.
    pub fn dispatch_next(&mut self) -> Option<String> {
        let key = self.waiting.first().cloned()?;
        self.waiting.remove(&key);
        Some(key.id)
    }

    /// Remove a specific patient key, returning whether it was present
    pub fn remove(&mut self, key: &PriorityKey) -> bool {
        self.waiting.remove(key)
    }

    /// Reinsert a key whose slot was just released
    ///
    /// Used when a category reassignment re-homes a patient: the old key
    /// was removed first, so capacity cannot be exceeded here.
    pub(crate) fn readmit(&mut self, key: PriorityKey) {
        self.waiting.insert(key);
    }

    /// Check whether a specific patient key is present
    pub fn contains(&self, key: &PriorityKey) -> bool {
        self.waiting.contains(key)
    }

    /// Read-only snapshot of waiting patient ids in static priority order
    pub fn snapshot_by_priority(&self) -> Vec<String> {
        self.waiting.iter().map(|key| key.id.clone()).collect()
    }
}
