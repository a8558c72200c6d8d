//! Hospital state
//!
//! Owns the authoritative patient registry, the single global priority
//! queue across all areas, the per-area views, and the served-patient log.
//!
//! # Critical Invariants
//!
//! 1. **Queue Validity**: every key in the global queue names a patient in
//!    the registry.
//! 2. **Single Dispatch**: a patient record is served at most once
//!    (Waiting -> Served is one-way). Re-admitting an id replaces the
//!    record and starts a fresh lifecycle.
//! 3. **Queue Authority**: the global queue is authoritative for dispatch;
//!    the per-area sets are informational views that may drift once an
//!    area saturates and silently drops an admission.
//!
//! The registry deliberately performs no duplicate-id detection: admitting
//! an id twice overwrites the prior record. The engine favors
//! permissiveness so the simulation always advances; callers needing
//! strict validation must add it themselves.

use crate::models::area::{AttentionArea, DEFAULT_AREA_CAPACITY};
use crate::models::patient::Patient;
use crate::policy::{PriorityKey, TriagePolicy};
use std::collections::{BTreeSet, HashMap};

/// Areas every hospital starts with, each at the default capacity.
const DEFAULT_AREAS: [&str; 3] = ["adult_emergency", "pediatric", "urgent_care"];

/// Complete hospital state
///
/// # Example
///
/// ```
/// use triage_simulator_core_rs::{Hospital, Patient, TriagePolicy};
///
/// let mut hospital = Hospital::new(TriagePolicy::Static);
///
/// hospital.admit(Patient::new(
///     "P0001".to_string(), "Ana".to_string(), "Torres".to_string(),
///     2, 0, "pediatric".to_string(),
/// ));
///
/// assert_eq!(hospital.queue_len(), 1);
/// let served = hospital.dispatch_next(60).unwrap();
/// assert_eq!(served, "P0001");
/// ```
#[derive(Debug, Clone)]
pub struct Hospital {
    /// Dispatch ordering strategy (fixed at construction)
    policy: TriagePolicy,

    /// Authoritative registry of every patient ever admitted, by id
    patients: HashMap<String, Patient>,

    /// Global priority queue over all waiting patients
    ///
    /// The set's natural order is the static comparator; the wait-adjusted
    /// policy rescans it against the current clock on every decision
    /// instead of trusting the stored order.
    queue: BTreeSet<PriorityKey>,

    /// Per-area views, by lowercase area name
    areas: HashMap<String, AttentionArea>,

    /// Ids of served patients, in dispatch order (the audit trail)
    served: Vec<String>,
}

impl Hospital {
    /// Create a hospital with the default areas and the given policy
    pub fn new(policy: TriagePolicy) -> Self {
        let areas = DEFAULT_AREAS
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    AttentionArea::new(name.to_string(), DEFAULT_AREA_CAPACITY),
                )
            })
            .collect();

        Self {
            policy,
            patients: HashMap::new(),
            queue: BTreeSet::new(),
            areas,
            served: Vec::new(),
        }
    }

    /// Get the configured dispatch policy
    pub fn policy(&self) -> TriagePolicy {
        self.policy
    }

    /// Get a patient by id
    pub fn get_patient(&self, id: &str) -> Option<&Patient> {
        self.patients.get(id)
    }

    /// Get an area by name (case-insensitive)
    pub fn get_area(&self, name: &str) -> Option<&AttentionArea> {
        self.areas.get(&name.to_lowercase())
    }

    /// All areas, by lowercase name
    pub fn areas(&self) -> &HashMap<String, AttentionArea> {
        &self.areas
    }

    /// The global queue in static priority order
    pub fn queue(&self) -> &BTreeSet<PriorityKey> {
        &self.queue
    }

    /// Number of waiting patients in the global queue
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Ids of served patients, in dispatch order
    pub fn served(&self) -> &[String] {
        &self.served
    }

    /// Number of patients in the registry
    pub fn num_patients(&self) -> usize {
        self.patients.len()
    }

    /// Admit a patient: registry, global queue, and area view
    ///
    /// The target area is created on demand with the default capacity when
    /// unseen. Returns whether the *area* accepted the patient; a `false`
    /// means the area was saturated and silently dropped its view while
    /// the global queue - authoritative for dispatch - kept the patient.
    ///
    /// Re-admitting an existing id overwrites the prior record, and the
    /// prior record's queue and area keys go with it; a stale key left in
    /// the queue would head the static order and wedge dispatch.
    pub fn admit(&mut self, patient: Patient) -> bool {
        if self.patients.contains_key(patient.id()) {
            self.remove_from_queue(patient.id());
        }

        let key = PriorityKey::of(&patient);
        let area_name = patient.area().to_string();

        let area = self
            .areas
            .entry(area_name.clone())
            .or_insert_with(|| AttentionArea::new(area_name, DEFAULT_AREA_CAPACITY));
        let area_accepted = area.admit(&patient);

        self.queue.insert(key);
        // Overwrites any prior record with the same id, by design.
        self.patients.insert(patient.id().to_string(), patient);

        area_accepted
    }

    /// Reassign a patient's acuity category
    ///
    /// No-op if the id is unknown. The category is part of the ordering
    /// key, so the patient is removed and reinserted in the global queue
    /// and the area view; the new priority takes effect immediately.
    pub fn reassign_category(&mut self, id: &str, new_category: u8) {
        let Some(patient) = self.patients.get_mut(id) else {
            return;
        };

        let old_key = PriorityKey::of(patient);
        patient.set_category(new_category);
        let new_key = PriorityKey::of(patient);
        let area_name = patient.area().to_string();

        if self.queue.remove(&old_key) {
            self.queue.insert(new_key.clone());
        }
        if let Some(area) = self.areas.get_mut(&area_name) {
            if area.remove(&old_key) {
                // Re-home under the new key; capacity unchanged since the
                // old key was just released.
                area.readmit(new_key);
            }
        }
    }

    /// Select the next patient per the policy without mutating anything
    ///
    /// Returns `None` for an empty queue. The wait-adjusted policy takes a
    /// fresh snapshot of the ordering against `now`.
    pub fn peek_next(&self, now: i64) -> Option<&PriorityKey> {
        self.policy.select_next(&self.queue, now)
    }

    /// Remove a patient from the global queue and its area view without
    /// marking it served
    ///
    /// Used for out-of-band dispatch (override tiers, emergencies) that
    /// routes the patient through the statistics path separately. Returns
    /// whether the patient was actually queued.
    pub fn remove_from_queue(&mut self, id: &str) -> bool {
        let Some(patient) = self.patients.get(id) else {
            return false;
        };
        let key = PriorityKey::of(patient);
        let area_name = patient.area().to_string();

        let removed = self.queue.remove(&key);
        if removed {
            if let Some(area) = self.areas.get_mut(&area_name) {
                area.remove(&key);
            }
        }
        removed
    }

    /// Serve a specific patient: dequeue, mark served, log dispatch order
    ///
    /// Returns `false` (a no-op) when the id is unknown, not queued, or
    /// already served - the served log therefore never sees an id twice.
    pub fn serve(&mut self, id: &str, now: i64) -> bool {
        if !self.remove_from_queue(id) {
            return false;
        }
        let Some(patient) = self.patients.get_mut(id) else {
            return false;
        };
        if patient.mark_served(now).is_err() {
            return false;
        }
        self.served.push(id.to_string());
        true
    }

    /// Dispatch the highest-priority waiting patient
    ///
    /// Selection follows whichever policy was configured at construction.
    /// Returns the served patient's id, or `None` when the queue is empty.
    pub fn dispatch_next(&mut self, now: i64) -> Option<String> {
        let id = self.peek_next(now)?.id.clone();
        if self.serve(&id, now) {
            Some(id)
        } else {
            None
        }
    }

    /// Waiting patients of one category, in queue iteration order
    pub fn patients_by_category(&self, category: u8) -> Vec<&Patient> {
        self.queue
            .iter()
            .filter(|key| key.category == category)
            .filter_map(|key| self.patients.get(&key.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(id: &str, category: u8, arrival_time: i64, area: &str) -> Patient {
        Patient::new(
            id.to_string(),
            "First".to_string(),
            "Last".to_string(),
            category,
            arrival_time,
            area.to_string(),
        )
    }

    #[test]
    fn test_default_areas_exist() {
        let hospital = Hospital::new(TriagePolicy::Static);
        assert!(hospital.get_area("adult_emergency").is_some());
        assert!(hospital.get_area("pediatric").is_some());
        assert!(hospital.get_area("urgent_care").is_some());
    }

    #[test]
    fn test_admit_creates_unseen_area_lazily() {
        let mut hospital = Hospital::new(TriagePolicy::Static);
        hospital.admit(patient("P1", 3, 0, "Trauma_Bay"));

        let area = hospital.get_area("trauma_bay").unwrap();
        assert_eq!(area.capacity(), DEFAULT_AREA_CAPACITY);
        assert_eq!(area.len(), 1);
    }

    #[test]
    fn test_reassign_category_rehomes_queue_key() {
        let mut hospital = Hospital::new(TriagePolicy::Static);
        hospital.admit(patient("MILD", 4, 0, "pediatric"));
        hospital.admit(patient("URGENT", 2, 100, "pediatric"));

        // MILD becomes the most urgent patient in the system
        hospital.reassign_category("MILD", 1);

        let first = hospital.queue().iter().next().unwrap();
        assert_eq!(first.id, "MILD");
        assert_eq!(first.category, 1);
        assert_eq!(
            hospital.get_patient("MILD").unwrap().last_change(),
            Some("category changed from 4 to 1")
        );
    }

    #[test]
    fn test_reassign_unknown_id_is_noop() {
        let mut hospital = Hospital::new(TriagePolicy::Static);
        hospital.reassign_category("GHOST", 1);
        assert_eq!(hospital.queue_len(), 0);
    }

    #[test]
    fn test_dispatch_next_marks_served_and_logs() {
        let mut hospital = Hospital::new(TriagePolicy::Static);
        hospital.admit(patient("P1", 2, 0, "pediatric"));

        let id = hospital.dispatch_next(300).unwrap();
        assert_eq!(id, "P1");

        let p = hospital.get_patient("P1").unwrap();
        assert!(p.is_served());
        assert_eq!(p.attention_time(), Some(300));
        assert_eq!(hospital.served(), &["P1".to_string()]);
        assert_eq!(hospital.queue_len(), 0);
    }

    #[test]
    fn test_dispatch_empty_queue_is_none() {
        let mut hospital = Hospital::new(TriagePolicy::Static);
        assert_eq!(hospital.dispatch_next(0), None);
    }

    #[test]
    fn test_remove_from_queue_without_serving() {
        let mut hospital = Hospital::new(TriagePolicy::Static);
        hospital.admit(patient("P1", 2, 0, "pediatric"));

        assert!(hospital.remove_from_queue("P1"));
        assert_eq!(hospital.queue_len(), 0);
        assert!(hospital.get_patient("P1").unwrap().is_waiting());
        assert!(hospital.served().is_empty());

        // Already gone
        assert!(!hospital.remove_from_queue("P1"));
    }

    #[test]
    fn test_patients_by_category() {
        let mut hospital = Hospital::new(TriagePolicy::Static);
        hospital.admit(patient("A", 1, 0, "pediatric"));
        hospital.admit(patient("B", 3, 0, "pediatric"));
        hospital.admit(patient("C", 1, 100, "urgent_care"));

        let cat1 = hospital.patients_by_category(1);
        let ids: Vec<&str> = cat1.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert!(hospital.patients_by_category(5).is_empty());
    }

    #[test]
    fn test_queue_keeps_patient_when_area_saturated() {
        let mut hospital = Hospital::new(TriagePolicy::Static);

        // Saturate a small lazily-created area view
        hospital.admit(patient("P1", 3, 0, "overflow"));
        let accepted = (1..DEFAULT_AREA_CAPACITY)
            .map(|i| hospital.admit(patient(&format!("Q{}", i), 3, i as i64, "overflow")))
            .all(|a| a);
        assert!(accepted);

        // Area full: the view drops the patient, the global queue keeps it
        let accepted = hospital.admit(patient("DROPPED", 3, 9999, "overflow"));
        assert!(!accepted);
        assert_eq!(
            hospital.get_area("overflow").unwrap().len(),
            DEFAULT_AREA_CAPACITY
        );
        assert_eq!(hospital.queue_len(), DEFAULT_AREA_CAPACITY + 1);
    }

    #[test]
    fn test_wait_adjusted_dispatch_uses_clock() {
        let mut hospital = Hospital::new(TriagePolicy::WaitAdjusted);
        hospital.admit(patient("OLD_C3", 3, 0, "pediatric"));
        hospital.admit(patient("FRESH_C1", 1, 5400, "pediatric"));

        // At 90 minutes the category-3 patient's score (0.0) beats the
        // fresh category-1 patient's (1.0).
        let id = hospital.dispatch_next(5400).unwrap();
        assert_eq!(id, "OLD_C3");
    }
}
