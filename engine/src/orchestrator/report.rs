//! Run reporting: wait-time statistics and the audit export.
//!
//! The statistics side receives one `(category, wait)` sample per
//! dispatched patient - dispatch is a one-way state transition, so no
//! patient can contribute twice. The audit side renders the served log,
//! in dispatch order, into serializable records for external persistence
//! (the engine itself never touches a file).

use crate::models::Hospital;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate wait statistics for one acuity category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryWaitStats {
    /// Patients served in this category
    pub served: u64,

    /// Sum of recorded waits (seconds)
    pub total_wait_seconds: i64,
}

/// Per-category wait statistics for a run
///
/// Recorded waits are clamped to zero at this boundary; the patient
/// records keep the raw timestamps.
#[derive(Debug, Clone, Default)]
pub struct WaitStats {
    by_category: HashMap<u8, CategoryWaitStats>,
}

impl WaitStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one dispatched patient's wait
    pub fn record(&mut self, category: u8, wait_seconds: i64) {
        let entry = self.by_category.entry(category).or_default();
        entry.served += 1;
        entry.total_wait_seconds += wait_seconds.max(0);
    }

    /// Patients served in a category
    pub fn served_count(&self, category: u8) -> u64 {
        self.by_category.get(&category).map_or(0, |s| s.served)
    }

    /// Total recorded wait for a category (seconds)
    pub fn total_wait(&self, category: u8) -> i64 {
        self.by_category
            .get(&category)
            .map_or(0, |s| s.total_wait_seconds)
    }

    /// Mean recorded wait for a category (seconds), zero when unserved
    pub fn mean_wait(&self, category: u8) -> f64 {
        match self.by_category.get(&category) {
            Some(s) if s.served > 0 => s.total_wait_seconds as f64 / s.served as f64,
            _ => 0.0,
        }
    }

    /// Total patients served across every category
    pub fn total_served(&self) -> u64 {
        self.by_category.values().map(|s| s.served).sum()
    }
}

/// One served patient as exported to the audit collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServedRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub category: u8,
    pub arrival_time: i64,
    pub wait_seconds: i64,
}

/// Build the audit export from a hospital's served log, in dispatch order
///
/// Waits are clamped to zero, matching the statistics boundary.
pub fn audit_records(hospital: &Hospital) -> Vec<ServedRecord> {
    hospital
        .served()
        .iter()
        .filter_map(|id| hospital.get_patient(id))
        .map(|p| ServedRecord {
            id: p.id().to_string(),
            first_name: p.first_name().to_string(),
            last_name: p.last_name().to_string(),
            category: p.category(),
            arrival_time: p.arrival_time(),
            wait_seconds: p.wait_time().unwrap_or(0).max(0),
        })
        .collect()
}

/// Render audit records as pretty-printed JSON
pub fn render_audit_json(records: &[ServedRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
