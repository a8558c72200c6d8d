//! Patient model
//!
//! Represents one patient admitted to the emergency room.
//! Each patient has:
//! - A unique id assigned by the arrival feed
//! - Acuity category: 1 (most urgent) to 5 (least urgent)
//! - Arrival timestamp in simulation-clock seconds (immutable)
//! - State (Waiting, Served) - monotonic, never reversed
//! - The admitting attention area name
//! - An append-only change log for auditing
//!
//! CRITICAL: All timestamps are i64 seconds on the simulated clock

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Patient state
///
/// Tracks the lifecycle of a patient through the system. The attention
/// timestamp lives inside the `Served` variant, so it exists if and only
/// if the patient has been dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientState {
    /// Patient waiting to be dispatched
    Waiting,

    /// Patient dispatched for attention
    Served {
        /// Clock value (seconds) when the patient was dispatched
        attention_time: i64,
    },
}

/// Errors that can occur during patient operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatientError {
    #[error("Patient already served")]
    AlreadyServed,
}

/// Represents a patient in the triage system
///
/// # Example
/// ```
/// use triage_simulator_core_rs::Patient;
///
/// let p = Patient::new(
///     "P0001".to_string(),
///     "Ana".to_string(),
///     "Torres".to_string(),
///     2,      // category
///     600,    // arrival_time (seconds)
///     "adult_emergency".to_string(),
/// );
/// assert!(p.is_waiting());
/// assert_eq!(p.wait_time(), None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// Unique patient identifier (assigned by the arrival feed)
    id: String,

    /// Given name
    first_name: String,

    /// Family name
    last_name: String,

    /// Acuity category: 1 (most urgent) to 5 (least urgent)
    category: u8,

    /// Arrival timestamp in simulation-clock seconds
    arrival_time: i64,

    /// Current state
    state: PatientState,

    /// Name of the admitting attention area (lowercase-normalized)
    area: String,

    /// Append-only log of changes (category reassignments, dispatch)
    change_log: Vec<String>,
}

impl Patient {
    /// Create a new waiting patient
    ///
    /// The area name is lowercase-normalized so lookups are consistent
    /// regardless of how the feed spells it.
    pub fn new(
        id: String,
        first_name: String,
        last_name: String,
        category: u8,
        arrival_time: i64,
        area: String,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            category,
            arrival_time,
            state: PatientState::Waiting,
            area: area.to_lowercase(),
            change_log: Vec::new(),
        }
    }

    /// Get patient id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get given name
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Get family name
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Get acuity category
    pub fn category(&self) -> u8 {
        self.category
    }

    /// Get arrival timestamp (simulation-clock seconds)
    pub fn arrival_time(&self) -> i64 {
        self.arrival_time
    }

    /// Get current state
    pub fn state(&self) -> &PatientState {
        &self.state
    }

    /// Get the admitting area name
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Check if patient is still waiting
    pub fn is_waiting(&self) -> bool {
        matches!(self.state, PatientState::Waiting)
    }

    /// Check if patient has been served
    pub fn is_served(&self) -> bool {
        matches!(self.state, PatientState::Served { .. })
    }

    /// Clock value when the patient was dispatched, None while waiting
    pub fn attention_time(&self) -> Option<i64> {
        match self.state {
            PatientState::Served { attention_time } => Some(attention_time),
            PatientState::Waiting => None,
        }
    }

    /// Recorded wait in seconds (attention - arrival), None while waiting
    ///
    /// Not clamped: a mis-ordered feed can produce a negative raw value.
    /// Clamping to zero happens at the statistics boundary, not here.
    pub fn wait_time(&self) -> Option<i64> {
        self.attention_time().map(|t| t - self.arrival_time)
    }

    /// Seconds waited so far against the supplied clock value
    pub fn waited_seconds(&self, now: i64) -> i64 {
        now - self.arrival_time
    }

    /// Append a change description to the audit log
    pub fn record_change(&mut self, description: String) {
        self.change_log.push(description);
    }

    /// Last logged change, if any (O(1))
    pub fn last_change(&self) -> Option<&str> {
        self.change_log.last().map(|s| s.as_str())
    }

    /// Full change log, oldest first
    pub fn change_log(&self) -> &[String] {
        &self.change_log
    }

    /// Mutate the acuity category, logging the transition
    ///
    /// The caller (the hospital) is responsible for re-homing the patient
    /// in any structure keyed by category.
    pub fn set_category(&mut self, new_category: u8) {
        self.change_log.push(format!(
            "category changed from {} to {}",
            self.category, new_category
        ));
        self.category = new_category;
    }

    /// Move the patient to another attention area
    ///
    /// Not exercised by the simulation loop; exists for explicit
    /// reassignment by a caller.
    pub fn set_area(&mut self, area: String) {
        self.area = area.to_lowercase();
    }

    /// Mark the patient served at the given clock value
    ///
    /// Waiting -> Served is one-way; serving an already-served patient
    /// is an error, which is what makes the single-dispatch invariant hold.
    pub fn mark_served(&mut self, attention_time: i64) -> Result<(), PatientError> {
        match self.state {
            PatientState::Waiting => {
                self.state = PatientState::Served { attention_time };
                self.change_log.push(format!("served at {}", attention_time));
                Ok(())
            }
            PatientState::Served { .. } => Err(PatientError::AlreadyServed),
        }
    }
}
