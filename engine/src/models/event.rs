//! Event logging for simulation replay and auditing.
//!
//! The driver appends an event for every significant state change:
//! admissions (including silent area rejections), SLA-breach flags, and
//! every dispatch with the rule that selected it. The log is the
//! observability layer of a run - it makes a deterministic replay
//! inspectable after the fact without any I/O on the hot path.

/// Which rule selected a dispatched patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchTier {
    /// Tier 1: longest wait at or beyond 90 minutes, any category
    LongestOverdue,

    /// Tier 2: first previously-flagged patient in queue order
    Flagged,

    /// Tier 3: normal head-of-queue priority order
    Priority,
}

/// Simulation event capturing a state change.
///
/// All events include the minute when they occurred; events are logged in
/// the order they occur within a minute.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// New patient admitted from the arrival feed
    Admission {
        minute: usize,
        patient_id: String,
        category: u8,
        area: String,
    },

    /// An area at capacity silently dropped its view of an admission
    ///
    /// The patient remains in the global queue; only the per-area view
    /// drifted.
    AreaRejected {
        minute: usize,
        patient_id: String,
        area: String,
    },

    /// A waiting patient crossed its category's maximum tolerable wait
    ///
    /// Flagged exactly once per patient.
    BreachFlagged {
        minute: usize,
        patient_id: String,
        category: u8,
        waited_seconds: i64,
    },

    /// A category-1 patient over threshold was dispatched immediately,
    /// bypassing the scheduled cadence
    EmergencyDispatch {
        minute: usize,
        patient_id: String,
        waited_seconds: i64,
    },

    /// A patient was dispatched by the scheduled override policy
    Dispatch {
        minute: usize,
        patient_id: String,
        category: u8,
        tier: DispatchTier,
        wait_seconds: i64,
    },
}

impl Event {
    /// Get the minute when this event occurred
    pub fn minute(&self) -> usize {
        match self {
            Event::Admission { minute, .. } => *minute,
            Event::AreaRejected { minute, .. } => *minute,
            Event::BreachFlagged { minute, .. } => *minute,
            Event::EmergencyDispatch { minute, .. } => *minute,
            Event::Dispatch { minute, .. } => *minute,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Admission { .. } => "Admission",
            Event::AreaRejected { .. } => "AreaRejected",
            Event::BreachFlagged { .. } => "BreachFlagged",
            Event::EmergencyDispatch { .. } => "EmergencyDispatch",
            Event::Dispatch { .. } => "Dispatch",
        }
    }

    /// Get the patient id this event relates to
    pub fn patient_id(&self) -> &str {
        match self {
            Event::Admission { patient_id, .. } => patient_id,
            Event::AreaRejected { patient_id, .. } => patient_id,
            Event::BreachFlagged { patient_id, .. } => patient_id,
            Event::EmergencyDispatch { patient_id, .. } => patient_id,
            Event::Dispatch { patient_id, .. } => patient_id,
        }
    }
}

/// Event log for storing and querying simulation events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific minute
    pub fn events_at_minute(&self, minute: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.minute() == minute).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific patient
    pub fn events_for_patient(&self, patient_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.patient_id() == patient_id)
            .collect()
    }
}
