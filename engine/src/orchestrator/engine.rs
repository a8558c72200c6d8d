//! Simulation driver
//!
//! The discrete-event loop that exercises the triage engine over one
//! simulated day, one minute per tick:
//!
//! ```text
//! For each minute m in 0..1440:
//! 1. Arrival:   every 10 minutes, admit one patient from the feed
//!               (until the admission quota is exhausted)
//! 2. Breach scan: flag patients over their category's maximum wait;
//!               a category-1 breach is a hospital emergency and is
//!               dispatched immediately
//! 3. Dispatch:  every 15 minutes, run the three-tier override dispatch
//! 4. Burst:     every 3rd admission triggers two extra dispatches
//! 5. Advance the clock
//! ```
//!
//! # Determinism
//!
//! The loop reads no wall-clock time and performs no I/O; a run is fully
//! reproducible from the arrival feed and the configuration.

use crate::core::time::SimClock;
use crate::models::{DispatchTier, Event, EventLog, Hospital, Patient};
use crate::orchestrator::report::{audit_records, ServedRecord, WaitStats};
use crate::policy::{max_wait_seconds, TriagePolicy};
use std::collections::{HashSet, VecDeque};

/// Seconds of waiting that make a patient "longest overdue" (tier 1).
pub const OVERDUE_THRESHOLD_SECONDS: i64 = 5400;

/// Complete driver configuration
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Maximum number of patients admitted over the run
    pub admission_quota: usize,

    /// Dispatch ordering strategy for the hospital queue
    pub policy: TriagePolicy,

    /// Minutes between admission attempts
    pub arrival_interval_minutes: usize,

    /// Minutes between scheduled override dispatches
    pub dispatch_interval_minutes: usize,

    /// Admissions that trigger a burst of immediate dispatches
    pub burst_threshold: usize,

    /// Dispatches run per burst
    pub burst_dispatches: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            admission_quota: usize::MAX,
            policy: TriagePolicy::Static,
            arrival_interval_minutes: 10,
            dispatch_interval_minutes: 15,
            burst_threshold: 3,
            burst_dispatches: 2,
        }
    }
}

/// Result of a single simulated minute
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Minute that was just simulated
    pub minute: usize,

    /// Patients admitted this minute (0 or 1)
    pub admitted: usize,

    /// Patients newly flagged as over their maximum wait this minute
    pub flagged: usize,

    /// Patients dispatched this minute (emergency + scheduled + burst)
    pub dispatched: usize,
}

/// Simulation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Configuration validation error
    InvalidConfig(String),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for SimulationError {}

/// The discrete-event triage simulation
///
/// Owns all mutable state for one run: the hospital, the clock, the
/// remaining arrival feed, the breach flags, the statistics, and the
/// event log.
///
/// # Example
///
/// ```
/// use triage_simulator_core_rs::arrivals::PatientGenerator;
/// use triage_simulator_core_rs::{SimulationConfig, TriageSimulation};
///
/// let feed = PatientGenerator::new(42).generate(144, 0);
/// let mut sim = TriageSimulation::new(SimulationConfig::default(), feed).unwrap();
/// sim.run();
///
/// assert!(sim.stats().total_served() > 0);
/// ```
pub struct TriageSimulation {
    config: SimulationConfig,

    /// Hospital state (registry, queue, areas, served log)
    hospital: Hospital,

    /// Simulated clock, one minute per tick
    clock: SimClock,

    /// Remaining arrival feed, consumed strictly in order
    feed: VecDeque<Patient>,

    /// Patients admitted so far (bounded by the quota)
    admitted: usize,

    /// Admissions since the last burst dispatch
    burst_counter: usize,

    /// Ids already flagged as over their maximum wait (idempotence guard)
    flagged: HashSet<String>,

    /// Flag order, for reporting
    flagged_order: Vec<String>,

    /// Category-1 breaches found this minute, awaiting immediate dispatch
    pending_emergencies: Vec<(String, i64)>,

    /// Per-category wait statistics
    stats: WaitStats,

    /// Structured record of everything that happened
    event_log: EventLog,
}

impl TriageSimulation {
    /// Create a new simulation over the given arrival feed
    pub fn new(
        config: SimulationConfig,
        feed: VecDeque<Patient>,
    ) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let hospital = Hospital::new(config.policy);
        Ok(Self {
            config,
            hospital,
            clock: SimClock::new(),
            feed,
            admitted: 0,
            burst_counter: 0,
            flagged: HashSet::new(),
            flagged_order: Vec::new(),
            pending_emergencies: Vec::new(),
            stats: WaitStats::new(),
            event_log: EventLog::new(),
        })
    }

    fn validate_config(config: &SimulationConfig) -> Result<(), SimulationError> {
        if config.arrival_interval_minutes == 0 {
            return Err(SimulationError::InvalidConfig(
                "arrival_interval_minutes must be > 0".to_string(),
            ));
        }
        if config.dispatch_interval_minutes == 0 {
            return Err(SimulationError::InvalidConfig(
                "dispatch_interval_minutes must be > 0".to_string(),
            ));
        }
        if config.burst_threshold == 0 {
            return Err(SimulationError::InvalidConfig(
                "burst_threshold must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current minute
    pub fn current_minute(&self) -> usize {
        self.clock.current_minute()
    }

    /// Check whether the one-day horizon has been reached
    pub fn is_finished(&self) -> bool {
        self.clock.is_exhausted()
    }

    /// The hospital state
    pub fn hospital(&self) -> &Hospital {
        &self.hospital
    }

    /// Mutable hospital access
    ///
    /// Primarily for tests and for out-of-band operations (category
    /// reassignment) between ticks.
    pub fn hospital_mut(&mut self) -> &mut Hospital {
        &mut self.hospital
    }

    /// Per-category wait statistics recorded so far
    pub fn stats(&self) -> &WaitStats {
        &self.stats
    }

    /// Ids of patients flagged over their maximum wait, in flag order
    pub fn flagged_patients(&self) -> &[String] {
        &self.flagged_order
    }

    /// The event log of the run
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Patients admitted so far
    pub fn admitted_count(&self) -> usize {
        self.admitted
    }

    /// The audit export: served patients in dispatch order
    pub fn audit_records(&self) -> Vec<ServedRecord> {
        audit_records(&self.hospital)
    }

    // ========================================================================
    // Tick loop
    // ========================================================================

    /// Run the simulation to the end of its one-day horizon
    pub fn run(&mut self) {
        while !self.clock.is_exhausted() {
            self.tick();
        }
    }

    /// Execute one simulated minute
    pub fn tick(&mut self) -> TickResult {
        let minute = self.clock.current_minute();
        let mut result = TickResult {
            minute,
            ..TickResult::default()
        };

        // STEP 1: ARRIVAL
        // One patient per interval, while the quota and the feed last.
        if minute % self.config.arrival_interval_minutes == 0
            && self.admitted < self.config.admission_quota
        {
            if let Some(patient) = self.feed.pop_front() {
                self.admit_patient(patient, minute);
                self.admitted += 1;
                self.burst_counter += 1;
                result.admitted = 1;
            }
        }

        // STEP 2: BREACH SCAN
        result.flagged = self.scan_breaches(minute);
        result.dispatched += self.dispatch_emergencies(minute);

        // STEP 3: SCHEDULED DISPATCH
        if minute % self.config.dispatch_interval_minutes == 0 {
            if self.override_dispatch(minute).is_some() {
                result.dispatched += 1;
            }
        }

        // STEP 4: BURST SERVICE
        // Enough admissions have piled up; serve a burst immediately.
        if self.burst_counter >= self.config.burst_threshold {
            for _ in 0..self.config.burst_dispatches {
                if self.override_dispatch(minute).is_some() {
                    result.dispatched += 1;
                }
            }
            self.burst_counter = 0;
        }

        // STEP 5: ADVANCE TIME
        self.clock.advance_minute();

        result
    }

    fn admit_patient(&mut self, patient: Patient, minute: usize) {
        let patient_id = patient.id().to_string();
        let category = patient.category();
        let area = patient.area().to_string();

        let area_accepted = self.hospital.admit(patient);

        self.event_log.log(Event::Admission {
            minute,
            patient_id: patient_id.clone(),
            category,
            area: area.clone(),
        });
        if !area_accepted {
            self.event_log.log(Event::AreaRejected {
                minute,
                patient_id,
                area,
            });
        }
    }

    /// Flag waiting patients over their category's maximum tolerable wait.
    ///
    /// Each patient is flagged at most once. Category-1 breaches are not
    /// flagged here; they are collected for immediate dispatch instead.
    fn scan_breaches(&mut self, minute: usize) -> usize {
        let now = self.clock.current_seconds();

        let breaches: Vec<(String, u8, i64)> = self
            .hospital
            .queue()
            .iter()
            .filter(|key| !self.flagged.contains(&key.id))
            .filter_map(|key| {
                let waited = now - key.arrival_time;
                (waited > max_wait_seconds(key.category))
                    .then(|| (key.id.clone(), key.category, waited))
            })
            .collect();

        let mut newly_flagged = 0;
        for (patient_id, category, waited_seconds) in breaches {
            if category == 1 {
                // Handled by dispatch_emergencies this same minute.
                self.pending_emergencies.push((patient_id, waited_seconds));
                continue;
            }
            self.flagged.insert(patient_id.clone());
            self.flagged_order.push(patient_id.clone());
            newly_flagged += 1;
            self.event_log.log(Event::BreachFlagged {
                minute,
                patient_id,
                category,
                waited_seconds,
            });
        }
        newly_flagged
    }

    /// Dispatch category-1 breaches immediately, bypassing the cadence.
    fn dispatch_emergencies(&mut self, minute: usize) -> usize {
        let now = self.clock.current_seconds();
        let pending = std::mem::take(&mut self.pending_emergencies);
        let mut dispatched = 0;

        for (patient_id, waited_seconds) in pending {
            if !self.hospital.serve(&patient_id, now) {
                continue;
            }
            let Some(patient) = self.hospital.get_patient(&patient_id) else {
                continue;
            };
            self.stats.record(patient.category(), waited_seconds);
            self.event_log.log(Event::EmergencyDispatch {
                minute,
                patient_id,
                waited_seconds,
            });
            dispatched += 1;
        }
        dispatched
    }

    /// One three-tier override dispatch: serve exactly one patient or none.
    ///
    /// Tier 1: the longest wait at or beyond 90 minutes, any category.
    /// Tier 2: the first flagged patient in queue-iteration order whose
    ///         arrival is not in the future (deliberate first-match).
    /// Tier 3: the policy head; a future-dated arrival stays queued and
    ///         the cycle dispatches nothing.
    fn override_dispatch(&mut self, minute: usize) -> Option<(String, DispatchTier)> {
        let now = self.clock.current_seconds();

        let selected = self
            .select_longest_overdue(now)
            .map(|id| (id, DispatchTier::LongestOverdue))
            .or_else(|| {
                self.select_flagged(now)
                    .map(|id| (id, DispatchTier::Flagged))
            })
            .or_else(|| {
                self.select_by_priority(now)
                    .map(|id| (id, DispatchTier::Priority))
            })?;

        let (patient_id, tier) = selected;
        if !self.hospital.serve(&patient_id, now) {
            return None;
        }

        let patient = self.hospital.get_patient(&patient_id)?;
        let category = patient.category();
        let wait_seconds = patient.wait_time().unwrap_or(0).max(0);

        self.stats.record(category, wait_seconds);
        self.event_log.log(Event::Dispatch {
            minute,
            patient_id: patient_id.clone(),
            category,
            tier,
            wait_seconds,
        });
        Some((patient_id, tier))
    }

    /// Tier 1: largest wait at or beyond the overdue threshold.
    fn select_longest_overdue(&self, now: i64) -> Option<String> {
        let mut best: Option<(&str, i64)> = None;
        for key in self.hospital.queue() {
            let waited = now - key.arrival_time;
            if waited >= OVERDUE_THRESHOLD_SECONDS
                && best.map_or(true, |(_, max)| waited > max)
            {
                best = Some((&key.id, waited));
            }
        }
        best.map(|(id, _)| id.to_string())
    }

    /// Tier 2: first flagged patient in queue-iteration order.
    fn select_flagged(&self, now: i64) -> Option<String> {
        self.hospital
            .queue()
            .iter()
            .find(|key| self.flagged.contains(&key.id) && key.arrival_time <= now)
            .map(|key| key.id.clone())
    }

    /// Tier 3: policy head, unless its arrival is still in the future.
    fn select_by_priority(&self, now: i64) -> Option<String> {
        let key = self.hospital.peek_next(now)?;
        if key.arrival_time > now {
            // Mis-ordered feed: leave the patient queued, dispatch nothing.
            return None;
        }
        Some(key.id.clone())
    }
}
