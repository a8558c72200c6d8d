//! Triage Simulator Core - Rust Engine
//!
//! Deterministic emergency-room triage simulator: capacity-bounded
//! admission areas, acuity-based priority scheduling, and a discrete
//! per-minute event loop with SLA-breach escalation.
//!
//! # Architecture
//!
//! - **core**: Simulated clock
//! - **models**: Domain types (Patient, AttentionArea, Hospital, events)
//! - **policy**: Priority ordering strategies and SLA thresholds
//! - **arrivals**: Deterministic patient feed generation
//! - **orchestrator**: The simulation driver, statistics, audit export
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All timestamps are i64 seconds on the simulated clock
//! 2. All randomness is deterministic (seeded RNG)
//! 3. Waiting -> Served is one-way; no patient is dispatched twice

// Module declarations
pub mod arrivals;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod rng;

// Re-exports for convenience
pub use arrivals::PatientGenerator;
pub use core::time::{SimClock, MINUTES_PER_DAY, SECONDS_PER_MINUTE};
pub use models::{
    area::{AttentionArea, DEFAULT_AREA_CAPACITY},
    event::{DispatchTier, Event, EventLog},
    hospital::Hospital,
    patient::{Patient, PatientError, PatientState},
};
pub use orchestrator::{
    CategoryWaitStats, ServedRecord, SimulationConfig, SimulationError, TickResult,
    TriageSimulation, WaitStats,
};
pub use policy::{max_wait_seconds, PriorityKey, TriagePolicy};
pub use rng::RngManager;
