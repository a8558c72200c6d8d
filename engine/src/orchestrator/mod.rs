//! Orchestrator - the discrete-event simulation driver.
//!
//! See `engine.rs` for the tick loop and `report.rs` for statistics and
//! the audit export.

pub mod engine;
pub mod report;

// Re-export main types for convenience
pub use engine::{
    SimulationConfig, SimulationError, TickResult, TriageSimulation,
    OVERDUE_THRESHOLD_SECONDS,
};
pub use report::{audit_records, render_audit_json, CategoryWaitStats, ServedRecord, WaitStats};
