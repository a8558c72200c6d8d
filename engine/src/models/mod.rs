//! Domain models for the triage simulator

pub mod area;
pub mod event;
pub mod hospital;
pub mod patient;

// Re-exports
pub use area::{AttentionArea, DEFAULT_AREA_CAPACITY};
pub use event::{DispatchTier, Event, EventLog};
pub use hospital::Hospital;
pub use patient::{Patient, PatientError, PatientState};
