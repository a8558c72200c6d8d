//! Tests for the Patient model
//!
//! CRITICAL: All timestamps are i64 seconds on the simulated clock

use triage_simulator_core_rs::{Patient, PatientError, PatientState};

fn patient() -> Patient {
    Patient::new(
        "P0042".to_string(),
        "Laura".to_string(),
        "Moreno".to_string(),
        2,
        1200,
        "Urgent_Care".to_string(),
    )
}

#[test]
fn test_patient_new() {
    let p = patient();

    assert_eq!(p.id(), "P0042");
    assert_eq!(p.first_name(), "Laura");
    assert_eq!(p.last_name(), "Moreno");
    assert_eq!(p.category(), 2);
    assert_eq!(p.arrival_time(), 1200);
    assert_eq!(p.state(), &PatientState::Waiting);
    assert_eq!(p.area(), "urgent_care"); // lowercase-normalized
    assert!(p.change_log().is_empty());
}

#[test]
fn test_attention_time_set_iff_served() {
    let mut p = patient();

    assert_eq!(p.attention_time(), None);
    assert_eq!(p.wait_time(), None);

    p.mark_served(3000).unwrap();

    assert_eq!(p.state(), &PatientState::Served { attention_time: 3000 });
    assert_eq!(p.attention_time(), Some(3000));
    assert_eq!(p.wait_time(), Some(1800));
}

#[test]
fn test_state_transition_is_monotonic() {
    let mut p = patient();
    p.mark_served(3000).unwrap();

    // Waiting -> Served is one-way; a second serve fails and changes nothing
    assert_eq!(p.mark_served(9999), Err(PatientError::AlreadyServed));
    assert_eq!(p.attention_time(), Some(3000));
}

#[test]
fn test_negative_raw_wait_not_clamped_on_record() {
    // A mis-ordered feed can serve before the nominal arrival; the record
    // keeps the raw value, clamping belongs to the statistics boundary.
    let mut p = patient();
    p.mark_served(600).unwrap();

    assert_eq!(p.wait_time(), Some(-600));
}

#[test]
fn test_change_log_last_entry_lookup() {
    let mut p = patient();

    p.set_category(1);
    p.record_change("moved to resus bay".to_string());

    assert_eq!(p.change_log().len(), 2);
    assert_eq!(p.last_change(), Some("moved to resus bay"));
    assert_eq!(p.change_log()[0], "category changed from 2 to 1");
}

#[test]
fn test_serde_round_trip() {
    let mut p = patient();
    p.mark_served(3000).unwrap();

    let json = serde_json::to_string(&p).unwrap();
    let back: Patient = serde_json::from_str(&json).unwrap();

    assert_eq!(back.id(), p.id());
    assert_eq!(back.attention_time(), Some(3000));
    assert_eq!(back.change_log(), p.change_log());
}
