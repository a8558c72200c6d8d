//! Tests for the attention area model
//!
//! Capacity bound, silent-drop saturation policy, static dispatch order.

use triage_simulator_core_rs::{AttentionArea, Patient, PriorityKey};

fn patient(id: &str, category: u8, arrival_time: i64) -> Patient {
    Patient::new(
        id.to_string(),
        "First".to_string(),
        "Last".to_string(),
        category,
        arrival_time,
        "adult_emergency".to_string(),
    )
}

#[test]
fn test_capacity_three_scenario() {
    // Area at capacity 3 holds patients of categories {2, 1, 3}; a fourth
    // admission (category 4) is silently rejected, and dispatch returns
    // the category-1 patient first.
    let mut area = AttentionArea::new("adult_emergency".to_string(), 3);

    assert!(area.admit(&patient("P_CAT2", 2, 0)));
    assert!(area.admit(&patient("P_CAT1", 1, 60)));
    assert!(area.admit(&patient("P_CAT3", 3, 120)));
    assert!(area.is_saturated());

    assert!(!area.admit(&patient("P_CAT4", 4, 180)));
    assert_eq!(area.len(), 3);

    assert_eq!(area.dispatch_next().as_deref(), Some("P_CAT1"));
    assert_eq!(area.dispatch_next().as_deref(), Some("P_CAT2"));
    assert_eq!(area.dispatch_next().as_deref(), Some("P_CAT3"));
    assert_eq!(area.dispatch_next(), None);
}

#[test]
fn test_dispatch_from_empty_area_is_none() {
    let mut area = AttentionArea::new("pediatric".to_string(), 5);
    assert!(area.is_empty());
    assert_eq!(area.dispatch_next(), None);
}

#[test]
fn test_tie_break_arrival_then_id() {
    let mut area = AttentionArea::new("pediatric".to_string(), 10);
    area.admit(&patient("B", 2, 100));
    area.admit(&patient("A", 2, 100)); // same category, same arrival
    area.admit(&patient("C", 2, 50));

    // Earlier arrival wins within a category; id breaks exact ties
    assert_eq!(
        area.snapshot_by_priority(),
        vec!["C".to_string(), "A".to_string(), "B".to_string()]
    );
}

#[test]
fn test_remove_specific_key() {
    let mut area = AttentionArea::new("pediatric".to_string(), 10);
    let p = patient("P1", 3, 0);
    area.admit(&p);

    let key = PriorityKey::of(&p);
    assert!(area.contains(&key));
    assert!(area.remove(&key));
    assert!(!area.remove(&key)); // already gone
    assert!(area.is_empty());
}

#[test]
fn test_admission_reopens_after_dispatch() {
    let mut area = AttentionArea::new("urgent_care".to_string(), 1);
    assert!(area.admit(&patient("P1", 3, 0)));
    assert!(!area.admit(&patient("P2", 3, 60)));

    area.dispatch_next();
    assert!(!area.is_saturated());
    assert!(area.admit(&patient("P2", 3, 60)));
}
