//! End-to-end tests for the schedule engine.

use std::collections::HashSet;
use std::sync::atomic::AtomicBool;

use rotaplan_config::EngineConfig;
use rotaplan_core::{ScheduleError, ShiftType, StaffCategory, StaffId, Vacation};
use rotaplan_test::{
    approved_vacation, care_assistant, date, head_nurse, nurses, pending_vacation, prior_tail,
    window,
};

use super::*;
use crate::termination::ExternalTermination;

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn engine(seed: u64) -> ScheduleEngine {
    init_tracing();
    ScheduleEngine::new(
        EngineConfig::new()
            .with_random_seed(seed)
            .with_max_iterations(300),
    )
    .unwrap()
}

fn nurse_request(staff_count: u64) -> ScheduleRequest {
    ScheduleRequest {
        staff: nurses(staff_count),
        window: window("2024-03-04", 7),
        category: StaffCategory::Nurse,
        vacations: vec![],
        prior_shifts: vec![],
    }
}

#[test]
fn test_three_staff_seven_days_yields_21_assignments() {
    let result = engine(1).generate(&nurse_request(3)).unwrap();

    assert_eq!(result.assignments.len(), 21);

    // Exactly one assignment per (staff, date), none of them Leave.
    let mut seen = HashSet::new();
    for a in &result.assignments {
        assert!(seen.insert((a.staff_id, a.date)));
        assert_ne!(a.shift, ShiftType::Leave);
    }

    let counted = result.metrics.morning_count
        + result.metrics.afternoon_count
        + result.metrics.night_count
        + result.metrics.rest_count
        + result.metrics.leave_count;
    assert_eq!(counted, 21);
    assert!((0.0..=100.0).contains(&result.metrics.overall_score));
}

#[test]
fn test_full_window_vacation_pins_every_day_to_leave() {
    let mut request = nurse_request(3);
    request.vacations = vec![approved_vacation(2, "2024-03-04", "2024-03-10")];

    let result = engine(2).generate(&request).unwrap();

    let on_leave: Vec<_> = result
        .assignments
        .iter()
        .filter(|a| a.staff_id == StaffId(2))
        .collect();
    assert_eq!(on_leave.len(), 7);
    assert!(on_leave.iter().all(|a| a.shift == ShiftType::Leave));

    // A fully vacationing staff member contributes zero working days.
    assert_eq!(result.metrics.workload.min, 0);
    assert_eq!(result.metrics.leave_count, 7);
}

#[test]
fn test_pending_vacation_does_not_bind() {
    let mut request = nurse_request(3);
    request.vacations = vec![pending_vacation(2, "2024-03-04", "2024-03-10")];

    let result = engine(2).generate(&request).unwrap();
    assert_eq!(result.metrics.leave_count, 0);
}

#[test]
fn test_empty_roster_is_a_structured_failure() {
    let request = ScheduleRequest {
        staff: vec![],
        window: window("2024-03-04", 7),
        category: StaffCategory::Nurse,
        vacations: vec![],
        prior_shifts: vec![],
    };

    let err = engine(3).generate(&request).unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::EmptyRoster {
            category: StaffCategory::Nurse
        }
    ));
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_head_nurses_are_never_scheduled() {
    // A roster of head nurses has no schedulable staff, even when the
    // caller asks for the head-nurse category directly.
    let request = ScheduleRequest {
        staff: vec![head_nurse(1), head_nurse(2)],
        window: window("2024-03-04", 7),
        category: StaffCategory::HeadNurse,
        vacations: vec![],
        prior_shifts: vec![],
    };

    let err = engine(4).generate(&request).unwrap_err();
    assert!(matches!(err, ScheduleError::EmptyRoster { .. }));
}

#[test]
fn test_only_the_requested_category_is_scheduled() {
    let mut staff = nurses(3);
    staff.push(care_assistant(10));
    staff.push(head_nurse(11));
    let request = ScheduleRequest {
        staff,
        window: window("2024-03-04", 7),
        category: StaffCategory::CareAssistant,
        vacations: vec![],
        prior_shifts: vec![],
    };

    let result = engine(5).generate(&request).unwrap();
    assert_eq!(result.assignments.len(), 7);
    assert!(result.assignments.iter().all(|a| a.staff_id == StaffId(10)));
}

#[test]
fn test_prior_night_forces_rest_at_window_start() {
    let mut request = nurse_request(4);
    request.prior_shifts = prior_tail(1, "2024-03-04", &[ShiftType::Night]);

    let result = engine(6).generate(&request).unwrap();

    for offset in 0..2u64 {
        let day = date("2024-03-04") + chrono::Days::new(offset);
        let assignment = result
            .assignments
            .iter()
            .find(|a| a.staff_id == StaffId(1) && a.date == day)
            .unwrap();
        assert!(
            !assignment.shift.is_working(),
            "expected rest on {day}, got {}",
            assignment.shift
        );
    }
}

#[test]
fn test_invalid_vacation_fails_fast() {
    let mut request = nurse_request(3);
    request.vacations = vec![Vacation::new(
        StaffId(1),
        date("2024-03-10"),
        date("2024-03-04"),
        true,
    )];

    let err = engine(7).generate(&request).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidVacation { .. }));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let request = nurse_request(5);
    let a = engine(42).generate(&request).unwrap();
    let b = engine(42).generate(&request).unwrap();

    assert_eq!(a.assignments, b.assignments);
    assert_eq!(a.metrics, b.metrics);
}

#[test]
fn test_restarts_pick_a_result_at_least_as_good() {
    let request = nurse_request(5);

    let single = ScheduleEngine::new(
        EngineConfig::new()
            .with_random_seed(11)
            .with_max_iterations(200),
    )
    .unwrap()
    .generate(&request)
    .unwrap();

    let multi = ScheduleEngine::new(
        EngineConfig::new()
            .with_random_seed(11)
            .with_max_iterations(200)
            .with_restarts(4),
    )
    .unwrap()
    .generate(&request)
    .unwrap();

    // Restart 0 reuses the single-run seed, so the winner can only be
    // at least as good.
    assert!(multi.metrics.overall_score >= single.metrics.overall_score);
}

#[test]
fn test_cancelled_run_still_returns_a_complete_schedule() {
    let request = nurse_request(4);
    let flag = AtomicBool::new(true);
    let termination = ExternalTermination::new(&flag);

    let result = engine(8)
        .generate_with_termination(&request, &termination)
        .unwrap();

    assert_eq!(result.statistics.iterations, 0);
    assert_eq!(result.assignments.len(), 28);
}

#[test]
fn test_engine_rejects_invalid_config() {
    let mut config = EngineConfig::new();
    config.annealing.cooling_rate = 1.5;
    assert!(ScheduleEngine::new(config).is_err());
}
