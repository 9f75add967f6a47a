//! Shared test fixtures for rotaplan crates.
//!
//! Builders for the inputs every solver test needs: staff rosters,
//! scheduling windows, vacations and prior-period shifts.
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! rotaplan-test = { workspace = true }
//! ```

use chrono::NaiveDate;
use rotaplan_core::{
    ScheduleWindow, ShiftAssignment, ShiftType, Staff, StaffCategory, StaffId, Vacation,
};

/// Parses a `YYYY-MM-DD` date literal.
///
/// Panics on malformed input; fixtures are for tests only.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .unwrap_or_else(|e| panic!("bad test date {s:?}: {e}"))
}

/// A window of `days` days starting at the given date.
pub fn window(start: &str, days: u32) -> ScheduleWindow {
    let start = date(start);
    let end = start + chrono::Days::new(u64::from(days) - 1);
    ScheduleWindow::new(start, end).expect("fixture window is valid")
}

/// A full-time nurse on the "Medicine" ward.
pub fn nurse(id: u64) -> Staff {
    Staff::full_time(
        StaffId(id),
        format!("Nurse {id}"),
        StaffCategory::Nurse,
        "Medicine",
    )
}

/// `n` full-time nurses with ids `1..=n`.
pub fn nurses(n: u64) -> Vec<Staff> {
    (1..=n).map(nurse).collect()
}

/// A full-time care assistant on the "Medicine" ward.
pub fn care_assistant(id: u64) -> Staff {
    Staff::full_time(
        StaffId(id),
        format!("Assistant {id}"),
        StaffCategory::CareAssistant,
        "Medicine",
    )
}

/// A head nurse; never schedulable.
pub fn head_nurse(id: u64) -> Staff {
    Staff::full_time(
        StaffId(id),
        format!("Head {id}"),
        StaffCategory::HeadNurse,
        "Medicine",
    )
}

/// An approved vacation spanning `from..=to`.
pub fn approved_vacation(staff_id: u64, from: &str, to: &str) -> Vacation {
    Vacation::new(StaffId(staff_id), date(from), date(to), true)
}

/// A vacation request that was never approved; must not bind the solver.
pub fn pending_vacation(staff_id: u64, from: &str, to: &str) -> Vacation {
    Vacation::new(StaffId(staff_id), date(from), date(to), false)
}

/// One prior-period shift record.
pub fn prior_shift(staff_id: u64, on: &str, shift: ShiftType) -> ShiftAssignment {
    ShiftAssignment {
        staff_id: StaffId(staff_id),
        date: date(on),
        shift,
    }
}

/// A run of prior-period shifts ending the day before `window_start`.
///
/// `shifts` is given in chronological order; the last entry lands on the
/// day immediately before the window.
pub fn prior_tail(staff_id: u64, window_start: &str, shifts: &[ShiftType]) -> Vec<ShiftAssignment> {
    let start = date(window_start);
    shifts
        .iter()
        .rev()
        .enumerate()
        .map(|(offset, &shift)| ShiftAssignment {
            staff_id: StaffId(staff_id),
            date: start - chrono::Days::new(offset as u64 + 1),
            shift,
        })
        .collect()
}
