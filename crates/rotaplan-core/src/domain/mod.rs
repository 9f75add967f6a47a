//! Domain model for hospital shift scheduling
//!
//! The model splits into read-only inputs supplied by external
//! collaborators (`Staff`, `Vacation`, prior-period `ShiftAssignment`s)
//! and the mutable candidate solution the solver operates on (`Roster`).

mod roster;
mod shift;
mod staff;
mod vacation;
mod window;

pub use roster::{Roster, ShiftAssignment};
pub use shift::{ParseShiftTypeError, ShiftType};
pub use staff::{Staff, StaffCategory, StaffId};
pub use vacation::Vacation;
pub use window::ScheduleWindow;
