//! Error types for the scheduling engine boundary.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{StaffCategory, StaffId};

/// Errors a caller can receive from the scheduling engine.
///
/// All of these are recoverable by the caller with different input; the
/// engine itself never panics on bad data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The roster contains no schedulable staff for the requested category.
    #[error("no schedulable staff available for category {category:?}")]
    EmptyRoster {
        /// The category that was requested.
        category: StaffCategory,
    },

    /// The scheduling window ends before it starts.
    #[error("invalid scheduling window: end {end} precedes start {start}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    /// A vacation record ends before it starts.
    #[error("invalid vacation for staff {staff_id}: end {end} precedes start {start}")]
    InvalidVacation {
        staff_id: StaffId,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Result type alias for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
