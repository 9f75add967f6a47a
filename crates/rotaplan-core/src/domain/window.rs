//! The scheduling window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// A validated, inclusive date range `[start, end]` to be scheduled.
///
/// Construction rejects windows whose end precedes their start, so every
/// `ScheduleWindow` in circulation spans at least one day.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rotaplan_core::ScheduleWindow;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let window = ScheduleWindow::new(start, end).unwrap();
///
/// assert_eq!(window.num_days(), 7);
/// assert!(ScheduleWindow::new(end, start).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ScheduleWindow {
    /// Creates a window, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ScheduleError> {
        if end < start {
            return Err(ScheduleError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days in the window, at least 1.
    pub fn num_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Iterates the window's dates in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.num_days())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
