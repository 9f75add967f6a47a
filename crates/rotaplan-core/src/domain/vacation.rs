//! Vacation records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ScheduleWindow, StaffId};

/// A vacation request for one staff member, inclusive of both endpoints.
///
/// Only approved vacations that overlap the scheduling window bind the
/// solver: they pre-seed `Leave` assignments before any optimization
/// occurs and are immutable from then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacation {
    pub staff_id: StaffId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub approved: bool,
}

impl Vacation {
    pub fn new(staff_id: StaffId, start: NaiveDate, end: NaiveDate, approved: bool) -> Self {
        Self {
            staff_id,
            start,
            end,
            approved,
        }
    }

    /// Returns true if this vacation covers the given date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if this vacation overlaps the scheduling window.
    pub fn overlaps(&self, window: &ScheduleWindow) -> bool {
        self.start <= window.end() && window.start() <= self.end
    }
}
