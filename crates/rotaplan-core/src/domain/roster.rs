//! The candidate solution grid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ShiftType, StaffId};

/// One shift assignment at the external boundary: exactly one per
/// (staff, date) pair in a finished schedule.
///
/// Also the shape of prior-period history records supplied by the
/// schedule-history collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub staff_id: StaffId,
    pub date: NaiveDate,
    pub shift: ShiftType,
}

/// A dense staff-by-day grid of shift types: the candidate solution the
/// solver mutates, repairs and scores.
///
/// Storing one cell per (staff, day) makes the full-coverage invariant
/// structural: no assignment can be missing or duplicated at any stage.
/// Cloning is cheap enough for neighbor generation (one `Vec` copy).
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    staff_ids: Vec<StaffId>,
    days: Vec<NaiveDate>,
    cells: Vec<ShiftType>,
}

impl Roster {
    /// Creates a roster with every cell set to `fill`.
    pub fn filled(staff_ids: Vec<StaffId>, days: Vec<NaiveDate>, fill: ShiftType) -> Self {
        let cells = vec![fill; staff_ids.len() * days.len()];
        Self {
            staff_ids,
            days,
            cells,
        }
    }

    pub fn staff_count(&self) -> usize {
        self.staff_ids.len()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn staff_ids(&self) -> &[StaffId] {
        &self.staff_ids
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    #[inline]
    fn index(&self, staff_idx: usize, day_idx: usize) -> usize {
        staff_idx * self.days.len() + day_idx
    }

    #[inline]
    pub fn get(&self, staff_idx: usize, day_idx: usize) -> ShiftType {
        self.cells[self.index(staff_idx, day_idx)]
    }

    #[inline]
    pub fn set(&mut self, staff_idx: usize, day_idx: usize, shift: ShiftType) {
        let idx = self.index(staff_idx, day_idx);
        self.cells[idx] = shift;
    }

    /// One staff member's assignments across the window, day-ordered.
    pub fn staff_row(&self, staff_idx: usize) -> &[ShiftType] {
        let start = staff_idx * self.days.len();
        &self.cells[start..start + self.days.len()]
    }

    /// Counts cells of the given type on one day, across all staff.
    pub fn count_on_day(&self, day_idx: usize, shift: ShiftType) -> usize {
        (0..self.staff_count())
            .filter(|&s| self.get(s, day_idx) == shift)
            .count()
    }

    /// Counts cells of the given type across the whole grid.
    pub fn count_total(&self, shift: ShiftType) -> usize {
        self.cells.iter().filter(|&&c| c == shift).count()
    }

    /// Flattens the grid into the boundary output format, staff-major.
    pub fn to_assignments(&self) -> Vec<ShiftAssignment> {
        let mut out = Vec::with_capacity(self.cells.len());
        for (s, &staff_id) in self.staff_ids.iter().enumerate() {
            for (d, &date) in self.days.iter().enumerate() {
                out.push(ShiftAssignment {
                    staff_id,
                    date,
                    shift: self.get(s, d),
                });
            }
        }
        out
    }
}
