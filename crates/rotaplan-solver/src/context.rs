//! Immutable per-invocation solve context.
//!
//! Everything the generator, repair and evaluator need is resolved once
//! here: the staff/day axes, the vacation leave mask, the prior-period
//! tail per staff member and the preference map. One context is built per
//! engine invocation and shared read-only by every restart, so concurrent
//! invocations contend on nothing.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rotaplan_config::{PolicyConfig, ScoreWeights};
use rotaplan_core::{ScheduleWindow, ShiftAssignment, ShiftType, Staff, StaffId, Vacation};

/// Where a staff member's schedule left off before the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorTail {
    /// Type of the most recent prior-period shift.
    pub last_shift: ShiftType,
    /// Length of the working-day run ending at that shift.
    pub consecutive_working: u32,
}

/// Read-only inputs shared by every stage of one engine invocation.
#[derive(Debug, Clone)]
pub struct SolveContext {
    staff_ids: Vec<StaffId>,
    days: Vec<NaiveDate>,
    weekend: Vec<bool>,
    /// `staff_idx * day_count + day_idx`; true where an approved vacation
    /// pins the cell to Leave.
    leave_mask: Vec<bool>,
    prior_tails: Vec<Option<PriorTail>>,
    /// Preferred working shift per staff index, fixed for the whole run.
    preferences: Vec<ShiftType>,
    policy: PolicyConfig,
    weights: ScoreWeights,
}

impl SolveContext {
    /// Resolves the request inputs into dense per-index lookups.
    ///
    /// `preference_seed` fixes the placeholder preference draw so that
    /// every evaluation within the run sees the same preferred shift per
    /// staff member. Real preference data would be injected here instead.
    pub fn new(
        staff: &[Staff],
        window: &ScheduleWindow,
        vacations: &[Vacation],
        prior_shifts: &[ShiftAssignment],
        policy: PolicyConfig,
        weights: ScoreWeights,
        preference_seed: u64,
    ) -> Self {
        let staff_ids: Vec<StaffId> = staff.iter().map(|s| s.id).collect();
        let days: Vec<NaiveDate> = window.days().collect();
        let weekend = days
            .iter()
            .map(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .collect();

        let leave_mask = build_leave_mask(&staff_ids, &days, vacations);
        let prior_tails = build_prior_tails(&staff_ids, prior_shifts);

        let mut preference_rng = ChaCha8Rng::seed_from_u64(preference_seed);
        let preferences = staff_ids
            .iter()
            .map(|_| ShiftType::WORKING[preference_rng.random_range(0..ShiftType::WORKING.len())])
            .collect();

        Self {
            staff_ids,
            days,
            weekend,
            leave_mask,
            prior_tails,
            preferences,
            policy,
            weights,
        }
    }

    pub fn staff_ids(&self) -> &[StaffId] {
        &self.staff_ids
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn staff_count(&self) -> usize {
        self.staff_ids.len()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn is_weekend(&self, day_idx: usize) -> bool {
        self.weekend[day_idx]
    }

    /// True if an approved vacation pins this cell to Leave.
    pub fn is_leave(&self, staff_idx: usize, day_idx: usize) -> bool {
        self.leave_mask[staff_idx * self.days.len() + day_idx]
    }

    pub fn prior_tail(&self, staff_idx: usize) -> Option<PriorTail> {
        self.prior_tails[staff_idx]
    }

    pub fn preference(&self, staff_idx: usize) -> ShiftType {
        self.preferences[staff_idx]
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }
}

fn build_leave_mask(staff_ids: &[StaffId], days: &[NaiveDate], vacations: &[Vacation]) -> Vec<bool> {
    let mut mask = vec![false; staff_ids.len() * days.len()];
    for vacation in vacations.iter().filter(|v| v.approved) {
        let Some(staff_idx) = staff_ids.iter().position(|&id| id == vacation.staff_id) else {
            continue;
        };
        for (day_idx, &day) in days.iter().enumerate() {
            if vacation.covers(day) {
                mask[staff_idx * days.len() + day_idx] = true;
            }
        }
    }
    mask
}

fn build_prior_tails(
    staff_ids: &[StaffId],
    prior_shifts: &[ShiftAssignment],
) -> Vec<Option<PriorTail>> {
    let mut by_staff: HashMap<StaffId, Vec<(NaiveDate, ShiftType)>> = HashMap::new();
    for record in prior_shifts {
        by_staff
            .entry(record.staff_id)
            .or_default()
            .push((record.date, record.shift));
    }

    staff_ids
        .iter()
        .map(|id| {
            let mut history = by_staff.remove(id)?;
            history.sort_by_key(|&(date, _)| date);

            let &(_, last_shift) = history.last()?;
            // Count backward while the shift is a working one; stop at the
            // first Rest or Leave.
            let consecutive_working = history
                .iter()
                .rev()
                .take_while(|(_, shift)| shift.is_working())
                .count() as u32;

            Some(PriorTail {
                last_shift,
                consecutive_working,
            })
        })
        .collect()
}
