//! Hard-constraint repair.
//!
//! Runs identically on the initial roster and on every neighbor, in two
//! passes: per-day headcount (pass A), then per-staff temporal rules
//! (pass B). Repair rewrites assignments rather than rejecting rosters;
//! there is no failure path. Leave cells are never written.

use rotaplan_core::{Roster, ShiftType};
use smallvec::SmallVec;

use crate::context::SolveContext;

/// Repairs a candidate roster in place.
pub fn repair(roster: &mut Roster, ctx: &SolveContext) {
    repair_daily_headcount(roster);
    repair_staff_sequences(roster, ctx);
}

/// Pass A: bring each day's Morning/Afternoon/Night headcount to its
/// minimum, in that fixed order.
///
/// Minimums derive from the staff available that day (not on Leave):
/// `max(1, available / 3)` for Morning and Afternoon, `max(1,
/// available / 6)` for Night. A deficit promotes other assignments to
/// the deficient type; a surplus demotes the excess to Rest. Cells
/// claimed by an earlier adjustment of the same day are off limits to
/// later ones, so one cell is never counted toward two minimums.
fn repair_daily_headcount(roster: &mut Roster) {
    let staff_count = roster.staff_count();
    let mut counted: SmallVec<[bool; 32]> = SmallVec::new();

    for day in 0..roster.day_count() {
        let available = staff_count - roster.count_on_day(day, ShiftType::Leave);
        if available == 0 {
            continue;
        }

        let min_morning = (available / 3).max(1);
        let min_afternoon = (available / 3).max(1);
        let min_night = (available / 6).max(1);

        counted.clear();
        counted.resize(staff_count, false);

        for (shift, minimum) in [
            (ShiftType::Morning, min_morning),
            (ShiftType::Afternoon, min_afternoon),
            (ShiftType::Night, min_night),
        ] {
            adjust_headcount(roster, day, shift, minimum, &mut counted);
        }
    }
}

/// Clamps one shift type's headcount on one day to `minimum`.
///
/// `counted` marks cells already claimed by an earlier adjustment of the
/// same day; they are off limits here so no cell satisfies two minimums.
/// Demotions go to Rest and stay unclaimed: a cell released by Morning is
/// spare capacity the Afternoon or Night adjustment may promote.
fn adjust_headcount(
    roster: &mut Roster,
    day: usize,
    shift: ShiftType,
    minimum: usize,
    counted: &mut [bool],
) {
    let staff_count = roster.staff_count();
    let count = roster.count_on_day(day, shift);

    if count < minimum {
        let mut needed = minimum - count;
        for s in 0..staff_count {
            if needed == 0 {
                break;
            }
            if counted[s] {
                continue;
            }
            let current = roster.get(s, day);
            if current == ShiftType::Leave || current == shift {
                continue;
            }
            roster.set(s, day, shift);
            needed -= 1;
        }
        // The pool can run dry on tiny rosters; a partial fill is the
        // defined outcome, not an error.
    } else if count > minimum {
        let mut excess = count - minimum;
        for s in (0..staff_count).rev() {
            if excess == 0 {
                break;
            }
            if roster.get(s, day) != shift {
                continue;
            }
            roster.set(s, day, ShiftType::Rest);
            excess -= 1;
        }
    }

    // Everything still holding this type is claimed by its minimum.
    for s in 0..staff_count {
        if roster.get(s, day) == shift {
            counted[s] = true;
        }
    }
}

/// Pass B: per-staff temporal rules, applied chronologically with state
/// carried in from the prior-period tail.
fn repair_staff_sequences(roster: &mut Roster, ctx: &SolveContext) {
    for s in 0..roster.staff_count() {
        enforce_rest_rules(roster, ctx, s);
        enforce_min_rest_runs(roster, ctx, s);
    }
}

/// Forward pass enforcing rest-after-night and the consecutive-work cap.
fn enforce_rest_rules(roster: &mut Roster, ctx: &SolveContext, staff_idx: usize) {
    let policy = ctx.policy();
    let days = roster.day_count();

    let (mut consecutive, mut previous) = match ctx.prior_tail(staff_idx) {
        Some(tail) => (tail.consecutive_working, Some(tail.last_shift)),
        None => (0, None),
    };

    let mut d = 0;
    while d < days {
        if previous == Some(ShiftType::Night) && policy.min_rest_days_after_night > 0 {
            // Force the recovery block, leaving vacation days as they are.
            let mut forced = 0;
            while forced < policy.min_rest_days_after_night && d < days {
                if roster.get(staff_idx, d) != ShiftType::Leave {
                    roster.set(staff_idx, d, ShiftType::Rest);
                }
                previous = Some(roster.get(staff_idx, d));
                forced += 1;
                d += 1;
            }
            consecutive = 0;
            continue;
        }

        let shift = roster.get(staff_idx, d);
        if shift.is_working() && consecutive >= policy.max_consecutive_work_days {
            roster.set(staff_idx, d, ShiftType::Rest);
            consecutive = 0;
        } else if shift.is_working() {
            consecutive += 1;
        } else if shift == ShiftType::Rest {
            consecutive = 0;
        }
        // Leave: untouched, and the counter carries across it.

        previous = Some(roster.get(staff_idx, d));
        d += 1;
    }
}

/// Second forward scan: every Rest run must reach the minimum length.
///
/// A short run is extended forward over working days; Leave days are
/// stepped over without being converted and without counting toward the
/// run. A run cut short by the end of the window stays short.
fn enforce_min_rest_runs(roster: &mut Roster, ctx: &SolveContext, staff_idx: usize) {
    let min_run = ctx.policy().min_consecutive_rest_days;
    let days = roster.day_count();

    let mut d = 0;
    while d < days {
        if roster.get(staff_idx, d) != ShiftType::Rest {
            d += 1;
            continue;
        }

        let mut run_len: u32 = 1;
        let mut j = d + 1;
        while run_len < min_run && j < days {
            match roster.get(staff_idx, j) {
                ShiftType::Rest => run_len += 1,
                ShiftType::Leave => {}
                _ => {
                    roster.set(staff_idx, j, ShiftType::Rest);
                    run_len += 1;
                }
            }
            j += 1;
        }
        // Skip past the rest of the run so it is not re-examined.
        while j < days && roster.get(staff_idx, j) == ShiftType::Rest {
            j += 1;
        }
        d = j;
    }
}
