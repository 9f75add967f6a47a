//! Neighbor mutation operators.
//!
//! A neighbor is the current roster with exactly one operator applied:
//! swap two staff on one day, change one assignment, or swap one staff
//! member's assignments between two days. Leave cells are untouchable.
//! An operator that cannot find enough eligible cells leaves the clone
//! unchanged; the annealer simply scores it as a non-improving neighbor.

use rand::Rng;
use rotaplan_core::{Roster, ShiftType};
use smallvec::SmallVec;

type CellIndices = SmallVec<[usize; 32]>;

/// Produces a neighbor by cloning the roster and applying one mutation
/// operator chosen uniformly at random.
pub fn mutate_neighbor(roster: &Roster, rng: &mut impl Rng) -> Roster {
    let mut neighbor = roster.clone();
    match rng.random_range(0..3) {
        0 => swap_same_day(&mut neighbor, rng),
        1 => change_one(&mut neighbor, rng),
        _ => swap_across_days(&mut neighbor, rng),
    }
    neighbor
}

/// Exchanges the shift types of two staff members on one random day.
fn swap_same_day(roster: &mut Roster, rng: &mut impl Rng) {
    if roster.day_count() == 0 || roster.staff_count() < 2 {
        return;
    }
    let day = rng.random_range(0..roster.day_count());
    let eligible: CellIndices = (0..roster.staff_count())
        .filter(|&s| roster.get(s, day) != ShiftType::Leave)
        .collect();
    if eligible.len() < 2 {
        return;
    }

    let (first, second) = pick_two_distinct(&eligible, rng);
    let tmp = roster.get(first, day);
    roster.set(first, day, roster.get(second, day));
    roster.set(second, day, tmp);
}

/// Reassigns one random non-Leave cell to a different random type.
fn change_one(roster: &mut Roster, rng: &mut impl Rng) {
    if roster.staff_count() == 0 || roster.day_count() == 0 {
        return;
    }
    let staff = rng.random_range(0..roster.staff_count());
    let eligible: CellIndices = (0..roster.day_count())
        .filter(|&d| roster.get(staff, d) != ShiftType::Leave)
        .collect();
    if eligible.is_empty() {
        return;
    }

    let day = eligible[rng.random_range(0..eligible.len())];
    let current = roster.get(staff, day);
    let alternatives: SmallVec<[ShiftType; 4]> = ShiftType::ASSIGNABLE
        .iter()
        .copied()
        .filter(|&t| t != current)
        .collect();
    roster.set(
        staff,
        day,
        alternatives[rng.random_range(0..alternatives.len())],
    );
}

/// Exchanges one staff member's shift types between two random days.
fn swap_across_days(roster: &mut Roster, rng: &mut impl Rng) {
    if roster.staff_count() == 0 || roster.day_count() < 2 {
        return;
    }
    let staff = rng.random_range(0..roster.staff_count());
    let eligible: CellIndices = (0..roster.day_count())
        .filter(|&d| roster.get(staff, d) != ShiftType::Leave)
        .collect();
    if eligible.len() < 2 {
        return;
    }

    let (first, second) = pick_two_distinct(&eligible, rng);
    let tmp = roster.get(staff, first);
    roster.set(staff, first, roster.get(staff, second));
    roster.set(staff, second, tmp);
}

/// Picks two distinct entries from a slice of at least two indices.
fn pick_two_distinct(indices: &[usize], rng: &mut impl Rng) -> (usize, usize) {
    let a = rng.random_range(0..indices.len());
    let mut b = rng.random_range(0..indices.len() - 1);
    if b >= a {
        b += 1;
    }
    (indices[a], indices[b])
}
