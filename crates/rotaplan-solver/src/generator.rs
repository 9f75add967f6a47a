//! Initial solution generation.

use rand::Rng;
use rotaplan_core::{Roster, ShiftType};

use crate::context::SolveContext;

/// Builds the starting roster: Leave wherever an approved vacation binds,
/// a uniformly random assignable type everywhere else.
///
/// Deliberately ignores every constraint; the repair pass runs on this
/// output before it is ever scored.
pub fn build_initial_roster(ctx: &SolveContext, rng: &mut impl Rng) -> Roster {
    let mut roster = Roster::filled(
        ctx.staff_ids().to_vec(),
        ctx.days().to_vec(),
        ShiftType::Rest,
    );

    for s in 0..ctx.staff_count() {
        for d in 0..ctx.day_count() {
            let shift = if ctx.is_leave(s, d) {
                ShiftType::Leave
            } else {
                ShiftType::ASSIGNABLE[rng.random_range(0..ShiftType::ASSIGNABLE.len())]
            };
            roster.set(s, d, shift);
        }
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rotaplan_config::{PolicyConfig, ScoreWeights};
    use rotaplan_test::{approved_vacation, nurses, window};

    #[test]
    fn test_initial_roster_covers_every_cell() {
        let staff = nurses(4);
        let ctx = SolveContext::new(
            &staff,
            &window("2024-03-04", 7),
            &[],
            &[],
            PolicyConfig::default(),
            ScoreWeights::default(),
            0,
        );
        let mut rng = StdRng::seed_from_u64(1);
        let roster = build_initial_roster(&ctx, &mut rng);

        assert_eq!(roster.to_assignments().len(), 28);
        // Without vacations no cell may be Leave.
        assert_eq!(roster.count_total(ShiftType::Leave), 0);
    }

    #[test]
    fn test_vacation_days_become_leave() {
        let staff = nurses(2);
        let vacations = vec![approved_vacation(1, "2024-03-04", "2024-03-10")];
        let ctx = SolveContext::new(
            &staff,
            &window("2024-03-04", 7),
            &vacations,
            &[],
            PolicyConfig::default(),
            ScoreWeights::default(),
            0,
        );
        let mut rng = StdRng::seed_from_u64(1);
        let roster = build_initial_roster(&ctx, &mut rng);

        assert!(roster.staff_row(0).iter().all(|&s| s == ShiftType::Leave));
        assert!(roster.staff_row(1).iter().all(|&s| s != ShiftType::Leave));
    }
}
