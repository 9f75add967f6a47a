//! Tests for the quality evaluator.

use rotaplan_config::{PolicyConfig, ScoreWeights};
use rotaplan_core::{Roster, ShiftAssignment, ShiftType, Staff, Vacation};
use rotaplan_test::{approved_vacation, nurses, prior_tail, window};

use super::*;

const M: ShiftType = ShiftType::Morning;
const P: ShiftType = ShiftType::Afternoon;
const N: ShiftType = ShiftType::Night;
const R: ShiftType = ShiftType::Rest;
const F: ShiftType = ShiftType::Leave;

fn context_with(
    staff: &[Staff],
    vacations: &[Vacation],
    prior: &[ShiftAssignment],
) -> SolveContext {
    SolveContext::new(
        staff,
        &window("2024-03-04", 7),
        vacations,
        prior,
        PolicyConfig::default(),
        ScoreWeights::default(),
        19,
    )
}

fn roster_from_rows(ctx: &SolveContext, rows: &[&[ShiftType]]) -> Roster {
    let mut roster = Roster::filled(ctx.staff_ids().to_vec(), ctx.days().to_vec(), R);
    for (s, row) in rows.iter().enumerate() {
        for (d, &shift) in row.iter().enumerate() {
            roster.set(s, d, shift);
        }
    }
    roster
}

#[test]
fn test_evaluation_is_idempotent() {
    let staff = nurses(4);
    let ctx = context_with(&staff, &[], &[]);
    let evaluator = Evaluator::new(&ctx);
    let roster = roster_from_rows(
        &ctx,
        &[
            &[M, M, R, R, N, R, R],
            &[P, P, M, R, R, M, P],
            &[N, R, R, P, P, R, M],
            &[R, N, R, R, M, P, N],
        ],
    );

    let first = evaluator.evaluate(&roster);
    let second = evaluator.evaluate(&roster);
    assert_eq!(first, second);
    assert_eq!(first.total(), second.total());
}

#[test]
fn test_equal_workloads_score_full_balance() {
    let staff = nurses(2);
    let ctx = context_with(&staff, &[], &[]);
    let evaluator = Evaluator::new(&ctx);
    // Both staff work exactly three days.
    let roster = roster_from_rows(
        &ctx,
        &[&[M, M, M, R, R, R, R], &[P, P, P, R, R, R, R]],
    );

    let breakdown = evaluator.evaluate(&roster);
    assert!((breakdown.workload_balance - 100.0).abs() < 1e-9);
    // No weekend work at all is also perfectly balanced; the weight
    // doubles the sub-score.
    assert!((breakdown.weekend_balance - 200.0).abs() < 1e-9);
}

#[test]
fn test_uneven_workload_scores_below_balance() {
    let staff = nurses(2);
    let ctx = context_with(&staff, &[], &[]);
    let evaluator = Evaluator::new(&ctx);
    let balanced = roster_from_rows(
        &ctx,
        &[&[M, M, M, R, R, R, R], &[P, P, P, R, R, R, R]],
    );
    let skewed = roster_from_rows(
        &ctx,
        &[&[M, M, M, M, M, M, R], &[R, R, R, R, R, R, P]],
    );

    let balanced_score = evaluator.evaluate(&balanced).workload_balance;
    let skewed_score = evaluator.evaluate(&skewed).workload_balance;
    assert!(skewed_score < balanced_score);
}

#[test]
fn test_leave_days_do_not_count_as_workload() {
    let staff = nurses(2);
    let vacations = vec![approved_vacation(1, "2024-03-04", "2024-03-10")];
    let ctx = context_with(&staff, &vacations, &[]);
    let evaluator = Evaluator::new(&ctx);
    let roster = roster_from_rows(
        &ctx,
        &[&[F, F, F, F, F, F, F], &[M, P, R, R, M, R, R]],
    );

    let metrics = evaluator.quality_metrics(&roster);
    assert_eq!(metrics.workload.min, 0);
    assert_eq!(metrics.workload.max, 3);
    assert_eq!(metrics.leave_count, 7);
}

#[test]
fn test_preference_denominator_excludes_leave() {
    let staff = nurses(1);
    let vacations = vec![approved_vacation(1, "2024-03-04", "2024-03-08")];
    let ctx = context_with(&staff, &vacations, &[]);
    let evaluator = Evaluator::new(&ctx);

    // Five leave days; the two live days both match the preference.
    let preferred = ctx.preference(0);
    let mut roster = roster_from_rows(&ctx, &[&[F, F, F, F, F, R, R]]);
    roster.set(0, 5, preferred);
    roster.set(0, 6, preferred);

    let breakdown = evaluator.evaluate(&roster);
    // 100 * weight(3) * 2/2
    assert!((breakdown.preference_match - 300.0).abs() < 1e-9);
}

#[test]
fn test_continuity_flags_work_after_prior_night() {
    let staff = nurses(2);
    let prior = [
        prior_tail(1, "2024-03-04", &[N]),
        prior_tail(2, "2024-03-04", &[N]),
    ]
    .concat();
    let ctx = context_with(&staff, &[], &prior);
    let evaluator = Evaluator::new(&ctx);

    let rested = roster_from_rows(
        &ctx,
        &[&[R, R, M, M, M, R, R], &[R, R, P, P, P, R, R]],
    );
    assert!((evaluator.evaluate(&rested).continuity - 100.0).abs() < 1e-9);

    let one_violation = roster_from_rows(
        &ctx,
        &[&[M, R, M, M, M, R, R], &[R, R, P, P, P, R, R]],
    );
    assert!((evaluator.evaluate(&one_violation).continuity - 90.0).abs() < 1e-9);
}

#[test]
fn test_alternation_counts_long_runs() {
    // Four identical mornings: one run over the limit.
    assert_eq!(count_long_runs(&[M, M, M, M, R, R, R]), 1);
    // A rest breaks the run.
    assert_eq!(count_long_runs(&[M, M, R, M, M, R, R]), 0);
    // Changing working type starts a new run.
    assert_eq!(count_long_runs(&[M, M, M, P, P, P, R]), 2);
    // Exactly two is fine.
    assert_eq!(count_long_runs(&[M, M, P, P, N, N, R]), 0);
    // A run over the limit ending at the window edge still counts.
    assert_eq!(count_long_runs(&[R, R, R, R, N, N, N]), 1);
}

#[test]
fn test_night_to_morning_penalty() {
    let staff = nurses(1);
    let ctx = context_with(&staff, &[], &[]);
    let evaluator = Evaluator::new(&ctx);

    let clean = roster_from_rows(&ctx, &[&[N, R, R, M, M, R, R]]);
    assert!((evaluator.evaluate(&clean).night_to_morning - 100.0).abs() < 1e-9);

    let dirty = roster_from_rows(&ctx, &[&[N, M, R, N, M, R, R]]);
    let breakdown = evaluator.evaluate(&dirty);
    // Two violations, weight five.
    assert!((breakdown.night_to_morning - 90.0).abs() < 1e-9);

    let metrics = evaluator.quality_metrics(&dirty);
    assert_eq!(metrics.night_to_morning_violations, 2);
}

#[test]
fn test_overall_quality_is_clamped_and_perfect_for_ideal_week() {
    let staff = nurses(1);
    let ctx = context_with(&staff, &[], &[]);
    let evaluator = Evaluator::new(&ctx);

    let roster = roster_from_rows(&ctx, &[&[M, M, R, R, P, R, R]]);
    let breakdown = evaluator.evaluate(&roster);
    let overall = evaluator.overall_quality(&breakdown);
    assert!((0.0..=100.0).contains(&overall));
}

#[test]
fn test_quality_metrics_counts() {
    let staff = nurses(2);
    let ctx = context_with(&staff, &[], &[]);
    let evaluator = Evaluator::new(&ctx);
    let roster = roster_from_rows(
        &ctx,
        &[&[M, M, N, R, R, P, R], &[P, R, R, M, N, R, R]],
    );

    let metrics = evaluator.quality_metrics(&roster);
    assert_eq!(metrics.morning_count, 3);
    assert_eq!(metrics.afternoon_count, 2);
    assert_eq!(metrics.night_count, 2);
    assert_eq!(metrics.rest_count, 7);
    assert_eq!(metrics.leave_count, 0);
    assert_eq!(metrics.workload.min, 3);
    assert_eq!(metrics.workload.max, 4);
}
