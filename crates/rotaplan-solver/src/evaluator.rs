//! Multi-factor quality evaluation.
//!
//! The fitness driving the search is the plain sum of six sub-scores.
//! The sum is deliberately unnormalized; only the overall quality figure
//! reported to callers is recombined onto a 0-100 scale.

use rotaplan_core::{LoadSummary, QualityMetrics, Roster, ShiftType};

use crate::context::SolveContext;

/// The six sub-scores of one evaluation, each roughly 0-100 before its
/// weight is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// `100 / (1 + stddev(working days per staff))`.
    pub workload_balance: f64,
    /// `100 * weekend_weight / (1 + stddev(weekend working days))`.
    pub weekend_balance: f64,
    /// `100 * preference_weight * matches / non-leave assignments`.
    pub preference_match: f64,
    /// Penalizes a working first day after a prior-period night shift.
    pub continuity: f64,
    /// Penalizes runs of the same working shift longer than two days.
    pub alternation: f64,
    /// Penalizes a Morning shift directly after a Night shift.
    pub night_to_morning: f64,
}

impl ScoreBreakdown {
    /// The fitness used for acceptance comparisons.
    pub fn total(&self) -> f64 {
        self.workload_balance
            + self.weekend_balance
            + self.preference_match
            + self.continuity
            + self.alternation
            + self.night_to_morning
    }
}

/// Pure, idempotent scoring over an immutable context.
///
/// Two evaluations of the same roster always return the same breakdown;
/// the preference map and prior-period tails are fixed at context
/// construction.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    ctx: &'a SolveContext,
}

impl<'a> Evaluator<'a> {
    pub fn new(ctx: &'a SolveContext) -> Self {
        Self { ctx }
    }

    /// Scores a repaired candidate roster.
    pub fn evaluate(&self, roster: &Roster) -> ScoreBreakdown {
        ScoreBreakdown {
            workload_balance: self.workload_balance(roster),
            weekend_balance: self.weekend_balance(roster),
            preference_match: self.preference_match(roster),
            continuity: self.continuity(roster),
            alternation: self.alternation(roster),
            night_to_morning: self.night_to_morning(roster),
        }
    }

    /// Recombines a breakdown into the reported overall quality:
    /// each sub-score is de-weighted back to its 0-100 range, the six
    /// are averaged and the result clamped to `[0, 100]`.
    pub fn overall_quality(&self, breakdown: &ScoreBreakdown) -> f64 {
        let weights = self.ctx.weights();
        let parts = [
            breakdown.workload_balance,
            de_weight(breakdown.weekend_balance, weights.weekend),
            de_weight(breakdown.preference_match, weights.preference),
            breakdown.continuity,
            breakdown.alternation,
            breakdown.night_to_morning,
        ];
        let avg = parts.iter().sum::<f64>() / parts.len() as f64;
        avg.clamp(0.0, 100.0)
    }

    /// Builds the audit report for a finished schedule.
    pub fn quality_metrics(&self, roster: &Roster) -> QualityMetrics {
        let breakdown = self.evaluate(roster);

        let workload: Vec<u32> = (0..roster.staff_count())
            .map(|s| self.working_days(roster, s))
            .collect();
        let weekend_load: Vec<u32> = (0..roster.staff_count())
            .map(|s| self.weekend_days(roster, s))
            .collect();

        QualityMetrics {
            morning_count: roster.count_total(ShiftType::Morning),
            afternoon_count: roster.count_total(ShiftType::Afternoon),
            night_count: roster.count_total(ShiftType::Night),
            rest_count: roster.count_total(ShiftType::Rest),
            leave_count: roster.count_total(ShiftType::Leave),
            workload: LoadSummary::from_counts(&workload),
            weekend_load: LoadSummary::from_counts(&weekend_load),
            night_to_morning_violations: self.count_night_to_morning(roster),
            overall_score: self.overall_quality(&breakdown),
        }
    }

    fn working_days(&self, roster: &Roster, staff_idx: usize) -> u32 {
        roster
            .staff_row(staff_idx)
            .iter()
            .filter(|s| s.is_working())
            .count() as u32
    }

    fn weekend_days(&self, roster: &Roster, staff_idx: usize) -> u32 {
        roster
            .staff_row(staff_idx)
            .iter()
            .enumerate()
            .filter(|&(d, s)| s.is_working() && self.ctx.is_weekend(d))
            .count() as u32
    }

    fn workload_balance(&self, roster: &Roster) -> f64 {
        let loads: Vec<f64> = (0..roster.staff_count())
            .map(|s| self.working_days(roster, s) as f64)
            .collect();
        100.0 / (1.0 + stddev(&loads))
    }

    fn weekend_balance(&self, roster: &Roster) -> f64 {
        let loads: Vec<f64> = (0..roster.staff_count())
            .map(|s| self.weekend_days(roster, s) as f64)
            .collect();
        100.0 * f64::from(self.ctx.weights().weekend) / (1.0 + stddev(&loads))
    }

    fn preference_match(&self, roster: &Roster) -> f64 {
        let mut matches = 0usize;
        let mut total = 0usize;
        for s in 0..roster.staff_count() {
            let preferred = self.ctx.preference(s);
            for &shift in roster.staff_row(s) {
                if shift == ShiftType::Leave {
                    continue;
                }
                total += 1;
                if shift == preferred {
                    matches += 1;
                }
            }
        }
        if total == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.ctx.weights().preference) * matches as f64 / total as f64
    }

    fn continuity(&self, roster: &Roster) -> f64 {
        let violations = (0..roster.staff_count())
            .filter(|&s| {
                self.ctx
                    .prior_tail(s)
                    .is_some_and(|tail| tail.last_shift == ShiftType::Night)
                    && roster.day_count() > 0
                    && roster.get(s, 0).is_working()
            })
            .count();
        (100.0 - 10.0 * violations as f64).max(0.0)
    }

    fn alternation(&self, roster: &Roster) -> f64 {
        let staff_count = roster.staff_count();
        if staff_count == 0 {
            return 0.0;
        }

        let total: f64 = (0..staff_count)
            .map(|s| {
                let violations = count_long_runs(roster.staff_row(s));
                (100.0 - 5.0 * violations as f64).max(0.0)
            })
            .sum();
        total / staff_count as f64
    }

    fn night_to_morning(&self, roster: &Roster) -> f64 {
        let violations = self.count_night_to_morning(roster);
        let weight = f64::from(self.ctx.weights().night_morning);
        (100.0 - weight * violations as f64).max(0.0)
    }

    fn count_night_to_morning(&self, roster: &Roster) -> usize {
        (0..roster.staff_count())
            .map(|s| {
                roster
                    .staff_row(s)
                    .windows(2)
                    .filter(|pair| {
                        pair[0] == ShiftType::Night && pair[1] == ShiftType::Morning
                    })
                    .count()
            })
            .sum()
    }
}

/// Runs of the same working shift type longer than two days.
fn count_long_runs(row: &[ShiftType]) -> usize {
    let mut violations = 0;
    let mut run_shift: Option<ShiftType> = None;
    let mut run_len = 0usize;

    for &shift in row {
        if shift.is_working() && Some(shift) == run_shift {
            run_len += 1;
        } else {
            if run_len > 2 {
                violations += 1;
            }
            run_shift = shift.is_working().then_some(shift);
            run_len = usize::from(shift.is_working());
        }
    }
    if run_len > 2 {
        violations += 1;
    }
    violations
}

/// Population standard deviation; zero for empty input.
fn stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn de_weight(value: f64, weight: u32) -> f64 {
    if weight == 0 {
        0.0
    } else {
        value / f64::from(weight)
    }
}

#[cfg(test)]
mod tests;
