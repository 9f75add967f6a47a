//! The scheduling engine entry point.
//!
//! A pure library boundary: the caller supplies the roster, window,
//! vacations and prior shifts; the engine returns flat assignments and a
//! quality report. No HTTP, persistence or delivery concerns live here.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rotaplan_config::{ConfigError, EngineConfig};
use rotaplan_core::{
    QualityMetrics, ScheduleError, ScheduleWindow, ShiftAssignment, Staff, StaffCategory, Vacation,
};

use crate::annealing::{AnnealedSolution, Annealer};
use crate::context::SolveContext;
use crate::evaluator::Evaluator;
use crate::statistics::RunStatistics;
use crate::termination::{NoTermination, Termination};

/// Everything one scheduling run needs from external collaborators.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// The full staff directory; the engine filters to `category`.
    pub staff: Vec<Staff>,
    pub window: ScheduleWindow,
    /// Only staff of this (schedulable) category receive assignments.
    pub category: StaffCategory,
    pub vacations: Vec<Vacation>,
    /// History from the period preceding the window, for continuity.
    pub prior_shifts: Vec<ShiftAssignment>,
}

/// A finished schedule with its audit report.
#[derive(Debug, Clone)]
pub struct ScheduleResult {
    /// One assignment per (staff, date) pair.
    pub assignments: Vec<ShiftAssignment>,
    pub metrics: QualityMetrics,
    pub statistics: RunStatistics,
}

/// Facade over context construction, annealing and output assembly.
///
/// # Example
///
/// ```
/// use rotaplan_config::EngineConfig;
/// use rotaplan_core::{ScheduleWindow, Staff, StaffCategory, StaffId};
/// use rotaplan_solver::{ScheduleEngine, ScheduleRequest};
///
/// let config = EngineConfig::new().with_random_seed(1).with_max_iterations(50);
/// let engine = ScheduleEngine::new(config).unwrap();
///
/// let start = chrono::NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let end = chrono::NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let request = ScheduleRequest {
///     staff: (1..=3)
///         .map(|i| Staff::full_time(StaffId(i), format!("Nurse {i}"), StaffCategory::Nurse, "Medicine"))
///         .collect(),
///     window: ScheduleWindow::new(start, end).unwrap(),
///     category: StaffCategory::Nurse,
///     vacations: vec![],
///     prior_shifts: vec![],
/// };
///
/// let result = engine.generate(&request).unwrap();
/// assert_eq!(result.assignments.len(), 21);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    config: EngineConfig,
}

impl ScheduleEngine {
    /// Creates an engine, rejecting configurations it cannot run with.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates a schedule, bounded only by the iteration budget.
    pub fn generate(&self, request: &ScheduleRequest) -> Result<ScheduleResult, ScheduleError> {
        self.generate_with_termination(request, &NoTermination)
    }

    /// Generates a schedule with an early-termination condition checked
    /// once per iteration; cancellation yields the best-so-far schedule.
    pub fn generate_with_termination<T: Termination>(
        &self,
        request: &ScheduleRequest,
        termination: &T,
    ) -> Result<ScheduleResult, ScheduleError> {
        validate_vacations(&request.vacations)?;

        let eligible: Vec<Staff> = request
            .staff
            .iter()
            .filter(|s| s.category == request.category && s.category.is_schedulable())
            .cloned()
            .collect();
        if eligible.is_empty() {
            return Err(ScheduleError::EmptyRoster {
                category: request.category,
            });
        }

        let base_seed = self
            .config
            .random_seed
            .unwrap_or_else(|| rand::rng().random());

        let ctx = SolveContext::new(
            &eligible,
            &request.window,
            &request.vacations,
            &request.prior_shifts,
            self.config.policy,
            self.config.weights,
            base_seed,
        );
        let annealer = Annealer::new(&ctx, self.config.annealing);

        tracing::debug!(
            staff = eligible.len(),
            days = ctx.day_count(),
            restarts = self.config.restarts,
            seed = base_seed,
            "generating schedule"
        );

        let best = if self.config.restarts <= 1 {
            let mut rng = StdRng::seed_from_u64(base_seed);
            annealer.solve(&mut rng, termination)
        } else {
            // Independent restarts share no mutable state; each gets its
            // own seeded RNG and the highest overall quality wins.
            self.best_of_restarts(&ctx, &annealer, base_seed, termination)
        };

        let evaluator = Evaluator::new(&ctx);
        let metrics = evaluator.quality_metrics(&best.roster);

        tracing::debug!(
            overall_score = metrics.overall_score,
            iterations = best.statistics.iterations,
            "schedule ready"
        );

        Ok(ScheduleResult {
            assignments: best.roster.to_assignments(),
            metrics,
            statistics: best.statistics,
        })
    }

    fn best_of_restarts<T: Termination>(
        &self,
        ctx: &SolveContext,
        annealer: &Annealer<'_>,
        base_seed: u64,
        termination: &T,
    ) -> AnnealedSolution {
        let evaluator = Evaluator::new(ctx);
        (0..self.config.restarts as u64)
            .into_par_iter()
            .map(|restart| {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(restart));
                annealer.solve(&mut rng, termination)
            })
            .max_by(|a, b| {
                let a_score = evaluator.overall_quality(&a.breakdown);
                let b_score = evaluator.overall_quality(&b.breakdown);
                a_score
                    .partial_cmp(&b_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            // restarts >= 1 is enforced by config validation.
            .unwrap_or_else(|| {
                annealer.solve(&mut StdRng::seed_from_u64(base_seed), termination)
            })
    }
}

fn validate_vacations(vacations: &[Vacation]) -> Result<(), ScheduleError> {
    for vacation in vacations {
        if vacation.end < vacation.start {
            return Err(ScheduleError::InvalidVacation {
                staff_id: vacation.staff_id,
                start: vacation.start,
                end: vacation.end,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
