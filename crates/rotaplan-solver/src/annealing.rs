//! Simulated annealing driver.
//!
//! One invocation is strictly sequential: every iteration perturbs the
//! accepted state of the previous one. The RNG is owned by the
//! invocation and threaded explicitly through generation and mutation,
//! so concurrent invocations share no state.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;
use rotaplan_config::AnnealingConfig;
use rotaplan_core::Roster;

use crate::context::SolveContext;
use crate::evaluator::{Evaluator, ScoreBreakdown};
use crate::generator::build_initial_roster;
use crate::moves::mutate_neighbor;
use crate::repair::repair;
use crate::scope::SolveScope;
use crate::statistics::RunStatistics;
use crate::termination::Termination;

/// The best solution one annealing run produced, with its score and the
/// run's counters.
#[derive(Debug, Clone)]
pub struct AnnealedSolution {
    pub roster: Roster,
    pub breakdown: ScoreBreakdown,
    pub statistics: RunStatistics,
}

/// Maximizing simulated annealing over repaired rosters.
///
/// Classic Metropolis acceptance with `delta = new - current`: uphill
/// moves are always taken, downhill moves with probability
/// `exp(delta / temperature)`, and the temperature decays every
/// iteration whether or not the move was accepted.
#[derive(Debug, Clone)]
pub struct Annealer<'a> {
    ctx: &'a SolveContext,
    config: AnnealingConfig,
}

impl<'a> Annealer<'a> {
    pub fn new(ctx: &'a SolveContext, config: AnnealingConfig) -> Self {
        Self { ctx, config }
    }

    /// Runs one full annealing invocation.
    ///
    /// `termination` is checked once per iteration; on early termination
    /// the best solution found so far is returned (the search is anytime).
    pub fn solve<T: Termination>(&self, rng: &mut StdRng, termination: &T) -> AnnealedSolution {
        let started = Instant::now();
        let evaluator = Evaluator::new(self.ctx);

        // Init: dirty draw, repair, score.
        let mut current = build_initial_roster(self.ctx, rng);
        repair(&mut current, self.ctx);
        let mut current_breakdown = evaluator.evaluate(&current);
        let mut current_score = current_breakdown.total();

        let mut best = current.clone();
        let mut best_breakdown = current_breakdown;
        let mut best_score = current_score;

        let mut temperature = self.config.initial_temperature;
        let mut scope = SolveScope::start();
        let mut stats = RunStatistics::default();

        tracing::debug!(
            staff = self.ctx.staff_count(),
            days = self.ctx.day_count(),
            initial_score = current_score,
            "annealing started"
        );

        for iteration in 0..self.config.max_iterations {
            if termination.is_terminated(&scope) {
                tracing::debug!(iteration, best_score, "terminated early");
                break;
            }

            let mut neighbor = mutate_neighbor(&current, rng);
            repair(&mut neighbor, self.ctx);
            let neighbor_breakdown = evaluator.evaluate(&neighbor);
            let neighbor_score = neighbor_breakdown.total();
            stats.moves_evaluated += 1;

            let delta = neighbor_score - current_score;
            if delta > 0.0 || rng.random::<f64>() < metropolis(delta, temperature) {
                current = neighbor;
                current_breakdown = neighbor_breakdown;
                current_score = neighbor_score;
                stats.moves_accepted += 1;

                if current_score > best_score {
                    best = current.clone();
                    best_breakdown = current_breakdown;
                    best_score = current_score;
                    stats.improvements += 1;
                    tracing::trace!(iteration, best_score, "new best solution");
                }
            }

            // Cool regardless of acceptance.
            temperature *= self.config.cooling_rate;
            stats.iterations = iteration + 1;
            scope.advance(best_score);
        }

        stats.final_temperature = temperature;
        stats.duration = started.elapsed();

        tracing::debug!(
            iterations = stats.iterations,
            accepted = stats.moves_accepted,
            best_score,
            "annealing finished"
        );

        AnnealedSolution {
            roster: best,
            breakdown: best_breakdown,
            statistics: stats,
        }
    }
}

/// Acceptance probability for a non-improving move (`delta <= 0`).
#[inline]
fn metropolis(delta: f64, temperature: f64) -> f64 {
    (delta / temperature.max(f64::MIN_POSITIVE)).exp()
}
