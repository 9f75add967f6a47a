//! Early termination conditions for the annealing loop.
//!
//! The iteration budget always bounds a run; these conditions end it
//! sooner. The loop checks once per iteration and returns the best
//! solution found so far, so termination is always graceful.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::scope::SolveScope;

/// Decides when to stop an annealing run early.
pub trait Termination: Send + Sync {
    /// Returns true if solving should terminate.
    fn is_terminated(&self, scope: &SolveScope) -> bool;
}

/// Never terminates early; the iteration budget alone bounds the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn is_terminated(&self, _scope: &SolveScope) -> bool {
        false
    }
}

/// Terminates when an external flag is set.
///
/// Allows another thread to request cancellation by setting an
/// `AtomicBool`; the run returns its best-so-far solution.
///
/// # Example
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use rotaplan_solver::ExternalTermination;
///
/// let flag = AtomicBool::new(false);
/// let term = ExternalTermination::new(&flag);
///
/// // Later, from any thread: flag.store(true, Ordering::SeqCst);
/// ```
#[derive(Debug)]
pub struct ExternalTermination<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExternalTermination<'a> {
    /// Creates a termination that checks the given flag.
    pub fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }
}

impl Termination for ExternalTermination<'_> {
    fn is_terminated(&self, _scope: &SolveScope) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Terminates after a wall-clock time limit.
///
/// # Example
///
/// ```
/// use rotaplan_solver::TimeTermination;
///
/// let term = TimeTermination::seconds(30);
/// let term = TimeTermination::millis(500);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, scope: &SolveScope) -> bool {
        scope.elapsed() >= self.limit
    }
}

/// Terminates when either of two conditions does.
#[derive(Debug, Clone)]
pub struct OrTermination<A, B> {
    first: A,
    second: B,
}

impl<A, B> OrTermination<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Termination, B: Termination> Termination for OrTermination<A, B> {
    fn is_terminated(&self, scope: &SolveScope) -> bool {
        self.first.is_terminated(scope) || self.second.is_terminated(scope)
    }
}
