//! Quality metrics reported with a finished schedule.
//!
//! Derived once from the final accepted solution for display and audit;
//! never consulted by the search itself.

use serde::{Deserialize, Serialize};

/// Min/max/average of a per-staff load distribution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadSummary {
    pub min: u32,
    pub max: u32,
    pub avg: f64,
}

impl LoadSummary {
    /// Summarizes per-staff counts; an empty slice yields all zeros.
    pub fn from_counts(counts: &[u32]) -> Self {
        if counts.is_empty() {
            return Self::default();
        }
        let min = counts.iter().copied().min().unwrap_or(0);
        let max = counts.iter().copied().max().unwrap_or(0);
        let avg = counts.iter().map(|&c| c as f64).sum::<f64>() / counts.len() as f64;
        Self { min, max, avg }
    }
}

/// Structured quality report for a finished schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub morning_count: usize,
    pub afternoon_count: usize,
    pub night_count: usize,
    pub rest_count: usize,
    pub leave_count: usize,
    /// Working days per staff member (Rest and Leave excluded).
    pub workload: LoadSummary,
    /// Working Saturdays/Sundays per staff member.
    pub weekend_load: LoadSummary,
    /// Adjacent-day pairs where a Night shift is followed by a Morning shift.
    pub night_to_morning_violations: usize,
    /// Overall schedule quality, clamped to `[0, 100]`.
    pub overall_score: f64,
}
