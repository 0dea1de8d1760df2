// src/planner/problem.rs

/// One week's allocation problem.
///
/// A fixed total demand has to be spread over `n_days` so that every day
/// stays as close as possible to the daily average. Optionally each day
/// carries a minimum (stock already committed to that day) the plan must not
/// dip below.
#[derive(Debug, Clone)]
pub struct AllocationProblem {
    /// Total quantity to distribute across the horizon.
    pub total_demand: f64,
    /// Number of allocation days (e.g. 7 for a week).
    pub n_days: usize,
    /// Per-day lower bounds; `None` means only the plain `>= 0` bound.
    pub day_minimums: Option<Vec<f64>>,
}

impl AllocationProblem {
    pub fn new(total_demand: f64, n_days: usize) -> Self {
        Self {
            total_demand,
            n_days,
            day_minimums: None,
        }
    }

    /// Adds per-day minimums the plan must not dip below.
    pub fn with_day_minimums(mut self, minimums: Vec<f64>) -> Self {
        self.day_minimums = Some(minimums);
        self
    }

    /// The uniform target every day is pulled towards.
    pub fn daily_average(&self) -> f64 {
        self.total_demand / self.n_days as f64
    }

    /// Effective lower bound for one day.
    ///
    /// A day keeps the plain non-negativity bound even when its listed
    /// minimum is negative, so the bound is `max(0, minimum)`.
    pub fn lower_bound(&self, day: usize) -> f64 {
        match &self.day_minimums {
            Some(minimums) => minimums.get(day).copied().unwrap_or(0.0).max(0.0),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_average() {
        let problem = AllocationProblem::new(1200.0, 7);
        assert!((problem.daily_average() - 1200.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_lower_bound_defaults_to_zero() {
        let problem = AllocationProblem::new(100.0, 4);
        for day in 0..4 {
            assert_eq!(problem.lower_bound(day), 0.0);
        }
    }

    #[test]
    fn test_negative_minimum_clamps_to_zero() {
        let problem =
            AllocationProblem::new(100.0, 3).with_day_minimums(vec![-5.0, 10.0, 0.0]);
        assert_eq!(problem.lower_bound(0), 0.0);
        assert_eq!(problem.lower_bound(1), 10.0);
        assert_eq!(problem.lower_bound(2), 0.0);
    }
}
