// src/model/plan.rs

use serde::Serialize;

/// A finished allocation plan: how much stock to set aside on each day.
///
/// Produced by the planner; the targets add up to the total demand and every
/// target respects its day's lower bound.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationPlan {
    /// Target quantity per day, first day first.
    pub daily_targets: Vec<f64>,
    /// Rounds the solver needed to settle.
    pub iterations: usize,
}

impl AllocationPlan {
    /// Sum of all daily targets.
    pub fn total(&self) -> f64 {
        self.daily_targets.iter().sum()
    }
}

// We make this Serialize so we can write it to CSV later
#[derive(Debug, Clone, Serialize)]
pub struct DayRecord {
    pub day: usize,
    pub incoming_stock: f64,
    pub pool_before: f64,
    pub target: f64,
    pub used: f64,
    pub left: f64,
    pub shortage: f64,
}
