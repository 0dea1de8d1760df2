// src/simulation/engine.rs

use crate::model::plan::DayRecord;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("simulation horizon must cover at least one day")]
    EmptyHorizon,
    #[error("expected {expected} incoming stock entries, got {actual}")]
    StockLengthMismatch { expected: usize, actual: usize },
}

/// Day-by-day consumption of an allocation plan.
///
/// A single pool of stock carries across the horizon: each day's incoming
/// stock lands in the pool first, the day then draws up to its target, and
/// whatever is left stays in the pool for the next day. Days run strictly in
/// order because each day's pool depends on the previous day's leftover.
#[derive(Debug)]
pub struct ConsumptionSimulation {
    daily_targets: Vec<f64>,
    incoming_stocks: Vec<f64>,

    // Running pool of available stock, carried across days.
    pool: f64,
    current_day: usize,

    pub history: Vec<DayRecord>,
}

impl ConsumptionSimulation {
    pub fn new(
        daily_targets: Vec<f64>,
        incoming_stocks: Vec<f64>,
    ) -> Result<Self, SimulationError> {
        if daily_targets.is_empty() {
            return Err(SimulationError::EmptyHorizon);
        }
        if incoming_stocks.len() != daily_targets.len() {
            return Err(SimulationError::StockLengthMismatch {
                expected: daily_targets.len(),
                actual: incoming_stocks.len(),
            });
        }

        Ok(Self {
            daily_targets,
            incoming_stocks,
            pool: 0.0,
            current_day: 0,
            history: Vec::new(),
        })
    }

    pub fn run(&mut self) {
        while self.current_day < self.daily_targets.len() {
            self.step();
        }
    }

    fn step(&mut self) {
        let day = self.current_day;

        // Incoming stock lands before the day's draw.
        let incoming = self.incoming_stocks[day];
        self.pool += incoming;
        let pool_before = self.pool;

        let target = self.daily_targets[day];
        let used = target.min(pool_before);
        let left = pool_before - used;
        let shortage = (target - used).max(0.0);

        // The leftover is the pool the next day starts from.
        self.pool = left;

        self.history.push(DayRecord {
            day,
            incoming_stock: incoming,
            pool_before,
            target,
            used,
            left,
            shortage,
        });
        self.current_day += 1;
    }

    /// Total stock drawn from the pool across all days.
    pub fn total_used(&self) -> f64 {
        self.history.iter().map(|record| record.used).sum()
    }

    /// Total unmet target across all days.
    pub fn total_shortage(&self) -> f64 {
        self.history.iter().map(|record| record.shortage).sum()
    }

    /// Stock still in the pool after the last day.
    pub fn final_left(&self) -> f64 {
        self.history.last().map_or(0.0, |record| record.left)
    }
}
