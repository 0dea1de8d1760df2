// src/io/stocks.rs

use rand::thread_rng;
use rand_distr::{Distribution, Normal};

/// Generates a schedule where the same amount of stock arrives every day.
/// Useful for steady-state checks.
#[allow(dead_code)]
pub fn constant_stocks(days: usize, value: f64) -> Vec<f64> {
    vec![value; days]
}

/// Generates a schedule with one big delivery up front and a trickle after
/// (e.g. 1000 units on day one, then 100 a day). The classic shape for a
/// weekly plan seeded from a large weekend delivery.
pub fn front_loaded_stocks(days: usize, first_day: f64, rest: f64) -> Vec<f64> {
    let mut schedule = Vec::new();
    for day in 0..days {
        if day == 0 {
            schedule.push(first_day);
        } else {
            schedule.push(rest);
        }
    }
    schedule
}

/// Generates a schedule of normally distributed daily deliveries.
///
/// # Arguments
/// * `days` - Length of the schedule.
/// * `mean` - The average delivery size (e.g. 150.0).
/// * `std_dev` - The standard deviation (volatility) (e.g. 30.0).
#[allow(dead_code)]
pub fn normal_stocks(days: usize, mean: f64, std_dev: f64) -> Vec<f64> {
    let mut rng = thread_rng();
    let normal = Normal::new(mean, std_dev).unwrap();

    let mut schedule = Vec::with_capacity(days);

    for _ in 0..days {
        // Sample the distribution and clamp negative draws to 0, since a
        // delivery cannot take stock away.
        let val: f64 = normal.sample(&mut rng);
        schedule.push(val.max(0.0));
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_stocks() {
        let schedule = constant_stocks(5, 120.0);
        assert_eq!(schedule.len(), 5);
        for value in &schedule {
            assert_eq!(*value, 120.0);
        }
    }

    #[test]
    fn test_front_loaded_stocks() {
        let schedule = front_loaded_stocks(7, 1000.0, 100.0);
        assert_eq!(schedule.len(), 7);
        assert_eq!(schedule[0], 1000.0);
        for value in &schedule[1..] {
            assert_eq!(*value, 100.0);
        }
    }

    #[test]
    fn test_normal_stocks_are_non_negative() {
        let schedule = normal_stocks(100, 50.0, 40.0);
        assert_eq!(schedule.len(), 100);
        for value in &schedule {
            assert!(*value >= 0.0);
        }
    }
}
