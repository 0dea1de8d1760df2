// src/planner/solver.rs

/// Solver for the even-allocation problem.
///
/// The plan should keep every day close to the daily average:
///
/// minimize   sum_i (x[i] - average)^2
/// subject to sum_i x[i] = total_demand
///            x[i] >= lower_bound[i]
///
/// This is a convex quadratic program with a single linear equality, solved
/// with an active-set iteration. Days pinned at their lower bound form the
/// working set; the objective pulls all remaining days to one shared level,
/// so the subproblem on a working set has a closed-form solution. Any free
/// day whose bound sits above the shared level gets pinned for the next
/// round.
///
/// Starting from the uniform guess (nothing pinned), pinning a day can only
/// lower the shared level of the rest, so pinned days never need to be
/// released and the loop settles in at most `n_days` rounds.
use crate::model::plan::AllocationPlan;
use crate::planner::problem::AllocationProblem;
use thiserror::Error;

/// Slack used when comparing a target against its lower bound.
const BOUND_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("allocation horizon must cover at least one day")]
    EmptyHorizon,
    #[error("total demand must be finite and non-negative, got {0}")]
    InvalidDemand(f64),
    #[error("day {day} has a non-finite minimum ({value})")]
    InvalidMinimum { day: usize, value: f64 },
    #[error("expected {expected} day minimums, got {actual}")]
    MinimumsLengthMismatch { expected: usize, actual: usize },
    #[error("day minimums require {required:.2} units but only {available:.2} are allocated")]
    Infeasible { required: f64, available: f64 },
    #[error("solver did not settle within {limit} rounds")]
    MaxIterationsExceeded { limit: usize },
}

/// Squared deviation of the targets from the daily average.
///
/// This is the quantity the solver minimizes; exposed so callers and tests
/// can compare candidate plans.
pub fn deviation_cost(targets: &[f64], daily_average: f64) -> f64 {
    targets
        .iter()
        .map(|x| (x - daily_average) * (x - daily_average))
        .sum()
}

/// Shared level for the days not pinned at their bound, chosen so the plan
/// sums to the total demand. Closed-form optimum of the equality-constrained
/// subproblem: the quadratic pulls every free day to a common value.
fn free_day_level(total_demand: f64, pinned_sum: f64, free_days: usize) -> f64 {
    (total_demand - pinned_sum) / free_days as f64
}

fn validate(problem: &AllocationProblem) -> Result<(), PlanError> {
    if problem.n_days == 0 {
        return Err(PlanError::EmptyHorizon);
    }
    if !problem.total_demand.is_finite() || problem.total_demand < 0.0 {
        return Err(PlanError::InvalidDemand(problem.total_demand));
    }
    if let Some(minimums) = &problem.day_minimums {
        if minimums.len() != problem.n_days {
            return Err(PlanError::MinimumsLengthMismatch {
                expected: problem.n_days,
                actual: minimums.len(),
            });
        }
        for (day, &value) in minimums.iter().enumerate() {
            if !value.is_finite() {
                return Err(PlanError::InvalidMinimum { day, value });
            }
        }
    }
    Ok(())
}

/// Computes the allocation plan for a validated problem.
///
/// Returns an explicit error instead of a possibly-infeasible vector: bad
/// inputs are rejected up front, minimums that exceed the demand report
/// `Infeasible`, and a solve that fails to settle reports
/// `MaxIterationsExceeded`.
pub fn solve(problem: &AllocationProblem) -> Result<AllocationPlan, PlanError> {
    validate(problem)?;

    let n_days = problem.n_days;
    let bounds: Vec<f64> = (0..n_days).map(|day| problem.lower_bound(day)).collect();

    let required: f64 = bounds.iter().sum();
    let slack = BOUND_TOLERANCE * required.max(1.0);
    if required > problem.total_demand + slack {
        return Err(PlanError::Infeasible {
            required,
            available: problem.total_demand,
        });
    }

    // Initial guess: the uniform plan, no bound active.
    let mut pinned = vec![false; n_days];
    let mut targets = vec![problem.daily_average(); n_days];

    let limit = n_days + 1;
    for round in 1..=limit {
        let pinned_sum: f64 = bounds
            .iter()
            .zip(&pinned)
            .filter(|&(_, &active)| active)
            .map(|(bound, _)| bound)
            .sum();
        let free_days = pinned.iter().filter(|&&active| !active).count();

        if free_days == 0 {
            // Every day sits at its bound; the feasibility check above
            // guarantees the bounds add up to the demand within tolerance.
            return Ok(AllocationPlan {
                daily_targets: bounds.clone(),
                iterations: round,
            });
        }

        let level = free_day_level(problem.total_demand, pinned_sum, free_days);

        let mut pinned_this_round = false;
        for day in 0..n_days {
            if pinned[day] {
                continue;
            }
            if bounds[day] > level + BOUND_TOLERANCE {
                pinned[day] = true;
                targets[day] = bounds[day];
                pinned_this_round = true;
            } else {
                targets[day] = level;
            }
        }

        if !pinned_this_round {
            return Ok(AllocationPlan {
                daily_targets: targets,
                iterations: round,
            });
        }
    }

    Err(PlanError::MaxIterationsExceeded { limit })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_unconstrained_plan_is_uniform() {
        let problem = AllocationProblem::new(1200.0, 7);
        let plan = solve(&problem).unwrap();

        assert_eq!(plan.daily_targets.len(), 7);
        for target in &plan.daily_targets {
            assert!(close(*target, 1200.0 / 7.0));
        }
        assert!(close(plan.total(), 1200.0));
        assert_eq!(plan.iterations, 1);
    }

    #[test]
    fn test_minimums_are_respected_and_sum_holds() {
        let minimums = vec![100.0, 150.0, 200.0, 150.0, 100.0, 150.0, 150.0];
        let problem = AllocationProblem::new(1200.0, 7).with_day_minimums(minimums.clone());
        let plan = solve(&problem).unwrap();

        assert!(close(plan.total(), 1200.0));
        for (target, minimum) in plan.daily_targets.iter().zip(&minimums) {
            assert!(*target >= *minimum - 1e-6);
        }

        // Only the 200-unit day is pushed off the shared level; the other
        // six days split the remaining 1000 units evenly.
        assert!(close(plan.daily_targets[2], 200.0));
        for (day, target) in plan.daily_targets.iter().enumerate() {
            if day != 2 {
                assert!(close(*target, 1000.0 / 6.0));
            }
        }
    }

    #[test]
    fn test_negative_minimum_degrades_to_plain_bound() {
        let problem =
            AllocationProblem::new(300.0, 3).with_day_minimums(vec![-50.0, 0.0, 0.0]);
        let plan = solve(&problem).unwrap();

        for target in &plan.daily_targets {
            assert!(close(*target, 100.0));
        }
    }

    #[test]
    fn test_minimums_above_demand_are_infeasible() {
        let problem =
            AllocationProblem::new(500.0, 3).with_day_minimums(vec![200.0, 200.0, 200.0]);
        let err = solve(&problem).unwrap_err();

        assert_eq!(
            err,
            PlanError::Infeasible {
                required: 600.0,
                available: 500.0
            }
        );
    }

    #[test]
    fn test_minimums_exactly_at_demand_pin_every_day() {
        let minimums = vec![100.0, 200.0, 300.0];
        let problem = AllocationProblem::new(600.0, 3).with_day_minimums(minimums.clone());
        let plan = solve(&problem).unwrap();

        assert_eq!(plan.daily_targets, minimums);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert_eq!(
            solve(&AllocationProblem::new(100.0, 0)).unwrap_err(),
            PlanError::EmptyHorizon
        );
        assert_eq!(
            solve(&AllocationProblem::new(-1.0, 7)).unwrap_err(),
            PlanError::InvalidDemand(-1.0)
        );
        assert!(matches!(
            solve(&AllocationProblem::new(f64::NAN, 7)).unwrap_err(),
            PlanError::InvalidDemand(_)
        ));
        assert_eq!(
            solve(&AllocationProblem::new(100.0, 3).with_day_minimums(vec![10.0, 10.0]))
                .unwrap_err(),
            PlanError::MinimumsLengthMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert!(matches!(
            solve(
                &AllocationProblem::new(100.0, 2)
                    .with_day_minimums(vec![10.0, f64::INFINITY])
            )
            .unwrap_err(),
            PlanError::InvalidMinimum { day: 1, .. }
        ));
    }

    #[test]
    fn test_zero_demand_yields_zero_plan() {
        let plan = solve(&AllocationProblem::new(0.0, 5)).unwrap();
        for target in &plan.daily_targets {
            assert_eq!(*target, 0.0);
        }
    }

    #[test]
    fn test_single_day_takes_everything() {
        let plan = solve(&AllocationProblem::new(100.0, 1)).unwrap();
        assert_eq!(plan.daily_targets, vec![100.0]);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let problem = AllocationProblem::new(1200.0, 7)
            .with_day_minimums(vec![100.0, 150.0, 200.0, 150.0, 100.0, 150.0, 150.0]);
        let first = solve(&problem).unwrap();
        let second = solve(&problem).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_perturbing_the_plan_raises_the_cost() {
        let problem = AllocationProblem::new(1200.0, 7)
            .with_day_minimums(vec![100.0, 150.0, 200.0, 150.0, 100.0, 150.0, 150.0]);
        let plan = solve(&problem).unwrap();
        let average = problem.daily_average();

        let base_cost = deviation_cost(&plan.daily_targets, average);

        // Shift a unit between two free days; the sum constraint still holds
        // but the plan moves away from the optimum.
        let mut shifted = plan.daily_targets.clone();
        shifted[0] += 1.0;
        shifted[1] -= 1.0;
        assert!(deviation_cost(&shifted, average) > base_cost);
    }
}
