mod io;
mod model;
mod planner;
mod simulation;

use crate::io::reporting;
use crate::io::stocks;
use crate::planner::problem::AllocationProblem;
use crate::planner::solver;
use crate::simulation::engine::ConsumptionSimulation;

fn main() {
    println!("=== Weekly Stock Allocation Planner ===");

    // 1. SETUP PROBLEM
    // 1200 units of demand spread over a 7-day week.
    let n_days = 7;
    let total_demand = 1200.0;
    let problem = AllocationProblem::new(total_demand, n_days);

    // 2. SOLVE THE ALLOCATION
    let plan = match solver::solve(&problem) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Planning failed: {}", e);
            return;
        }
    };
    println!("Daily targets: {:?}", rounded(&plan.daily_targets));
    println!("Solver settled in {} round(s)", plan.iterations);
    println!(
        "Deviation from daily average: {:.4}",
        solver::deviation_cost(&plan.daily_targets, problem.daily_average())
    );

    // 3. SIMULATE CONSUMPTION
    // The classic scenario: a 1000-unit delivery on day one, 100 a day after.
    let incoming = stocks::front_loaded_stocks(n_days, 1000.0, 100.0);
    println!("Incoming stocks: {:?}", incoming);

    let mut sim = match ConsumptionSimulation::new(plan.daily_targets.clone(), incoming) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Simulation setup failed: {}", e);
            return;
        }
    };
    sim.run();

    // 4. EXPORT RESULTS
    let output_file = "allocation_results.csv";
    match reporting::write_plan_log(output_file, &sim.history) {
        Ok(_) => println!("Success! Data written to ./{}", output_file),
        Err(e) => eprintln!("Error writing CSV: {}", e),
    }

    // 5. PRINT USAGE ANALYSIS
    println!("\n=== Usage Analysis ===");
    for record in &sim.history {
        println!(
            "Day {}: target {:.2}, used {:.2}, left {:.2}, shortage {:.2}",
            record.day + 1,
            record.target,
            record.used,
            record.left,
            record.shortage
        );
    }
    println!("Total Stocks Needed: {:.2}", total_demand);
    println!("Total Stocks Used: {:.2}", sim.total_used());
    println!("Total Shortage: {:.2}", sim.total_shortage());
    println!("Left In Pool: {:.2}", sim.final_left());
    println!("Difference: {:.2}", total_demand - sim.total_used());

    // 6. VARIANT: PER-DAY MINIMUMS
    // Each day already holds committed stock the plan must not dip below.
    let minimums = vec![100.0, 150.0, 200.0, 150.0, 100.0, 150.0, 150.0];
    println!("\n=== Plan With Day Minimums ===");
    println!("Day minimums: {:?}", minimums);

    let bounded = AllocationProblem::new(total_demand, n_days).with_day_minimums(minimums);
    match solver::solve(&bounded) {
        Ok(plan) => {
            println!("Daily targets: {:?}", rounded(&plan.daily_targets));
            println!("Plan total: {:.2}", plan.total());
        }
        Err(e) => eprintln!("Planning failed: {}", e),
    }

    println!("\nPlanning Complete.");
}

/// Two-decimal view of a plan for printing.
fn rounded(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| (v * 100.0).round() / 100.0).collect()
}
