// src/io/reporting.rs

use crate::model::plan::DayRecord;
use std::error::Error;
use std::path::Path;

/// Writes the simulation history to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/plan_1.csv").
/// * `data` - The vector of day records from the consumption simulation.
pub fn write_plan_log(file_path: &str, data: &[DayRecord]) -> Result<(), Box<dyn Error>> {
    let path = Path::new(file_path);

    // Create a CSV writer builder
    let mut wtr = csv::Writer::from_path(path)?;

    // Serialize and write each record
    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    println!(
        "Successfully exported {} rows to '{}'",
        data.len(),
        file_path
    );
    Ok(())
}
