//! Sample data export

use anyhow::Result;
use optimizer_lib::sample_records;

/// Print the built-in sample set as JSON, usable as a template input file
pub fn print_sample() -> Result<()> {
    let json = serde_json::to_string_pretty(&sample_records())?;
    println!("{}", json);
    Ok(())
}
