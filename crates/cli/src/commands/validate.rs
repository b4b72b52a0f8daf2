//! Input validation command

use anyhow::{bail, Context, Result};
use optimizer_lib::{load_strict, ValidationReport, Validator};
use std::path::Path;
use tabled::Tabled;

use crate::output::{print_error, print_success, OutputFormat};

/// Row for the per-field acceptance table
#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Accepted")]
    accepted: String,
}

/// Validate an input file without computing metrics
///
/// Unlike the report command this never falls back to the sample set.
pub fn check(input: &Path, format: OutputFormat) -> Result<()> {
    let records = load_strict(input)
        .with_context(|| format!("Failed to load records from {}", input.display()))?;

    let report = Validator::new().report(&records);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        OutputFormat::Table | OutputFormat::Markdown => print_fields(&report),
    }

    match &report.error {
        None => {
            if format != OutputFormat::Json {
                print_success(&format!(
                    "{} applications passed validation",
                    report.total_applications
                ));
            }
            Ok(())
        }
        Some(err) => {
            print_error(&err.to_string());
            bail!("{} failed validation", input.display());
        }
    }
}

fn print_fields(report: &ValidationReport) {
    let rows: Vec<FieldRow> = report
        .fields_check
        .iter()
        .map(|(field, accepted)| FieldRow {
            field: field.clone(),
            accepted: format!("{}/{}", accepted, report.total_applications),
        })
        .collect();

    let table = tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string();
    println!("{}", table);
}
