//! Optimization report command

use anyhow::{bail, Context, Result};
use optimizer_lib::report::VALIDATION_FAILED_MESSAGE;
use optimizer_lib::{load, render_markdown, OptimizationReport, OptimizerError, Reporter};
use std::path::Path;
use tabled::Tabled;

use crate::output::{
    color_efficiency, color_recommendation, color_score, format_generated_at, format_percent,
    print_error, print_warning, OutputFormat,
};

/// Row for the assessment summary table
#[derive(Tabled)]
struct AssessmentRow {
    #[tabled(rename = "Application")]
    application: String,
    #[tabled(rename = "Current")]
    current_resources: i64,
    #[tabled(rename = "Max")]
    max_capacity: i64,
    #[tabled(rename = "Pred. Demand")]
    predicted_demand: String,
    #[tabled(rename = "Utilization")]
    utilization: String,
    #[tabled(rename = "Margin")]
    capacity_margin: String,
    #[tabled(rename = "Score")]
    composite_score: String,
    #[tabled(rename = "Efficiency")]
    efficiency_ratio: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Load, validate and evaluate records, then print the report
///
/// Falls back to the sample set when `input` is missing or unreadable.
pub fn generate(input: Option<&Path>, format: OutputFormat) -> Result<()> {
    let records = load(input);

    let report = match Reporter::new().run(&records) {
        Ok(report) => report,
        Err(OptimizerError::Validation(err)) => {
            println!("{}", VALIDATION_FAILED_MESSAGE);
            print_error(&err.to_string());
            bail!("validation rejected the batch at row {}", err.index());
        }
        Err(err) => return Err(err).context("Failed to evaluate resource records"),
    };

    match format {
        OutputFormat::Markdown => {
            println!("Cloud Resource Optimization Report:");
            println!("{}", render_markdown(&report));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        OutputFormat::Table => print_summary(&report),
    }

    Ok(())
}

fn print_summary(report: &OptimizationReport) {
    if report.assessments.is_empty() {
        print_warning("No applications found");
        return;
    }

    let rows: Vec<AssessmentRow> = report
        .assessments
        .iter()
        .map(|a| AssessmentRow {
            application: a.record.application_id.clone(),
            current_resources: a.record.current_resources,
            max_capacity: a.record.max_capacity,
            predicted_demand: format!("{:.2}", a.metrics.predicted_demand),
            utilization: format_percent(a.metrics.resource_utilization_ratio),
            capacity_margin: format_percent(a.metrics.capacity_margin),
            composite_score: color_score(a.metrics.composite_score),
            efficiency_ratio: color_efficiency(a.metrics.efficiency_ratio),
            status: color_recommendation(a.metrics.recommendation),
        })
        .collect();

    let table = tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string();
    println!("{}", table);

    let optimal = report.optimal_count();
    println!(
        "\nTotal: {} applications ({} optimal, {} need adjustment)",
        report.total_applications,
        optimal,
        report.total_applications - optimal
    );
    println!("Generated: {}", format_generated_at(&report.generated_at));
}
