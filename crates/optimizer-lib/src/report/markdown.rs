//! Markdown rendering of an optimization report

use super::{ApplicationAssessment, OptimizationReport};
use std::fmt::{self, Display, Formatter};

/// Text returned in place of a report when validation rejects the batch
pub const VALIDATION_FAILED_MESSAGE: &str = "Data validation failed. Please review and resubmit.";

const PREDICTED_DEMAND_FORMULA: &str =
    r"$$ \text{Predicted Demand} = \text{user_demand} \times \text{scaling_factor} $$";
const UTILIZATION_FORMULA: &str = r"$$ \text{Resource Utilization Ratio} = \frac{\text{Predicted Demand}}{\text{current_resources}} \times 100 $$";
const CAPACITY_MARGIN_FORMULA: &str = r"$$ \text{Capacity Margin} = \frac{(\text{max_capacity} - \text{current_resources})}{\text{max_capacity}} \times 100 $$";
const COMPOSITE_SCORE_FORMULA: &str = r"$$ \text{Composite Score} = (\text{Capacity Margin} \times 0.4) + ((100 - \text{Resource Utilization Ratio}) \times 0.6) $$";
const EFFICIENCY_FORMULA: &str =
    r"$$ \text{Efficiency Ratio} = \frac{\text{current_resources}}{\text{Predicted Demand}} $$";

/// Render the report as markdown
pub fn render_markdown(report: &OptimizationReport) -> String {
    MarkdownReport(report).to_string()
}

/// Format a float the way the report prints it: shortest round-trip form,
/// always with a fractional part (`54.0`, `98.57`)
pub fn format_float(value: f64) -> String {
    format!("{value:?}")
}

struct MarkdownReport<'a>(&'a OptimizationReport);

impl Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Cloud Resource Allocation Summary")?;
        writeln!(
            f,
            "- Total Applications Evaluated: {}",
            self.0.total_applications
        )?;
        writeln!(f)?;

        for assessment in &self.0.assessments {
            write_application(f, assessment)?;
        }
        Ok(())
    }
}

fn write_application(f: &mut Formatter<'_>, assessment: &ApplicationAssessment) -> fmt::Result {
    let record = &assessment.record;
    let metrics = &assessment.metrics;

    writeln!(f, "## Application {}", record.application_id)?;
    writeln!(f)?;
    writeln!(f, "### Input Data:")?;
    writeln!(f, " - Current Resources: {}", record.current_resources)?;
    writeln!(f, " - User Demand: {}", record.user_demand)?;
    writeln!(f, " - Maximum Capacity: {}", record.max_capacity)?;
    writeln!(
        f,
        " - Performance Threshold (%): {}",
        format_float(record.performance_threshold)
    )?;
    writeln!(f, " - Scaling Factor: {}", format_float(record.scaling_factor))?;
    writeln!(f)?;

    writeln!(f, "### Detailed Calculations:")?;
    writeln!(f)?;
    write_step(
        f,
        "1. Predicted Demand Calculation:",
        PREDICTED_DEMAND_FORMULA,
        "Final Predicted Demand",
        &format_float(metrics.predicted_demand),
    )?;
    write_step(
        f,
        "2. Resource Utilization Ratio Calculation:",
        UTILIZATION_FORMULA,
        "Final Resource Utilization Ratio",
        &format!("{}%", format_float(metrics.resource_utilization_ratio)),
    )?;
    write_step(
        f,
        "3. Capacity Margin Calculation:",
        CAPACITY_MARGIN_FORMULA,
        "Final Capacity Margin",
        &format!("{}%", format_float(metrics.capacity_margin)),
    )?;
    write_step(
        f,
        "4. Composite Resource Score Calculation:",
        COMPOSITE_SCORE_FORMULA,
        "Final Composite Score",
        &format_float(metrics.composite_score),
    )?;
    write_step(
        f,
        "5. Efficiency Ratio Calculation:",
        EFFICIENCY_FORMULA,
        "Final Efficiency Ratio",
        &format_float(metrics.efficiency_ratio),
    )?;

    writeln!(f, "### Final Recommendation:")?;
    writeln!(
        f,
        " - Composite Score: {}",
        format_float(metrics.composite_score)
    )?;
    writeln!(
        f,
        " - Resource Utilization Ratio: {}%",
        format_float(metrics.resource_utilization_ratio)
    )?;
    writeln!(
        f,
        " - Efficiency Ratio: {}",
        format_float(metrics.efficiency_ratio)
    )?;
    writeln!(f, " - Status: {}", metrics.recommendation)?;
    writeln!(f)
}

fn write_step(
    f: &mut Formatter<'_>,
    title: &str,
    formula: &str,
    label: &str,
    value: &str,
) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "   - Formula: {formula}")?;
    writeln!(f, "   - {label}: {value}")?;
    writeln!(f)
}
