//! Report assembly
//!
//! Evaluation produces structured per-application values; rendering them
//! as text lives in [`markdown`].

mod markdown;

pub use markdown::{format_float, render_markdown, VALIDATION_FAILED_MESSAGE};

use crate::error::{MetricsError, OptimizerResult};
use crate::metrics::MetricsCalculator;
use crate::models::{MetricsResult, RawRecord, ValidatedRecord};
use crate::observability::{OptimizerMetrics, StructuredLogger};
use crate::validation::{ValidatedBatch, ValidationReport, Validator};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One application's normalized input and its derived metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationAssessment {
    pub record: ValidatedRecord,
    pub metrics: MetricsResult,
}

/// Full result of evaluating a validated batch
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    pub total_applications: usize,
    pub generated_at: DateTime<Utc>,
    pub validation: ValidationReport,
    pub assessments: Vec<ApplicationAssessment>,
}

impl OptimizationReport {
    /// Number of applications whose allocation is already optimal
    pub fn optimal_count(&self) -> usize {
        self.assessments
            .iter()
            .filter(|a| a.metrics.recommendation.is_optimal())
            .count()
    }
}

/// Runs validation and metrics over a batch of records
#[derive(Clone, Default)]
pub struct Reporter {
    validator: Validator,
    calculator: MetricsCalculator,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every record of an already validated batch, in input order
    pub fn evaluate(&self, batch: ValidatedBatch) -> Result<OptimizationReport, MetricsError> {
        let assessments = batch
            .records
            .into_iter()
            .map(|record| {
                let metrics = self.calculator.calculate(&record)?;
                Ok(ApplicationAssessment { record, metrics })
            })
            .collect::<Result<Vec<_>, MetricsError>>()?;

        let report = OptimizationReport {
            total_applications: batch.report.total_applications,
            generated_at: Utc::now(),
            validation: batch.report,
            assessments,
        };

        OptimizerMetrics::new().inc_reports_generated();
        StructuredLogger::new("reporter")
            .log_report_generated(report.total_applications, report.optimal_count());

        Ok(report)
    }

    /// Validate raw records and evaluate them
    pub fn run(&self, records: &[RawRecord]) -> OptimizerResult<OptimizationReport> {
        let batch = self.validator.validate(records)?;
        Ok(self.evaluate(batch)?)
    }
}

/// Validate, evaluate and render records as a markdown report
///
/// Any failure collapses to the fixed validation failure message; the cause
/// is emitted through tracing.
pub fn generate_report(records: &[RawRecord]) -> String {
    match Reporter::new().run(records) {
        Ok(report) => render_markdown(&report),
        Err(err) => {
            tracing::warn!(error = %err, "Report generation aborted");
            VALIDATION_FAILED_MESSAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptimizerError;
    use crate::loader::sample_records;
    use crate::models::Recommendation;

    #[test]
    fn test_run_sample_set() {
        let report = Reporter::new().run(&sample_records()).unwrap();

        assert_eq!(report.total_applications, 10);
        assert_eq!(report.assessments.len(), 10);
        assert!(report.validation.is_valid);
        assert_eq!(report.optimal_count(), 0);
        assert_eq!(report.assessments[0].record.application_id, "AppAlpha");
        assert_eq!(
            report.assessments[0].metrics.recommendation,
            Recommendation::NeedsAdjustment
        );
    }

    #[test]
    fn test_run_rejects_invalid_batch() {
        let mut records = sample_records();
        records[4].scaling_factor = None;

        let err = Reporter::new().run(&records).unwrap_err();
        assert!(matches!(err, OptimizerError::Validation(_)));
    }

    #[test]
    fn test_generate_report_failure_message() {
        let mut records = sample_records();
        records[0].performance_threshold = Some(serde_json::json!(150));

        assert_eq!(
            generate_report(&records),
            "Data validation failed. Please review and resubmit."
        );
    }

    #[test]
    fn test_evaluate_surfaces_division_by_zero() {
        let batch = ValidatedBatch {
            records: vec![ValidatedRecord {
                application_id: "AppTiny".to_string(),
                current_resources: 10,
                user_demand: 1,
                max_capacity: 20,
                performance_threshold: 50.0,
                scaling_factor: 0.001,
            }],
            report: Validator::new().report(&[]),
        };

        let err = Reporter::new().evaluate(batch).unwrap_err();
        assert!(matches!(err, MetricsError::DivisionByZero { .. }));
    }
}
