//! Batch validation of resource records
//!
//! Validation is all-or-nothing: records are checked in input order and the
//! first offending record fails the whole batch. Each record goes through
//! three stages:
//! - required fields are present and non-null
//! - numeric fields coerce to their canonical types
//! - coerced values fall within their legal ranges
//!
//! Successful validation yields new [`ValidatedRecord`] values; the caller's
//! raw records are never modified.

mod coerce;

pub use coerce::{coerce_float, coerce_integer, display_identifier};

use crate::error::ValidationError;
use crate::models::{RawRecord, ValidatedRecord, REQUIRED_FIELDS};
use crate::observability::{OptimizerMetrics, StructuredLogger};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Outcome summary for a validated batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Number of records in the input batch
    pub total_applications: usize,
    /// Per-field count of examined records whose value was accepted
    pub fields_check: BTreeMap<String, usize>,
    pub is_valid: bool,
    /// First failure, if the batch was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
}

impl ValidationReport {
    fn new(total_applications: usize) -> Self {
        Self {
            total_applications,
            fields_check: REQUIRED_FIELDS
                .iter()
                .map(|name| (name.to_string(), 0))
                .collect(),
            is_valid: true,
            error: None,
        }
    }

    fn accept(&mut self, field: &str) {
        if let Some(count) = self.fields_check.get_mut(field) {
            *count += 1;
        }
    }
}

/// Normalized records together with the report that admitted them
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBatch {
    pub records: Vec<ValidatedRecord>,
    pub report: ValidationReport,
}

impl ValidatedBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Validates batches and records instrumentation for each run
#[derive(Clone)]
pub struct Validator {
    metrics: OptimizerMetrics,
    logger: StructuredLogger,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            metrics: OptimizerMetrics::new(),
            logger: StructuredLogger::new("validator"),
        }
    }

    /// Validate a batch, returning normalized records on success
    pub fn validate(&self, records: &[RawRecord]) -> Result<ValidatedBatch, ValidationError> {
        let (report, outcome) = self.run(records);
        outcome.map(|records| ValidatedBatch { records, report })
    }

    /// Validate a batch and return only the report
    ///
    /// Unlike [`Validator::validate`] this never fails; rejection is encoded
    /// in `is_valid` and `error`.
    pub fn report(&self, records: &[RawRecord]) -> ValidationReport {
        self.run(records).0
    }

    fn run(
        &self,
        records: &[RawRecord],
    ) -> (ValidationReport, Result<Vec<ValidatedRecord>, ValidationError>) {
        let mut report = ValidationReport::new(records.len());
        let mut validated = Vec::with_capacity(records.len());

        for (offset, record) in records.iter().enumerate() {
            let index = offset + 1;
            match check_record(index, record, &mut report) {
                Ok(normalized) => validated.push(normalized),
                Err(err) => {
                    self.metrics.inc_validation_failures(err.kind());
                    self.logger.log_validation_failed(&err, records.len());
                    report.is_valid = false;
                    report.error = Some(err.clone());
                    return (report, Err(err));
                }
            }
        }

        self.metrics.add_records_validated(validated.len() as u64);
        self.logger.log_validation_passed(validated.len());
        (report, Ok(validated))
    }
}

/// Validate a batch with a default [`Validator`]
pub fn validate(records: &[RawRecord]) -> Result<ValidatedBatch, ValidationError> {
    Validator::new().validate(records)
}

/// Per-field check outcome used to pick the first failure by stage
enum FieldOutcome {
    Integer(i64),
    Float(f64),
    Identifier(String),
    Missing,
    InvalidNumeric,
    OutOfRange(f64),
}

fn check_record(
    index: usize,
    record: &RawRecord,
    report: &mut ValidationReport,
) -> Result<ValidatedRecord, ValidationError> {
    let outcomes: Vec<(&str, FieldOutcome)> = REQUIRED_FIELDS
        .iter()
        .map(|name| (*name, check_field(name, record.field(name))))
        .collect();

    for (name, outcome) in &outcomes {
        if !matches!(
            outcome,
            FieldOutcome::Missing | FieldOutcome::InvalidNumeric | FieldOutcome::OutOfRange(_)
        ) {
            report.accept(name);
        }
    }

    let missing: Vec<String> = outcomes
        .iter()
        .filter(|(_, outcome)| matches!(outcome, FieldOutcome::Missing))
        .map(|(name, _)| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields {
            index,
            fields: missing,
        });
    }

    if let Some((name, _)) = outcomes
        .iter()
        .find(|(_, outcome)| matches!(outcome, FieldOutcome::InvalidNumeric))
    {
        return Err(ValidationError::InvalidNumeric {
            index,
            field: name.to_string(),
        });
    }

    if let Some((name, value)) = outcomes.iter().find_map(|(name, outcome)| match outcome {
        FieldOutcome::OutOfRange(value) => Some((name, *value)),
        _ => None,
    }) {
        return Err(ValidationError::OutOfRange {
            index,
            field: name.to_string(),
            value,
        });
    }

    let mut application_id = String::new();
    let mut integers = [0_i64; 3];
    let mut floats = [0_f64; 2];
    for (name, outcome) in outcomes {
        match (name, outcome) {
            (_, FieldOutcome::Identifier(id)) => application_id = id,
            ("current_resources", FieldOutcome::Integer(v)) => integers[0] = v,
            ("user_demand", FieldOutcome::Integer(v)) => integers[1] = v,
            ("max_capacity", FieldOutcome::Integer(v)) => integers[2] = v,
            ("performance_threshold", FieldOutcome::Float(v)) => floats[0] = v,
            ("scaling_factor", FieldOutcome::Float(v)) => floats[1] = v,
            _ => {}
        }
    }

    Ok(ValidatedRecord {
        application_id,
        current_resources: integers[0],
        user_demand: integers[1],
        max_capacity: integers[2],
        performance_threshold: floats[0],
        scaling_factor: floats[1],
    })
}

fn check_field(name: &str, value: Option<&Value>) -> FieldOutcome {
    let Some(value) = value else {
        return FieldOutcome::Missing;
    };

    match name {
        "current_resources" | "user_demand" | "max_capacity" => match coerce_integer(value) {
            Some(v) if v > 0 => FieldOutcome::Integer(v),
            Some(v) => FieldOutcome::OutOfRange(v as f64),
            None => FieldOutcome::InvalidNumeric,
        },
        "scaling_factor" => match coerce_float(value) {
            Some(v) if v > 0.0 => FieldOutcome::Float(v),
            Some(v) => FieldOutcome::OutOfRange(v),
            None => FieldOutcome::InvalidNumeric,
        },
        "performance_threshold" => match coerce_float(value) {
            Some(v) if (0.0..=100.0).contains(&v) => FieldOutcome::Float(v),
            Some(v) => FieldOutcome::OutOfRange(v),
            None => FieldOutcome::InvalidNumeric,
        },
        _ => FieldOutcome::Identifier(display_identifier(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    fn alpha() -> serde_json::Value {
        json!({
            "application_id": "AppAlpha",
            "current_resources": 50,
            "user_demand": 45,
            "max_capacity": 100,
            "performance_threshold": 75,
            "scaling_factor": 1.2
        })
    }

    #[test]
    fn test_valid_batch_is_normalized() {
        let raw = record(json!({
            "application_id": "AppStr",
            "current_resources": "50",
            "user_demand": 45.9,
            "max_capacity": "100",
            "performance_threshold": "75",
            "scaling_factor": "1.2"
        }));

        let batch = validate(&[raw.clone()]).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(
            batch.records[0],
            ValidatedRecord {
                application_id: "AppStr".to_string(),
                current_resources: 50,
                user_demand: 45,
                max_capacity: 100,
                performance_threshold: 75.0,
                scaling_factor: 1.2,
            }
        );
        assert!(batch.report.is_valid);
        assert_eq!(batch.report.total_applications, 1);
        assert_eq!(batch.report.fields_check["scaling_factor"], 1);

        // input is left untouched
        assert_eq!(raw.current_resources, Some(json!("50")));
    }

    #[test]
    fn test_missing_scaling_factor_reports_index() {
        let mut second = alpha();
        second.as_object_mut().unwrap().remove("scaling_factor");
        let mut third = alpha();
        third["current_resources"] = json!(0);

        let records = vec![record(alpha()), record(second), record(third)];
        let err = validate(&records).unwrap_err();

        assert_eq!(
            err,
            ValidationError::MissingFields {
                index: 2,
                fields: vec!["scaling_factor".to_string()],
            }
        );
    }

    #[test]
    fn test_later_records_are_not_evaluated() {
        let mut second = alpha();
        second["user_demand"] = json!("lots");
        let mut third = alpha();
        third["application_id"] = json!(null);

        let records = vec![record(alpha()), record(second), record(third)];
        let report = Validator::new().report(&records);

        assert!(!report.is_valid);
        assert_eq!(report.total_applications, 3);
        assert_eq!(report.fields_check["application_id"], 2);
        assert_eq!(report.fields_check["user_demand"], 1);
        assert!(matches!(
            report.error,
            Some(ValidationError::InvalidNumeric { index: 2, .. })
        ));
    }

    #[test]
    fn test_zero_current_resources_out_of_range() {
        let mut raw = alpha();
        raw["current_resources"] = json!(0);

        let err = validate(&[record(raw)]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                index: 1,
                field: "current_resources".to_string(),
                value: 0.0,
            }
        );
    }

    #[test]
    fn test_threshold_above_hundred_out_of_range() {
        let mut raw = alpha();
        raw["performance_threshold"] = json!(150);

        let err = validate(&[record(raw)]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange { ref field, value, .. }
                if field == "performance_threshold" && value == 150.0
        ));
    }

    #[test]
    fn test_threshold_bounds_are_inclusive() {
        let mut low = alpha();
        low["performance_threshold"] = json!(0);
        let mut high = alpha();
        high["performance_threshold"] = json!(100);

        assert!(validate(&[record(low), record(high)]).is_ok());
    }

    #[test]
    fn test_negative_scaling_factor_out_of_range() {
        let mut raw = alpha();
        raw["scaling_factor"] = json!(-0.5);

        let err = validate(&[record(raw)]).unwrap_err();
        assert_eq!(err.kind(), "out_of_range");
    }

    #[test]
    fn test_invalid_numeric_beats_out_of_range() {
        let mut raw = alpha();
        raw["current_resources"] = json!(-5);
        raw["scaling_factor"] = json!("fast");

        let err = validate(&[record(raw)]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidNumeric {
                index: 1,
                field: "scaling_factor".to_string(),
            }
        );
    }

    #[test]
    fn test_all_missing_fields_listed_in_order() {
        let err = validate(&[RawRecord::default()]).unwrap_err();
        match err {
            ValidationError::MissingFields { index, fields } => {
                assert_eq!(index, 1);
                assert_eq!(fields.len(), 6);
                assert_eq!(fields[0], "application_id");
                assert_eq!(fields[5], "scaling_factor");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_batch_is_valid() {
        let batch = validate(&[]).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.report.total_applications, 0);
    }

    #[test]
    fn test_numeric_identifier_is_displayed() {
        let mut raw = alpha();
        raw["application_id"] = json!(7);

        let batch = validate(&[record(raw)]).unwrap();
        assert_eq!(batch.records[0].application_id, "7");
    }
}
