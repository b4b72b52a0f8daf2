//! Error types for validation, metrics and loading

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a batch of records fails validation
///
/// Indices are 1-based positions in the input batch.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("missing required field(s) {fields:?} in row {index}")]
    MissingFields { index: usize, fields: Vec<String> },

    #[error("invalid numeric value for '{field}' in row {index}")]
    InvalidNumeric { index: usize, field: String },

    #[error("value {value} for '{field}' is out of acceptable range in row {index}")]
    OutOfRange {
        index: usize,
        field: String,
        value: f64,
    },
}

impl ValidationError {
    /// 1-based row of the offending record
    pub fn index(&self) -> usize {
        match self {
            ValidationError::MissingFields { index, .. }
            | ValidationError::InvalidNumeric { index, .. }
            | ValidationError::OutOfRange { index, .. } => *index,
        }
    }

    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingFields { .. } => "missing_fields",
            ValidationError::InvalidNumeric { .. } => "invalid_numeric",
            ValidationError::OutOfRange { .. } => "out_of_range",
        }
    }
}

/// Failures while computing metrics for a validated record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("division by zero computing {metric} for application '{application_id}'")]
    DivisionByZero {
        application_id: String,
        metric: &'static str,
    },
}

/// Failures while reading records from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON array of records in {path}")]
    NotAnArray { path: PathBuf },
}

/// Top-level error for the optimization pipeline
#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("load error: {0}")]
    Load(#[from] LoadError),
}

pub type OptimizerResult<T> = Result<T, OptimizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_index_and_kind() {
        let err = ValidationError::MissingFields {
            index: 3,
            fields: vec!["scaling_factor".to_string()],
        };
        assert_eq!(err.index(), 3);
        assert_eq!(err.kind(), "missing_fields");
        assert_eq!(
            err.to_string(),
            "missing required field(s) [\"scaling_factor\"] in row 3"
        );
    }

    #[test]
    fn test_optimizer_error_wraps_validation() {
        let err: OptimizerError = ValidationError::InvalidNumeric {
            index: 1,
            field: "user_demand".to_string(),
        }
        .into();
        assert!(matches!(err, OptimizerError::Validation(_)));
        assert!(err.to_string().contains("user_demand"));
    }
}
