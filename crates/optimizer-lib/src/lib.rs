//! Optimizer library for cloud application resource allocation
//!
//! This crate provides the core functionality for:
//! - Validation and normalization of resource records
//! - Deterministic allocation metrics and scaling recommendations
//! - Report assembly and markdown rendering
//! - Loading records from JSON or the built-in sample set
//! - Observability (Prometheus instrumentation and structured logging)

pub mod error;
pub mod loader;
pub mod metrics;
pub mod models;
pub mod observability;
pub mod report;
pub mod validation;

pub use error::{LoadError, MetricsError, OptimizerError, ValidationError};
pub use loader::{load, load_strict, sample_records};
pub use metrics::{calculate, round2, MetricsCalculator};
pub use models::*;
pub use observability::{OptimizerMetrics, StructuredLogger};
pub use report::{generate_report, render_markdown, ApplicationAssessment, OptimizationReport, Reporter};
pub use validation::{validate, ValidatedBatch, ValidationReport, Validator};
