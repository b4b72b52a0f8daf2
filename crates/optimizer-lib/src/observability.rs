//! Observability infrastructure for the optimizer
//!
//! Provides:
//! - Prometheus metrics (records validated, validation failures, assessments, calculation latency)
//! - Structured logging of pipeline events with tracing

use crate::error::ValidationError;
use crate::models::Recommendation;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram,
    IntCounter, IntCounterVec, TextEncoder,
};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for per-record calculation latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.000_001, 0.000_005, 0.000_01, 0.000_05, 0.0001, 0.0005, 0.001, 0.005, 0.01,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<OptimizerMetricsInner> = OnceLock::new();

/// Inner metrics structure that holds the actual Prometheus metrics
struct OptimizerMetricsInner {
    records_validated: IntCounter,
    validation_failures: IntCounterVec,
    assessments: IntCounterVec,
    calculation_errors: IntCounter,
    calculation_latency_seconds: Histogram,
    reports_generated: IntCounter,
}

impl OptimizerMetricsInner {
    fn new() -> Self {
        Self {
            records_validated: register_int_counter!(
                "cloud_optimizer_records_validated_total",
                "Records that passed validation"
            )
            .expect("Failed to register records_validated"),

            validation_failures: register_int_counter_vec!(
                "cloud_optimizer_validation_failures_total",
                "Batches rejected by validation, by failure kind",
                &["kind"]
            )
            .expect("Failed to register validation_failures"),

            assessments: register_int_counter_vec!(
                "cloud_optimizer_assessments_total",
                "Applications assessed, by recommendation",
                &["recommendation"]
            )
            .expect("Failed to register assessments"),

            calculation_errors: register_int_counter!(
                "cloud_optimizer_calculation_errors_total",
                "Metric calculations that failed"
            )
            .expect("Failed to register calculation_errors"),

            calculation_latency_seconds: register_histogram!(
                "cloud_optimizer_calculation_latency_seconds",
                "Time spent computing metrics for one application",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register calculation_latency_seconds"),

            reports_generated: register_int_counter!(
                "cloud_optimizer_reports_generated_total",
                "Optimization reports assembled"
            )
            .expect("Failed to register reports_generated"),
        }
    }
}

/// Optimizer metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct OptimizerMetrics {
    _private: (),
}

impl Default for OptimizerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimizerMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(OptimizerMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &OptimizerMetricsInner {
        GLOBAL_METRICS.get_or_init(OptimizerMetricsInner::new)
    }

    pub fn add_records_validated(&self, count: u64) {
        self.inner().records_validated.inc_by(count);
    }

    pub fn inc_validation_failures(&self, kind: &str) {
        self.inner()
            .validation_failures
            .with_label_values(&[kind])
            .inc();
    }

    /// Count an assessment under its recommendation label
    pub fn inc_assessments(&self, recommendation: Recommendation) {
        let label = match recommendation {
            Recommendation::Optimal => "optimal",
            Recommendation::NeedsAdjustment => "needs_adjustment",
        };
        self.inner().assessments.with_label_values(&[label]).inc();
    }

    pub fn inc_calculation_errors(&self) {
        self.inner().calculation_errors.inc();
    }

    pub fn observe_calculation_latency(&self, duration_secs: f64) {
        self.inner().calculation_latency_seconds.observe(duration_secs);
    }

    pub fn inc_reports_generated(&self) {
        self.inner().reports_generated.inc();
    }

    pub fn records_validated(&self) -> u64 {
        self.inner().records_validated.get()
    }

    /// Render every registered metric in the Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Structured logger for optimizer events
///
/// Keeps event names and field layouts consistent across the validator,
/// the reporter and the loader.
#[derive(Clone)]
pub struct StructuredLogger {
    component: String,
}

impl StructuredLogger {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    pub fn log_validation_passed(&self, records: usize) {
        info!(
            event = "validation_passed",
            component = %self.component,
            records = records,
            "Validated resource records"
        );
    }

    /// Log the first failure that rejected a batch
    pub fn log_validation_failed(&self, error: &ValidationError, total_applications: usize) {
        warn!(
            event = "validation_failed",
            component = %self.component,
            kind = error.kind(),
            row = error.index(),
            total_applications = total_applications,
            "Validation failed: {}",
            error
        );
    }

    pub fn log_report_generated(&self, total_applications: usize, optimal: usize) {
        info!(
            event = "report_generated",
            component = %self.component,
            total_applications = total_applications,
            optimal = optimal,
            needs_adjustment = total_applications - optimal,
            "Generated optimization report"
        );
    }

    /// Log a loader falling back to the built-in sample set
    pub fn log_sample_fallback(&self, path: Option<&Path>, reason: &str) {
        match path {
            Some(path) => warn!(
                event = "sample_fallback",
                component = %self.component,
                path = %path.display(),
                reason = %reason,
                "{}, using sample data",
                reason
            ),
            None => info!(
                event = "sample_fallback",
                component = %self.component,
                reason = %reason,
                "Using sample data"
            ),
        }
    }
}
