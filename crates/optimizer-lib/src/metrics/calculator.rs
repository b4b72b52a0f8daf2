//! Metric formulas and the recommendation rule
//!
//! Every step is rounded to two decimals before the next step consumes it,
//! so downstream metrics see exactly the values printed in the report.

use super::rounding::round2;
use crate::error::MetricsError;
use crate::models::{MetricsResult, Recommendation, ValidatedRecord};
use crate::observability::OptimizerMetrics;
use std::time::Instant;
use tracing::debug;

/// Weight of capacity margin in the composite score
pub const CAPACITY_MARGIN_WEIGHT: f64 = 0.4;

/// Weight of utilization headroom (100 - utilization) in the composite score
pub const UTILIZATION_HEADROOM_WEIGHT: f64 = 0.6;

/// Compute the metrics for one validated record
///
/// Pure: the same record always yields bit-identical results.
///
/// # Errors
/// Returns [`MetricsError::DivisionByZero`] when `predicted_demand` rounds to
/// zero, or when `current_resources`/`max_capacity` are zero (only possible
/// for records that bypassed validation).
pub fn calculate(record: &ValidatedRecord) -> Result<MetricsResult, MetricsError> {
    let current = record.current_resources as f64;
    let max_capacity = record.max_capacity as f64;

    ensure_nonzero(record, current, "resource_utilization_ratio")?;
    ensure_nonzero(record, max_capacity, "capacity_margin")?;

    let predicted_demand = round2(record.user_demand as f64 * record.scaling_factor);

    let resource_utilization_ratio = round2((predicted_demand / current) * 100.0);

    let capacity_margin = round2(
        ((record.max_capacity - record.current_resources) as f64 / max_capacity) * 100.0,
    );

    let composite_score = round2(
        capacity_margin * CAPACITY_MARGIN_WEIGHT
            + (100.0 - resource_utilization_ratio) * UTILIZATION_HEADROOM_WEIGHT,
    );

    ensure_nonzero(record, predicted_demand, "efficiency_ratio")?;
    let efficiency_ratio = round2(current / predicted_demand);

    let recommendation = Recommendation::decide(
        composite_score,
        efficiency_ratio,
        resource_utilization_ratio,
        record.performance_threshold,
    );

    Ok(MetricsResult {
        predicted_demand,
        resource_utilization_ratio,
        capacity_margin,
        composite_score,
        efficiency_ratio,
        recommendation,
    })
}

fn ensure_nonzero(
    record: &ValidatedRecord,
    divisor: f64,
    metric: &'static str,
) -> Result<(), MetricsError> {
    if divisor == 0.0 {
        return Err(MetricsError::DivisionByZero {
            application_id: record.application_id.clone(),
            metric,
        });
    }
    Ok(())
}

/// Instrumented wrapper around [`calculate`]
///
/// Records calculation latency and recommendation counts in the global
/// Prometheus registry.
#[derive(Clone)]
pub struct MetricsCalculator {
    metrics: OptimizerMetrics,
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCalculator {
    pub fn new() -> Self {
        Self {
            metrics: OptimizerMetrics::new(),
        }
    }

    pub fn calculate(&self, record: &ValidatedRecord) -> Result<MetricsResult, MetricsError> {
        let started = Instant::now();
        let result = calculate(record);
        self.metrics
            .observe_calculation_latency(started.elapsed().as_secs_f64());

        match &result {
            Ok(metrics) => {
                self.metrics.inc_assessments(metrics.recommendation);
                debug!(
                    application_id = %record.application_id,
                    composite_score = metrics.composite_score,
                    efficiency_ratio = metrics.efficiency_ratio,
                    "Computed allocation metrics"
                );
            }
            Err(_) => self.metrics.inc_calculation_errors(),
        }

        result
    }
}
