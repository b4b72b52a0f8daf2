//! Core data models for the optimizer

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Field names every record must carry, in the order they are checked
pub const REQUIRED_FIELDS: [&str; 6] = [
    "application_id",
    "current_resources",
    "user_demand",
    "max_capacity",
    "performance_threshold",
    "scaling_factor",
];

/// Resource record as supplied by a loader
///
/// Every field is kept as a loosely typed JSON value: callers may hand in
/// strings, integers, floats or nothing at all. The validator turns this
/// into a [`ValidatedRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_resources: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_demand: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_threshold: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling_factor: Option<Value>,
}

impl RawRecord {
    /// Look up a field by its wire name
    pub fn field(&self, name: &str) -> Option<&Value> {
        let slot = match name {
            "application_id" => &self.application_id,
            "current_resources" => &self.current_resources,
            "user_demand" => &self.user_demand,
            "max_capacity" => &self.max_capacity,
            "performance_threshold" => &self.performance_threshold,
            "scaling_factor" => &self.scaling_factor,
            _ => return None,
        };
        slot.as_ref().filter(|value| !value.is_null())
    }

    /// Names of required fields that are absent or null
    pub fn missing_fields(&self) -> Vec<String> {
        REQUIRED_FIELDS
            .iter()
            .filter(|name| self.field(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }
}

/// Record with every field coerced to its canonical type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedRecord {
    pub application_id: String,
    pub current_resources: i64,
    pub user_demand: i64,
    pub max_capacity: i64,
    pub performance_threshold: f64,
    pub scaling_factor: f64,
}

/// Scaling recommendation derived from the allocation metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Optimal,
    NeedsAdjustment,
}

impl Recommendation {
    /// Minimum composite score for an allocation to count as optimal
    pub const MIN_COMPOSITE_SCORE: f64 = 70.0;
    /// Lower bound of the acceptable efficiency band
    pub const EFFICIENCY_LOWER: f64 = 0.95;
    /// Upper bound of the acceptable efficiency band
    pub const EFFICIENCY_UPPER: f64 = 1.05;

    /// Apply the decision rule to already-rounded metric values
    pub fn decide(
        composite_score: f64,
        efficiency_ratio: f64,
        resource_utilization_ratio: f64,
        performance_threshold: f64,
    ) -> Self {
        let efficient =
            (Self::EFFICIENCY_LOWER..=Self::EFFICIENCY_UPPER).contains(&efficiency_ratio);

        if composite_score >= Self::MIN_COMPOSITE_SCORE
            && efficient
            && resource_utilization_ratio <= performance_threshold
        {
            Recommendation::Optimal
        } else {
            Recommendation::NeedsAdjustment
        }
    }

    /// Human-readable status line
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Optimal => "Optimal - Maintain current allocation",
            Recommendation::NeedsAdjustment => "Needs Adjustment - Consider scaling resources",
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, Recommendation::Optimal)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived allocation metrics for a single application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub predicted_demand: f64,
    pub resource_utilization_ratio: f64,
    pub capacity_margin: f64,
    pub composite_score: f64,
    pub efficiency_ratio: f64,
    pub recommendation: Recommendation,
}
