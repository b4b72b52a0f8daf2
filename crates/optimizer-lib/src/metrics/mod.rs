//! Allocation metrics for validated records

mod calculator;
mod rounding;

pub use calculator::{
    calculate, MetricsCalculator, CAPACITY_MARGIN_WEIGHT, UTILIZATION_HEADROOM_WEIGHT,
};
pub use rounding::{is_two_decimal, round2};
