//! Output formatting utilities

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use colored::Colorize;
use optimizer_lib::Recommendation;
use tracing::warn;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown report (default)
    #[default]
    Markdown,
    /// Summary table
    Table,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Parse a format name from configuration, ignoring case
    pub fn from_config(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }

    /// Pick the flag value, then the configured name, then the default
    ///
    /// An unrecognized configured name is logged and ignored.
    pub fn resolve(flag: Option<Self>, configured: Option<&str>) -> Self {
        if let Some(format) = flag {
            return format;
        }

        match configured {
            Some(name) => Self::from_config(name).unwrap_or_else(|| {
                warn!(
                    format = %name,
                    "Unrecognized output format in configuration, using default"
                );
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Format a metric as a percentage
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format the report generation time
pub fn format_generated_at(generated_at: &DateTime<Utc>) -> String {
    generated_at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Color the recommendation status
pub fn color_recommendation(recommendation: Recommendation) -> String {
    match recommendation {
        Recommendation::Optimal => "Optimal".green().to_string(),
        Recommendation::NeedsAdjustment => "Needs Adjustment".yellow().to_string(),
    }
}

/// Color composite score based on value
pub fn color_score(score: f64) -> String {
    let formatted = format!("{:.2}", score);
    if score >= Recommendation::MIN_COMPOSITE_SCORE {
        formatted.green().to_string()
    } else if score >= 40.0 {
        formatted.yellow().to_string()
    } else {
        formatted.red().to_string()
    }
}

/// Color efficiency ratio by whether it sits inside the acceptable band
pub fn color_efficiency(ratio: f64) -> String {
    let formatted = format!("{:.2}", ratio);
    if (Recommendation::EFFICIENCY_LOWER..=Recommendation::EFFICIENCY_UPPER).contains(&ratio) {
        formatted.green().to_string()
    } else {
        formatted.red().to_string()
    }
}
