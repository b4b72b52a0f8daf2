//! Record loading from JSON files and the built-in sample set

use crate::error::LoadError;
use crate::models::RawRecord;
use crate::observability::StructuredLogger;
use serde_json::{json, Value};
use std::path::Path;

/// Load records, falling back to the sample set
///
/// Returns [`sample_records`] when no path is given, the file cannot be
/// read, the JSON is malformed or the top level is not an array.
pub fn load(path: Option<&Path>) -> Vec<RawRecord> {
    let logger = StructuredLogger::new("loader");

    let Some(path) = path else {
        logger.log_sample_fallback(None, "no input file given");
        return sample_records();
    };

    match load_strict(path) {
        Ok(records) => records,
        Err(err) => {
            logger.log_sample_fallback(Some(path), &err.to_string());
            sample_records()
        }
    }
}

/// Load records from a JSON file without falling back
pub fn load_strict(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_records(&content).map_err(|err| match err {
        ParseFailure::Json(source) => LoadError::Json {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::NotAnArray => LoadError::NotAnArray {
            path: path.to_path_buf(),
        },
    })
}

enum ParseFailure {
    Json(serde_json::Error),
    NotAnArray,
}

/// Parse a JSON array of records
///
/// Array entries that are not objects become empty records so that the
/// validator reports them as missing every field.
fn parse_records(content: &str) -> Result<Vec<RawRecord>, ParseFailure> {
    let document: Value = serde_json::from_str(content).map_err(ParseFailure::Json)?;
    let Value::Array(entries) = document else {
        return Err(ParseFailure::NotAnArray);
    };

    entries
        .into_iter()
        .map(|entry| match entry {
            Value::Object(_) => serde_json::from_value(entry).map_err(ParseFailure::Json),
            _ => Ok(RawRecord::default()),
        })
        .collect()
}

/// Fixed demonstration data set of ten applications
pub fn sample_records() -> Vec<RawRecord> {
    const SAMPLES: [(&str, i64, i64, i64, i64, f64); 10] = [
        ("AppAlpha", 50, 45, 100, 75, 1.2),
        ("AppBeta", 70, 60, 140, 80, 1.15),
        ("AppGamma", 80, 70, 150, 85, 1.1),
        ("AppDelta", 90, 75, 160, 80, 1.0),
        ("AppEpsilon", 65, 55, 120, 70, 1.3),
        ("AppZeta", 100, 95, 180, 90, 1.05),
        ("AppEta", 85, 80, 170, 75, 1.15),
        ("AppTheta", 75, 65, 130, 85, 1.2),
        ("AppIota", 60, 50, 110, 80, 0.95),
        ("AppKappa", 95, 90, 200, 90, 1.1),
    ];

    SAMPLES
        .iter()
        .map(|(id, current, demand, max, threshold, scaling)| RawRecord {
            application_id: Some(json!(id)),
            current_resources: Some(json!(current)),
            user_demand: Some(json!(demand)),
            max_capacity: Some(json!(max)),
            performance_threshold: Some(json!(threshold)),
            scaling_factor: Some(json!(scaling)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_sample_records_has_ten_entries() {
        let records = sample_records();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].application_id, Some(json!("AppAlpha")));
        assert_eq!(records[9].application_id, Some(json!("AppKappa")));
        assert!(records.iter().all(|r| r.missing_fields().is_empty()));
    }

    #[test]
    fn test_load_without_path_uses_samples() {
        assert_eq!(load(None), sample_records());
    }

    #[test]
    fn test_load_reads_json_file() {
        let file = write_temp(
            r#"[{"application_id": "AppFile", "current_resources": "10",
                "user_demand": 8, "max_capacity": 20,
                "performance_threshold": 90, "scaling_factor": 1.0}]"#,
        );

        let records = load(Some(file.path()));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].application_id, Some(json!("AppFile")));
        assert_eq!(records[0].current_resources, Some(json!("10")));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let records = load(Some(Path::new("/nonexistent/cloud_resources.json")));
        assert_eq!(records, sample_records());
    }

    #[test]
    fn test_load_malformed_json_falls_back() {
        let file = write_temp("{ not json");
        assert_eq!(load(Some(file.path())), sample_records());
    }

    #[test]
    fn test_load_non_array_falls_back() {
        let file = write_temp(r#"{"application_id": "AppAlpha"}"#);
        assert_eq!(load(Some(file.path())), sample_records());
    }

    #[test]
    fn test_load_strict_reports_errors() {
        let malformed = write_temp("[1, 2");
        assert!(matches!(
            load_strict(malformed.path()),
            Err(LoadError::Json { .. })
        ));

        let object = write_temp(r#"{"application_id": "AppAlpha"}"#);
        assert!(matches!(
            load_strict(object.path()),
            Err(LoadError::NotAnArray { .. })
        ));

        assert!(matches!(
            load_strict(Path::new("/nonexistent/cloud_resources.json")),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn test_non_object_entries_become_empty_records() {
        let file = write_temp(r#"[42, {"application_id": "AppOk"}]"#);
        let records = load_strict(file.path()).unwrap();

        assert_eq!(records[0], RawRecord::default());
        assert_eq!(records[1].missing_fields().len(), 5);
    }
}
