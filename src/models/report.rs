//! Report data model — rows with a runtime-discovered field set.
//!
//! The extraction service defines the record schema, so a row is a generic
//! ordered mapping rather than a fixed record type. Absence is represented
//! by omitting the key entirely; a row never stores null.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single cell value: a finite number or text.
///
/// Serializes untagged, so rows round-trip as plain JSON objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// One normalized reporting period. Key sets may legally differ row-to-row;
/// the report's field list is the union, not the intersection.
pub type Row = BTreeMap<String, CellValue>;

/// A persisted, named, timestamped bundle of rows plus the field list
/// observed when they were normalized.
///
/// Immutable once saved, except for deletion. The field list is captured
/// at normalization time and never re-derived from the (possibly sparse)
/// rows afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub source_file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    pub rows: Vec<Row>,
    /// Sorted, deduplicated union of keys across `rows`.
    pub fields: Vec<String>,
}

impl Report {
    /// Build a report with a fresh id and the current timestamp.
    pub fn new(
        display_name: &str,
        source_file_name: &str,
        report_type: Option<String>,
        rows: Vec<Row>,
        fields: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            display_name: display_name.to_string(),
            created_at: Utc::now(),
            source_file_name: source_file_name.to_string(),
            report_type,
            rows,
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        let mut row = Row::new();
        row.insert("month".to_string(), CellValue::Text("January".to_string()));
        row.insert("litres".to_string(), CellValue::Number(1000.0));
        Report::new(
            "Farm Zero",
            "january.pdf",
            Some("production".to_string()),
            vec![row],
            vec!["litres".to_string(), "month".to_string()],
        )
    }

    #[test]
    fn new_report_generates_unique_ids() {
        let a = sample_report();
        let b = sample_report();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }

    #[test]
    fn rows_serialize_as_plain_objects() {
        let report = sample_report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rows"][0]["month"], "January");
        assert_eq!(json["rows"][0]["litres"], 1000.0);
    }

    #[test]
    fn report_type_is_optional_on_the_wire() {
        let json = serde_json::json!({
            "id": "r1",
            "displayName": "Farm Zero",
            "createdAt": "2026-01-01T00:00:00Z",
            "sourceFileName": "january.pdf",
            "rows": [],
            "fields": [],
        });
        let report: Report = serde_json::from_value(json).unwrap();
        assert!(report.report_type.is_none());
    }

    #[test]
    fn cell_value_accessors() {
        assert_eq!(CellValue::Number(4.1).as_number(), Some(4.1));
        assert_eq!(CellValue::Text("x".to_string()).as_number(), None);
        assert!(CellValue::Number(0.0).is_number());
        assert!(!CellValue::Text(String::new()).is_number());
    }
}
