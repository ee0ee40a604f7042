//! Schema-agnostic normalization of extraction results.
//!
//! The service defines the record schema at runtime, so normalization makes
//! no assumptions about which fields exist. It never fails: malformed values
//! degrade to sparse rows, since partial results are more useful than none.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::models::{CellValue, Row};
use crate::pipeline::ingest::types::{RawExtractionResult, RawRecord};

/// Canonical period label produced from an `ordinal` month index.
pub const PERIOD_FIELD: &str = "month";

/// Source key carrying the 1-based period index; translated, never copied.
const ORDINAL_KEY: &str = "ordinal";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Rows plus the field list observed while producing them.
///
/// The field list is the sorted union of keys across all rows — computed
/// here, once, and persisted alongside the rows it describes. Consumers
/// must not re-derive it from the (possibly sparse) rows later.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedResult {
    pub rows: Vec<Row>,
    pub fields: Vec<String>,
    pub period: Option<String>,
    pub report_type: Option<String>,
}

/// Convert heterogeneous, partially-nullable extraction records into
/// uniform rows and an explicit field list.
pub fn normalize(raw: &RawExtractionResult) -> NormalizedResult {
    let mut fields = BTreeSet::new();
    let rows: Vec<Row> = raw
        .records
        .iter()
        .map(|record| normalize_record(record, &mut fields))
        .collect();

    tracing::debug!(
        rows = rows.len(),
        fields = fields.len(),
        "Normalized extraction result"
    );

    NormalizedResult {
        rows,
        fields: fields.into_iter().collect(),
        period: raw.period.clone(),
        report_type: raw.report_type.clone(),
    }
}

fn normalize_record(record: &RawRecord, fields: &mut BTreeSet<String>) -> Row {
    let mut row = Row::new();

    if let Some(ordinal) = record.get(ORDINAL_KEY).and_then(Value::as_i64) {
        row.insert(PERIOD_FIELD.to_string(), CellValue::Text(month_label(ordinal)));
        fields.insert(PERIOD_FIELD.to_string());
    }

    for (key, value) in record {
        if key == ORDINAL_KEY {
            continue;
        }
        if let Some(cell) = cell_from_value(value) {
            fields.insert(key.clone());
            row.insert(key.clone(), cell);
        }
    }

    row
}

/// Index 1 → January. Out-of-range ordinals get a generated label rather
/// than failing the batch.
fn month_label(ordinal: i64) -> String {
    if (1..=12).contains(&ordinal) {
        MONTHS[(ordinal - 1) as usize].to_string()
    } else {
        format!("Period {ordinal}")
    }
}

/// Null and non-scalar values are dropped (absent), never coerced to zero
/// or an empty string — sparse data must stay distinguishable from zero.
fn cell_from_value(value: &Value) -> Option<CellValue> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(CellValue::Number),
        Value::String(s) => Some(CellValue::Text(s.clone())),
        Value::Bool(b) => Some(CellValue::Text(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
