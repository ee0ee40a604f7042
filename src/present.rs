//! Presentation inputs derived from rows with a runtime-discovered schema.
//!
//! Field classification, summary cards, and chart axis domains are computed
//! per render pass from the stored rows and field list; nothing here caches
//! across passes — the report collection stays the sole source of truth.

use serde::Serialize;

use crate::models::{CellValue, Row};
use crate::pipeline::normalize::PERIOD_FIELD;

/// Default number of summary cards shown above the table.
pub const DEFAULT_SUMMARY_LIMIT: usize = 3;

/// Placeholder for absent cells — never "0" or an empty string that could
/// be mistaken for an actual zero measurement.
pub const ABSENT_GLYPH: &str = "—";

/// Fields suitable for plotting and summary cards.
///
/// A field is numeric iff its value in the first row is a finite number;
/// the period label is always excluded, whatever its type.
pub fn numeric_fields(rows: &[Row], fields: &[String]) -> Vec<String> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    fields
        .iter()
        .filter(|field| field.as_str() != PERIOD_FIELD)
        .filter(|field| matches!(first.get(field.as_str()), Some(CellValue::Number(n)) if n.is_finite()))
        .cloned()
        .collect()
}

/// Summarize one field over all rows where it is present and numeric.
///
/// Percentage-named fields (matched case-insensitively) show the mean with
/// two decimals and a trailing `%`; everything else shows the grouped sum.
/// `None` when no numeric values exist.
pub fn summarize(rows: &[Row], field: &str) -> Option<String> {
    let values = numeric_values(rows, field);
    if values.is_empty() {
        return None;
    }

    if is_percentage_field(field) {
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(format!("{mean:.2}%"))
    } else {
        Some(group_thousands(values.iter().sum::<f64>()))
    }
}

/// Chart y-axis domain for one field: 10% padding each side with bounds
/// rounded outward to two decimals (keeps tick labels free of float
/// jitter); a flat series is padded by one unit; no data ⇒ `[0, 100]`.
pub fn axis_domain(rows: &[Row], field: &str) -> (f64, f64) {
    let values = numeric_values(rows, field);
    if values.is_empty() {
        return (0.0, 100.0);
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return (min - 1.0, max + 1.0);
    }

    let pad = (max - min) * 0.10;
    (
        ((min - pad) * 100.0).floor() / 100.0,
        ((max + pad) * 100.0).ceil() / 100.0,
    )
}

/// One summary card for the strip above the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub field: String,
    pub label: String,
    pub value: String,
}

/// Cards for the leading numeric fields, capped at `limit`.
///
/// The cap is a presentation choice, not a data rule, so it is a parameter
/// rather than a constant; pass [`DEFAULT_SUMMARY_LIMIT`] for the stock
/// three-card strip.
pub fn summary_cards(rows: &[Row], fields: &[String], limit: usize) -> Vec<SummaryCard> {
    numeric_fields(rows, fields)
        .into_iter()
        .take(limit)
        .filter_map(|field| {
            summarize(rows, &field).map(|value| SummaryCard {
                label: format_field_name(&field),
                value,
                field,
            })
        })
        .collect()
}

/// camelCase → spaced words with a leading capital
/// ("fatPercentage" → "Fat Percentage").
pub fn format_field_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, ch) in field.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else {
            if ch.is_uppercase() {
                out.push(' ');
            }
            out.push(ch);
        }
    }
    out.trim().to_string()
}

/// Render one cell for the table.
pub fn format_cell(cell: Option<&CellValue>, field: &str) -> String {
    match cell {
        None => ABSENT_GLYPH.to_string(),
        Some(CellValue::Text(s)) => s.clone(),
        Some(CellValue::Number(n)) if !n.is_finite() => ABSENT_GLYPH.to_string(),
        Some(CellValue::Number(n)) if is_percentage_field(field) => format!("{n:.2}%"),
        Some(CellValue::Number(n)) => group_thousands(*n),
    }
}

fn is_percentage_field(field: &str) -> bool {
    field.to_lowercase().contains("percentage")
}

fn numeric_values(rows: &[Row], field: &str) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| row.get(field).and_then(CellValue::as_number))
        .filter(|n| n.is_finite())
        .collect()
}

/// Locale-style digit grouping, up to three fraction digits
/// (1234567.5 → "1,234,567.5").
fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 1000.0).round() / 1000.0;

    let text = format!("{rounded}");
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut out = String::new();
    if negative && rounded != 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    out
}
