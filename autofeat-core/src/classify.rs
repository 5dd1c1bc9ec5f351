//! Semantic type classification for raw columns

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::column::{Column, Value};

/// Semantic type tag assigned to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// Integer or floating point values
    Numeric,

    /// Boolean values
    Boolean,

    /// Text values drawn from a small set of repeated labels
    Categorical,

    /// Free-form text values
    Text,

    /// Text values that parse as dates or datetimes
    Datetime,

    /// Anything else, including all-missing columns and mixed kinds
    Other,
}

impl TypeTag {
    /// All tags the classifier can emit
    pub const ALL: [TypeTag; 6] = [
        TypeTag::Numeric,
        TypeTag::Boolean,
        TypeTag::Categorical,
        TypeTag::Text,
        TypeTag::Datetime,
        TypeTag::Other,
    ];
}

/// Maximum distinct labels for a text column to count as categorical
const CATEGORICAL_MAX_DISTINCT: usize = 50;

/// Classify a column's semantic type from its raw values
///
/// Deterministic, side-effect free, and total: a column that fits no other
/// tag degrades to [`TypeTag::Other`] rather than failing. Missing values
/// are ignored for the decision; an empty or all-missing column is `Other`.
///
/// Text columns are `Datetime` when every non-missing value parses with one
/// of the accepted formats, `Categorical` when the distinct-label count is
/// at most half the non-missing count and at most 50, and `Text` otherwise.
pub fn classify(column: &Column) -> TypeTag {
    let mut saw_bool = false;
    let mut saw_numeric = false;
    let mut saw_text = false;
    let mut non_null = 0usize;

    for value in column.values() {
        match value {
            Value::Null => continue,
            Value::Bool(_) => saw_bool = true,
            Value::Int(_) | Value::Float(_) => saw_numeric = true,
            Value::Text(_) => saw_text = true,
        }
        non_null += 1;
    }

    match (saw_bool, saw_numeric, saw_text) {
        (false, false, false) => TypeTag::Other,
        (true, false, false) => TypeTag::Boolean,
        (false, true, false) => TypeTag::Numeric,
        (false, false, true) => classify_text(column, non_null),
        // Mixed representations degrade rather than guess.
        _ => TypeTag::Other,
    }
}

/// Refine a pure-text column into datetime, categorical, or free text
fn classify_text(column: &Column, non_null: usize) -> TypeTag {
    let texts = column.values().iter().filter_map(|value| match value {
        Value::Text(text) => Some(text.as_str()),
        _ => None,
    });

    let mut distinct = HashSet::new();
    let mut all_datetime = true;

    for text in texts {
        if all_datetime && parse_datetime(text).is_none() {
            all_datetime = false;
        }
        distinct.insert(text);
    }

    if all_datetime {
        return TypeTag::Datetime;
    }

    if distinct.len() <= CATEGORICAL_MAX_DISTINCT && distinct.len() * 2 <= non_null {
        TypeTag::Categorical
    } else {
        TypeTag::Text
    }
}

/// Parse a text value with the accepted date and datetime formats
///
/// Accepts RFC 3339, `%Y-%m-%d %H:%M:%S`, `%Y-%m-%d`, and `%Y/%m/%d`.
/// Shared by the classifier and datetime feature extraction so both agree
/// on what a datetime column is.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_utc());
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed);
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(text, format) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }

    None
}
