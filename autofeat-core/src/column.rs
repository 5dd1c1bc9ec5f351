//! Column and cell value representation for heterogeneous tabular data

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell value in a raw dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Missing value
    Null,

    /// Boolean value
    Bool(bool),

    /// Integer value
    Int(i64),

    /// Floating point value
    Float(f64),

    /// Text value
    Text(String),
}

impl Value {
    /// Check whether this value is missing
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get this value as a float, if it is numeric
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Render this value as text, if it is present
    ///
    /// Used for categorical and textual feature extraction, where integers
    /// and booleans are treated as category labels.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(v) => Some(v.to_string()),
            Value::Int(v) => Some(v.to_string()),
            Value::Float(v) => Some(v.to_string()),
            Value::Text(v) => Some(v.clone()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "null"),
        }
    }
}

/// A named, ordered sequence of raw values
///
/// Columns are immutable once constructed; a fit or transform pass reads
/// them but never rewrites them.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Name of the column
    name: String,

    /// The raw cell values, in row order
    values: Vec<Value>,
}

impl Column {
    /// Create a new column from raw values
    pub fn new(name: &str, values: Vec<Value>) -> Self {
        Self {
            name: name.to_string(),
            values,
        }
    }

    /// Create a column by converting an iterator of representable values
    ///
    /// `Option<T>` items map `None` to [`Value::Null`].
    pub fn from_values<T, I>(name: &str, values: I) -> Self
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    /// Get the name of this column
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of values in this column
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if this column is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the raw values of this column
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Get the number of missing values in this column
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_maps_options_to_nulls() {
        let column = Column::from_values("age", vec![Some(22i64), None, Some(35)]);

        assert_eq!(column.len(), 3);
        assert_eq!(column.null_count(), 1);
        assert_eq!(column.values()[0], Value::Int(22));
        assert!(column.values()[1].is_null());
    }

    #[test]
    fn as_f64_covers_numeric_kinds_only() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::Bool(true).as_f64(), None);
        assert_eq!(Value::Text("3".into()).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn render_produces_category_labels() {
        assert_eq!(Value::Bool(true).render().as_deref(), Some("true"));
        assert_eq!(Value::Int(7).render().as_deref(), Some("7"));
        assert_eq!(Value::Text("S".into()).render().as_deref(), Some("S"));
        assert_eq!(Value::Null.render(), None);
    }
}
