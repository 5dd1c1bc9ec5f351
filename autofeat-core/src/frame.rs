//! In-memory dataset with an explicit column order

use std::collections::HashMap;
use std::fmt;

use crate::column::Column;
use crate::error::{Error, Result};

/// An in-memory tabular dataset
///
/// Column order is an explicit stored sequence, never inferred from a map's
/// iteration order, so feature layout stays deterministic across runs.
#[derive(Debug, Clone)]
pub struct DataFrame {
    /// Columns in their dataset order
    columns: Vec<Column>,

    /// Column indices by name for faster lookup
    index: HashMap<String, usize>,

    /// Number of rows shared by every column
    rows: usize,
}

impl DataFrame {
    /// Create a new dataset from columns
    ///
    /// All columns must have the same length and unique names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map_or(0, Column::len);

        let mut index = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if column.len() != rows {
                return Err(Error::LengthMismatch {
                    column: column.name().to_string(),
                    expected: rows,
                    actual: column.len(),
                });
            }

            if index.insert(column.name().to_string(), i).is_some() {
                return Err(Error::DuplicateColumn(column.name().to_string()));
            }
        }

        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    /// Get all columns in dataset order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Get a column by name, or a [`Error::MissingColumn`] error
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// Check whether a column with the given name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get the column names in dataset order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Get the number of rows in this dataset
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Get the number of columns in this dataset
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if this dataset has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DataFrame: {} rows, {} columns", self.rows, self.columns.len())?;
        for column in &self.columns {
            writeln!(f, "  {} ({} nulls)", column.name(), column.null_count())?;
        }
        Ok(())
    }
}
