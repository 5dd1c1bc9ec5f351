//! Boolean feature transformers

use autofeat_core::{Column, Result, Transformer, Value};
use ndarray::Array2;

/// Maps a boolean column to a single 0/1 indicator feature
///
/// Stateless: `true` (or a nonzero integer) maps to 1.0, everything else
/// including missing values maps to 0.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanIndicator;

impl BooleanIndicator {
    /// Create the indicator
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for BooleanIndicator {
    fn fit(&mut self, _column: &Column, _target: Option<&Column>) -> Result<()> {
        Ok(())
    }

    fn transform(&self, column: &Column) -> Result<Array2<f64>> {
        let mut block = Array2::zeros((column.len(), 1));
        for (row, value) in column.values().iter().enumerate() {
            let truthy = match value {
                Value::Bool(v) => *v,
                Value::Int(v) => *v != 0,
                _ => false,
            };
            if truthy {
                block[[row, 0]] = 1.0;
            }
        }

        Ok(block)
    }

    fn feature_names(&self) -> Option<Vec<String>> {
        Some(vec!["flag".to_string()])
    }
}
