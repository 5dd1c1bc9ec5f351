//! Categorical feature transformers

use autofeat_core::{Column, Error, Result, Transformer};
use ndarray::Array2;

/// One-hot encodes a column of category labels
///
/// The category vocabulary is the sorted set of distinct non-missing labels
/// seen at fit time, so the feature layout is deterministic. Labels unseen
/// at fit time, and missing values, encode as all zeros.
#[derive(Debug, Clone, Default)]
pub struct OneHotEncoder {
    /// Sorted fitted vocabulary
    categories: Option<Vec<String>>,
}

impl OneHotEncoder {
    /// Create an unfitted encoder
    pub fn new() -> Self {
        Self::default()
    }

    /// The fitted category labels, in feature order
    pub fn categories(&self) -> Option<&[String]> {
        self.categories.as_deref()
    }
}

impl Transformer for OneHotEncoder {
    fn fit(&mut self, column: &Column, _target: Option<&Column>) -> Result<()> {
        let mut categories: Vec<String> = column
            .values()
            .iter()
            .filter_map(autofeat_core::Value::render)
            .collect();
        categories.sort_unstable();
        categories.dedup();

        self.categories = Some(categories);
        Ok(())
    }

    fn transform(&self, column: &Column) -> Result<Array2<f64>> {
        let categories = self
            .categories
            .as_ref()
            .ok_or_else(|| Error::Transformation("OneHotEncoder used before fit".into()))?;

        let mut block = Array2::zeros((column.len(), categories.len()));
        for (row, value) in column.values().iter().enumerate() {
            if let Some(label) = value.render() {
                if let Ok(index) = categories.binary_search(&label) {
                    block[[row, index]] = 1.0;
                }
            }
        }

        Ok(block)
    }

    fn feature_names(&self) -> Option<Vec<String>> {
        self.categories.clone()
    }
}
