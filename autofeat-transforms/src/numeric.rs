//! Numeric feature transformers

use autofeat_core::{Column, Error, Result, Transformer};
use ndarray::Array2;

/// Standardizes a numeric column to zero mean and unit variance
///
/// Missing and non-numeric cells are imputed with the fitted mean before
/// scaling. A constant column (zero standard deviation) maps to all zeros.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    /// Fitted (mean, standard deviation) over the non-missing values
    stats: Option<(f64, f64)>,
}

impl StandardScaler {
    /// Create an unfitted scaler
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transformer for StandardScaler {
    fn fit(&mut self, column: &Column, _target: Option<&Column>) -> Result<()> {
        let values: Vec<f64> = column.values().iter().filter_map(|v| v.as_f64()).collect();

        if values.is_empty() {
            self.stats = Some((0.0, 0.0));
            return Ok(());
        }

        let count = values.len() as f64;
        let mean = values.iter().sum::<f64>() / count;
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count;
        self.stats = Some((mean, variance.sqrt()));
        Ok(())
    }

    fn transform(&self, column: &Column) -> Result<Array2<f64>> {
        let (mean, std) = self
            .stats
            .ok_or_else(|| Error::Transformation("StandardScaler used before fit".into()))?;

        let scaled: Vec<f64> = column
            .values()
            .iter()
            .map(|v| {
                let x = v.as_f64().unwrap_or(mean);
                if std > 0.0 {
                    (x - mean) / std
                } else {
                    0.0
                }
            })
            .collect();

        Array2::from_shape_vec((column.len(), 1), scaled)
            .map_err(|e| Error::Transformation(e.to_string()))
    }

    fn feature_names(&self) -> Option<Vec<String>> {
        Some(vec!["scaled".to_string()])
    }
}
