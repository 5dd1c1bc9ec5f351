//! Pre-flight contract validation for custom transformers

use ndarray::Array2;
use tracing::debug;

use crate::error::{ContractViolation, Result};
use crate::frame::DataFrame;
use crate::transformer::Transformer;

/// The outcome of a successful transformer contract check
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// The extracted feature block, one row per input row
    pub block: Array2<f64>,

    /// One name per block column, synthesized when the transformer
    /// reports none
    pub feature_names: Vec<String>,

    /// Human-readable confirmation including the extracted width
    pub summary: String,
}

/// Validate a transformer against the fit/transform/feature-naming contract
///
/// Fits the transformer on the named column of `frame`, transforms it, and
/// checks the output shape and name alignment. Intended for interactively
/// validating a custom transformer before wiring it into a converter
/// override; it is advisory and local, touching no converter state, and a
/// failed check aborts nothing but itself.
///
/// Violations surface as [`Error::Contract`]; a missing column surfaces as
/// [`Error::MissingColumn`].
///
/// [`Error::Contract`]: crate::error::Error::Contract
/// [`Error::MissingColumn`]: crate::error::Error::MissingColumn
pub fn check_transformer(
    frame: &DataFrame,
    column_name: &str,
    transformer: &mut dyn Transformer,
) -> Result<CheckReport> {
    let column = frame.require_column(column_name)?;
    let rows = column.len();

    transformer
        .fit(column, None)
        .map_err(|source| ContractViolation::FitFailed {
            source: Box::new(source),
        })?;

    let block = transformer
        .transform(column)
        .map_err(|source| ContractViolation::TransformFailed {
            source: Box::new(source),
        })?;

    if block.nrows() != rows {
        return Err(ContractViolation::ShapeMismatch {
            expected: rows,
            actual: block.nrows(),
        }
        .into());
    }

    let width = block.ncols();
    let feature_names = match transformer.feature_names() {
        Some(names) => {
            if names.len() != width {
                return Err(ContractViolation::FeatureNameLengthMismatch {
                    expected: width,
                    actual: names.len(),
                }
                .into());
            }
            names
        }
        None => (0..width)
            .map(|i| format!("{}_{}", column_name, i))
            .collect(),
    };

    let summary = format!(
        "transformer passed: extracted {} feature(s) from column '{}' over {} rows",
        width, column_name, rows
    );
    debug!(column = column_name, width, rows, "transformer contract check passed");

    Ok(CheckReport {
        block,
        feature_names,
        summary,
    })
}
