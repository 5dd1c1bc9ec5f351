//! Transformer capability contract and instantiation specs

use std::fmt;
use std::sync::Arc;

use ndarray::Array2;

use crate::column::Column;
use crate::error::Result;

/// A feature-extraction unit that fits on one column and maps its values to
/// a fixed-width numeric block
///
/// The contract required by the conversion orchestrator:
///
/// - `fit` learns any internal state from the column's values (and the
///   target vector when one is supplied).
/// - `transform` maps the column to a two-dimensional block whose row count
///   equals the column's length. It must not re-fit: repeated calls on the
///   same fitted instance with the same input must produce identical output.
/// - `feature_names` optionally reports one name per output column; `None`
///   means the caller synthesizes positional names.
///
/// `transform` takes `&self`, so concurrent transform calls on one fitted
/// instance are safe as long as the implementation keeps it read-only.
pub trait Transformer: Send {
    /// Learn internal state from a column's values
    fn fit(&mut self, column: &Column, target: Option<&Column>) -> Result<()>;

    /// Map a column to an (N, M) numeric block using the fitted state
    fn transform(&self, column: &Column) -> Result<Array2<f64>>;

    /// Names for the output columns, if this transformer can provide them
    fn feature_names(&self) -> Option<Vec<String>> {
        None
    }

    /// Fit on a column, then transform it
    fn fit_transform(&mut self, column: &Column, target: Option<&Column>) -> Result<Array2<f64>> {
        self.fit(column, target)?;
        self.transform(column)
    }
}

/// A factory for instantiating one transformer with fixed configuration
///
/// The configuration is captured by the factory closure; the identity string
/// names the transformer (and its relevant options) in error context and
/// logs. Multiple specs applied to one column form that column's pipeline.
#[derive(Clone)]
pub struct TransformerSpec {
    /// Identity used in error context and logging
    id: String,

    /// Factory producing a fresh, unfitted instance
    factory: Arc<dyn Fn() -> Box<dyn Transformer> + Send + Sync>,
}

impl TransformerSpec {
    /// Create a new spec from an identity and a factory
    pub fn new<F>(id: &str, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Transformer> + Send + Sync + 'static,
    {
        Self {
            id: id.to_string(),
            factory: Arc::new(factory),
        }
    }

    /// Get the identity of this spec
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Instantiate a fresh, unfitted transformer
    pub fn instantiate(&self) -> Box<dyn Transformer> {
        (self.factory)()
    }
}

impl fmt::Debug for TransformerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerSpec")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
