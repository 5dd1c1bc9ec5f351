//! Conversion orchestration: per-column dispatch, merge policy, and assembly

use std::collections::HashMap;
use std::fmt;

use ndarray::{s, Array2};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classify::classify;
use crate::column::Column;
use crate::error::{ContractViolation, Error, Result};
use crate::frame::DataFrame;
use crate::registry::PipelineRegistry;
use crate::transformer::{Transformer, TransformerSpec};

/// How a user-supplied pipeline combines with the default pipeline for a
/// column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// The override list entirely replaces the default pipeline
    #[default]
    Override,

    /// The override list is appended after the default pipeline, so both
    /// contribute features
    Merge,
}

/// Configuration for an [`AutoConverter`]
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Name of the column to treat as the label
    pub target: String,

    /// Per-column pipeline overrides; absent columns use the registry
    /// default for their classified type
    pub column_converters: HashMap<String, Vec<TransformerSpec>>,

    /// Override-vs-merge policy for overridden columns
    pub merge_policy: MergePolicy,
}

impl ConverterOptions {
    /// Create options with the given target column and no overrides
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            column_converters: HashMap::new(),
            merge_policy: MergePolicy::default(),
        }
    }

    /// Set the pipeline override for a column
    ///
    /// An empty pipeline under [`MergePolicy::Override`] drops the column
    /// from the feature matrix.
    pub fn with_converter(mut self, column: &str, pipeline: Vec<TransformerSpec>) -> Self {
        self.column_converters.insert(column.to_string(), pipeline);
        self
    }

    /// Set the override-vs-merge policy
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }
}

/// A numeric feature matrix with positionally aligned feature names
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    /// The (rows, features) values
    values: Array2<f64>,

    /// One name per feature column
    feature_names: Vec<String>,
}

impl FeatureMatrix {
    /// Invariant: `feature_names.len() == values.ncols()`; callers validate
    /// widths before assembly.
    fn new(values: Array2<f64>, feature_names: Vec<String>) -> Self {
        assert_eq!(values.ncols(), feature_names.len());
        Self {
            values,
            feature_names,
        }
    }

    /// Get the feature values
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Get the feature names, aligned with the value columns
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Get the number of rows
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    /// Get the number of feature columns
    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Consume this matrix into its values and names
    pub fn into_parts(self) -> (Array2<f64>, Vec<String>) {
        (self.values, self.feature_names)
    }
}

/// One fitted transformer plus its recorded output layout
struct FittedTransformer {
    /// Spec identity, kept for error context
    id: String,

    /// The fitted instance, reused read-only by later transform passes
    inner: Box<dyn Transformer>,

    /// Output width recorded at fit time
    width: usize,

    /// Column-prefixed feature names recorded at fit time
    names: Vec<String>,
}

/// The fitted pipeline of one column
struct FittedColumn {
    /// Source column name
    column: String,

    /// Fitted transformers in pipeline order
    transformers: Vec<FittedTransformer>,
}

/// Fitted state retained between fit and later transform passes
struct FittedState {
    /// Per-column fitted pipelines in dataset column order
    columns: Vec<FittedColumn>,

    /// The full feature-name layout of the fitted matrix
    feature_names: Vec<String>,
}

impl FittedState {
    fn width(&self) -> usize {
        self.columns
            .iter()
            .flat_map(|c| c.transformers.iter())
            .map(|t| t.width)
            .sum()
    }
}

/// Converts a raw heterogeneous dataset into a numeric feature matrix plus
/// a target vector
///
/// Each non-target column is routed through an effective pipeline: the
/// registry default for its classified type, a user override, or both,
/// depending on [`MergePolicy`]. Blocks are concatenated in dataset column
/// order (pipeline order within a column), so the output layout is
/// deterministic regardless of execution strategy.
///
/// Fitting stores the fitted transformer instances; later
/// [`transform`](Self::transform) calls reuse them without re-fitting.
pub struct AutoConverter {
    /// Conversion configuration
    options: ConverterOptions,

    /// Default pipelines per type tag
    registry: PipelineRegistry,

    /// Fitted state, written once per fit and read-only afterwards
    fitted: Option<FittedState>,
}

impl AutoConverter {
    /// Create a new, unfitted converter
    pub fn new(options: ConverterOptions, registry: PipelineRegistry) -> Self {
        Self {
            options,
            registry,
            fitted: None,
        }
    }

    /// Check whether this converter has been fitted
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Get the feature-name layout of the fitted matrix
    pub fn feature_names(&self) -> Option<&[String]> {
        self.fitted.as_ref().map(|s| s.feature_names.as_slice())
    }

    /// Fit every effective pipeline on `frame` and return the assembled
    /// feature matrix together with the target column's values
    ///
    /// A failure in any column aborts the whole call: no partial matrix is
    /// ever returned, and previously fitted state is left untouched.
    pub fn fit_transform(&mut self, frame: &DataFrame) -> Result<(FeatureMatrix, Column)> {
        let (state, values) = self.fit_impl(frame)?;
        let target = frame
            .column(&self.options.target)
            .cloned()
            .ok_or_else(|| Error::UnknownTarget(self.options.target.clone()))?;

        let matrix = FeatureMatrix::new(values, state.feature_names.clone());
        self.fitted = Some(state);
        Ok((matrix, target))
    }

    /// Fit every effective pipeline on `frame`, discarding the matrix
    pub fn fit(&mut self, frame: &DataFrame) -> Result<()> {
        let (state, _) = self.fit_impl(frame)?;
        self.fitted = Some(state);
        Ok(())
    }

    /// Re-apply the stored fitted pipelines to a new dataset of the same
    /// schema
    ///
    /// Requires a prior successful fit. Transformers are reused with their
    /// fitted state, in the stored order, reproducing the fitted feature
    /// layout. A column used at fit time that is missing from `frame` fails
    /// the call with [`Error::MissingColumn`].
    pub fn transform(&self, frame: &DataFrame) -> Result<FeatureMatrix> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        let rows = frame.row_count();

        let mut values = Array2::zeros((rows, fitted.width()));
        let mut offset = 0;

        for column_state in &fitted.columns {
            let column = frame.require_column(&column_state.column)?;

            for transformer in &column_state.transformers {
                let block = transformer.inner.transform(column).map_err(|source| {
                    processing_error(
                        &column_state.column,
                        &transformer.id,
                        ContractViolation::TransformFailed {
                            source: Box::new(source),
                        },
                    )
                })?;

                if block.nrows() != rows {
                    return Err(processing_error(
                        &column_state.column,
                        &transformer.id,
                        ContractViolation::ShapeMismatch {
                            expected: rows,
                            actual: block.nrows(),
                        },
                    ));
                }

                if block.ncols() != transformer.width {
                    return Err(processing_error(
                        &column_state.column,
                        &transformer.id,
                        ContractViolation::ShapeMismatch {
                            expected: transformer.width,
                            actual: block.ncols(),
                        },
                    ));
                }

                values
                    .slice_mut(s![.., offset..offset + transformer.width])
                    .assign(&block);
                offset += transformer.width;
            }
        }

        Ok(FeatureMatrix::new(values, fitted.feature_names.clone()))
    }

    /// Resolve effective pipelines, fit them, and assemble the matrix
    fn fit_impl(&self, frame: &DataFrame) -> Result<(FittedState, Array2<f64>)> {
        let target = frame
            .column(&self.options.target)
            .ok_or_else(|| Error::UnknownTarget(self.options.target.clone()))?;

        if self.options.column_converters.contains_key(&self.options.target) {
            return Err(Error::TargetOverridden(self.options.target.clone()));
        }

        let plan = self.resolve_pipelines(frame);
        let results = Self::run_plan(&plan, target);

        // Scanning in column order keeps failure reporting deterministic
        // even when columns were processed out of order.
        let mut columns = Vec::with_capacity(results.len());
        let mut blocks = Vec::new();
        for result in results {
            let outcome = result?;
            // A column with an empty effective pipeline was dropped; later
            // transform inputs need not carry it.
            if outcome.fitted.transformers.is_empty() {
                continue;
            }
            blocks.extend(outcome.blocks);
            columns.push(outcome.fitted);
        }

        let feature_names: Vec<String> = columns
            .iter()
            .flat_map(|c| c.transformers.iter())
            .flat_map(|t| t.names.iter().cloned())
            .collect();

        let rows = frame.row_count();
        let width = feature_names.len();
        let mut values = Array2::zeros((rows, width));
        let mut offset = 0;
        for block in &blocks {
            values
                .slice_mut(s![.., offset..offset + block.ncols()])
                .assign(block);
            offset += block.ncols();
        }
        debug!(rows, width, columns = columns.len(), "assembled feature matrix");

        Ok((
            FittedState {
                columns,
                feature_names,
            },
            values,
        ))
    }

    /// Compute the effective pipeline per non-target column, in dataset
    /// column order
    fn resolve_pipelines<'a>(&self, frame: &'a DataFrame) -> Vec<(&'a Column, Vec<TransformerSpec>)> {
        let mut plan = Vec::with_capacity(frame.column_count().saturating_sub(1));

        for column in frame.columns() {
            if column.name() == self.options.target {
                continue;
            }

            let tag = classify(column);
            let default = self.registry.pipeline(tag);
            let effective: Vec<TransformerSpec> =
                match (self.options.column_converters.get(column.name()), self.options.merge_policy) {
                    (Some(overrides), MergePolicy::Override) => overrides.clone(),
                    (Some(overrides), MergePolicy::Merge) => default
                        .iter()
                        .chain(overrides.iter())
                        .cloned()
                        .collect(),
                    (None, _) => default.to_vec(),
                };

            trace!(
                column = column.name(),
                ?tag,
                transformers = effective.len(),
                "resolved effective pipeline"
            );
            plan.push((column, effective));
        }

        plan
    }

    /// Fit and transform every planned column
    ///
    /// Results come back in plan order, so the caller's error scan is
    /// deterministic whether or not the work was parallel.
    #[cfg(feature = "parallel")]
    fn run_plan(plan: &[(&Column, Vec<TransformerSpec>)], target: &Column) -> Vec<Result<ColumnOutcome>> {
        plan.par_iter()
            .map(|(column, specs)| fit_column(column, target, specs))
            .collect()
    }

    /// Fit and transform every planned column
    #[cfg(not(feature = "parallel"))]
    fn run_plan(plan: &[(&Column, Vec<TransformerSpec>)], target: &Column) -> Vec<Result<ColumnOutcome>> {
        plan.iter()
            .map(|(column, specs)| fit_column(column, target, specs))
            .collect()
    }
}

impl fmt::Debug for AutoConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoConverter")
            .field("options", &self.options)
            .field("fitted", &self.fitted.is_some())
            .finish_non_exhaustive()
    }
}

/// The fitted pipeline and blocks produced for one column
struct ColumnOutcome {
    fitted: FittedColumn,
    blocks: Vec<Array2<f64>>,
}

/// Fit a column's effective pipeline and collect its blocks
fn fit_column(column: &Column, target: &Column, specs: &[TransformerSpec]) -> Result<ColumnOutcome> {
    let rows = column.len();
    let mut transformers = Vec::with_capacity(specs.len());
    let mut blocks = Vec::with_capacity(specs.len());

    for spec in specs {
        let mut instance = spec.instantiate();

        instance.fit(column, Some(target)).map_err(|source| {
            processing_error(
                column.name(),
                spec.id(),
                ContractViolation::FitFailed {
                    source: Box::new(source),
                },
            )
        })?;

        let block = instance.transform(column).map_err(|source| {
            processing_error(
                column.name(),
                spec.id(),
                ContractViolation::TransformFailed {
                    source: Box::new(source),
                },
            )
        })?;

        if block.nrows() != rows {
            return Err(processing_error(
                column.name(),
                spec.id(),
                ContractViolation::ShapeMismatch {
                    expected: rows,
                    actual: block.nrows(),
                },
            ));
        }

        let width = block.ncols();
        let names = match instance.feature_names() {
            Some(names) if names.len() != width => {
                return Err(processing_error(
                    column.name(),
                    spec.id(),
                    ContractViolation::FeatureNameLengthMismatch {
                        expected: width,
                        actual: names.len(),
                    },
                ));
            }
            Some(names) => names,
            None => (0..width).map(|i| i.to_string()).collect(),
        };

        // Names are prefixed with the source column so identical
        // transformers on different columns cannot collide.
        let names = names
            .iter()
            .map(|name| format!("{}_{}", column.name(), name))
            .collect();

        transformers.push(FittedTransformer {
            id: spec.id().to_string(),
            inner: instance,
            width,
            names,
        });
        blocks.push(block);
    }

    debug!(
        column = column.name(),
        transformers = transformers.len(),
        width = transformers.iter().map(|t| t.width).sum::<usize>(),
        "fitted column pipeline"
    );

    Ok(ColumnOutcome {
        fitted: FittedColumn {
            column: column.name().to_string(),
            transformers,
        },
        blocks,
    })
}

fn processing_error(column: &str, transformer: &str, source: ContractViolation) -> Error {
    Error::ColumnProcessing {
        column: column.to_string(),
        transformer: transformer.to_string(),
        source,
    }
}
