//! Error types for automatic feature conversion

use thiserror::Error;

/// Result type for feature conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for feature conversion operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configured target column does not exist in the dataset
    #[error("unknown target column: '{0}'")]
    UnknownTarget(String),

    /// A column converter override refers to the target column
    #[error("column converter override refers to the target column '{0}'")]
    TargetOverridden(String),

    /// A column required by the operation is missing from the dataset
    #[error("column not found: '{0}'")]
    MissingColumn(String),

    /// Two columns in a dataset share the same name
    #[error("duplicate column name: '{0}'")]
    DuplicateColumn(String),

    /// A column's length disagrees with the rest of the dataset
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        /// Name of the offending column
        column: String,
        /// Row count of the first column in the dataset
        expected: usize,
        /// Row count of the offending column
        actual: usize,
    },

    /// A transformer breached its capability contract
    #[error(transparent)]
    Contract(#[from] ContractViolation),

    /// A contract breach or transformer failure inside the conversion path,
    /// annotated with the column and transformer it originated from
    #[error("column '{column}' via transformer '{transformer}': {source}")]
    ColumnProcessing {
        /// Name of the column being processed
        column: String,
        /// Identity of the transformer that failed
        transformer: String,
        /// The underlying contract violation
        source: ContractViolation,
    },

    /// `transform` was invoked before any successful fit
    #[error("converter has not been fitted")]
    NotFitted,

    /// Failure internal to a transformer implementation
    #[error("transformation error: {0}")]
    Transformation(String),
}

/// A detected breach of the transformer fit/transform/feature-naming contract
#[derive(Error, Debug)]
pub enum ContractViolation {
    /// The fit operation returned an error
    #[error("fit failed: {source}")]
    FitFailed {
        /// The error returned by fit
        source: Box<Error>,
    },

    /// The transform operation returned an error
    #[error("transform failed: {source}")]
    TransformFailed {
        /// The error returned by transform
        source: Box<Error>,
    },

    /// The transform output shape disagrees with the input
    #[error("output shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected extent
        expected: usize,
        /// Observed extent
        actual: usize,
    },

    /// The reported feature names do not cover the transform output
    #[error("feature name length mismatch: expected {expected} names, got {actual}")]
    FeatureNameLengthMismatch {
        /// Output column count of the transform
        expected: usize,
        /// Length of the reported name sequence
        actual: usize,
    },
}
