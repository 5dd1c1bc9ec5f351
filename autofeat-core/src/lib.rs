//! Core orchestration for automatic tabular feature conversion
//!
//! This crate routes each column of a raw, heterogeneously-typed dataset
//! through an ordered pipeline of feature transformers and concatenates the
//! resulting blocks into a single numeric matrix with aligned feature names.
//! It provides the column type classifier, the default pipeline registry,
//! the transformer capability contract and its pre-flight checker, and the
//! [`AutoConverter`] orchestrator that ties them together.

#![warn(missing_docs)]

pub mod checker;
pub mod classify;
pub mod column;
pub mod convert;
pub mod error;
pub mod frame;
pub mod registry;
pub mod transformer;

// Re-export key types for convenience
pub use checker::{check_transformer, CheckReport};
pub use classify::{classify, TypeTag};
pub use column::{Column, Value};
pub use convert::{AutoConverter, ConverterOptions, FeatureMatrix, MergePolicy};
pub use error::{ContractViolation, Error, Result};
pub use frame::DataFrame;
pub use registry::PipelineRegistry;
pub use transformer::{Transformer, TransformerSpec};
