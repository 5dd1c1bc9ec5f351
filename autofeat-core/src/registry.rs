//! Default pipeline registry mapping type tags to transformer specs

use std::collections::HashMap;

use crate::classify::TypeTag;
use crate::transformer::TransformerSpec;

/// An immutable lookup table from semantic type tags to default pipelines
///
/// Built once with [`with_pipeline`](Self::with_pipeline) and only read
/// afterwards, so shared access during conversion needs no synchronization.
/// A complete registry covers every tag the classifier can emit; a tag may
/// map to an empty pipeline, which drops columns of that type from the
/// feature matrix.
#[derive(Debug, Clone, Default)]
pub struct PipelineRegistry {
    /// Default pipeline per type tag
    table: HashMap<TypeTag, Vec<TransformerSpec>>,
}

impl PipelineRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default pipeline for a type tag
    pub fn with_pipeline(mut self, tag: TypeTag, pipeline: Vec<TransformerSpec>) -> Self {
        self.table.insert(tag, pipeline);
        self
    }

    /// Get the default pipeline for a type tag
    ///
    /// An unregistered tag behaves like an empty pipeline.
    pub fn pipeline(&self, tag: TypeTag) -> &[TransformerSpec] {
        self.table.get(&tag).map_or(&[], Vec::as_slice)
    }

    /// Check whether every tag the classifier can emit has an entry
    pub fn is_complete(&self) -> bool {
        TypeTag::ALL.iter().all(|tag| self.table.contains_key(tag))
    }
}
