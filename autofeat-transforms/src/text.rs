//! Text feature transformers

use std::collections::HashMap;

use autofeat_core::{Column, Error, Result, Transformer, Value};
use ndarray::Array2;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// Default vocabulary size for [`TokenFrequency`]
pub const DEFAULT_MAX_TOKENS: usize = 20;

/// Counts occurrences of the most frequent tokens in a text column
///
/// At fit time the column is tokenized into lowercased unicode words and
/// the `max_tokens` most frequent tokens are selected (ties broken
/// lexicographically); the stored vocabulary is sorted so the feature
/// layout is deterministic. Transform emits one per-row count feature per
/// vocabulary token.
#[derive(Debug, Clone)]
pub struct TokenFrequency {
    /// Vocabulary size cap
    max_tokens: usize,

    /// Sorted fitted vocabulary
    vocabulary: Option<Vec<String>>,
}

impl TokenFrequency {
    /// Create an unfitted extractor with the given vocabulary size
    pub fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            vocabulary: None,
        }
    }

    /// The fitted vocabulary, in feature order
    pub fn vocabulary(&self) -> Option<&[String]> {
        self.vocabulary.as_deref()
    }

    fn tokenize(value: &Value) -> Vec<String> {
        value.render().map_or_else(Vec::new, |text| {
            text.unicode_words().map(str::to_lowercase).collect()
        })
    }
}

impl Default for TokenFrequency {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}

impl Transformer for TokenFrequency {
    fn fit(&mut self, column: &Column, _target: Option<&Column>) -> Result<()> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for value in column.values() {
            for token in Self::tokenize(value) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_tokens);

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(token, _)| token).collect();
        vocabulary.sort_unstable();

        debug!(tokens = vocabulary.len(), cap = self.max_tokens, "fitted token vocabulary");
        self.vocabulary = Some(vocabulary);
        Ok(())
    }

    fn transform(&self, column: &Column) -> Result<Array2<f64>> {
        let vocabulary = self
            .vocabulary
            .as_ref()
            .ok_or_else(|| Error::Transformation("TokenFrequency used before fit".into()))?;

        let mut block = Array2::zeros((column.len(), vocabulary.len()));
        for (row, value) in column.values().iter().enumerate() {
            for token in Self::tokenize(value) {
                if let Ok(index) = vocabulary.binary_search(&token) {
                    block[[row, index]] += 1.0;
                }
            }
        }

        Ok(block)
    }

    fn feature_names(&self) -> Option<Vec<String>> {
        self.vocabulary
            .as_ref()
            .map(|v| v.iter().map(|token| format!("tok_{}", token)).collect())
    }
}
