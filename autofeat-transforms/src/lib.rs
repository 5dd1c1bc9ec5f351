//! Built-in feature transformers and the default pipeline registry
//!
//! Each transformer implements the [`Transformer`] capability contract from
//! `autofeat-core`. [`default_registry`] wires them to the semantic type
//! tags the column classifier emits, giving an [`AutoConverter`] a complete
//! default pipeline table out of the box.
//!
//! [`AutoConverter`]: autofeat_core::AutoConverter

#![warn(missing_docs)]

pub mod boolean;
pub mod categorical;
pub mod datetime;
pub mod numeric;
pub mod text;

pub use boolean::BooleanIndicator;
pub use categorical::OneHotEncoder;
pub use datetime::DatetimeComponents;
pub use numeric::StandardScaler;
pub use text::TokenFrequency;

use autofeat_core::{PipelineRegistry, TransformerSpec, TypeTag};

/// Build the default pipeline registry
///
/// Covers every type tag the classifier can emit. `Other` maps to an empty
/// pipeline, so unclassifiable columns contribute no features.
pub fn default_registry() -> PipelineRegistry {
    PipelineRegistry::new()
        .with_pipeline(
            TypeTag::Numeric,
            vec![TransformerSpec::new("standard_scaler", || {
                Box::new(StandardScaler::new())
            })],
        )
        .with_pipeline(
            TypeTag::Boolean,
            vec![TransformerSpec::new("boolean_indicator", || {
                Box::new(BooleanIndicator::new())
            })],
        )
        .with_pipeline(
            TypeTag::Categorical,
            vec![TransformerSpec::new("one_hot", || {
                Box::new(OneHotEncoder::new())
            })],
        )
        .with_pipeline(
            TypeTag::Text,
            vec![TransformerSpec::new("token_frequency", || {
                Box::new(TokenFrequency::default())
            })],
        )
        .with_pipeline(
            TypeTag::Datetime,
            vec![TransformerSpec::new("datetime_components", || {
                Box::new(DatetimeComponents::new())
            })],
        )
        .with_pipeline(TypeTag::Other, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofeat_core::{
        check_transformer, AutoConverter, Column, ConverterOptions, DataFrame, MergePolicy,
        Result, Transformer, Value,
    };
    use ndarray::Array2;

    /// Flags the salutation found in a name string, one indicator per title.
    struct TitleIndicator;

    const TITLES: [&str; 5] = ["mr", "mrs", "miss", "master", "rare"];

    impl Transformer for TitleIndicator {
        fn fit(&mut self, _column: &Column, _target: Option<&Column>) -> Result<()> {
            Ok(())
        }

        fn transform(&self, column: &Column) -> Result<Array2<f64>> {
            let mut block = Array2::zeros((column.len(), TITLES.len()));
            for (row, value) in column.values().iter().enumerate() {
                if let Some(text) = value.render() {
                    let text = text.to_lowercase();
                    for (i, title) in TITLES.iter().enumerate() {
                        if text.split_whitespace().any(|token| token == *title) {
                            block[[row, i]] = 1.0;
                        }
                    }
                }
            }
            Ok(block)
        }

        fn feature_names(&self) -> Option<Vec<String>> {
            Some(TITLES.iter().map(ToString::to_string).collect())
        }
    }

    fn title_spec() -> autofeat_core::TransformerSpec {
        autofeat_core::TransformerSpec::new("title_indicator", || Box::new(TitleIndicator))
    }

    fn titanic_like() -> DataFrame {
        DataFrame::new(vec![
            Column::from_values("age", vec![Some(22i64), Some(38), None, Some(35), Some(54), Some(2)]),
            Column::from_values("sex", vec!["male", "female", "female", "female", "male", "male"]),
            Column::from_values(
                "name",
                vec!["mr owen", "mrs laina", "mr henry", "mrs lily", "mr william", "mrs eva"],
            ),
            Column::from_values(
                "joined",
                vec![
                    "2021-03-01",
                    "2021-03-02",
                    "2021-03-05",
                    "2021-04-01",
                    "2021-04-09",
                    "2021-05-20",
                ],
            ),
            Column::from_values("alone", vec![true, false, true, false, true, true]),
            Column::new(
                "misc",
                vec![
                    Value::Int(1),
                    Value::Text("x".into()),
                    Value::Null,
                    Value::Int(2),
                    Value::Bool(true),
                    Value::Null,
                ],
            ),
            Column::from_values("survived", vec![0i64, 1, 0, 1, 0, 1]),
        ])
        .unwrap()
    }

    #[test]
    fn the_default_registry_is_complete() {
        assert!(default_registry().is_complete());
    }

    #[test]
    fn end_to_end_conversion_with_defaults() {
        let mut converter =
            AutoConverter::new(ConverterOptions::new("survived"), default_registry());
        let frame = titanic_like();

        let (matrix, target) = converter.fit_transform(&frame).unwrap();

        assert_eq!(matrix.nrows(), 6);
        assert_eq!(target.len(), 6);
        // age 1 (scaler) + sex 2 (one-hot) + name 8 (distinct tokens)
        // + joined 4 (calendar parts) + alone 1 (flag) + misc 0 (other)
        assert_eq!(matrix.ncols(), 16);
        assert_eq!(matrix.feature_names().len(), matrix.ncols());
        assert!(matrix.feature_names().contains(&"age_scaled".to_string()));
        assert!(matrix.feature_names().contains(&"sex_female".to_string()));
        assert!(matrix.feature_names().contains(&"joined_weekday".to_string()));
        assert!(matrix.feature_names().iter().all(|name| !name.starts_with("misc")));

        // a later transform pass reproduces the fitted layout exactly
        let again = converter.transform(&frame).unwrap();
        assert_eq!(again.values(), matrix.values());
        assert_eq!(again.feature_names(), matrix.feature_names());
    }

    #[test]
    fn override_and_merge_width_arithmetic() {
        let frame = titanic_like();

        let mut baseline =
            AutoConverter::new(ConverterOptions::new("survived"), default_registry());
        let (baseline_matrix, _) = baseline.fit_transform(&frame).unwrap();
        let baseline_width = baseline_matrix.ncols();
        let replaced_default_width = baseline_matrix
            .feature_names()
            .iter()
            .filter(|name| name.starts_with("name_"))
            .count();

        let mut overridden = AutoConverter::new(
            ConverterOptions::new("survived").with_converter("name", vec![title_spec()]),
            default_registry(),
        );
        let (override_matrix, _) = overridden.fit_transform(&frame).unwrap();
        assert_eq!(
            override_matrix.ncols(),
            baseline_width - replaced_default_width + TITLES.len()
        );

        let mut merged = AutoConverter::new(
            ConverterOptions::new("survived")
                .with_converter("name", vec![title_spec()])
                .with_merge_policy(MergePolicy::Merge),
            default_registry(),
        );
        let (merge_matrix, _) = merged.fit_transform(&frame).unwrap();
        assert_eq!(merge_matrix.ncols(), baseline_width + TITLES.len());

        // the merged layout keeps the default block first, overrides after
        let names = merge_matrix.feature_names();
        let default_pos = names.iter().position(|n| n == "name_tok_mr").unwrap();
        let override_pos = names.iter().position(|n| n == "name_mr").unwrap();
        assert!(default_pos < override_pos);
    }

    #[test]
    fn custom_transformer_passes_the_contract_check() {
        let frame = titanic_like();
        let mut transformer = TitleIndicator;

        let report = check_transformer(&frame, "name", &mut transformer).unwrap();

        assert_eq!(report.block.dim(), (6, 5));
        assert_eq!(report.feature_names, TITLES);
        assert!(report.summary.contains("5 feature(s)"));
    }
}
