//! Datetime feature transformers

use autofeat_core::classify::parse_datetime;
use autofeat_core::{Column, Result, Transformer, Value};
use chrono::{Datelike, NaiveDateTime};
use ndarray::Array2;

/// Extracts calendar components from a datetime column
///
/// Emits four features per row: year, month, day, and ISO weekday
/// (Monday = 1). Parsing accepts the same formats the column type
/// classifier accepts; missing or unparseable values yield all zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatetimeComponents;

impl DatetimeComponents {
    /// Create the extractor
    pub fn new() -> Self {
        Self
    }

    fn parse(value: &Value) -> Option<NaiveDateTime> {
        match value {
            Value::Text(text) => parse_datetime(text),
            _ => None,
        }
    }
}

impl Transformer for DatetimeComponents {
    fn fit(&mut self, _column: &Column, _target: Option<&Column>) -> Result<()> {
        Ok(())
    }

    fn transform(&self, column: &Column) -> Result<Array2<f64>> {
        let mut block = Array2::zeros((column.len(), 4));
        for (row, value) in column.values().iter().enumerate() {
            if let Some(datetime) = Self::parse(value) {
                let date = datetime.date();
                block[[row, 0]] = f64::from(date.year());
                block[[row, 1]] = f64::from(date.month());
                block[[row, 2]] = f64::from(date.day());
                block[[row, 3]] = f64::from(date.weekday().number_from_monday());
            }
        }

        Ok(block)
    }

    fn feature_names(&self) -> Option<Vec<String>> {
        Some(
            ["year", "month", "day", "weekday"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn extracts_calendar_components() {
        // 2021-03-01 was a Monday
        let column = Column::from_values("ts", vec![Some("2021-03-01"), None, Some("not a date")]);
        let mut extractor = DatetimeComponents::new();

        let block = extractor.fit_transform(&column, None).unwrap();

        assert_eq!(block.dim(), (3, 4));
        assert_eq!(block.row(0).to_vec(), vec![2021.0, 3.0, 1.0, 1.0]);
        assert_eq!(block.row(1).to_vec(), vec![0.0, 0.0, 0.0, 0.0]);
        assert_eq!(block.row(2).to_vec(), vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test_case("2021-03-01" ; "plain date")]
    #[test_case("2021/04/15" ; "slash separated date")]
    #[test_case("2021-05-01 08:30:00" ; "date with time")]
    #[test_case("2021-05-01T08:30:00Z" ; "rfc 3339")]
    fn accepts_the_classifier_formats(raw: &str) {
        let column = Column::from_values("ts", vec![raw]);
        let extractor = DatetimeComponents::new();

        let block = extractor.transform(&column).unwrap();
        assert_eq!(block[[0, 0]], 2021.0);
    }
}
