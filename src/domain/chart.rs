//! Chart payload derived from a columnar query result.
//!
//! The payload is renderer-agnostic: the first result column provides the
//! category axis and every other column becomes one numeric series.

use serde::{Deserialize, Serialize};

use crate::panel::ChartKind;
use crate::query_result::ColumnarResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    /// One value per category; `None` where the cell was not numeric
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn max(&self) -> Option<f64> {
        self.values.iter().flatten().copied().reduce(f64::max)
    }

    pub fn total(&self) -> f64 {
        self.values.iter().flatten().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOption {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub row_count: usize,
}

impl ChartOption {
    pub fn empty(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            x_label: String::new(),
            categories: Vec::new(),
            series: Vec::new(),
            row_count: 0,
        }
    }

    pub fn from_result(kind: ChartKind, title: impl Into<String>, result: &ColumnarResult) -> Self {
        let Some(x_label) = result.columns.first() else {
            return Self::empty(kind, title);
        };

        let categories = result
            .column_at(0)
            .into_iter()
            .map(str::to_string)
            .collect();
        let series = result
            .columns
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, name)| Series {
                name: name.clone(),
                values: result.column_at(idx).into_iter().map(parse_number).collect(),
            })
            .collect();

        Self {
            kind,
            title: title.into(),
            x_label: x_label.clone(),
            categories,
            series,
            row_count: result.row_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(columns: &[&str], rows: &[&[&str]]) -> ColumnarResult {
        ColumnarResult::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
            0,
        )
    }

    #[test]
    fn first_column_becomes_categories() {
        let data = result(
            &["year", "wind", "solar"],
            &[&["2030", "1.5", "2"], &["2040", "3", "NULL"]],
        );

        let option = ChartOption::from_result(ChartKind::Capacity, "Capacity", &data);

        assert_eq!(option.x_label, "year");
        assert_eq!(option.categories, vec!["2030", "2040"]);
        assert_eq!(option.series.len(), 2);
        assert_eq!(option.series[0].values, vec![Some(1.5), Some(3.0)]);
        assert_eq!(option.series[1].values, vec![Some(2.0), None]);
        assert_eq!(option.row_count, 2);
    }

    #[test]
    fn no_columns_yields_empty_option() {
        let option = ChartOption::from_result(ChartKind::Sql, "SQL", &ColumnarResult::default());

        assert!(option.is_empty());
        assert!(option.categories.is_empty());
        assert!(option.series.is_empty());
    }

    #[test]
    fn series_max_and_total_skip_gaps() {
        let series = Series {
            name: "v".to_string(),
            values: vec![Some(1.0), None, Some(4.0)],
        };

        assert_eq!(series.max(), Some(4.0));
        assert_eq!(series.total(), 5.0);
    }

    #[test]
    fn to_json_uses_snake_case_kind() {
        let option = ChartOption::empty(ChartKind::SystemCosts, "Costs");

        let json = option.to_json();

        assert_eq!(json["kind"], "system_costs");
        assert_eq!(json["title"], "Costs");
    }
}
