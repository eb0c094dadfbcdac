use google_sheets4::api::ValueRange;
use serde_json::Value;
use std::borrow::Cow;

pub trait ValueRangeFactory {
    fn from_rows(rows: &[Vec<String>]) -> Self;
    fn from_single_row<'a, T: Into<Cow<'a, str>> + Clone>(row: &[T]) -> Self;
}

fn wrap_value<'a, T: Into<Cow<'a, str>>>(value: T) -> Value {
    Value::String(value.into().into_owned())
}

impl ValueRangeFactory for ValueRange {
    fn from_rows(rows: &[Vec<String>]) -> Self {
        let values = rows
            .iter()
            .map(|row| row.iter().map(|cell| wrap_value(cell.as_str())).collect())
            .collect::<Vec<_>>();

        Self {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(values),
        }
    }

    fn from_single_row<'a, T: Into<Cow<'a, str>> + Clone>(row: &[T]) -> Self {
        let values = row
            .iter()
            .map(|cell| wrap_value(cell.clone()))
            .collect::<Vec<_>>();

        Self {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(vec![values]),
        }
    }
}
