use serde_json::Value;

/// String form of a cell as the sheet displays it. Strings are returned without
/// their JSON quotes; empty cells become `""`.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

pub trait StringGrid {
    fn into_string_grid(self) -> Vec<Vec<String>>;
}

impl StringGrid for Vec<Vec<Value>> {
    fn into_string_grid(self) -> Vec<Vec<String>> {
        self.iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect()
    }
}

/// The values API omits `values` entirely when a range holds no data.
impl StringGrid for Option<Vec<Vec<Value>>> {
    fn into_string_grid(self) -> Vec<Vec<String>> {
        self.map(StringGrid::into_string_grid).unwrap_or_default()
    }
}
