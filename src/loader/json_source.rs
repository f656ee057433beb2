use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Result, SeedError};
use crate::generator::ir::Row;
use crate::loader::RowSource;

/// Rows encoded as a JSON array of objects whose values are all strings.
#[derive(Debug, Clone)]
pub struct JsonSource {
    content: String,
}

impl JsonSource {
    /// Wrap JSON text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl RowSource for JsonSource {
    fn load(&self) -> Result<Vec<Row>> {
        parse_json_rows(&self.content)
    }
}

/// Decode a JSON array of objects into rows, keeping key order.
///
/// Non-string cells are rejected with [`SeedError::CellType`].
pub fn parse_json_rows(json: &str) -> Result<Vec<Row>> {
    let raw: Vec<IndexMap<String, Value>> = serde_json::from_str(json)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, object)| {
            object
                .into_iter()
                .map(|(column, value)| match value {
                    Value::String(text) => Ok((column, text)),
                    other => Err(SeedError::CellType {
                        row: index,
                        column,
                        found: json_type_name(&other),
                    }),
                })
                .collect::<Result<Row>>()
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_rows_preserves_key_order() {
        let rows = parse_json_rows(r#"[{"b": "2", "a": "1"}, {"b": "4", "a": "3"}]"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(rows[1]["a"], "3");
    }

    #[test]
    fn parse_json_rows_rejects_non_string_cells() {
        let err = parse_json_rows(r#"[{"id": "1"}, {"id": 2}]"#).unwrap_err();
        assert!(matches!(
            err,
            SeedError::CellType { row: 1, ref column, found: "number" } if column == "id"
        ));
    }

    #[test]
    fn parse_json_rows_rejects_non_arrays() {
        assert!(matches!(
            parse_json_rows(r#"{"id": "1"}"#),
            Err(SeedError::Json(_))
        ));
    }

    #[test]
    fn empty_array_loads_as_no_rows() {
        assert!(JsonSource::new("[]").load().unwrap().is_empty());
    }
}
