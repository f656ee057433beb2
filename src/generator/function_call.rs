use crate::error::{Result, SeedError};
use crate::generator::ir::Row;

/// Render `SELECT <function>('<rows as JSON>'::JSONB);`.
///
/// Rows are serialized with their column order preserved and embedded single
/// quotes are doubled. Column keys are passed through untouched; relation
/// encodings are left for the function to interpret.
pub fn function_call_sql(rows: &[Row], function: &str) -> Result<String> {
    if rows.is_empty() {
        return Err(SeedError::EmptyInput);
    }
    let json = serde_json::to_string(rows)?;
    Ok(format!(
        "SELECT {function}('{}'::JSONB);",
        json.replace('\'', "''")
    ))
}
