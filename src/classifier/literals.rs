use serde::{Deserialize, Serialize};

use crate::parser::column_name::OneToManyRelation;

/// How literal cell values and subquery search terms are written into SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralMode {
    /// Values containing `(` pass through unquoted as SQL expressions and
    /// nothing is escaped. Not injection-safe.
    #[default]
    Compat,
    /// Every non-null value is quoted and embedded single quotes are doubled.
    Strict,
}

/// True for the cell values that render as SQL `NULL`: `""`, `"NULL"`, `"null"`.
pub fn is_null_token(value: &str) -> bool {
    matches!(value, "" | "NULL" | "null")
}

/// True when compat mode would emit `value` unquoted as an SQL expression.
pub fn is_expression_passthrough(value: &str) -> bool {
    value.contains('(')
}

/// Write a cell value as an SQL literal.
///
/// Null tokens become the bare `NULL` keyword. In [`LiteralMode::Compat`] a
/// value containing `(` is emitted as-is (so `NOW()` stays a function call)
/// and other values are wrapped in single quotes without escaping.
pub fn wrap_literal(value: &str, mode: LiteralMode) -> String {
    if is_null_token(value) {
        return "NULL".to_string();
    }
    match mode {
        LiteralMode::Compat if is_expression_passthrough(value) => value.to_string(),
        LiteralMode::Compat => format!("'{value}'"),
        LiteralMode::Strict => quote(value),
    }
}

/// Wrap in single quotes, doubling embedded single quotes.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Correlated subquery resolving `value` against the relation's table.
///
/// `*` selects the key column without a filter.
pub fn lookup_subquery(relation: &OneToManyRelation, value: &str, mode: LiteralMode) -> String {
    let OneToManyRelation {
        table,
        primary_key,
        search_key,
    } = relation;
    if value == "*" {
        return format!("(SELECT {primary_key} FROM {table})");
    }
    let needle = match mode {
        LiteralMode::Compat => format!("'{value}'"),
        LiteralMode::Strict => quote(value),
    };
    format!("(SELECT {primary_key} FROM {table} WHERE {search_key} = {needle})")
}
