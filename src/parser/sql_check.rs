use sqlparser::ast::Statement;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

use crate::error::{Result, SeedError};

/// Parse generated SQL with the PostgreSQL dialect.
pub fn parse_generated_sql(sql: &str) -> Result<Vec<Statement>> {
    Parser::parse_sql(&PostgreSqlDialect {}, sql).map_err(|e| SeedError::SqlCheck(e.to_string()))
}

/// Parse generated SQL and return the target table of every `INSERT`, in order.
pub fn inserted_tables(sql: &str) -> Result<Vec<String>> {
    let statements = parse_generated_sql(sql)?;
    Ok(statements
        .iter()
        .filter_map(|statement| match statement {
            Statement::Insert(insert) => Some(insert.table.to_string()),
            _ => None,
        })
        .collect())
}
