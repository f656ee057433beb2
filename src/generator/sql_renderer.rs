use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::classifier::literals::{is_expression_passthrough, quote, wrap_literal, LiteralMode};
use crate::config::SeederConfig;
use crate::error::{Result, SeedError};
use crate::generator::ir::{RenderedValue, Statement, TableData};
use crate::parser::column_name::RelationSyntax;
use crate::parser::names::qualified_table_name;

/// Hash function applied to the literals of hash-marked columns.
pub type HashFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Serializes [`TableData`] into `INSERT` statements.
#[derive(Clone)]
pub struct StatementRenderer {
    syntax: RelationSyntax,
    mode: LiteralMode,
    hash: Option<HashFn>,
}

impl fmt::Debug for StatementRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementRenderer")
            .field("syntax", &self.syntax)
            .field("mode", &self.mode)
            .field("hash", &self.hash.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Default for StatementRenderer {
    fn default() -> Self {
        Self::from_config(&SeederConfig::default())
    }
}

impl StatementRenderer {
    /// Create a renderer without a hash function.
    pub fn new(syntax: RelationSyntax, mode: LiteralMode) -> Self {
        Self {
            syntax,
            mode,
            hash: None,
        }
    }

    /// Create a renderer from a validated configuration.
    pub fn from_config(config: &SeederConfig) -> Self {
        Self::new(config.syntax(), config.literal_mode())
    }

    /// Use `hash` for hash-marked columns.
    pub fn with_hash(mut self, hash: HashFn) -> Self {
        self.hash = Some(hash);
        self
    }

    /// Render every statement, one per line, in order.
    pub fn render(&self, data: &TableData) -> Result<String> {
        let statements = data
            .statements
            .iter()
            .map(|statement| self.render_statement(statement))
            .collect::<Result<Vec<_>>>()?;
        Ok(statements.join("\n"))
    }

    /// Render one `INSERT INTO <table> (<columns>) VALUES (...), (...);`.
    ///
    /// `statement.columns` must be non-empty: a root statement built from a
    /// first row holding only many-to-many columns renders as the invalid
    /// `INSERT INTO t () VALUES ();`.
    pub fn render_statement(&self, statement: &Statement) -> Result<String> {
        let table = qualified_table_name(&statement.schema, &statement.table);
        let header = statement
            .columns
            .iter()
            .map(|column| self.syntax.base_column_name(column))
            .collect::<Vec<_>>()
            .join(", ");

        let mut tuples = Vec::with_capacity(statement.rows.len());
        for (index, row) in statement.rows.iter().enumerate() {
            let cells = statement
                .columns
                .iter()
                .map(|column| {
                    let value = row.get(column).ok_or_else(|| SeedError::MissingCell {
                        row: index,
                        column: column.clone(),
                    })?;
                    self.render_value(&table, column, value)
                })
                .collect::<Result<Vec<_>>>()?;
            tuples.push(format!("({})", cells.join(", ")));
        }

        Ok(format!(
            "INSERT INTO {table} ({header}) VALUES {};",
            tuples.join(", ")
        ))
    }

    fn render_value(&self, table: &str, column: &str, value: &RenderedValue) -> Result<String> {
        match value {
            RenderedValue::Null => Ok("NULL".to_string()),
            RenderedValue::Subquery(sql) => Ok(sql.clone()),
            RenderedValue::Literal {
                value,
                hashed: true,
            } => {
                let hash = self
                    .hash
                    .as_ref()
                    .ok_or_else(|| SeedError::MissingHashFunction(column.to_string()))?;
                let digest = hash(value.as_str());
                Ok(match self.mode {
                    LiteralMode::Compat => format!("'{digest}'"),
                    LiteralMode::Strict => quote(&digest),
                })
            }
            RenderedValue::Literal {
                value,
                hashed: false,
            } => {
                if self.mode == LiteralMode::Compat && is_expression_passthrough(value) {
                    warn!(
                        table,
                        column,
                        value = %value,
                        "emitting literal containing '(' unquoted as SQL"
                    );
                }
                Ok(wrap_literal(value, self.mode))
            }
        }
    }
}
