//! Intermediate representation between row building and SQL rendering.
//!
//! [`TableData`] is produced once by [`crate::generator::table_data`] and then
//! consumed by [`crate::generator::sql_renderer`]. Every cell is already
//! resolved to a literal, a subquery, or `NULL`; the only work left for the
//! renderer is quoting and applying the hash function to hash-marked literals.

use indexmap::IndexMap;

/// One input row: column key to raw string cell, in source column order.
pub type Row = IndexMap<String, String>;

/// One output row: column key to resolved cell, in statement column order.
pub type StatementRow = IndexMap<String, RenderedValue>;

/// A resolved cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedValue {
    /// Raw cell text, quoted at render time.
    Literal {
        /// Cell text as loaded.
        value: String,
        /// Pass `value` through the hash function before quoting.
        hashed: bool,
    },
    /// Parenthesized `SELECT` emitted verbatim.
    Subquery(String),
    /// SQL `NULL`.
    Null,
}

impl RenderedValue {
    /// Plain literal that is not hashed.
    pub fn literal(value: impl Into<String>) -> Self {
        RenderedValue::Literal {
            value: value.into(),
            hashed: false,
        }
    }
}

/// One `INSERT` statement worth of rows for a single table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Schema of `table`; empty when the table name is used unqualified.
    pub schema: String,
    /// Target table.
    pub table: String,
    /// Column keys, still carrying their relation or hash encodings.
    pub columns: Vec<String>,
    /// Rows keyed by the entries of `columns`.
    pub rows: Vec<StatementRow>,
}

/// All statements produced for one batch of rows: the root statement first,
/// then one statement per many-to-many column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    /// Statements in emission order.
    pub statements: Vec<Statement>,
}

impl TableData {
    /// The statement for the seeded table itself.
    pub fn root(&self) -> Option<&Statement> {
        self.statements.first()
    }

    /// Junction-table statements, in the order their columns appeared.
    pub fn relations(&self) -> &[Statement] {
        self.statements.get(1..).unwrap_or_default()
    }

    /// Total number of rows across all statements.
    pub fn row_count(&self) -> usize {
        self.statements.iter().map(|s| s.rows.len()).sum()
    }
}
