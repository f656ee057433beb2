use std::fmt;

use thiserror::Error;

/// Result type for seeding operations.
pub type Result<T> = std::result::Result<T, SeedError>;

/// Which relation encoding a malformed column name was parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// `<pk><d2><table><d2><search>`
    OneToMany,
    /// `<joinPk><d3><joinTable><d3><secondTable><d3><secondSearch><d3><firstSearch>`
    ManyToMany,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::OneToMany => write!(f, "one-to-many"),
            RelationKind::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

/// Errors raised while loading rows, building statements, or rendering SQL.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The row set was empty.
    #[error("input contains no rows")]
    EmptyInput,

    /// A relation-encoded column name has the wrong number of segments.
    #[error(
        "not a valid {kind} column name '{column}': expected {expected} segments separated by '{delimiter}', found {found}"
    )]
    RelationFormat {
        /// Encoding the column was classified as.
        kind: RelationKind,
        /// The offending column key.
        column: String,
        /// Delimiter the key was split on.
        delimiter: String,
        /// Required segment count.
        expected: usize,
        /// Actual segment count.
        found: usize,
    },

    /// A cell that must be a string holds another JSON type.
    #[error("row {row}: column '{column}' must hold a string, found {found}")]
    CellType {
        /// Zero-based input row index.
        row: usize,
        /// Column key of the cell.
        column: String,
        /// JSON type name that was found instead.
        found: &'static str,
    },

    /// A row lacks a column that the first row declared.
    #[error("row {row}: missing value for column '{column}'")]
    MissingCell {
        /// Zero-based input row index.
        row: usize,
        /// Column key that is absent.
        column: String,
    },

    /// Table mode was requested without a table name.
    #[error("a table name is required when no function name is given")]
    MissingTable,

    /// A hash-marked literal was rendered without a hash function.
    #[error("column '{0}' is hash-marked but no hash function is configured")]
    MissingHashFunction(String),

    /// Delimiter configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON input or configuration could not be decoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV input could not be read.
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Excel workbook could not be opened, or the sheet is missing.
    #[error("invalid Excel workbook: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    /// Rendered SQL was rejected by the PostgreSQL parser.
    #[error("generated SQL does not parse: {0}")]
    SqlCheck(String),

    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
