//! Turn flat tabular rows into SQL `INSERT` statements, resolving foreign keys
//! and junction-table rows from relation encodings embedded in column names.
#![warn(missing_docs)]

/// Column classification: root versus many-to-many columns, literal wrapping.
pub mod classifier;
/// Delimiter and literal-handling configuration.
pub mod config;
/// Error type shared by every stage.
pub mod error;
/// Statement building, rendering, and function-call mode.
pub mod generator;
/// Row sources: JSON, CSV and Excel sheets.
pub mod loader;
/// Writing generated SQL.
pub mod output;
/// Column-name relation encodings and table naming conventions.
pub mod parser;
/// Load, build, and render in one call.
pub mod seeder;

pub use config::SeederConfig;
pub use error::{Result, SeedError};
pub use generator::ir::{RenderedValue, Row, Statement, TableData};
pub use seeder::{SeedTarget, Seeder};
