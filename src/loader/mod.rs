/// Spreadsheet-style CSV input with header normalization.
pub mod csv_source;
/// JSON array-of-objects input.
pub mod json_source;
/// Excel workbook input, one named sheet at a time.
pub mod xlsx_source;

use std::collections::HashMap;

use crate::error::Result;
use crate::generator::ir::Row;

pub use csv_source::CsvSource;
pub use json_source::JsonSource;
pub use xlsx_source::XlsxSource;

/// Produces the flat rows a seeding run works on.
pub trait RowSource {
    /// Load every row, validating that each cell is a string.
    fn load(&self) -> Result<Vec<Row>>;
}

/// Trim and lower-case a sheet header cell, then rename it through
/// `columns_mapper` when the normalized name appears there.
pub(crate) fn normalize_header(header: &str, columns_mapper: &HashMap<String, String>) -> String {
    let normalized = header.trim().to_lowercase();
    match columns_mapper.get(&normalized) {
        Some(mapped) => mapped.clone(),
        None => normalized,
    }
}
