use std::collections::HashMap;

use csv::ReaderBuilder;

use crate::error::{Result, SeedError};
use crate::generator::ir::Row;
use crate::loader::{normalize_header, RowSource};

/// A sheet exported as CSV: one header row followed by data rows.
///
/// Header cells are trimmed and lower-cased, then renamed through
/// `columns_mapper` when they appear in it.
#[derive(Debug, Clone, Default)]
pub struct CsvSource {
    content: String,
    columns_mapper: HashMap<String, String>,
}

impl CsvSource {
    /// Wrap CSV text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            columns_mapper: HashMap::new(),
        }
    }

    /// Rename normalized header cells. Keys are matched after normalization.
    pub fn with_columns_mapper(mut self, columns_mapper: HashMap<String, String>) -> Self {
        self.columns_mapper = columns_mapper;
        self
    }
}

impl RowSource for CsvSource {
    fn load(&self) -> Result<Vec<Row>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(self.content.as_bytes());

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|header| normalize_header(header, &self.columns_mapper))
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: Row = columns
                .iter()
                .enumerate()
                .map(|(index, column)| {
                    let cell = record.get(index).unwrap_or_default();
                    (column.clone(), cell.to_string())
                })
                .collect();
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(SeedError::EmptyInput);
        }
        Ok(rows)
    }
}
