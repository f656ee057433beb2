use std::collections::HashMap;
use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};

use crate::error::{Result, SeedError};
use crate::generator::ir::Row;
use crate::loader::{normalize_header, RowSource};

/// One sheet of an `.xlsx` workbook: a header row followed by data rows.
///
/// Headers get the same normalization as [`CsvSource`](crate::loader::CsvSource).
/// Without a sheet name the first sheet of the workbook is read.
#[derive(Debug, Clone, Default)]
pub struct XlsxSource {
    content: Vec<u8>,
    sheet_name: Option<String>,
    columns_mapper: HashMap<String, String>,
}

impl XlsxSource {
    /// Wrap the raw bytes of a workbook.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            sheet_name: None,
            columns_mapper: HashMap::new(),
        }
    }

    /// Read `sheet_name` instead of the first sheet.
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }

    /// Rename normalized header cells.
    pub fn with_columns_mapper(mut self, columns_mapper: HashMap<String, String>) -> Self {
        self.columns_mapper = columns_mapper;
        self
    }
}

impl RowSource for XlsxSource {
    fn load(&self) -> Result<Vec<Row>> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(self.content.as_slice()))?;
        let sheet = match &self.sheet_name {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or(SeedError::EmptyInput)?,
        };
        let range = workbook.worksheet_range(&sheet)?;

        let mut sheet_rows = range.rows();
        let header = sheet_rows.next().ok_or(SeedError::EmptyInput)?;
        // Trailing blank header cells only widen the used range.
        let width = header
            .iter()
            .rposition(|cell| !cell_text(cell).trim().is_empty())
            .map_or(0, |last| last + 1);
        let columns: Vec<String> = header[..width]
            .iter()
            .map(|cell| normalize_header(&cell_text(cell), &self.columns_mapper))
            .collect();

        let rows: Vec<Row> = sheet_rows
            .map(|cells| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(index, column)| {
                        let value = cells.get(index).map(cell_text).unwrap_or_default();
                        (column.clone(), value)
                    })
                    .collect()
            })
            .collect();

        if rows.is_empty() {
            return Err(SeedError::EmptyInput);
        }
        Ok(rows)
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        other => other.to_string(),
    }
}
