use tracing::debug;

use crate::classifier::columns::{classify_column, split_columns, ColumnKind};
use crate::classifier::literals::{is_null_token, lookup_subquery, LiteralMode};
use crate::config::SeederConfig;
use crate::error::{Result, SeedError};
use crate::generator::ir::{RenderedValue, Row, Statement, StatementRow, TableData};
use crate::parser::column_name::{ManyToManyRelation, OneToManyRelation, RelationSyntax};

/// A root column with its lookup pre-parsed when it is one-to-many encoded.
#[derive(Debug, Clone)]
struct RootColumn {
    key: String,
    kind: ColumnKind,
    lookup: Option<OneToManyRelation>,
}

/// A many-to-many column with both junction lookups pre-parsed.
#[derive(Debug, Clone)]
struct JunctionColumn {
    key: String,
    relation: ManyToManyRelation,
    first: OneToManyRelation,
    second: OneToManyRelation,
}

/// Turns flat rows into resolved [`Statement`]s.
#[derive(Debug, Clone)]
pub struct TableDataBuilder {
    syntax: RelationSyntax,
    row_item_delimiter: String,
    mode: LiteralMode,
}

impl Default for TableDataBuilder {
    fn default() -> Self {
        Self::from_config(&SeederConfig::default())
    }
}

impl TableDataBuilder {
    /// Create a builder from explicit settings.
    pub fn new(
        syntax: RelationSyntax,
        row_item_delimiter: impl Into<String>,
        mode: LiteralMode,
    ) -> Self {
        Self {
            syntax,
            row_item_delimiter: row_item_delimiter.into(),
            mode,
        }
    }

    /// Create a builder from a validated configuration.
    pub fn from_config(config: &SeederConfig) -> Self {
        Self::new(
            config.syntax(),
            &config.row_item_delimiter,
            config.literal_mode(),
        )
    }

    /// Delimiters used to classify column keys.
    pub fn syntax(&self) -> &RelationSyntax {
        &self.syntax
    }

    /// Build the root statement for `schema.table` followed by one junction
    /// statement per many-to-many column.
    ///
    /// The first row decides which columns exist and how they are classified.
    /// Any malformed column key or missing cell aborts the whole build.
    pub fn build_table_data(&self, rows: &[Row], schema: &str, table: &str) -> Result<TableData> {
        let first = rows.first().ok_or(SeedError::EmptyInput)?;
        let split = split_columns(&self.syntax, first);
        debug!(
            table,
            root_columns = split.root_columns.len(),
            relation_columns = split.relation_columns.len(),
            "classified columns"
        );

        let root_columns = self.parse_root_columns(&split.root_columns)?;
        let junction_columns = self.parse_junction_columns(&split.relation_columns, schema, table)?;

        let mut root_rows = Vec::with_capacity(rows.len());
        let mut junction_rows: Vec<Vec<StatementRow>> = vec![Vec::new(); junction_columns.len()];

        for (index, row) in rows.iter().enumerate() {
            root_rows.push(self.build_root_row(&root_columns, row, index)?);
            for (column, acc) in junction_columns.iter().zip(junction_rows.iter_mut()) {
                acc.extend(self.build_junction_rows(column, row, index)?);
            }
        }

        let mut statements = Vec::with_capacity(1 + junction_columns.len());
        statements.push(Statement {
            schema: schema.to_string(),
            table: table.to_string(),
            columns: split.root_columns,
            rows: root_rows,
        });
        for (column, rows) in junction_columns.into_iter().zip(junction_rows) {
            debug!(
                junction_table = %column.relation.table,
                rows = rows.len(),
                "expanded many-to-many column"
            );
            let [first_key, second_key] = column.relation.columns;
            statements.push(Statement {
                schema: String::new(),
                table: column.relation.table,
                columns: vec![first_key, second_key],
                rows,
            });
        }

        Ok(TableData { statements })
    }

    /// Resolve a single one-to-many encoded column against `value`.
    pub fn one_to_many_subquery(&self, column: &str, value: &str) -> Result<String> {
        let relation = self.syntax.parse_one_to_many(column)?;
        Ok(lookup_subquery(&relation, value, self.mode))
    }

    fn parse_root_columns(&self, columns: &[String]) -> Result<Vec<RootColumn>> {
        columns
            .iter()
            .map(|key| {
                let kind = classify_column(&self.syntax, key);
                let lookup = match kind {
                    ColumnKind::OneToMany => Some(self.syntax.parse_one_to_many(key)?),
                    _ => None,
                };
                Ok(RootColumn {
                    key: key.clone(),
                    kind,
                    lookup,
                })
            })
            .collect()
    }

    fn parse_junction_columns(
        &self,
        columns: &[String],
        schema: &str,
        table: &str,
    ) -> Result<Vec<JunctionColumn>> {
        columns
            .iter()
            .map(|key| {
                let relation = self.syntax.parse_many_to_many(key, schema, table)?;
                let [first_key, second_key] = &relation.columns;
                let first = self.syntax.parse_one_to_many(first_key)?;
                let second = self.syntax.parse_one_to_many(second_key)?;
                Ok(JunctionColumn {
                    key: key.clone(),
                    relation,
                    first,
                    second,
                })
            })
            .collect()
    }

    fn build_root_row(&self, columns: &[RootColumn], row: &Row, index: usize) -> Result<StatementRow> {
        columns
            .iter()
            .map(|column| {
                let value = cell(row, &column.key, index)?;
                // Hash-marked cells are hashed verbatim, null tokens included.
                let resolved = match (&column.lookup, column.kind) {
                    (Some(lookup), _) => {
                        RenderedValue::Subquery(lookup_subquery(lookup, value, self.mode))
                    }
                    (None, ColumnKind::Hashed) => RenderedValue::Literal {
                        value: value.to_string(),
                        hashed: true,
                    },
                    _ if is_null_token(value) => RenderedValue::Null,
                    (None, _) => RenderedValue::literal(value),
                };
                Ok((column.key.clone(), resolved))
            })
            .collect()
    }

    fn build_junction_rows(
        &self,
        column: &JunctionColumn,
        row: &Row,
        index: usize,
    ) -> Result<Vec<StatementRow>> {
        let tokens = cell(row, &column.key, index)?;
        let owner = cell(row, &column.relation.first_search_column, index)?;
        let owner_lookup = lookup_subquery(&column.first, owner, self.mode);
        let [first_key, second_key] = &column.relation.columns;

        Ok(tokens
            .split(self.row_item_delimiter.as_str())
            .map(|token| {
                let mut junction = StatementRow::with_capacity(2);
                junction.insert(
                    first_key.clone(),
                    RenderedValue::Subquery(owner_lookup.clone()),
                );
                junction.insert(
                    second_key.clone(),
                    RenderedValue::Subquery(lookup_subquery(&column.second, token, self.mode)),
                );
                junction
            })
            .collect())
    }
}

fn cell<'r>(row: &'r Row, column: &str, index: usize) -> Result<&'r str> {
    row.get(column)
        .map(String::as_str)
        .ok_or_else(|| SeedError::MissingCell {
            row: index,
            column: column.to_string(),
        })
}
