use tracing::debug;

use crate::config::SeederConfig;
use crate::error::{Result, SeedError};
use crate::generator::function_call::function_call_sql;
use crate::generator::ir::{Row, TableData};
use crate::generator::sql_renderer::{HashFn, StatementRenderer};
use crate::generator::table_data::TableDataBuilder;
use crate::loader::RowSource;

/// Where seeded rows go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedTarget {
    /// `INSERT` into `schema.table`, expanding relation-encoded columns.
    Table {
        /// Schema name; empty for an unqualified table.
        schema: String,
        /// Table name; required.
        table: String,
    },
    /// Pass all rows to a SQL function as a single JSONB argument.
    Function {
        /// Possibly schema-qualified function name.
        name: String,
    },
}

impl SeedTarget {
    /// Table target.
    pub fn table(schema: impl Into<String>, table: impl Into<String>) -> Self {
        SeedTarget::Table {
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Function-call target.
    pub fn function(name: impl Into<String>) -> Self {
        SeedTarget::Function { name: name.into() }
    }
}

/// Configured builder and renderer. Holds no per-call state, so one seeder
/// can serve any number of independent calls.
#[derive(Debug, Clone)]
pub struct Seeder {
    config: SeederConfig,
    builder: TableDataBuilder,
    renderer: StatementRenderer,
}

impl Seeder {
    /// Validate `config` and build a seeder without a hash function.
    pub fn new(config: SeederConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            builder: TableDataBuilder::from_config(&config),
            renderer: StatementRenderer::from_config(&config),
            config,
        })
    }

    /// Hash the literals of `#`-marked columns with `hash`.
    pub fn with_hash(mut self, hash: HashFn) -> Self {
        self.renderer = self.renderer.with_hash(hash);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SeederConfig {
        &self.config
    }

    /// Statement builder.
    pub fn builder(&self) -> &TableDataBuilder {
        &self.builder
    }

    /// Statement renderer.
    pub fn renderer(&self) -> &StatementRenderer {
        &self.renderer
    }

    /// Build resolved statements for `schema.table` without rendering them.
    pub fn table_data(&self, rows: &[Row], schema: &str, table: &str) -> Result<TableData> {
        if table.is_empty() {
            return Err(SeedError::MissingTable);
        }
        self.builder.build_table_data(rows, schema, table)
    }

    /// Produce the SQL text for `rows`.
    pub fn seed(&self, rows: &[Row], target: &SeedTarget) -> Result<String> {
        match target {
            SeedTarget::Function { name } => {
                debug!(function = %name, rows = rows.len(), "rendering function call");
                function_call_sql(rows, name)
            }
            SeedTarget::Table { schema, table } => {
                let data = self.table_data(rows, schema, table)?;
                debug!(
                    statements = data.statements.len(),
                    rows = data.row_count(),
                    "rendering insert statements"
                );
                self.renderer.render(&data)
            }
        }
    }

    /// Load rows from `source` and seed them.
    pub fn seed_from(&self, source: &dyn RowSource, target: &SeedTarget) -> Result<String> {
        let rows = source.load()?;
        self.seed(&rows, target)
    }
}
