use crate::generator::ir::Row;
use crate::parser::column_name::RelationSyntax;

/// How a column key is treated when building statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Value is inserted as a literal.
    Plain,
    /// Value is inserted as a literal passed through the hash function.
    Hashed,
    /// Value is resolved through a foreign-key subquery.
    OneToMany,
    /// Value expands into junction-table rows.
    ManyToMany,
}

impl ColumnKind {
    /// True for every kind that stays in the root table's column list.
    pub fn is_root(self) -> bool {
        !matches!(self, ColumnKind::ManyToMany)
    }
}

/// Classify a column key. Many-to-many is tested first, then one-to-many,
/// then the hash marker.
pub fn classify_column(syntax: &RelationSyntax, column: &str) -> ColumnKind {
    if syntax.is_many_to_many(column) {
        ColumnKind::ManyToMany
    } else if syntax.is_one_to_many(column) {
        ColumnKind::OneToMany
    } else if syntax.is_hashed_column(column) {
        ColumnKind::Hashed
    } else {
        ColumnKind::Plain
    }
}

/// Column keys of a sample row partitioned into root and many-to-many columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSplit {
    /// Plain, hashed and one-to-many columns, in row order.
    pub root_columns: Vec<String>,
    /// Many-to-many columns, in row order.
    pub relation_columns: Vec<String>,
}

/// Partition the keys of `row` by [`ColumnKind::is_root`].
pub fn split_columns(syntax: &RelationSyntax, row: &Row) -> ColumnSplit {
    let mut split = ColumnSplit::default();
    for column in row.keys() {
        if classify_column(syntax, column).is_root() {
            split.root_columns.push(column.clone());
        } else {
            split.relation_columns.push(column.clone());
        }
    }
    split
}
