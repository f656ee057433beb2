use serde::{Deserialize, Serialize};

use crate::error::{RelationKind, Result, SeedError};
use crate::parser::names::{primary_key_from_table_name, qualified_table_name};

/// Default delimiter of the one-to-many encoding.
pub const DEFAULT_ONE_TO_MANY_DELIMITER: &str = "**";
/// Default delimiter of the many-to-many encoding.
pub const DEFAULT_MANY_TO_MANY_DELIMITER: &str = "***";
/// Separator that marks a column whose literal value is hashed at render time.
pub const HASH_MARKER: char = '#';

const ONE_TO_MANY_SEGMENTS: usize = 3;
const MANY_TO_MANY_SEGMENTS: usize = 5;

/// A foreign-key lookup decoded from `<pk><d2><table><d2><search>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneToManyRelation {
    /// Table the value is looked up in (may be schema-qualified).
    pub table: String,
    /// Column selected from `table`.
    pub primary_key: String,
    /// Column of `table` compared against the cell value.
    pub search_key: String,
}

/// A junction-table expansion decoded from
/// `<joinPk><d3><joinTable><d3><secondTable><d3><secondSearch><d3><firstSearch>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManyToManyRelation {
    /// Junction table receiving the expanded rows.
    pub table: String,
    /// Table the seeded rows belong to.
    pub first_table: String,
    /// Table the delimited cell tokens are looked up in.
    pub second_table: String,
    /// Column of the seeded row that identifies it in `first_table`.
    pub first_search_column: String,
    /// Column of `second_table` compared against each token.
    pub second_search_column: String,
    /// Two one-to-many encoded junction columns: the current row's own key,
    /// then the joined value's key.
    pub columns: [String; 2],
}

/// Delimiters of the relation encodings embedded in column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationSyntax {
    /// Separates the three segments of a one-to-many key.
    pub one_to_many: String,
    /// Separates the five segments of a many-to-many key.
    pub many_to_many: String,
}

impl Default for RelationSyntax {
    fn default() -> Self {
        Self {
            one_to_many: DEFAULT_ONE_TO_MANY_DELIMITER.to_string(),
            many_to_many: DEFAULT_MANY_TO_MANY_DELIMITER.to_string(),
        }
    }
}

impl RelationSyntax {
    /// Build a syntax from explicit delimiters.
    pub fn new(one_to_many: impl Into<String>, many_to_many: impl Into<String>) -> Self {
        Self {
            one_to_many: one_to_many.into(),
            many_to_many: many_to_many.into(),
        }
    }

    /// True when the key carries the many-to-many delimiter.
    ///
    /// Tested before [`Self::is_one_to_many`]: with the default delimiters
    /// every many-to-many key also contains the one-to-many delimiter.
    pub fn is_many_to_many(&self, column: &str) -> bool {
        column.contains(&self.many_to_many)
    }

    /// True when the key carries the one-to-many delimiter but not the
    /// many-to-many one.
    pub fn is_one_to_many(&self, column: &str) -> bool {
        !self.is_many_to_many(column) && column.contains(&self.one_to_many)
    }

    /// True when the key splits into exactly two parts on `#`.
    pub fn is_hashed_column(&self, column: &str) -> bool {
        column.split(HASH_MARKER).count() == 2
    }

    /// Parse `<pk><d2><table><d2><search>`.
    pub fn parse_one_to_many(&self, column: &str) -> Result<OneToManyRelation> {
        let parts: Vec<&str> = column.split(self.one_to_many.as_str()).collect();
        let [primary_key, table, search_key] = parts.as_slice() else {
            return Err(self.format_error(RelationKind::OneToMany, column, parts.len()));
        };
        Ok(OneToManyRelation {
            table: (*table).to_string(),
            primary_key: (*primary_key).to_string(),
            search_key: (*search_key).to_string(),
        })
    }

    /// Parse `<joinPk><d3><joinTable><d3><secondTable><d3><secondSearch><d3><firstSearch>`
    /// for rows seeded into `schema.table`.
    ///
    /// Example with `table = "products"`, `schema = "public"`:
    /// `tag_id***product_tags***tags***tag_name***product_name` yields the
    /// junction columns `product_id**public.products**product_name` and
    /// `tag_id**tags**tag_name`.
    pub fn parse_many_to_many(
        &self,
        column: &str,
        schema: &str,
        table: &str,
    ) -> Result<ManyToManyRelation> {
        let parts: Vec<&str> = column.split(self.many_to_many.as_str()).collect();
        let [join_pk, join_table, second_table, second_search, first_search] = parts.as_slice()
        else {
            return Err(self.format_error(RelationKind::ManyToMany, column, parts.len()));
        };

        let d2 = &self.one_to_many;
        let first_column = format!(
            "{}{d2}{}{d2}{first_search}",
            primary_key_from_table_name(table),
            qualified_table_name(schema, table),
        );
        let second_column = format!("{join_pk}{d2}{second_table}{d2}{second_search}");

        Ok(ManyToManyRelation {
            table: (*join_table).to_string(),
            first_table: table.to_string(),
            second_table: (*second_table).to_string(),
            first_search_column: (*first_search).to_string(),
            second_search_column: (*second_search).to_string(),
            columns: [first_column, second_column],
        })
    }

    /// Reduce a column key to the name used in the SQL column list.
    pub fn base_column_name<'a>(&self, column: &'a str) -> &'a str {
        if self.is_one_to_many(column) {
            return column
                .split(self.one_to_many.as_str())
                .next()
                .unwrap_or(column);
        }
        if self.is_hashed_column(column) {
            return column.split(HASH_MARKER).next().unwrap_or(column);
        }
        column
    }

    fn format_error(&self, kind: RelationKind, column: &str, found: usize) -> SeedError {
        let (delimiter, expected) = match kind {
            RelationKind::OneToMany => (&self.one_to_many, ONE_TO_MANY_SEGMENTS),
            RelationKind::ManyToMany => (&self.many_to_many, MANY_TO_MANY_SEGMENTS),
        };
        SeedError::RelationFormat {
            kind,
            column: column.to_string(),
            delimiter: delimiter.clone(),
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn many_to_many_keys_are_never_one_to_many() {
        let syntax = RelationSyntax::default();
        let m2m = "tag_id***product_tags***tags***tag_name***product_name";
        assert!(syntax.is_many_to_many(m2m));
        assert!(!syntax.is_one_to_many(m2m));
        assert!(syntax.is_one_to_many("category_id**categories**category_name"));
        assert!(!syntax.is_many_to_many("category_id**categories**category_name"));
        assert!(!syntax.is_one_to_many("name"));
    }

    #[test]
    fn hashed_column_requires_exactly_one_marker() {
        let syntax = RelationSyntax::default();
        assert!(syntax.is_hashed_column("password#bcrypt"));
        assert!(syntax.is_hashed_column("password#"));
        assert!(!syntax.is_hashed_column("password"));
        assert!(!syntax.is_hashed_column("a#b#c"));
    }

    #[test]
    fn parse_one_to_many_rejects_wrong_arity() {
        let syntax = RelationSyntax::default();
        let err = syntax.parse_one_to_many("a**b").unwrap_err();
        assert!(matches!(
            err,
            SeedError::RelationFormat {
                kind: RelationKind::OneToMany,
                expected: 3,
                found: 2,
                ..
            }
        ));
        assert!(syntax.parse_one_to_many("a**b**c**d").is_err());
    }

    #[test]
    fn base_column_name_strips_encodings() {
        let syntax = RelationSyntax::default();
        assert_eq!(
            syntax.base_column_name("category_id**categories**category_name"),
            "category_id"
        );
        assert_eq!(syntax.base_column_name("password#bcrypt"), "password");
        assert_eq!(syntax.base_column_name("name"), "name");
    }

    #[test]
    fn custom_delimiters_are_honoured() {
        let syntax = RelationSyntax::new("::", ":::");
        let rel = syntax.parse_one_to_many("category_id::categories::category_name").unwrap();
        assert_eq!(rel.table, "categories");

        let m2m = syntax
            .parse_many_to_many("tag_id:::product_tags:::tags:::tag_name:::product_name", "", "products")
            .unwrap();
        assert_eq!(
            m2m.columns,
            [
                "product_id::products::product_name".to_string(),
                "tag_id::tags::tag_name".to_string()
            ]
        );
    }
}
