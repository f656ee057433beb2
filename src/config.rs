use serde::{Deserialize, Serialize};

use crate::classifier::literals::LiteralMode;
use crate::error::{Result, SeedError};
use crate::parser::column_name::{
    RelationSyntax, DEFAULT_MANY_TO_MANY_DELIMITER, DEFAULT_ONE_TO_MANY_DELIMITER,
};

/// Default separator between the tokens of a many-to-many cell.
pub const DEFAULT_ROW_ITEM_DELIMITER: &str = "|";

/// Immutable seeding configuration. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeederConfig {
    /// Delimiter of `<pk><d2><table><d2><search>` keys.
    pub one_to_many_delimiter: String,
    /// Delimiter of five-segment many-to-many keys.
    pub many_to_many_delimiter: String,
    /// Separator between tokens of a many-to-many cell.
    pub row_item_delimiter: String,
    /// Quote every literal and escape quotes instead of the compat heuristics.
    pub strict: bool,
}

impl Default for SeederConfig {
    fn default() -> Self {
        Self {
            one_to_many_delimiter: DEFAULT_ONE_TO_MANY_DELIMITER.to_string(),
            many_to_many_delimiter: DEFAULT_MANY_TO_MANY_DELIMITER.to_string(),
            row_item_delimiter: DEFAULT_ROW_ITEM_DELIMITER.to_string(),
            strict: false,
        }
    }
}

impl SeederConfig {
    /// Load a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SeederConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject delimiters that would make column classification ambiguous.
    ///
    /// Many-to-many keys are recognized first, so a one-to-many delimiter
    /// containing the many-to-many delimiter would turn every one-to-many key
    /// into a malformed many-to-many key.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("one_to_many_delimiter", &self.one_to_many_delimiter),
            ("many_to_many_delimiter", &self.many_to_many_delimiter),
            ("row_item_delimiter", &self.row_item_delimiter),
        ] {
            if value.is_empty() {
                return Err(SeedError::InvalidConfig(format!("{name} must not be empty")));
            }
        }
        if self.one_to_many_delimiter.contains(&self.many_to_many_delimiter) {
            return Err(SeedError::InvalidConfig(format!(
                "one_to_many_delimiter '{}' must not contain many_to_many_delimiter '{}'",
                self.one_to_many_delimiter, self.many_to_many_delimiter
            )));
        }
        Ok(())
    }

    /// Delimiters of the relation encodings.
    pub fn syntax(&self) -> RelationSyntax {
        RelationSyntax::new(&self.one_to_many_delimiter, &self.many_to_many_delimiter)
    }

    /// Literal handling selected by `strict`.
    pub fn literal_mode(&self) -> LiteralMode {
        if self.strict {
            LiteralMode::Strict
        } else {
            LiteralMode::Compat
        }
    }
}
