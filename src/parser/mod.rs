/// Column-key classification and parsing of the one-to-many and many-to-many encodings.
pub mod column_name;
/// Table-name helpers: schema qualification, singularization, primary-key naming.
pub mod names;
/// PostgreSQL parse check of generated SQL via `sqlparser`.
pub mod sql_check;
