/// Column kinds and the root / many-to-many column split.
pub mod columns;
/// Literal wrapping, strict mode, and lookup subqueries.
pub mod literals;
