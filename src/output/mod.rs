/// Writes generated SQL to a file or stdout.
pub mod formatter;
