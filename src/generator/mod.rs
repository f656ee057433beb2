/// Function-call mode: hand the rows to a SQL function as one JSONB argument.
pub mod function_call;
/// Resolved statements shared by the builder and the renderer.
pub mod ir;
/// `INSERT` text rendering, including hash application.
pub mod sql_renderer;
/// Row-to-statement transformation with one-to-many and many-to-many expansion.
pub mod table_data;
