use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Write `sql` followed by a newline to `path`, or to stdout when `path` is
/// `None`. Missing parent directories are created.
pub fn write_output(path: Option<&Path>, sql: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, with_trailing_newline(sql))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(with_trailing_newline(sql).as_bytes())?;
            handle.flush()?;
        }
    }
    Ok(())
}

fn with_trailing_newline(sql: &str) -> String {
    let mut out = sql.trim_end_matches('\n').to_string();
    out.push('\n');
    out
}
