use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Succeeds when `path` is free, or when it exists and either `force` is set
/// or the user confirms the overwrite on stdin.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if force || !path.exists() {
        return Ok(());
    }

    warning(format!("{} already exists.", path.display()));
    print!("Replace it? [y/N] ");
    io::stdout().flush()?;

    let mut reply = String::new();
    io::stdin().lock().read_line(&mut reply)?;

    match reply.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(()),
        _ => Err(AppError::Export(format!(
            "not overwriting existing file {}",
            path.display()
        ))),
    }
}
