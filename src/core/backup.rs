use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::{success, warning};
use rusqlite::Connection;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

/// Snapshot of the SQLite file, optionally packed into a `.zip`.
pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database to `dest_file` and return the path of the artefact
    /// that was actually left on disk (the copy, or the zip replacing it).
    pub fn backup(
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        let src = Path::new(db_path);
        if !src.is_file() {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        let dest = PathBuf::from(dest_file);
        let (copy, artefact) = if compress {
            let mut tmp = dest.clone().into_os_string();
            tmp.push(".tmp");
            (PathBuf::from(tmp), dest.with_extension("zip"))
        } else {
            (dest.clone(), dest)
        };

        if let Some(dir) = artefact.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        ensure_writable(&artefact, force)?;

        fs::copy(src, &copy)?;

        if compress {
            let zipped = zip_single_file(&copy, &artefact, src);
            if let Err(e) = fs::remove_file(&copy) {
                warning(format!("Could not remove temporary copy: {}", e));
            }
            zipped?;
        }

        success(format!("Backup written to {}", artefact.display()));
        audit(src, &artefact, compress);

        Ok(artefact)
    }
}

/// Pack `input` into `output` under the database's own file name.
fn zip_single_file(input: &Path, output: &Path, db: &Path) -> AppResult<()> {
    let name = db
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "teamclock.sqlite".to_string());

    let mut writer = ZipWriter::new(fs::File::create(output)?);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    writer.start_file(name, options).map_err(io::Error::other)?;
    io::copy(&mut fs::File::open(input)?, &mut writer)?;
    writer.finish().map_err(io::Error::other)?;
    Ok(())
}

fn audit(db: &Path, artefact: &Path, compress: bool) {
    let Ok(conn) = Connection::open(db) else {
        return;
    };
    let message = if compress {
        "database copied and zipped"
    } else {
        "database copied"
    };
    ttlog_quiet(&conn, "backup", &artefact.to_string_lossy(), message);
}
