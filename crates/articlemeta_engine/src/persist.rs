use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Temp file next to `target`, so the final rename stays on one filesystem.
pub fn staging_file(target: &Path) -> Result<NamedTempFile, PersistError> {
    let dir = parent_dir(target);
    ensure_output_dir(&dir)?;
    NamedTempFile::new_in(&dir).map_err(|e| PersistError::OutputDir(e.to_string()))
}

/// Flush `staged` and rename it over `target`.
///
/// The rename replaces a previous file in one step; if it fails the previous
/// file is left as it was.
pub fn commit_staged(mut staged: NamedTempFile, target: &Path) -> Result<PathBuf, PersistError> {
    staged.flush()?;
    staged.as_file_mut().sync_all()?;

    staged
        .persist(target)
        .map_err(|e| PersistError::Io(e.error))?;
    Ok(target.to_path_buf())
}

fn parent_dir(target: &Path) -> PathBuf {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::parent_dir;
    use std::path::{Path, PathBuf};

    #[test]
    fn bare_file_name_stages_in_current_dir() {
        assert_eq!(parent_dir(Path::new("dump.zip")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("/tmp/dump.zip")), PathBuf::from("/tmp"));
    }
}
