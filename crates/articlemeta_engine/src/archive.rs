use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::persist::{commit_staged, staging_file, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("zip error: {0}")]
    Zip(#[from] ZipError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Destination for archive entries.
///
/// `finish` consumes the sink and returns where the archive ended up.
pub trait EntrySink {
    fn add_entry(&mut self, name: &str, content: &[u8]) -> Result<(), ArchiveError>;
    fn finish(self) -> Result<PathBuf, ArchiveError>;
}

/// Deflate-compressed zip staged in a temp file beside its destination.
///
/// Nothing appears at the destination until [`EntrySink::finish`];
/// dropping the writer discards everything written so far.
pub struct ArchiveWriter {
    zip: ZipWriter<NamedTempFile>,
    target: PathBuf,
    entries: u64,
}

impl ArchiveWriter {
    pub fn create(target: &Path) -> Result<Self, ArchiveError> {
        let staged = staging_file(target)?;
        Ok(Self {
            zip: ZipWriter::new(staged),
            target: target.to_path_buf(),
            entries: 0,
        })
    }

    pub fn entry_count(&self) -> u64 {
        self.entries
    }
}

impl EntrySink for ArchiveWriter {
    fn add_entry(&mut self, name: &str, content: &[u8]) -> Result<(), ArchiveError> {
        self.zip.start_file(name, entry_options())?;
        self.zip.write_all(content)?;
        self.entries += 1;
        Ok(())
    }

    /// Writes the central directory and moves the archive into place.
    fn finish(self) -> Result<PathBuf, ArchiveError> {
        let staged = self.zip.finish()?;
        Ok(commit_staged(staged, &self.target)?)
    }
}

/// Deflate with zip64 headers, so the archive may exceed 4 GiB.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(true)
}
