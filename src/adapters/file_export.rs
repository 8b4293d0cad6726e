//! File export adapter: Implementation of ReportSink.
//!
//! Writes the report into a directory, standing in for a browser download.
//! An existing file with the same name is replaced.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::ports::{ReportArtifact, ReportSink};

/// Error type for export operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Export directory {0:?} does not exist")]
    MissingDirectory(PathBuf),

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes report artifacts into a fixed directory.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    dir: PathBuf,
}

impl FileReportSink {
    /// Create a sink that writes into `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    {
        let mut file = fs::File::create(tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(tmp_path, path)
}

impl ReportSink for FileReportSink {
    type Error = ExportError;

    fn export(&self, artifact: &ReportArtifact) -> Result<PathBuf, ExportError> {
        // Only bare file names; never let a name escape the export directory.
        let name = Path::new(&artifact.file_name);
        if artifact.file_name.is_empty()
            || name.file_name().map(|n| n.len()) != Some(artifact.file_name.len())
        {
            return Err(ExportError::InvalidFileName(artifact.file_name.clone()));
        }

        if !self.dir.is_dir() {
            return Err(ExportError::MissingDirectory(self.dir.clone()));
        }

        let path = self.dir.join(name);

        // Write to a sibling temp file first so a failed write never leaves a truncated report.
        let tmp_path = self.dir.join(format!(".{}.partial", artifact.file_name));
        if let Err(e) = write_then_rename(&tmp_path, &path, &artifact.bytes) {
            if tmp_path.exists() {
                if let Err(cleanup) = fs::remove_file(&tmp_path) {
                    tracing::warn!("Could not remove partial report: {}", cleanup);
                }
            }
            return Err(e.into());
        }

        tracing::info!(
            "Exported {} ({} bytes, {})",
            artifact.file_name,
            artifact.bytes.len(),
            artifact.mime
        );
        Ok(path)
    }
}
