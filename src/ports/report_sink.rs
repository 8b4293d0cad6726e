//! Report sink port: Trait for delivering the downloadable report.
//!
//! This trait abstracts where the exported file ends up (a directory on disk,
//! a browser download, an in-memory buffer in tests).

use std::path::PathBuf;

/// A downloadable artifact produced by an assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    /// Suggested file name
    pub file_name: String,

    /// MIME type of `bytes`
    pub mime: String,

    /// UTF-8 encoded content
    pub bytes: Vec<u8>,
}

impl ReportArtifact {
    /// Wrap a plain-text report.
    #[must_use]
    pub fn plain_text(file_name: impl Into<String>, text: &str) -> Self {
        Self {
            file_name: file_name.into(),
            mime: crate::domain::report::REPORT_MIME.to_string(),
            bytes: text.as_bytes().to_vec(),
        }
    }
}

/// Trait for delivering report artifacts.
///
/// Nothing else about an assessment is ever written out.
pub trait ReportSink: Send + Sync {
    /// Error type for export operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Deliver the artifact.
    ///
    /// # Returns
    /// The location the artifact was written to.
    ///
    /// # Errors
    /// Returns error if the artifact cannot be written.
    fn export(&self, artifact: &ReportArtifact) -> Result<PathBuf, Self::Error>;
}
