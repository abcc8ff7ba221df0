//! Zip archive reading and writing for project file sets.

pub mod reader;
pub mod writer;

use thiserror::Error;

use crate::domain::errors::AnalysisError;

pub use reader::{ArchiveReader, REQUIRED_FILE};
pub use writer::{fixed_archive_name, write_archive};

/// Errors raised while reading or writing archives
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Not a readable zip archive: {0}")]
    Unreadable(#[from] zip::result::ZipError),

    #[error("Failed to read archive entry '{entry}': {source}")]
    Entry {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Required file '{0}' was not found in the project archive")]
    MissingRequiredFile(String),

    #[error("Failed to write archive: {0}")]
    Write(String),
}

impl From<ArchiveError> for AnalysisError {
    fn from(err: ArchiveError) -> Self {
        match err {
            ArchiveError::MissingRequiredFile(file) => Self::PreconditionMissing { file },
            other => Self::Archive(other.to_string()),
        }
    }
}
