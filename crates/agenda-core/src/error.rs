//! Error types for calendar output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing a calendar file.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The calendar file could not be written.
    #[error("failed to write calendar to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CalendarError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A specialized Result type for calendar output.
pub type CalendarResult<T> = Result<T, CalendarError>;
