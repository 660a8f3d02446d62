//! Application error types.

use std::fmt;

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Errors that stop the tool before or outside the pipeline.
#[derive(Debug)]
pub enum AppError {
    /// Configuration error.
    Config(String),
    /// Scraper setup error (bad selector, client construction).
    Scrape(agenda_scraper::ScrapeError),
    /// IO error.
    Io(std::io::Error),
    /// Logging could not be initialised.
    Tracing(agenda_core::TracingError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Scrape(err) => write!(f, "scraper error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Tracing(err) => write!(f, "logging error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scrape(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Tracing(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<agenda_scraper::ScrapeError> for AppError {
    fn from(err: agenda_scraper::ScrapeError) -> Self {
        Self::Scrape(err)
    }
}

impl From<agenda_core::TracingError> for AppError {
    fn from(err: agenda_core::TracingError) -> Self {
        Self::Tracing(err)
    }
}
