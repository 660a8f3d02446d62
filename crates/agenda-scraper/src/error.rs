//! Error types for fetching and parsing the agenda page.

use std::fmt;
use thiserror::Error;

/// The category of a scrape error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrapeErrorCode {
    /// Network error - connection failed, timeout, DNS resolution, etc.
    Network,
    /// The server answered with a non-2xx status.
    HttpStatus,
    /// The response body could not be read.
    InvalidResponse,
    /// A structural selector does not parse.
    InvalidSelector,
    /// Configuration error - missing or invalid settings.
    Configuration,
}

impl ScrapeErrorCode {
    /// Returns a human-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network_error",
            Self::HttpStatus => "http_status",
            Self::InvalidResponse => "invalid_response",
            Self::InvalidSelector => "invalid_selector",
            Self::Configuration => "configuration_error",
        }
    }
}

impl fmt::Display for ScrapeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while fetching or preparing to parse the page.
#[derive(Debug, Error)]
pub struct ScrapeError {
    code: ScrapeErrorCode,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ScrapeError {
    /// Creates a new error with the given code and message.
    pub fn new(code: ScrapeErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ScrapeErrorCode::Network, message)
    }

    pub fn http_status(message: impl Into<String>) -> Self {
        Self::new(ScrapeErrorCode::HttpStatus, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ScrapeErrorCode::InvalidResponse, message)
    }

    pub fn invalid_selector(message: impl Into<String>) -> Self {
        Self::new(ScrapeErrorCode::InvalidSelector, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ScrapeErrorCode::Configuration, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ScrapeErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for scrape operations.
pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_display() {
        assert_eq!(ScrapeErrorCode::Network.as_str(), "network_error");
        assert_eq!(ScrapeErrorCode::InvalidSelector.to_string(), "invalid_selector");
    }

    #[test]
    fn scrape_error_creation() {
        let err = ScrapeError::http_status("503 Service Unavailable");
        assert_eq!(err.code(), ScrapeErrorCode::HttpStatus);
        assert_eq!(err.message(), "503 Service Unavailable");
    }

    #[test]
    fn scrape_error_display() {
        let err = ScrapeError::network("connection refused");
        assert_eq!(err.to_string(), "network_error: connection refused");
    }

    #[test]
    fn scrape_error_with_source() {
        use std::error::Error;
        let io_err = std::io::Error::other("reset by peer");
        let err = ScrapeError::network("request failed").with_source(io_err);
        assert!(err.source().is_some());
    }
}
