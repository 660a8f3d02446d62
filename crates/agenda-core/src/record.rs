//! The event record extracted from an agenda page.
//!
//! An [`EventRecord`] only exists once all of its source fields were found
//! and its date parsed; there is no partially filled state. Records are
//! immutable after construction, so every field is exposed through an
//! accessor rather than as a public field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Prefix placed in front of the info URL in the derived description.
pub const DEFAULT_DESCRIPTION_PREFIX: &str = "Meer info: ";

/// A single agenda entry.
///
/// The source page only provides day granularity, so the start is a
/// [`NaiveDate`] and every calendar entry produced from a record is an
/// all-day event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    title: String,
    start_date: NaiveDate,
    location: String,
    info_url: String,
    #[serde(skip_serializing, default = "default_description_prefix")]
    description_prefix: String,
}

fn default_description_prefix() -> String {
    DEFAULT_DESCRIPTION_PREFIX.to_string()
}

impl EventRecord {
    /// Creates a new record using the default description prefix.
    pub fn new(
        title: impl Into<String>,
        start_date: NaiveDate,
        location: impl Into<String>,
        info_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start_date,
            location: location.into(),
            info_url: info_url.into(),
            description_prefix: default_description_prefix(),
        }
    }

    /// Builder method to replace the text placed before the info URL.
    #[must_use]
    pub fn with_description_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.description_prefix = prefix.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn info_url(&self) -> &str {
        &self.info_url
    }

    /// Returns the display description, which embeds the info URL.
    pub fn description(&self) -> String {
        format!("{}{}", self.description_prefix, self.info_url)
    }

    /// Returns the stable calendar identifier for this record.
    ///
    /// The identifier is `YYYYMMDD-<title>@<domain>`. Two records with the
    /// same title on the same date share an identifier.
    pub fn uid(&self, domain: &str) -> String {
        format!(
            "{}-{}@{}",
            self.start_date.format("%Y%m%d"),
            self.title,
            domain
        )
    }
}
