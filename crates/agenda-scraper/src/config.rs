//! Source page configuration.
//!
//! [`EventSelectors`] is the structural contract with the agenda page: which
//! elements hold an event, and where its title, date, location and link
//! live. [`SourceConfig`] describes how the page is fetched.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Default agenda page.
pub const DEFAULT_URL: &str = "https://mountain-network.nl/klimcentra/agenda/";

/// Default User-Agent sent with the request. The site rejects obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// CSS selectors and attribute names locating event fields in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSelectors {
    /// The per-event container.
    pub event: String,
    /// Title element, searched inside the container.
    pub title: String,
    /// Date element, searched inside the container.
    pub date: String,
    /// Attribute of the date element holding the machine-readable date.
    pub date_attribute: String,
    /// `chrono` format of that attribute.
    pub date_format: String,
    /// Location meta element, searched inside the container.
    pub location: String,
    /// Label stripped from the location text.
    pub location_prefix: String,
    /// The first element matching this inside the container is the link.
    pub link: String,
    /// Attribute of the link element holding the target.
    pub link_attribute: String,
}

impl Default for EventSelectors {
    fn default() -> Self {
        Self {
            event: "article.card--agenda".to_string(),
            title: "h3.card__hd".to_string(),
            date: "time.cal-item".to_string(),
            date_attribute: "datetime".to_string(),
            date_format: "%d-%m-%Y".to_string(),
            location: "div.card__meta".to_string(),
            location_prefix: "Locatie:".to_string(),
            link: "a[href]".to_string(),
            link_attribute: "href".to_string(),
        }
    }
}

/// How the agenda page is fetched.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// The agenda page.
    pub url: Url,

    /// User agent string.
    pub user_agent: String,

    /// Request timeout.
    pub timeout: Duration,
}

impl SourceConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a new configuration for the given page URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(url.as_ref())?;
        Ok(Self {
            url: parsed,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the page URL as a string.
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}
