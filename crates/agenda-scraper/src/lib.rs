//! Agenda page fetching and HTML event extraction.
//!
//! ```text
//!   agenda page ──GET──▶ AgendaClient ──html──▶ Extractor ──▶ Vec<EventRecord>
//! ```
//!
//! A failed fetch does not propagate: [`scrape_events`] logs it and returns
//! an empty list, so callers treat "no records" as "nothing to do".

pub mod client;
pub mod config;
pub mod error;
pub mod extract;

#[cfg(test)]
mod test_server;

pub use client::AgendaClient;
pub use config::{DEFAULT_URL, DEFAULT_USER_AGENT, EventSelectors, SourceConfig};
pub use error::{ScrapeError, ScrapeErrorCode, ScrapeResult};
pub use extract::Extractor;

use agenda_core::EventRecord;
use tracing::{error, info};

/// Fetches the agenda page once and extracts its events.
pub async fn scrape_events(client: &AgendaClient, extractor: &Extractor) -> Vec<EventRecord> {
    match client.fetch().await {
        Ok(html) => {
            let records = extractor.extract(&html);
            info!(
                url = %client.config().url_str(),
                count = records.len(),
                "Scraped agenda"
            );
            records
        }
        Err(e) => {
            error!(error = %e, "Error fetching agenda page");
            Vec::new()
        }
    }
}
