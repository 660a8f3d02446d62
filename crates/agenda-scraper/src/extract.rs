//! HTML to [`EventRecord`] extraction.
//!
//! The page is treated as loosely structured: every event container is
//! parsed on its own, and a container that lacks one of the required
//! sub-elements is dropped without affecting the others. A date that does
//! not parse is also dropped, with a warning naming the raw value.

use agenda_core::EventRecord;
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::config::EventSelectors;
use crate::error::{ScrapeError, ScrapeResult};

/// Compiled selectors plus the per-field parsing rules.
#[derive(Debug)]
pub struct Extractor {
    event: Selector,
    title: Selector,
    date: Selector,
    location: Selector,
    link: Selector,
    date_attribute: String,
    date_format: String,
    location_prefix: String,
    link_attribute: String,
    description_prefix: Option<String>,
}

impl Extractor {
    /// Compiles the given selectors.
    ///
    /// # Errors
    ///
    /// Returns an error if any selector is not valid CSS.
    pub fn new(selectors: &EventSelectors) -> ScrapeResult<Self> {
        Ok(Self {
            event: compile("event", &selectors.event)?,
            title: compile("title", &selectors.title)?,
            date: compile("date", &selectors.date)?,
            location: compile("location", &selectors.location)?,
            link: compile("link", &selectors.link)?,
            date_attribute: selectors.date_attribute.clone(),
            date_format: selectors.date_format.clone(),
            location_prefix: selectors.location_prefix.clone(),
            link_attribute: selectors.link_attribute.clone(),
            description_prefix: None,
        })
    }

    /// Sets the description prefix given to every extracted record.
    #[must_use]
    pub fn with_description_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.description_prefix = Some(prefix.into());
        self
    }

    /// Extracts all complete events from `html`, in document order.
    pub fn extract(&self, html: &str) -> Vec<EventRecord> {
        let document = Html::parse_document(html);
        let records: Vec<EventRecord> = document
            .select(&self.event)
            .filter_map(|candidate| self.parse_candidate(candidate))
            .collect();

        debug!(count = records.len(), "Extracted events from page");
        records
    }

    /// Parses a single event container.
    ///
    /// Returns `None` if a required sub-element is missing or the date does
    /// not parse.
    pub fn parse_candidate(&self, candidate: ElementRef<'_>) -> Option<EventRecord> {
        let Some(fields) = self.candidate_fields(candidate) else {
            debug!("Skipping event with missing fields");
            return None;
        };

        let start_date = match NaiveDate::parse_from_str(&fields.raw_date, &self.date_format) {
            Ok(date) => date,
            Err(e) => {
                warn!(
                    raw_date = %fields.raw_date,
                    title = %fields.title,
                    error = %e,
                    "Skipping event with unparsable date"
                );
                return None;
            }
        };

        let record = EventRecord::new(fields.title, start_date, fields.location, fields.link);
        Some(match self.description_prefix {
            Some(ref prefix) => record.with_description_prefix(prefix),
            None => record,
        })
    }

    fn candidate_fields(&self, candidate: ElementRef<'_>) -> Option<CandidateFields> {
        let title = candidate.select(&self.title).next().map(stripped_text)?;
        if title.is_empty() {
            return None;
        }

        let raw_date = candidate
            .select(&self.date)
            .next()?
            .value()
            .attr(&self.date_attribute)?
            .to_string();

        let location_text = candidate.select(&self.location).next().map(stripped_text)?;
        let location = if self.location_prefix.is_empty() {
            location_text
        } else {
            location_text.replace(&self.location_prefix, "")
        };

        let link = candidate
            .select(&self.link)
            .next()?
            .value()
            .attr(&self.link_attribute)?
            .to_string();

        Some(CandidateFields {
            title,
            raw_date,
            location: location.trim().to_string(),
            link,
        })
    }
}

struct CandidateFields {
    title: String,
    raw_date: String,
    location: String,
    link: String,
}

fn compile(field: &str, selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector).map_err(|e| {
        ScrapeError::invalid_selector(format!("{} selector {:?}: {}", field, selector, e))
    })
}

/// Concatenates the element's text nodes, each trimmed, skipping blank ones.
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor {
        Extractor::new(&EventSelectors::default()).unwrap()
    }

    fn card(title: &str, date: &str, location: &str, href: &str) -> String {
        format!(
            r#"<article class="card card--agenda">
                 <a href="{href}">
                   <h3 class="card__hd"> {title} </h3>
                 </a>
                 <time class="cal-item" datetime="{date}">1 feb</time>
                 <div class="card__meta"><span>Locatie:</span> {location} </div>
               </article>"#
        )
    }

    fn page(cards: &[String]) -> String {
        format!("<html><body><main>{}</main></body></html>", cards.concat())
    }

    #[test]
    fn extracts_all_fields() {
        let html = page(&[card("Clinic A", "05-03-2024", "Utrecht Gym", "/agenda/clinic-a")]);
        let records = extractor().extract(&html);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.title(), "Clinic A");
        assert_eq!(record.start_date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(record.location(), "Utrecht Gym");
        assert_eq!(record.info_url(), "/agenda/clinic-a");
        assert_eq!(record.description(), "Meer info: /agenda/clinic-a");
    }

    #[test]
    fn keeps_document_order() {
        let html = page(&[
            card("Eerste", "01-02-2025", "A", "/1"),
            card("Tweede", "15-01-2025", "B", "/2"),
            card("Derde", "01-03-2025", "C", "/3"),
        ]);
        let titles: Vec<String> = extractor()
            .extract(&html)
            .iter()
            .map(|r| r.title().to_string())
            .collect();
        insta::assert_debug_snapshot!(titles, @r###"
        [
            "Eerste",
            "Tweede",
            "Derde",
        ]
        "###);
    }

    #[test]
    fn skips_candidate_missing_link() {
        let without_link = r#"<article class="card--agenda">
              <h3 class="card__hd">Geen link</h3>
              <time class="cal-item" datetime="01-02-2025"></time>
              <div class="card__meta">Locatie: Utrecht</div>
            </article>"#
            .to_string();
        let html = page(&[
            card("Voor", "01-02-2025", "A", "/1"),
            without_link,
            card("Na", "02-02-2025", "B", "/2"),
        ]);
        let records = extractor().extract(&html);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title(), "Voor");
        assert_eq!(records[1].title(), "Na");
    }

    #[test]
    fn skips_candidate_missing_each_field() {
        let missing_title = r#"<article class="card--agenda"><a href="/x"></a>
            <time class="cal-item" datetime="01-02-2025"></time>
            <div class="card__meta">X</div></article>"#;
        let missing_date = r#"<article class="card--agenda"><a href="/x"></a>
            <h3 class="card__hd">T</h3><div class="card__meta">X</div></article>"#;
        let missing_date_attribute = r#"<article class="card--agenda"><a href="/x"></a>
            <h3 class="card__hd">T</h3><time class="cal-item">1 feb</time>
            <div class="card__meta">X</div></article>"#;
        let missing_location = r#"<article class="card--agenda"><a href="/x"></a>
            <h3 class="card__hd">T</h3>
            <time class="cal-item" datetime="01-02-2025"></time></article>"#;
        let blank_title = r#"<article class="card--agenda"><a href="/x"></a>
            <h3 class="card__hd">   </h3>
            <time class="cal-item" datetime="01-02-2025"></time>
            <div class="card__meta">X</div></article>"#;

        for html in [
            missing_title,
            missing_date,
            missing_date_attribute,
            missing_location,
            blank_title,
        ] {
            assert!(extractor().extract(html).is_empty(), "should skip: {html}");
        }
    }

    #[test]
    fn skips_unparsable_date_and_continues() {
        let html = page(&[
            card("Fout", "2025-02-01", "A", "/1"),
            card("Onzin", "morgen", "A", "/2"),
            card("Goed", "03-02-2025", "B", "/3"),
        ]);
        let records = extractor().extract(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), "Goed");
    }

    #[test]
    fn location_without_prefix_is_kept() {
        let html = r#"<article class="card--agenda"><a href="/x">x</a>
            <h3 class="card__hd">T</h3>
            <time class="cal-item" datetime="01-02-2025"></time>
            <div class="card__meta">
              Rijnboulder Arena
            </div></article>"#;
        let records = extractor().extract(html);
        assert_eq!(records[0].location(), "Rijnboulder Arena");
    }

    #[test]
    fn uses_first_link_in_container() {
        let html = r#"<article class="card--agenda">
            <a name="anchor">no target</a>
            <a href="/first">1</a><a href="/second">2</a>
            <h3 class="card__hd">T</h3>
            <time class="cal-item" datetime="01-02-2025"></time>
            <div class="card__meta">X</div></article>"#;
        let records = extractor().extract(html);
        assert_eq!(records[0].info_url(), "/first");
    }

    #[test]
    fn empty_page_yields_nothing() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("<html><body><p>Geen agenda</p></body></html>").is_empty());
    }

    #[test]
    fn custom_description_prefix() {
        let html = page(&[card("T", "01-02-2025", "A", "/1")]);
        let records = extractor()
            .with_description_prefix("More info: ")
            .extract(&html);
        assert_eq!(records[0].description(), "More info: /1");
    }

    #[test]
    fn invalid_selector_is_rejected() {
        let selectors = EventSelectors {
            title: "h3[".to_string(),
            ..EventSelectors::default()
        };
        let err = Extractor::new(&selectors).unwrap_err();
        assert_eq!(err.code(), crate::error::ScrapeErrorCode::InvalidSelector);
        assert!(err.message().contains("title"));
    }
}
