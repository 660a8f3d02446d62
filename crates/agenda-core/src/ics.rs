//! iCalendar (RFC 5545) output.
//!
//! Every [`EventRecord`] becomes one all-day `VEVENT`: `DTSTART` is the
//! record's date, `DTEND` the day after (exclusive end), and `DTSTAMP` the
//! generation instant in the configured civil timezone.

use std::path::Path;

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property};
use tracing::{info, warn};

use crate::error::{CalendarError, CalendarResult};
use crate::record::EventRecord;

/// Default product identifier written into every calendar.
pub const DEFAULT_PRODID: &str = "-//Mountain Network Agenda//mxm.dk//";

/// Default domain suffix for event identifiers.
pub const DEFAULT_UID_DOMAIN: &str = "mountain-network.nl";

/// Outcome of a [`CalendarSerializer::write`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was (re)written with this many entries.
    Written(usize),
    /// There were no records, nothing was written.
    Skipped,
}

/// Renders event records into iCalendar documents.
#[derive(Debug, Clone)]
pub struct CalendarSerializer {
    prodid: String,
    uid_domain: String,
    timezone: Tz,
}

impl Default for CalendarSerializer {
    fn default() -> Self {
        Self {
            prodid: DEFAULT_PRODID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            timezone: chrono_tz::Europe::Amsterdam,
        }
    }
}

impl CalendarSerializer {
    /// Creates a serializer with the default product id, domain and timezone.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prodid(mut self, prodid: impl Into<String>) -> Self {
        self.prodid = prodid.into();
        self
    }

    #[must_use]
    pub fn with_uid_domain(mut self, domain: impl Into<String>) -> Self {
        self.uid_domain = domain.into();
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Renders `records` into a complete calendar document.
    ///
    /// The output only depends on `records` and `generated_at`, so rendering
    /// the same input at the same instant yields identical bytes.
    pub fn render(&self, records: &[EventRecord], generated_at: DateTime<Utc>) -> String {
        let stamp = generated_at
            .with_timezone(&self.timezone)
            .format("%Y%m%dT%H%M%S")
            .to_string();

        let mut cal = Calendar::new();
        for record in records {
            cal.push(self.build_event(record, &stamp));
        }
        let cal = cal.done();

        self.finish(&cal.to_string())
    }

    /// Renders `records` and replaces the file at `path` with the result.
    ///
    /// An empty `records` slice produces no file at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, records: &[EventRecord], path: &Path) -> CalendarResult<WriteOutcome> {
        if records.is_empty() {
            warn!(path = %path.display(), "No events found, not writing calendar");
            return Ok(WriteOutcome::Skipped);
        }

        let content = self.render(records, Utc::now());
        std::fs::write(path, content).map_err(|e| CalendarError::io(path, e))?;

        info!(path = %path.display(), count = records.len(), "Calendar written");
        Ok(WriteOutcome::Written(records.len()))
    }

    fn build_event(&self, record: &EventRecord, stamp: &str) -> icalendar::Event {
        let start = record.start_date();
        // Exclusive end; a date at the end of chrono's range keeps start.
        let end = start.checked_add_days(Days::new(1)).unwrap_or(start);

        let mut event = icalendar::Event::new();
        event.summary(record.title());
        add_date_property(&mut event, "DTSTART", start);
        add_date_property(&mut event, "DTEND", end);

        let mut dtstamp = Property::new("DTSTAMP", stamp);
        dtstamp.add_parameter("TZID", self.timezone.name());
        event.append_property(dtstamp);

        event.location(record.location());
        event.description(&record.description());
        event.uid(&record.uid(&self.uid_domain));
        event.done()
    }

    /// Replaces the library's PRODID and drops the implied CALSCALE line.
    fn finish(&self, ics: &str) -> String {
        let mut result = String::with_capacity(ics.len());
        let mut in_prodid = false;
        for line in ics.lines() {
            if in_prodid && line.starts_with(' ') {
                continue;
            }
            in_prodid = false;
            if line.starts_with("PRODID:") {
                push_folded(&mut result, &format!("PRODID:{}", self.prodid));
                in_prodid = true;
                continue;
            }
            if line == "CALSCALE:GREGORIAN" {
                continue;
            }
            result.push_str(line);
            result.push_str("\r\n");
        }
        result
    }
}

/// Appends a content line folded at 75 octets (RFC 5545 section 3.1).
fn push_folded(out: &mut String, line: &str) {
    const LIMIT: usize = 75;
    let mut width = 0;
    for c in line.chars() {
        if width + c.len_utf8() > LIMIT {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(c);
        width += c.len_utf8();
    }
    out.push_str("\r\n");
}

fn add_date_property(event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.add_parameter("VALUE", "DATE");
    event.append_property(prop);
}
