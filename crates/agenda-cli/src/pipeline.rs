//! The scrape → filter → write pipeline.
//!
//! The page is fetched once. The combined calendar and every location
//! calendar are written independently: a failed or skipped file never stops
//! the others.

use std::path::{Path, PathBuf};

use agenda_core::{CalendarSerializer, EventRecord, WriteOutcome, filter_by_location};
use agenda_scraper::{AgendaClient, scrape_events};
use tracing::{error, info};

use crate::config::AgendaConfig;
use crate::error::AppResult;

/// What happened to one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetStatus {
    /// Written with this many events.
    Written(usize),
    /// No matching events; the file was not touched.
    Skipped,
    /// Writing failed with this message.
    Failed(String),
}

/// Result for one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    /// The location filter, `None` for the combined calendar.
    pub location: Option<String>,
    pub path: PathBuf,
    pub status: TargetStatus,
}

/// Summary of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Number of records extracted from the page.
    pub extracted: usize,
    pub targets: Vec<TargetReport>,
}

impl RunReport {
    /// Number of files actually written.
    pub fn written(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t.status, TargetStatus::Written(_)))
            .count()
    }

    /// Number of files that failed to write.
    pub fn failed(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t.status, TargetStatus::Failed(_)))
            .count()
    }
}

/// Lowercases a location and joins its alphanumeric runs with `-`.
///
/// Empty when the location holds no alphanumeric character.
pub fn location_slug(location: &str) -> String {
    let mut slug = String::with_capacity(location.len());
    for c in location.trim().chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let len = slug.trim_end_matches('-').len();
    slug.truncate(len);
    slug
}

/// Derives the calendar file name for a location filter.
///
/// `"Rijnboulder Arena"` becomes `agenda-rijnboulder-arena.ics`.
pub fn location_file_name(location: &str) -> String {
    format!("agenda-{}.ics", location_slug(location))
}

/// Writes the combined calendar plus one calendar per location.
pub fn write_calendars(
    records: &[EventRecord],
    locations: &[String],
    combined_file: &str,
    output_dir: &Path,
    serializer: &CalendarSerializer,
) -> RunReport {
    let mut report = RunReport {
        extracted: records.len(),
        targets: Vec::with_capacity(locations.len() + 1),
    };

    let combined = output_dir.join(combined_file);
    report
        .targets
        .push(write_target(serializer, records, None, combined));

    for location in locations {
        let matching = filter_by_location(records, location);
        info!(location = %location, count = matching.len(), "Filtered events by location");
        let path = output_dir.join(location_file_name(location));
        report
            .targets
            .push(write_target(serializer, &matching, Some(location), path));
    }

    report
}

fn write_target(
    serializer: &CalendarSerializer,
    records: &[EventRecord],
    location: Option<&String>,
    path: PathBuf,
) -> TargetReport {
    let status = match serializer.write(records, &path) {
        Ok(WriteOutcome::Written(count)) => TargetStatus::Written(count),
        Ok(WriteOutcome::Skipped) => TargetStatus::Skipped,
        Err(e) => {
            error!(error = %e, "Failed to write calendar");
            TargetStatus::Failed(e.to_string())
        }
    };
    TargetReport {
        location: location.cloned(),
        path,
        status,
    }
}

/// Runs extraction and output for an already fetched page.
pub fn process_document(html: &str, config: &AgendaConfig) -> AppResult<RunReport> {
    let extractor = config.extractor()?;
    let serializer = config.serializer()?;
    let records = extractor.extract(html);
    Ok(write_calendars(
        &records,
        &config.locations,
        &config.output.combined_file,
        &config.output.directory,
        &serializer,
    ))
}

/// Fetches and extracts the agenda without writing anything.
pub async fn scrape(config: &AgendaConfig) -> AppResult<Vec<EventRecord>> {
    let client = AgendaClient::new(config.source_config()?)?;
    let extractor = config.extractor()?;
    Ok(scrape_events(&client, &extractor).await)
}

/// Runs the whole pipeline: fetch once, extract, write every calendar.
///
/// # Errors
///
/// Only configuration problems are returned; fetch and write failures are
/// logged and reflected in the report.
pub async fn run(config: &AgendaConfig) -> AppResult<RunReport> {
    let serializer = config.serializer()?;
    let records = scrape(config).await?;

    let report = write_calendars(
        &records,
        &config.locations,
        &config.output.combined_file,
        &config.output.directory,
        &serializer,
    );

    info!(
        extracted = report.extracted,
        written = report.written(),
        failed = report.failed(),
        "Run finished"
    );
    Ok(report)
}
