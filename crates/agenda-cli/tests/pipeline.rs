//! End-to-end run over a saved agenda page.

use agenda_cli::config::AgendaConfig;
use agenda_cli::pipeline::{TargetStatus, process_document};

const AGENDA_HTML: &str = include_str!("fixtures/agenda.html");

fn config_for(dir: &std::path::Path) -> AgendaConfig {
    let mut config = AgendaConfig::default();
    config.locations = vec!["boulder".to_string(), "Nieuwegein".to_string()];
    config.output.directory = dir.to_path_buf();
    config
}

fn vevent_summaries(ics: &str) -> Vec<&str> {
    ics.split("\r\n")
        .filter_map(|line| line.strip_prefix("SUMMARY:"))
        .collect()
}

#[test]
fn extracts_filters_and_writes_calendars() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    let report = process_document(AGENDA_HTML, &config).unwrap();

    assert_eq!(report.extracted, 3);
    let statuses: Vec<_> = report.targets.iter().map(|t| t.status.clone()).collect();
    assert_eq!(
        statuses,
        vec![
            TargetStatus::Written(3),
            TargetStatus::Written(2),
            TargetStatus::Skipped,
        ]
    );

    let combined = std::fs::read_to_string(dir.path().join("agenda.ics")).unwrap();
    insta::assert_debug_snapshot!(vevent_summaries(&combined), @r###"
    [
        "Open dag",
        "Clinic boulderen",
        "Wedstrijd",
    ]
    "###);

    let boulder = std::fs::read_to_string(dir.path().join("agenda-boulder.ics")).unwrap();
    assert_eq!(vevent_summaries(&boulder), vec!["Open dag", "Clinic boulderen"]);
    assert!(!dir.path().join("agenda-nieuwegein.ics").exists());
}

#[test]
fn combined_calendar_fields() {
    let dir = tempfile::tempdir().unwrap();
    process_document(AGENDA_HTML, &config_for(dir.path())).unwrap();
    let combined = std::fs::read_to_string(dir.path().join("agenda.ics")).unwrap();
    let lines: Vec<&str> = combined.split("\r\n").collect();

    assert!(lines.contains(&"PRODID:-//Mountain Network Agenda//mxm.dk//"));
    assert!(lines.contains(&"VERSION:2.0"));
    assert!(lines.contains(&"DTSTART;VALUE=DATE:20250215"));
    assert!(lines.contains(&"DTEND;VALUE=DATE:20250216"));
    assert!(lines.contains(&"LOCATION:Rijnboulder Arena"));
    assert!(lines.contains(&"DESCRIPTION:Meer info: /agenda/clinic-boulderen/"));
    assert!(lines.contains(&"UID:20250215-Clinic boulderen@mountain-network.nl"));
    assert!(
        lines
            .iter()
            .any(|l| l.starts_with("DTSTAMP;TZID=Europe/Amsterdam:"))
    );
}

#[test]
fn rerun_replaces_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    process_document(AGENDA_HTML, &config).unwrap();
    process_document(AGENDA_HTML, &config).unwrap();

    let combined = std::fs::read_to_string(dir.path().join("agenda.ics")).unwrap();
    assert_eq!(combined.matches("BEGIN:VEVENT").count(), 3);
    assert_eq!(combined.matches("BEGIN:VCALENDAR").count(), 1);
}

#[test]
fn page_without_events_produces_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let report = process_document("<html><body></body></html>", &config_for(dir.path())).unwrap();

    assert_eq!(report.extracted, 0);
    assert_eq!(report.written(), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
