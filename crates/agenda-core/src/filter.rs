//! Location filtering.
//!
//! Matching is case-insensitive substring containment on the record's
//! location text. It is not tokenized, so `"Gouda"` also matches
//! `"Goudappel"`.

use crate::record::EventRecord;

/// Returns true if `needle` occurs in `location`, ignoring case.
pub fn location_matches(location: &str, needle: &str) -> bool {
    location.to_lowercase().contains(&needle.to_lowercase())
}

/// Returns the records whose location contains `needle`, in input order.
pub fn filter_by_location(records: &[EventRecord], needle: &str) -> Vec<EventRecord> {
    records
        .iter()
        .filter(|record| location_matches(record.location(), needle))
        .cloned()
        .collect()
}
