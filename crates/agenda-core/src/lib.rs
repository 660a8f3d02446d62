//! Core types: event records, location filter, iCalendar output, tracing

pub mod error;
pub mod filter;
pub mod ics;
pub mod record;
pub mod tracing;

pub use error::{CalendarError, CalendarResult};
pub use filter::{filter_by_location, location_matches};
pub use ics::{CalendarSerializer, WriteOutcome};
pub use record::{DEFAULT_DESCRIPTION_PREFIX, EventRecord};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
