//! Turns the Mountain Network agenda page into iCalendar files.
//!
//! This crate provides the `agenda-ics` command-line tool.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;

pub use cli::Cli;
pub use config::AgendaConfig;
pub use error::{AppError, AppResult};
pub use pipeline::{RunReport, TargetReport, TargetStatus};
