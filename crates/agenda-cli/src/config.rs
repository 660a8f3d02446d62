//! Tool configuration.
//!
//! The page URL, User-Agent, selectors, output names and location list
//! live in [`AgendaConfig`], which is passed into the pipeline. The built-in
//! defaults target the Mountain Network agenda; a `config.toml` at
//! `~/.config/agenda-ics/config.toml` (or `--config`) may override any part
//! of it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use agenda_core::CalendarSerializer;
use agenda_core::ics::{DEFAULT_PRODID, DEFAULT_UID_DOMAIN};
use agenda_scraper::{DEFAULT_URL, DEFAULT_USER_AGENT, EventSelectors, Extractor, SourceConfig};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::pipeline::{location_file_name, location_slug};

// ---------------------------------------------------------------------------
// AgendaConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    /// Location substrings; one calendar file is written per entry.
    pub locations: Vec<String>,

    /// Where the agenda page is fetched from.
    pub source: SourceSettings,

    /// Structural selectors for the agenda page.
    pub selectors: EventSelectors,

    /// Calendar output settings.
    pub output: OutputSettings,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            locations: vec![
                "Nieuwegein".to_string(),
                "Utrecht".to_string(),
                "Leeuwarden".to_string(),
            ],
            source: SourceSettings::default(),
            selectors: EventSelectors::default(),
            output: OutputSettings::default(),
        }
    }
}

/// Source page settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Agenda page URL.
    pub url: String,

    /// User-Agent header sent with the request.
    pub user_agent: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: SourceConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Calendar output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory the calendar files are written to.
    pub directory: PathBuf,

    /// File name of the calendar holding every event.
    pub combined_file: String,

    /// PRODID of the generated calendars.
    pub prodid: String,

    /// Domain suffix of event UIDs.
    pub uid_domain: String,

    /// IANA timezone of the DTSTAMP generation stamp.
    pub timezone: String,

    /// Text placed before the info link in event descriptions.
    pub description_prefix: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            combined_file: "agenda.ics".to_string(),
            prodid: DEFAULT_PRODID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            timezone: "Europe/Amsterdam".to_string(),
            description_prefix: agenda_core::DEFAULT_DESCRIPTION_PREFIX.to_string(),
        }
    }
}

impl AgendaConfig {
    /// Loads configuration from the default path, falling back to defaults
    /// when no file exists.
    pub fn load() -> AppResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("failed to parse config: {}", e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agenda-ics")
            .join("config.toml")
    }

    /// Checks every setting that can only fail at runtime.
    pub fn validate(&self) -> AppResult<()> {
        self.source_config()?;
        self.extractor()?;
        self.serializer()?;

        if self.output.combined_file.trim().is_empty() {
            return Err(AppError::Config(
                "output.combined_file must not be empty".to_string(),
            ));
        }
        if let Some(blank) = self.locations.iter().position(|l| l.trim().is_empty()) {
            return Err(AppError::Config(format!("locations[{}] must not be blank", blank)));
        }

        // Every target needs its own file, or one write replaces another.
        let mut file_names = HashSet::from([self.output.combined_file.trim().to_string()]);
        for (i, location) in self.locations.iter().enumerate() {
            if location_slug(location).is_empty() {
                return Err(AppError::Config(format!(
                    "locations[{}] ({:?}) has no letters or digits to name its file",
                    i, location
                )));
            }
            let file_name = location_file_name(location);
            if !file_names.insert(file_name.clone()) {
                return Err(AppError::Config(format!(
                    "locations[{}] ({:?}) maps to {}, which is already used by another calendar",
                    i, location, file_name
                )));
            }
        }
        Ok(())
    }

    /// Builds the fetch configuration.
    pub fn source_config(&self) -> AppResult<SourceConfig> {
        let config = SourceConfig::new(&self.source.url).map_err(|e| {
            AppError::Config(format!("invalid source.url {:?}: {}", self.source.url, e))
        })?;
        Ok(config
            .with_user_agent(&self.source.user_agent)
            .with_timeout(Duration::from_secs(self.source.timeout_secs)))
    }

    /// Compiles the selectors into an extractor.
    pub fn extractor(&self) -> AppResult<Extractor> {
        Ok(Extractor::new(&self.selectors)?
            .with_description_prefix(&self.output.description_prefix))
    }

    /// Builds the calendar serializer.
    pub fn serializer(&self) -> AppResult<CalendarSerializer> {
        let timezone: Tz = self.output.timezone.parse().map_err(|e| {
            AppError::Config(format!("invalid output.timezone {:?}: {}", self.output.timezone, e))
        })?;
        Ok(CalendarSerializer::new()
            .with_prodid(&self.output.prodid)
            .with_uid_domain(&self.output.uid_domain)
            .with_timezone(timezone))
    }
}
