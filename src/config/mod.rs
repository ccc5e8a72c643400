//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{api, defaults, output_formats, timeouts};
use crate::core::error::{Ga4Error, Result};
use crate::transform::CatchAllPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Numeric GA4 property id
    pub property_id: Option<String>,

    /// Name shown in the dashboard title
    pub display_name: Option<String>,

    /// First day of the report, ISO date (inclusive)
    pub start_date: Option<String>,

    /// Last day of the report, ISO date (inclusive)
    pub end_date: Option<String>,

    /// Path to a service account JSON key
    pub credentials_file: Option<String>,

    /// Timeout in seconds for each HTTP request
    pub timeout: Option<u64>,

    /// Root URL of the Data API
    pub api_base_url: Option<String>,

    /// Where to write the HTML dashboard
    pub html_dashboard_path: Option<String>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// How the channels catch-all row is removed (first-row, not-set)
    pub channel_catch_all: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

/// Inclusive reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Ga4Error::Config(format!(
                "Start date {start} is after end date {end}."
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse two `YYYY-MM-DD` dates.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date("start_date", start)?, parse_date("end_date", end)?)
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        Ga4Error::Config(format!(
            "Invalid {field} '{value}': {e}. Expected an ISO date like 2025-10-01."
        ))
    })
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Ga4Error::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            Ga4Error::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate_values()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Report
        if let Some(ref property_id) = cli_config.property_id {
            self.property_id = Some(property_id.clone());
        }
        if let Some(ref display_name) = cli_config.display_name {
            self.display_name = Some(display_name.clone());
        }
        if let Some(ref start_date) = cli_config.start_date {
            self.start_date = Some(start_date.clone());
        }
        if let Some(ref end_date) = cli_config.end_date {
            self.end_date = Some(end_date.clone());
        }
        if let Some(ref policy) = cli_config.channel_catch_all {
            self.channel_catch_all = Some(policy.clone());
        }

        // Connection
        if let Some(ref credentials_file) = cli_config.credentials_file {
            self.credentials_file = Some(credentials_file.clone());
        }
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(ref api_base_url) = cli_config.api_base_url {
            self.api_base_url = Some(api_base_url.clone());
        }

        // Output
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if let Some(ref dashboard_path) = cli_config.html_dashboard_path {
            self.html_dashboard_path = Some(dashboard_path.clone());
        }
    }

    /// Required property id, trimmed
    pub fn property_id(&self) -> Result<&str> {
        self.property_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                Ga4Error::Config(
                    "No property id configured. Set property_id or pass --property-id.".to_string(),
                )
            })
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(defaults::DISPLAY_NAME)
    }

    /// Required reporting period
    pub fn date_range(&self) -> Result<DateRange> {
        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => DateRange::parse(start, end),
            _ => Err(Ga4Error::Config(
                "Both start_date and end_date must be configured.".to_string(),
            )),
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or(api::DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn html_dashboard_path(&self) -> &str {
        self.html_dashboard_path
            .as_deref()
            .unwrap_or(defaults::HTML_DASHBOARD_PATH)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    pub fn catch_all_policy(&self) -> Result<CatchAllPolicy> {
        match self.channel_catch_all.as_deref() {
            None => Ok(CatchAllPolicy::default()),
            Some(value) => value.parse(),
        }
    }

    /// Validate values that are present, without requiring anything.
    ///
    /// Used when loading a file, since required fields may come from the CLI.
    pub fn validate_values(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout < timeouts::MIN_TIMEOUT_SECONDS {
                return Err(Ga4Error::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(Ga4Error::Config(format!(
                    "Timeout of {timeout} seconds is too large (>1 hour). Consider using a smaller value."
                )));
            }
        }

        if let Some(ref id) = self.property_id {
            let id = id.trim();
            if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
                return Err(Ga4Error::Config(format!(
                    "Property id '{id}' is invalid. Expected the numeric GA4 property id."
                )));
            }
        }

        if let Some(ref start) = self.start_date {
            parse_date("start_date", start)?;
        }
        if let Some(ref end) = self.end_date {
            parse_date("end_date", end)?;
        }
        if self.start_date.is_some() && self.end_date.is_some() {
            self.date_range()?;
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(Ga4Error::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        if let Some(ref url) = self.api_base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(Ga4Error::Config(format!(
                "API base URL '{url}' must start with http:// or https://."
            )));
        }

        self.catch_all_policy()?;
        Ok(())
    }

    /// Full validation before a run: values must be valid and required fields present.
    pub fn validate(&self) -> Result<()> {
        self.validate_values()?;
        self.property_id()?;
        self.date_range()?;
        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Report
    pub property_id: Option<String>,       // --property-id
    pub display_name: Option<String>,      // --display-name
    pub start_date: Option<String>,        // --start-date
    pub end_date: Option<String>,          // --end-date
    pub channel_catch_all: Option<String>, // --channel-catch-all

    // Connection
    pub credentials_file: Option<String>, // --credentials
    pub timeout: Option<u64>,             // --timeout
    pub api_base_url: Option<String>,     // --api-base-url

    // Output & format
    pub quiet: bool,                         // --quiet
    pub verbose: bool,                       // --verbose
    pub output_format: Option<String>,       // --format
    pub no_progress: bool,                   // --no-progress
    pub html_dashboard_path: Option<String>, // --html-dashboard

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
