// Command-line interface definitions for ga4-dashboard

use crate::config::CliConfig;
use crate::core::constants::{output_formats, timeouts};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // Report
    /// Numeric GA4 property id
    #[arg(long, value_name = "ID", help_heading = "Report")]
    pub property_id: Option<String>,

    /// Name shown in the dashboard title
    #[arg(long, value_name = "NAME", help_heading = "Report")]
    pub display_name: Option<String>,

    /// First day of the report (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", help_heading = "Report")]
    pub start_date: Option<String>,

    /// Last day of the report (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", help_heading = "Report")]
    pub end_date: Option<String>,

    /// How the channels catch-all row is removed
    #[arg(long, value_name = "POLICY", value_parser = ["first-row", "not-set"], help_heading = "Report")]
    pub channel_catch_all: Option<String>,

    // Connection
    /// Service account JSON key file
    #[arg(long, value_name = "FILE", help_heading = "Connection")]
    pub credentials: Option<String>,

    /// Timeout per API call in seconds (default: 30)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        help_heading = "Connection"
    )]
    pub timeout: Option<u64>,

    /// Root URL of the GA4 Data API
    #[arg(long, value_name = "URL", help_heading = "Connection")]
    pub api_base_url: Option<String>,

    // Output & Verbosity
    /// Where to write the HTML dashboard
    #[arg(long, value_name = "PATH", help_heading = "Output & Verbosity")]
    pub html_dashboard: Option<String>,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Trimmed, non-empty value
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        property_id: non_empty(&cli.property_id),
        display_name: non_empty(&cli.display_name),
        start_date: non_empty(&cli.start_date),
        end_date: non_empty(&cli.end_date),
        channel_catch_all: cli.channel_catch_all.clone(),
        credentials_file: non_empty(&cli.credentials),
        timeout: cli.timeout,
        api_base_url: non_empty(&cli.api_base_url),
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        no_progress: cli.no_progress,
        html_dashboard_path: non_empty(&cli.html_dashboard),
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

/// Validate CLI arguments using the derive-based CLI structure
pub fn validate_cli_args(cli: &Cli) -> Result<(), String> {
    if let Some(timeout) = cli.timeout {
        if timeout < timeouts::MIN_TIMEOUT_SECONDS {
            return Err(
                "Timeout cannot be 0. Expected a positive integer representing seconds."
                    .to_string(),
            );
        }
        if timeout > timeouts::MAX_TIMEOUT_SECONDS {
            return Err(format!(
                "Timeout of {timeout} seconds exceeds the maximum of {} seconds.",
                timeouts::MAX_TIMEOUT_SECONDS
            ));
        }
    }

    if let Some(ref id) = cli.property_id
        && !id.trim().chars().all(|c| c.is_ascii_digit())
    {
        return Err(format!(
            "Property id '{id}' is not numeric. Use the numeric id from the GA4 admin panel."
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_default_cli() -> Cli {
        Cli::parse_from(["ga4-dashboard"])
    }

    #[test]
    fn test_cli_to_config_default() {
        let cli = create_default_cli();

        let config = cli_to_config(&cli);

        assert_eq!(config.property_id, None);
        assert_eq!(config.start_date, None);
        assert_eq!(config.timeout, None);
        assert_eq!(config.output_format, None);
        assert_eq!(config.channel_catch_all, None);
        assert!(!config.quiet);
        assert!(!config.verbose);
        assert!(!config.no_progress);
        assert!(!config.no_config);
    }

    #[test]
    fn test_cli_to_config_all_options() {
        let cli = Cli::parse_from([
            "ga4-dashboard",
            "--property-id",
            "480682703",
            "--display-name",
            "Buen Valle",
            "--start-date",
            "2025-10-01",
            "--end-date",
            "2025-10-31",
            "--channel-catch-all",
            "not-set",
            "--credentials",
            "key.json",
            "--timeout",
            "60",
            "--api-base-url",
            "http://localhost:8080",
            "--html-dashboard",
            "out.html",
            "--format",
            "json",
            "-q",
            "-v",
            "--no-progress",
            "--config",
            "custom.toml",
        ]);

        let config = cli_to_config(&cli);

        assert_eq!(config.property_id.as_deref(), Some("480682703"));
        assert_eq!(config.display_name.as_deref(), Some("Buen Valle"));
        assert_eq!(config.start_date.as_deref(), Some("2025-10-01"));
        assert_eq!(config.end_date.as_deref(), Some("2025-10-31"));
        assert_eq!(config.channel_catch_all.as_deref(), Some("not-set"));
        assert_eq!(config.credentials_file.as_deref(), Some("key.json"));
        assert_eq!(config.timeout, Some(60));
        assert_eq!(config.api_base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.html_dashboard_path.as_deref(), Some("out.html"));
        assert_eq!(config.output_format.as_deref(), Some("json"));
        assert!(config.quiet);
        assert!(config.verbose);
        assert!(config.no_progress);
        assert_eq!(config.config_file.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_cli_to_config_whitespace_trimming() {
        let cli = Cli::parse_from([
            "ga4-dashboard",
            "--property-id",
            "  480682703 ",
            "--display-name",
            "   ",
        ]);

        let config = cli_to_config(&cli);

        assert_eq!(config.property_id.as_deref(), Some("480682703"));
        assert_eq!(config.display_name, None);
    }

    #[test]
    fn test_rejects_unknown_format_and_policy() {
        assert!(Cli::try_parse_from(["ga4-dashboard", "--format", "xml"]).is_err());
        assert!(Cli::try_parse_from(["ga4-dashboard", "--channel-catch-all", "all"]).is_err());
    }

    #[test]
    fn test_validate_cli_args_valid() {
        let cli = Cli::parse_from(["ga4-dashboard", "--timeout", "30", "--property-id", "123"]);
        assert!(validate_cli_args(&cli).is_ok());
    }

    #[test]
    fn test_validate_cli_args_timeout_bounds() {
        let zero = Cli::parse_from(["ga4-dashboard", "--timeout", "0"]);
        assert!(validate_cli_args(&zero).unwrap_err().contains("cannot be 0"));

        let huge = Cli::parse_from(["ga4-dashboard", "--timeout", "3601"]);
        assert!(validate_cli_args(&huge).is_err());

        let max = Cli::parse_from(["ga4-dashboard", "--timeout", "3600"]);
        assert!(validate_cli_args(&max).is_ok());
    }

    #[test]
    fn test_validate_cli_args_property_id() {
        let cli = Cli::parse_from(["ga4-dashboard", "--property-id", "properties/123"]);
        assert!(validate_cli_args(&cli).unwrap_err().contains("not numeric"));
    }
}
