use clap::Parser;
use ga4_dashboard::auth::resolve_token_provider;
use ga4_dashboard::config::{CliConfig, Config, DateRange};
use ga4_dashboard::core::constants::{exit_codes, output_formats};
use ga4_dashboard::fetch::{Ga4Client, build_http_client};
use ga4_dashboard::pipeline::{ReportSet, fetch_reports};
use ga4_dashboard::reporting::logging;
use ga4_dashboard::reporting::{DashboardData, HtmlDashboard};
use ga4_dashboard::transform::ReportKind;
use ga4_dashboard::ui::output;
use ga4_dashboard::ui::{Cli, ProgressReporter, RunSummary, cli_to_config, validate_cli_args};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(message) = validate_cli_args(&cli) {
        eprintln!("Error: {message}");
        eprintln!("\nFor more information, try '--help'.");
        std::process::exit(exit_codes::FAILURE);
    }

    match run_dashboard_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(exit_codes::FAILURE);
        }
    }
}

/// Main dashboard logic extracted from main() for testing
pub async fn run_dashboard_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);

    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    let period = config.date_range()?;
    let policy = config.catch_all_policy()?;

    if output_settings.should_show_config_info() {
        output::display_config_info(&config, &period);
    }

    let client = build_http_client(&config)?;
    let access_token = obtain_access_token(&config, &client).await?;
    let fetcher = Ga4Client::new(client, &config, access_token)?;

    let mut progress = create_progress_reporter(&output_settings);
    if let Some(ref mut progress) = progress {
        progress.start_fetching(ReportKind::ALL.len());
    }

    let reports = fetch_reports(&fetcher, &period, policy, progress.as_ref()).await;

    finalize_progress_reporter(progress, &reports);
    if reports.failed_count() > 0 {
        logging::log_warning(&format!(
            "{} of {} sections unavailable, the dashboard shows them without data",
            reports.failed_count(),
            ReportKind::ALL.len()
        ));
    }

    let dashboard_path = write_dashboard(&config, period, &reports);

    let summary = RunSummary {
        config: &config,
        period,
        reports: &reports,
        dashboard_path: dashboard_path.as_deref(),
    };
    output::display_results(
        &summary,
        &output_settings.output_format,
        output_settings.quiet,
    );

    Ok(determine_exit_code(&reports, dashboard_path.is_some()))
}

/// Load configuration from file or standard locations, merge with CLI and validate
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

impl OutputSettings {
    pub fn should_show_config_info(&self) -> bool {
        !self.quiet && self.output_format == output_formats::TEXT
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let output_format = config.output_format().to_string();
    let show_progress = !quiet && !cli_config.no_progress;

    OutputSettings {
        quiet,
        verbose,
        output_format,
        show_progress,
    }
}

/// Resolve credentials and exchange them for one bearer token
pub async fn obtain_access_token(
    config: &Config,
    client: &reqwest::Client,
) -> Result<String, Box<dyn std::error::Error>> {
    let provider = resolve_token_provider(config).inspect_err(|e| {
        logging::log_error("Could not load credentials", Some(e));
    })?;
    log::debug!("Authenticating with {}", provider.describe());

    let token = provider.access_token(client).await.inspect_err(|e| {
        logging::log_error("Authentication failed", Some(e));
    })?;
    Ok(token)
}

/// Create progress reporter if needed
pub fn create_progress_reporter(output_settings: &OutputSettings) -> Option<ProgressReporter> {
    if output_settings.show_progress && output_settings.output_format == output_formats::TEXT {
        Some(ProgressReporter::new(true))
    } else {
        None
    }
}

/// Finalize progress reporting
pub fn finalize_progress_reporter(progress: Option<ProgressReporter>, reports: &ReportSet) {
    if let Some(ref progress) = progress {
        progress.finish_fetching(reports.failed_count(), ReportKind::ALL.len());
    }
}

/// Write the HTML dashboard, returning its path on success
pub fn write_dashboard(config: &Config, period: DateRange, reports: &ReportSet) -> Option<String> {
    let path = config.html_dashboard_path();
    let dashboard_data = DashboardData {
        display_name: config.display_name().to_string(),
        property_id: config.property_id().unwrap_or_default().to_string(),
        period,
        reports,
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
    };

    match HtmlDashboard::generate_dashboard(&dashboard_data, path) {
        Ok(()) => {
            log::info!("HTML dashboard written to {path}");
            Some(path.to_string())
        }
        Err(e) => {
            logging::log_error(&format!("Failed to generate HTML dashboard '{path}'"), Some(&e));
            None
        }
    }
}

/// Exit code from section outcomes; a missing dashboard file is a failure
pub fn determine_exit_code(reports: &ReportSet, dashboard_written: bool) -> i32 {
    if !dashboard_written {
        exit_codes::FAILURE
    } else {
        reports.exit_code()
    }
}
