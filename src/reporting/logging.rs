use crate::config::Config;
use crate::core::error::Ga4Error;
use crate::transform::ReportKind;
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn // Degraded sections stay visible
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let property = config.property_id().unwrap_or("<unset>");
    let start = config.start_date.as_deref().unwrap_or("<unset>");
    let end = config.end_date.as_deref().unwrap_or("<unset>");
    let policy = config.channel_catch_all.as_deref().unwrap_or("first-row");

    info!("Configuration: property={property}, period={start}..{end}");
    info!(
        "HTTP: base_url={}, timeout={}s",
        config.api_base_url(),
        config.timeout_duration().as_secs()
    );
    info!(
        "Output: format={}, dashboard={}, channel_catch_all={policy}",
        config.output_format(),
        config.html_dashboard_path()
    );
}

/// Log the start of one report pipeline
pub fn log_fetch_start(kind: ReportKind) {
    debug!(
        "Fetching {kind}: dimensions={:?} metrics={}",
        kind.dimensions(),
        kind.metrics().len()
    );
}

/// Log a report pipeline that produced a table
pub fn log_fetch_complete(kind: ReportKind, rows: usize, duration_ms: u128) {
    if rows == 0 {
        warn!("⚠️ {kind}: no rows for the selected period ({duration_ms}ms)");
    } else {
        info!("✅ {kind}: {rows} row(s) ({duration_ms}ms)");
    }
}

/// Log a report pipeline that failed; the section renders without data
pub fn log_fetch_failed(kind: ReportKind, err: &Ga4Error) {
    error!("❌ {kind}: {err}");
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
