//! Terminal output for a dashboard run

use serde_json::{Map, Value, json};

use crate::config::{Config, DateRange};
use crate::core::constants::{display, exit_codes, output_formats};
use crate::pipeline::ReportSet;
use crate::transform::ReportKind;
use crate::ui::color::{Colors, colorize, emoji_or, label};

/// What a finished run reports back
#[derive(Debug)]
pub struct RunSummary<'a> {
    pub config: &'a Config,
    pub period: DateRange,
    pub reports: &'a ReportSet,
    /// Where the dashboard was written, if it was
    pub dashboard_path: Option<&'a str>,
}

impl RunSummary<'_> {
    /// Same rule as the process exit code: an unwritten dashboard is a failure
    fn status(&self) -> &'static str {
        if self.dashboard_path.is_none() {
            return "failure";
        }
        match self.reports.exit_code() {
            exit_codes::SUCCESS => "success",
            exit_codes::DEGRADED => "degraded",
            _ => "failure",
        }
    }
}

/// Display configuration information in a user-friendly format
pub fn display_config_info(config: &Config, period: &DateRange) {
    println!(
        "{}: {}",
        label("Property"),
        colorize(config.property_id().unwrap_or("-"), Colors::BRIGHT_WHITE)
    );
    println!(
        "{}: {} a {}",
        label("Periodo"),
        period.start_str(),
        period.end_str()
    );
    println!(
        "{}: {}",
        label("Timeout (seconds)"),
        config.timeout_duration().as_secs()
    );
    println!();
}

/// Print the run summary in the configured format
pub fn display_results(summary: &RunSummary, output_format: &str, quiet: bool) {
    match output_format {
        output_formats::MINIMAL => print!("{}", render_minimal(summary)),
        output_formats::JSON => match render_json(summary) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to serialize results: {e}"),
        },
        _ => {
            if !quiet {
                print!("{}", render_text(summary));
            }
        }
    }
}

/// Plain lines, no colors or emojis
pub fn render_minimal(summary: &RunSummary) -> String {
    let mut out = String::new();
    for kind in ReportKind::ALL {
        match (summary.reports.table(kind), summary.reports.error(kind)) {
            (Some(table), _) => out.push_str(&format!("{kind} ok {}\n", table.len())),
            (None, Some(err)) => out.push_str(&format!("{kind} failed {err}\n")),
            (None, None) => out.push_str(&format!("{kind} missing\n")),
        }
    }
    if let Some(path) = summary.dashboard_path {
        out.push_str(&format!("dashboard {path}\n"));
    }
    out
}

/// Transformed tables and headline figures for automation
pub fn render_json(summary: &RunSummary) -> serde_json::Result<String> {
    let mut sections = Map::new();
    for kind in ReportKind::ALL {
        let value = match (summary.reports.table(kind), summary.reports.error(kind)) {
            (Some(table), _) => json!({ "rows": table.len(), "table": table }),
            (None, Some(err)) => json!({ "error": err.to_string() }),
            (None, None) => json!({ "error": "not fetched" }),
        };
        sections.insert(kind.name().to_string(), value);
    }

    let document = json!({
        "property_id": summary.config.property_id().ok(),
        "display_name": summary.config.display_name(),
        "period": {
            "start": summary.period.start_str(),
            "end": summary.period.end_str(),
        },
        "status": summary.status(),
        "headline": summary.reports.headline(),
        "sections": Value::Object(sections),
        "dashboard": summary.dashboard_path,
    });
    serde_json::to_string_pretty(&document)
}

/// Colored human summary with headline figures and per-section status
pub fn render_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        emoji_or(display::HOTEL_EMOJI, "#"),
        colorize(
            &format!("Analytics - {}", summary.config.display_name()),
            Colors::BOLD
        )
    ));
    out.push_str(&format!(
        "{} {}: {} a {}\n",
        emoji_or(display::CALENDAR_EMOJI, "-"),
        label("Periodo"),
        summary.period.start_str(),
        summary.period.end_str()
    ));

    if let Some(headline) = summary.reports.headline() {
        out.push_str(&format!(
            "{} {}: {}\n",
            emoji_or(display::USERS_EMOJI, "-"),
            label("Usuarios totales"),
            headline.users_display()
        ));
        out.push_str(&format!(
            "{} {}: {}\n",
            emoji_or(display::SESSIONS_EMOJI, "-"),
            label("Sesiones totales"),
            headline.sessions_display()
        ));
        out.push_str(&format!(
            "   {}: {} | {}: {} | {}: {} | {}: {}\n",
            label("Compromiso"),
            headline.engagement_display(),
            label("Rebote"),
            headline.bounce_display(),
            label("Duración"),
            headline.duration_display(),
            label("Páginas/Sesión"),
            headline.pages_per_session_display()
        ));
    }

    out.push('\n');
    for kind in ReportKind::ALL {
        let line = match (summary.reports.table(kind), summary.reports.error(kind)) {
            (Some(table), _) if table.is_empty() => format!(
                "{} {kind}: {}",
                emoji_or(display::WARNING_EMOJI, "!"),
                colorize("no rows", Colors::YELLOW)
            ),
            (Some(table), _) => format!(
                "{} {kind}: {} row(s)",
                emoji_or(display::SUCCESS_EMOJI, "+"),
                table.len()
            ),
            (None, err) => format!(
                "{} {kind}: {}",
                emoji_or(display::ERROR_EMOJI, "x"),
                colorize(
                    &err.map_or_else(|| "not fetched".to_string(), ToString::to_string),
                    Colors::RED
                )
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }

    if let Some(path) = summary.dashboard_path {
        out.push_str(&format!(
            "\n{}: {}\n",
            label("Dashboard"),
            colorize(path, Colors::GREEN)
        ));
    }
    out
}
