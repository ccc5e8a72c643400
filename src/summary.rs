//! Headline figures and display formatting
//!
//! Aggregates are computed from the numeric tables; formatting produces
//! display copies and never mutates the values used for aggregation.

use serde::Serialize;

use crate::core::constants::columns;
use crate::core::error::Result;
use crate::table::Table;

/// Aggregates over the performance table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub total_users: f64,
    pub total_sessions: f64,
    pub engagement_rate: Option<f64>,
    pub bounce_rate: Option<f64>,
    pub average_session_duration: Option<f64>,
    pub pages_per_session: Option<f64>,
}

impl Headline {
    pub fn from_performance(performance: &Table) -> Result<Self> {
        Ok(Self {
            total_users: performance.sum(columns::USUARIOS_ACTIVOS)?,
            total_sessions: performance.sum(columns::SESIONES)?,
            engagement_rate: performance.mean(columns::TASA_COMPROMISO)?,
            bounce_rate: performance.mean(columns::TASA_REBOTE)?,
            average_session_duration: performance.mean(columns::DURACION_PROMEDIO_SESION)?,
            pages_per_session: performance.mean(columns::VISTAS_PAGINA_POR_SESION)?,
        })
    }

    pub fn users_display(&self) -> String {
        format_thousands(self.total_users)
    }

    pub fn sessions_display(&self) -> String {
        format_thousands(self.total_sessions)
    }

    pub fn engagement_display(&self) -> String {
        self.engagement_rate.map_or_else(placeholder, format_percent)
    }

    pub fn bounce_display(&self) -> String {
        self.bounce_rate.map_or_else(placeholder, format_percent)
    }

    pub fn duration_display(&self) -> String {
        self.average_session_duration
            .map_or_else(placeholder, |s| format!("{} min", format_duration(s)))
    }

    pub fn pages_per_session_display(&self) -> String {
        self.pages_per_session.map_or_else(placeholder, |v| format!("{v:.1}"))
    }
}

fn placeholder() -> String {
    "-".to_string()
}

/// Rate in `[0, 1]` as a percentage with one decimal: `0.6234` -> `62.3%`.
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Seconds as `m:ss`, truncating fractional seconds.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Rounded integer with comma thousands separators: `12345.0` -> `12,345`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `YYYYMMDD` as `YYYY-MM-DD`; anything else is returned unchanged.
pub fn format_report_date(raw: &str) -> String {
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..])
    } else {
        raw.to_string()
    }
}

/// Channels table with rates as percentages and durations as `m:ss`.
pub fn channel_display_table(channels: &Table) -> Result<Table> {
    let mut display = channels.clone();
    display.format_number_column(columns::TASA_COMPROMISO, format_percent)?;
    display.format_number_column(columns::TASA_REBOTE, format_percent)?;
    display.format_number_column(columns::DURACION_PROMEDIO_SESION, format_duration)?;
    Ok(display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn performance() -> Table {
        let mut table = Table::new([
            "date",
            columns::USUARIOS_ACTIVOS,
            columns::SESIONES,
            columns::TASA_COMPROMISO,
            columns::TASA_REBOTE,
            columns::DURACION_PROMEDIO_SESION,
            columns::VISTAS_PAGINA_POR_SESION,
        ]);
        table
            .push_row(vec!["20251001".into(), 1200.0.into(), 1500.0.into(), 0.6.into(), 0.4.into(), 120.0.into(), 2.0.into()])
            .unwrap();
        table
            .push_row(vec!["20251002".into(), 34.0.into(), 50.0.into(), 0.7.into(), 0.3.into(), 95.0.into(), 3.0.into()])
            .unwrap();
        table
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.6234), "62.3%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(65.0), "1:05");
        assert_eq!(format_duration(125.9), "2:05");
        assert_eq!(format_duration(3600.0), "60:00");
        assert_eq!(format_duration(f64::NAN), "0:00");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1234.0), "1,234");
        assert_eq!(format_thousands(1234567.4), "1,234,567");
        assert_eq!(format_thousands(-1234.0), "-1,234");
    }

    #[test]
    fn test_format_report_date() {
        assert_eq!(format_report_date("20251001"), "2025-10-01");
        assert_eq!(format_report_date("2025-10-01"), "2025-10-01");
        assert_eq!(format_report_date("(other)"), "(other)");
    }

    #[test]
    fn test_headline_from_performance() {
        let headline = Headline::from_performance(&performance()).unwrap();

        assert_eq!(headline.total_users, 1234.0);
        assert_eq!(headline.users_display(), "1,234");
        assert_eq!(headline.sessions_display(), "1,550");
        assert_eq!(headline.engagement_display(), "65.0%");
        assert_eq!(headline.bounce_display(), "35.0%");
        assert_eq!(headline.duration_display(), "1:47 min");
        assert_eq!(headline.pages_per_session_display(), "2.5");
    }

    #[test]
    fn test_headline_from_empty_performance() {
        let empty = Table::new(performance().columns().to_vec());
        let headline = Headline::from_performance(&empty).unwrap();

        assert_eq!(headline.total_users, 0.0);
        assert_eq!(headline.engagement_rate, None);
        assert_eq!(headline.engagement_display(), "-");
    }

    #[test]
    fn test_channel_display_table_leaves_source_untouched() {
        let mut channels = Table::new([
            "canal",
            columns::SESIONES,
            columns::TASA_COMPROMISO,
            columns::TASA_REBOTE,
            columns::DURACION_PROMEDIO_SESION,
        ]);
        channels
            .push_row(vec!["google / organic".into(), 50.0.into(), 0.6.into(), 0.25.into(), 95.0.into()])
            .unwrap();

        let display = channel_display_table(&channels).unwrap();

        assert_eq!(display.cell(0, columns::TASA_COMPROMISO), Some(&Cell::Text("60.0%".into())));
        assert_eq!(display.cell(0, columns::DURACION_PROMEDIO_SESION), Some(&Cell::Text("1:35".into())));
        assert_eq!(channels.numbers(columns::TASA_COMPROMISO).unwrap(), [0.6]);
    }
}
