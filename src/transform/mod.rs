//! Table shaping
//!
//! Each report shape has a fixed set of dimensions and metrics, a fixed
//! rename mapping from API metric names to display names, and a small
//! per-shape policy (sort, row drop, derived column, value relabel).
//! Everything here is a pure function of the raw table.

use std::fmt;
use std::str::FromStr;

use crate::core::constants::{columns, dimensions, metrics, shaping};
use crate::core::error::{Ga4Error, Result};
use crate::fetch::ReportRequest;
use crate::table::{SortOrder, Table};

/// How the channels report's catch-all row is removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatchAllPolicy {
    /// Drop the first raw row, whatever it contains
    #[default]
    FirstRow,
    /// Drop rows whose source and medium are both `(not set)`
    NotSet,
}

impl CatchAllPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatchAllPolicy::FirstRow => "first-row",
            CatchAllPolicy::NotSet => "not-set",
        }
    }
}

impl fmt::Display for CatchAllPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatchAllPolicy {
    type Err = Ga4Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "first-row" => Ok(CatchAllPolicy::FirstRow),
            "not-set" => Ok(CatchAllPolicy::NotSet),
            other => Err(Ga4Error::Config(format!(
                "Invalid channel catch-all policy: '{other}'. Expected 'first-row' or 'not-set'."
            ))),
        }
    }
}

/// The five report shapes, in dashboard order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportKind {
    Performance,
    Channels,
    Pages,
    Events,
    Devices,
}

const PERFORMANCE_RENAMES: &[(&str, &str)] = &[
    (metrics::ACTIVE_USERS, columns::USUARIOS_ACTIVOS),
    (metrics::NEW_USERS, columns::USUARIOS_NUEVOS),
    (metrics::SESSIONS, columns::SESIONES),
    (metrics::ENGAGED_SESSIONS, columns::SESIONES_COMPROMETIDAS),
    (metrics::ENGAGEMENT_RATE, columns::TASA_COMPROMISO),
    (metrics::BOUNCE_RATE, columns::TASA_REBOTE),
    (metrics::AVERAGE_SESSION_DURATION, columns::DURACION_PROMEDIO_SESION),
    (metrics::SCREEN_PAGE_VIEWS_PER_SESSION, columns::VISTAS_PAGINA_POR_SESION),
    (metrics::EVENT_COUNT, columns::CONTEO_EVENTOS),
    (metrics::USER_ENGAGEMENT_DURATION, columns::DURACION_COMPROMISO_USUARIO),
];

const CHANNEL_RENAMES: &[(&str, &str)] = &[
    (metrics::SESSIONS, columns::SESIONES),
    (metrics::ENGAGED_SESSIONS, columns::SESIONES_COMPROMETIDAS),
    (metrics::ENGAGEMENT_RATE, columns::TASA_COMPROMISO),
    (metrics::BOUNCE_RATE, columns::TASA_REBOTE),
    (metrics::AVERAGE_SESSION_DURATION, columns::DURACION_PROMEDIO_SESION),
];

const PAGE_RENAMES: &[(&str, &str)] = &[
    (metrics::SCREEN_PAGE_VIEWS, columns::VISTAS_PAGINA),
    (metrics::USER_ENGAGEMENT_DURATION, columns::DURACION_COMPROMISO_USUARIO),
    (metrics::EVENT_COUNT, columns::CONTEO_EVENTOS),
    (metrics::BOUNCE_RATE, columns::TASA_REBOTE),
];

const EVENT_RENAMES: &[(&str, &str)] = &[
    (metrics::EVENT_COUNT, columns::CONTEO_EVENTOS),
    (metrics::TOTAL_USERS, columns::USUARIOS_TOTALES),
];

const DEVICE_RENAMES: &[(&str, &str)] = &[
    (metrics::SESSIONS, columns::SESIONES),
    (metrics::ENGAGED_SESSIONS, columns::SESIONES_COMPROMETIDAS),
    (metrics::ENGAGEMENT_RATE, columns::TASA_COMPROMISO),
    (metrics::BOUNCE_RATE, columns::TASA_REBOTE),
    (metrics::EVENT_COUNT, columns::CONTEO_EVENTOS),
];

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::Performance,
        ReportKind::Channels,
        ReportKind::Pages,
        ReportKind::Events,
        ReportKind::Devices,
    ];

    /// Identifier used in logs and JSON output
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Performance => "performance",
            ReportKind::Channels => "channels",
            ReportKind::Pages => "pages",
            ReportKind::Events => "events",
            ReportKind::Devices => "devices",
        }
    }

    /// Spanish section noun used in "no data" messages
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Performance => "performance",
            ReportKind::Channels => "canales",
            ReportKind::Pages => "páginas",
            ReportKind::Events => "eventos",
            ReportKind::Devices => "dispositivos",
        }
    }

    pub fn dimensions(&self) -> &'static [&'static str] {
        match self {
            ReportKind::Performance => &[dimensions::DATE],
            ReportKind::Channels => &[dimensions::SESSION_SOURCE, dimensions::SESSION_MEDIUM],
            ReportKind::Pages => &[dimensions::PAGE_TITLE, dimensions::PAGE_PATH],
            ReportKind::Events => &[dimensions::EVENT_NAME],
            ReportKind::Devices => &[dimensions::DEVICE_CATEGORY],
        }
    }

    /// Requested metrics, which are exactly the rename sources
    pub fn metrics(&self) -> Vec<&'static str> {
        self.renames().iter().map(|(from, _)| *from).collect()
    }

    pub fn renames(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ReportKind::Performance => PERFORMANCE_RENAMES,
            ReportKind::Channels => CHANNEL_RENAMES,
            ReportKind::Pages => PAGE_RENAMES,
            ReportKind::Events => EVENT_RENAMES,
            ReportKind::Devices => DEVICE_RENAMES,
        }
    }

    pub fn request(&self) -> ReportRequest {
        ReportRequest::new(self.dimensions(), &self.metrics())
    }

    /// Apply this shape's rename mapping and policy to a raw table.
    pub fn transform(&self, raw: Table, policy: CatchAllPolicy) -> Result<Table> {
        match self {
            ReportKind::Performance => transform_performance(raw),
            ReportKind::Channels => transform_channels(raw, policy),
            ReportKind::Pages => transform_pages(raw),
            ReportKind::Events => transform_events(raw),
            ReportKind::Devices => transform_devices(raw),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn renamed(mut raw: Table, mapping: &[(&str, &str)]) -> Result<Table> {
    raw.rename_columns(mapping)?;
    Ok(raw)
}

/// Rename and sort ascending by date.
pub fn transform_performance(raw: Table) -> Result<Table> {
    let mut table = renamed(raw, PERFORMANCE_RENAMES)?;
    table.sort_by_text(dimensions::DATE, SortOrder::Ascending)?;
    Ok(table)
}

/// Rename, drop the catch-all row and derive `canal` from source and medium.
pub fn transform_channels(raw: Table, policy: CatchAllPolicy) -> Result<Table> {
    let mut table = renamed(raw, CHANNEL_RENAMES)?;
    let source = table.column_index(dimensions::SESSION_SOURCE)?;
    let medium = table.column_index(dimensions::SESSION_MEDIUM)?;

    match policy {
        CatchAllPolicy::FirstRow => {
            table.drop_row(0);
        }
        CatchAllPolicy::NotSet => table.retain_rows(|row| {
            !(row[source].as_text() == Some(shaping::NOT_SET)
                && row[medium].as_text() == Some(shaping::NOT_SET))
        }),
    }

    table.add_joined_column(
        columns::CANAL,
        &[dimensions::SESSION_SOURCE, dimensions::SESSION_MEDIUM],
        shaping::CHANNEL_SEPARATOR,
    )?;
    Ok(table)
}

pub fn transform_pages(raw: Table) -> Result<Table> {
    renamed(raw, PAGE_RENAMES)
}

/// Rename and relabel the availability form submission event.
pub fn transform_events(raw: Table) -> Result<Table> {
    let mut table = renamed(raw, EVENT_RENAMES)?;
    table.replace_text(
        dimensions::EVENT_NAME,
        shaping::FORM_SUBMIT_EVENT,
        shaping::FORM_SUBMIT_LABEL,
    )?;
    Ok(table)
}

pub fn transform_devices(raw: Table) -> Result<Table> {
    renamed(raw, DEVICE_RENAMES)
}

/// Top channels by sessions.
pub fn top_channels(channels: &Table, n: usize) -> Result<Table> {
    channels.top_n(columns::SESIONES, n)
}

/// Top pages by page views.
pub fn top_pages(pages: &Table, n: usize) -> Result<Table> {
    pages.top_n(columns::VISTAS_PAGINA, n)
}

/// Top events by event count.
pub fn top_events(events: &Table, n: usize) -> Result<Table> {
    events.top_n(columns::CONTEO_EVENTOS, n)
}
