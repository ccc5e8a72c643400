//! Build an HTML analytics dashboard for a single GA4 property.
//!
//! Five report slices (performance, channels, pages, events, devices) are
//! fetched from the GA4 Data API, reshaped into localized tables and
//! rendered as a self-contained HTML file plus a terminal summary.

pub mod auth;
pub mod config;
pub mod core;
pub mod fetch;
pub mod pipeline;
pub mod reporting;
pub mod summary;
pub mod table;
pub mod transform;
pub mod ui;

// Re-export the types most callers need
pub use config::{CliConfig, Config, DateRange};
pub use crate::core::{Ga4Error, Result};
pub use fetch::{Ga4Client, ReportRequest, RunReport};
pub use pipeline::{ReportSet, fetch_reports};
pub use reporting::{DashboardData, DashboardError, HtmlDashboard};
pub use summary::Headline;
pub use table::{Cell, SortOrder, Table};
pub use transform::{CatchAllPolicy, ReportKind};
