//! Dashboard rendering and structured logging
//!
//! This module turns the shaped report tables into the HTML dashboard
//! and holds the logging helpers used across the pipeline.

pub mod dashboard;
pub mod logging;

// Re-export commonly used items
pub use dashboard::{DashboardData, DashboardError, HtmlDashboard};
