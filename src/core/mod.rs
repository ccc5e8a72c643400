//! Core types and foundational components
//!
//! This module contains the error taxonomy and the constants shared by
//! the fetcher, transformer and renderers.

pub mod constants;
pub mod error;

// Re-export commonly used items for convenience
pub use error::{Ga4Error, Result};
