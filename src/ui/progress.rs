use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::transform::ReportKind;

/// Spinner shown while the report sections are fetched
pub struct ProgressReporter {
    fetch_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            fetch_progress: None,
            enabled,
        }
    }

    pub fn start_fetching(&mut self, total_sections: usize) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new(total_sections as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message("Fetching GA4 reports");
        pb.enable_steady_tick(Duration::from_millis(120));
        self.fetch_progress = Some(pb);
    }

    /// Advance by one finished section
    pub fn section_done(&self, kind: ReportKind, succeeded: bool) {
        if let Some(ref pb) = self.fetch_progress {
            if !succeeded {
                pb.println(format!("✗ {kind} report unavailable"));
            }
            pb.set_message(format!("{kind} done"));
            pb.inc(1);
        }
    }

    pub fn finish_fetching(&self, failed: usize, total: usize) {
        if let Some(ref pb) = self.fetch_progress {
            let message = if failed == 0 {
                "✓ All reports fetched".to_string()
            } else {
                format!("✓ Fetch complete ({}/{total} sections available)", total - failed)
            };
            pb.finish_with_message(message);
        }
    }

    #[cfg(test)]
    fn position(&self) -> Option<u64> {
        self.fetch_progress.as_ref().map(ProgressBar::position)
    }
}
