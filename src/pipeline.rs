//! Fetch-and-shape pipeline
//!
//! Runs the five report pipelines concurrently over one fetcher and keeps
//! each section's outcome separately, so a failed section degrades to
//! "no data" without affecting the others.

use futures::future::join_all;
use std::time::Instant;

use crate::config::DateRange;
use crate::core::constants::exit_codes;
use crate::core::error::{Ga4Error, Result};
use crate::fetch::RunReport;
use crate::reporting::logging::{log_fetch_complete, log_fetch_failed, log_fetch_start};
use crate::summary::Headline;
use crate::table::Table;
use crate::transform::{CatchAllPolicy, ReportKind};
use crate::ui::progress::ProgressReporter;

/// Outcome of one report pipeline
#[derive(Debug)]
pub struct SectionReport {
    pub kind: ReportKind,
    pub outcome: Result<Table>,
}

/// Outcomes of all report pipelines, in dashboard order
#[derive(Debug, Default)]
pub struct ReportSet {
    sections: Vec<SectionReport>,
}

impl ReportSet {
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (ReportKind, Result<Table>)>,
    {
        let mut sections: Vec<SectionReport> = outcomes
            .into_iter()
            .map(|(kind, outcome)| SectionReport { kind, outcome })
            .collect();
        sections.sort_by_key(|section| section.kind);
        Self { sections }
    }

    pub fn sections(&self) -> &[SectionReport] {
        &self.sections
    }

    /// Shaped table of a section, `None` when it failed or was never fetched.
    pub fn table(&self, kind: ReportKind) -> Option<&Table> {
        self.sections
            .iter()
            .find(|section| section.kind == kind)
            .and_then(|section| section.outcome.as_ref().ok())
    }

    pub fn error(&self, kind: ReportKind) -> Option<&Ga4Error> {
        self.sections
            .iter()
            .find(|section| section.kind == kind)
            .and_then(|section| section.outcome.as_ref().err())
    }

    pub fn failed_count(&self) -> usize {
        ReportKind::ALL
            .iter()
            .filter(|kind| self.table(**kind).is_none())
            .count()
    }

    pub fn all_failed(&self) -> bool {
        self.failed_count() == ReportKind::ALL.len()
    }

    /// Headline figures, when the performance section is available.
    pub fn headline(&self) -> Option<Headline> {
        self.table(ReportKind::Performance)
            .and_then(|performance| Headline::from_performance(performance).ok())
    }

    pub fn exit_code(&self) -> i32 {
        match self.failed_count() {
            0 => exit_codes::SUCCESS,
            n if n == ReportKind::ALL.len() => exit_codes::FAILURE,
            _ => exit_codes::DEGRADED,
        }
    }
}

/// Fetch and shape one section.
pub async fn build_section<F>(
    fetcher: &F,
    kind: ReportKind,
    range: &DateRange,
    policy: CatchAllPolicy,
) -> Result<Table>
where
    F: RunReport + ?Sized,
{
    let raw = fetcher.run_report(&kind.request(), range).await?;
    kind.transform(raw, policy)
}

/// Run every section concurrently and collect the outcomes.
pub async fn fetch_reports<F>(
    fetcher: &F,
    range: &DateRange,
    policy: CatchAllPolicy,
    progress: Option<&ProgressReporter>,
) -> ReportSet
where
    F: RunReport + ?Sized,
{
    let pipelines = ReportKind::ALL.into_iter().map(|kind| async move {
        log_fetch_start(kind);
        let started = Instant::now();
        let outcome = build_section(fetcher, kind, range, policy).await;

        match &outcome {
            Ok(table) => log_fetch_complete(kind, table.len(), started.elapsed().as_millis()),
            Err(e) => log_fetch_failed(kind, e),
        }
        if let Some(progress) = progress {
            progress.section_done(kind, outcome.is_ok());
        }
        (kind, outcome)
    });

    ReportSet::from_outcomes(join_all(pipelines).await)
}
