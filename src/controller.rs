//! Submission handling: validate, fetch, aggregate, then render into the
//! shared display region.
//!
//! Concurrent submissions share one [`View`]; whichever finishes last is
//! what the page shows.

use crate::dates;
use crate::errors::TallyError;
use crate::fetcher::ActivityFetcher;
use crate::models::{ActivitySummary, Counts, DateRange, TallyForm};
use crate::stats::aggregate;
use crate::ui::{render, RenderState};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Loading,
    Aggregating,
    Done,
    Failed,
}

/// The result region plus the busy indicator.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub phase: Phase,
    pub busy: bool,
    pub results: String,
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub identity: String,
    pub range: DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub summary: ActivitySummary,
    pub events_fetched: usize,
}

pub fn validate_input(form: &TallyForm, now: DateTime<Utc>) -> Result<Submission, TallyError> {
    let identity = form.username.trim();
    if identity.is_empty() || form.start_date.is_empty() || form.end_date.is_empty() {
        return Err(TallyError::MissingField);
    }

    let (Some(start), Some(end)) = (dates::validate(&form.start_date), dates::validate(&form.end_date))
    else {
        return Err(TallyError::InvalidDateFormat);
    };

    if dates::is_future(end, now) {
        return Err(TallyError::FutureEndDate);
    }

    Ok(Submission {
        identity: identity.to_string(),
        range: DateRange { start, end },
    })
}

#[derive(Clone)]
pub struct FormController {
    fetcher: ActivityFetcher,
    view: Arc<Mutex<View>>,
}

impl FormController {
    pub fn new(fetcher: ActivityFetcher) -> Self {
        Self {
            fetcher,
            view: Arc::new(Mutex::new(View::default())),
        }
    }

    pub async fn view(&self) -> View {
        self.view.lock().await.clone()
    }

    pub async fn submit(&self, form: &TallyForm) -> View {
        self.submit_at(form, Utc::now()).await
    }

    /// Runs one submission against the shared view and returns the view as
    /// this submission left it.
    pub async fn submit_at(&self, form: &TallyForm, now: DateTime<Utc>) -> View {
        self.enter(Phase::Validating).await;
        let submission = match validate_input(form, now) {
            Ok(submission) => submission,
            Err(err) => {
                debug!(%err, "rejected submission");
                return self.finish(Phase::Failed, err.into()).await;
            }
        };

        self.enter(Phase::Loading).await;
        let report = self.fetcher.fetch(&submission.identity).await;
        if let Err(err) = report.outcome.into_result() {
            return self.finish(Phase::Failed, err.into()).await;
        }
        if report.events.is_empty() {
            return self.finish(Phase::Done, RenderState::Empty).await;
        }

        self.enter(Phase::Aggregating).await;
        let summary = aggregate(&report.events, &submission.identity, submission.range);
        info!(
            identity = %summary.identity,
            commits = summary.counts.commits,
            prs = summary.counts.pull_requests_opened,
            issues = summary.counts.issues_opened,
            "tallied activity"
        );
        self.finish(Phase::Done, RenderState::Summary(summary)).await
    }

    /// Same pipeline as [`submit_at`](Self::submit_at) without touching the view.
    pub async fn tally_at(&self, form: &TallyForm, now: DateTime<Utc>) -> Result<Tally, TallyError> {
        let submission = validate_input(form, now)?;
        let report = self.fetcher.fetch(&submission.identity).await;
        report.outcome.into_result()?;

        let summary = if report.events.is_empty() {
            ActivitySummary {
                identity: submission.identity,
                range: submission.range,
                counts: Counts::default(),
            }
        } else {
            aggregate(&report.events, &submission.identity, submission.range)
        };
        Ok(Tally {
            summary,
            events_fetched: report.events.len(),
        })
    }

    async fn enter(&self, phase: Phase) {
        let mut view = self.view.lock().await;
        view.phase = phase;
        if phase == Phase::Loading {
            view.busy = true;
            view.results.clear();
        }
    }

    async fn finish(&self, phase: Phase, state: RenderState) -> View {
        let mut view = self.view.lock().await;
        view.busy = false;
        view.phase = phase;
        view.results = render(&state);
        view.clone()
    }
}
