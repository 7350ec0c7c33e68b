use crate::dates::start_of_day;
use crate::models::{ActivityEvent, ActivitySummary, Counts, DateRange};
use chrono::{DateTime, Utc};

const PUSH_EVENT: &str = "PushEvent";
const PULL_REQUEST_EVENT: &str = "PullRequestEvent";
const ISSUES_EVENT: &str = "IssuesEvent";
const OPENED: &str = "opened";

pub fn aggregate(events: &[ActivityEvent], identity: &str, range: DateRange) -> ActivitySummary {
    let from = start_of_day(range.start);
    // Instants, not whole days: the end bound is midnight at the start of the end date.
    let to = start_of_day(range.end);

    let counts = events
        .iter()
        .filter(|event| within(event, from, to))
        .fold(Counts::default(), tally);

    ActivitySummary {
        identity: identity.to_string(),
        range,
        counts,
    }
}

fn within(event: &ActivityEvent, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
    match DateTime::parse_from_rfc3339(&event.created_at) {
        Ok(at) => {
            let at = at.with_timezone(&Utc);
            at >= from && at <= to
        }
        Err(_) => false,
    }
}

fn tally(mut counts: Counts, event: &ActivityEvent) -> Counts {
    let payload = event.payload.as_ref();
    let opened = payload.and_then(|p| p.action.as_deref()) == Some(OPENED);

    match event.kind.as_str() {
        PUSH_EVENT => {
            let commits = payload
                .and_then(|p| p.commits.as_ref())
                .map_or(0, |commits| commits.len() as u64);
            counts.commits = counts.commits.saturating_add(commits);
        }
        PULL_REQUEST_EVENT if opened => {
            counts.pull_requests_opened = counts.pull_requests_opened.saturating_add(1);
        }
        ISSUES_EVENT if opened => {
            counts.issues_opened = counts.issues_opened.saturating_add(1);
        }
        _ => {}
    }
    counts
}
