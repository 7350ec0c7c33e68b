use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the public events feed. Only the fields the tally reads are kept.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ActivityEvent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub payload: Option<EventPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EventPayload {
    #[serde(default)]
    pub commits: Option<Vec<Value>>,
    #[serde(default)]
    pub action: Option<String>,
}

impl ActivityEvent {
    /// Reads the fields that have the expected shape and defaults the rest.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
        let payload = value
            .get("payload")
            .filter(|payload| payload.is_object())
            .map(|payload| EventPayload {
                commits: payload.get("commits").and_then(Value::as_array).cloned(),
                action: payload.get("action").and_then(Value::as_str).map(str::to_string),
            });
        Self {
            kind: text("type"),
            created_at: text("created_at"),
            payload,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counts {
    pub commits: u64,
    pub pull_requests_opened: u64,
    pub issues_opened: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySummary {
    pub identity: String,
    pub range: DateRange,
    pub counts: Counts,
}

/// Form fields as posted by the page (and as query params on the JSON route).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TallyForm {
    #[serde(default)]
    pub username: String,
    #[serde(rename = "start-date", default)]
    pub start_date: String,
    #[serde(rename = "end-date", default)]
    pub end_date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TallyResponse {
    pub username: String,
    pub start_date: String,
    pub end_date: String,
    pub events_fetched: usize,
    pub commits: u64,
    pub pull_requests_opened: u64,
    pub issues_opened: u64,
}
