//! Paged retrieval of a user's public events.

use crate::config::AppConfig;
use crate::errors::TallyError;
use crate::models::ActivityEvent;
use reqwest::{header, Client, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, info, warn};

pub const PAGE_SIZE: usize = 30;
pub const MAX_PAGES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Ok,
    NotFound,
    RateLimited,
    NetworkError,
}

impl FetchOutcome {
    pub fn into_result(self) -> Result<(), TallyError> {
        match self {
            FetchOutcome::Ok => Ok(()),
            FetchOutcome::NotFound => Err(TallyError::SubjectNotFound),
            FetchOutcome::RateLimited => Err(TallyError::RateLimited),
            FetchOutcome::NetworkError => Err(TallyError::NetworkFailure),
        }
    }
}

/// Events collected before the loop stopped, and why it stopped.
#[derive(Debug)]
pub struct FetchReport {
    pub events: Vec<ActivityEvent>,
    pub outcome: FetchOutcome,
    pub pages_requested: u32,
}

enum Page {
    Events(Vec<ActivityEvent>),
    Stop(FetchOutcome),
}

/// Cheap to clone; the inner [`reqwest::Client`] is shared.
#[derive(Clone)]
pub struct ActivityFetcher {
    client: Client,
    api_base: String,
}

impl ActivityFetcher {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            api_base: config.api_base.clone(),
        })
    }

    /// Walks pages 1..=MAX_PAGES one at a time until the feed runs dry or a
    /// page fails.
    pub async fn fetch(&self, identity: &str) -> FetchReport {
        let mut events = Vec::new();
        let mut pages_requested = 0;

        for page in 1..=MAX_PAGES {
            pages_requested = page;
            match self.fetch_page(identity, page).await {
                Page::Stop(outcome) => {
                    info!(identity, page, ?outcome, "stopped paging");
                    return FetchReport {
                        events,
                        outcome,
                        pages_requested,
                    };
                }
                Page::Events(batch) => {
                    let len = batch.len();
                    debug!(identity, page, len, "received page");
                    events.extend(batch);
                    if len < PAGE_SIZE {
                        break;
                    }
                }
            }
        }

        info!(identity, pages_requested, total = events.len(), "fetched activity");
        FetchReport {
            events,
            outcome: FetchOutcome::Ok,
            pages_requested,
        }
    }

    async fn fetch_page(&self, identity: &str, page: u32) -> Page {
        let Some(url) = self.page_url(identity, page) else {
            warn!(api_base = %self.api_base, "cannot build events url");
            return Page::Stop(FetchOutcome::NetworkError);
        };

        let resp = match self
            .client
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                warn!("events request failed: {err}");
                return Page::Stop(FetchOutcome::NetworkError);
            }
        };

        match resp.status() {
            StatusCode::NOT_FOUND => return Page::Stop(FetchOutcome::NotFound),
            StatusCode::FORBIDDEN => return Page::Stop(FetchOutcome::RateLimited),
            status if !status.is_success() => {
                warn!(%status, "unexpected events status");
                return Page::Stop(FetchOutcome::NetworkError);
            }
            _ => {}
        }

        match resp.json::<Value>().await {
            Ok(Value::Array(items)) => Page::Events(items.iter().map(ActivityEvent::from_value).collect()),
            Ok(other) => {
                // Not a list: nothing more to page through.
                debug!(kind = json_kind(&other), "events body is not an array");
                Page::Events(Vec::new())
            }
            Err(err) => {
                warn!("failed to decode events page: {err}");
                Page::Stop(FetchOutcome::NetworkError)
            }
        }
    }

    fn page_url(&self, identity: &str, page: u32) -> Option<Url> {
        let mut url = Url::parse(&self.api_base).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["users", identity, "events"]);
        url.query_pairs_mut()
            .append_pair("per_page", &PAGE_SIZE.to_string())
            .append_pair("page", &page.to_string());
        Some(url)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
