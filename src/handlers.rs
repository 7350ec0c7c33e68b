use crate::controller::Tally;
use crate::errors::AppError;
use crate::models::{TallyForm, TallyResponse};
use crate::state::AppState;
use crate::ui::render_page;
use axum::{
    extract::{Query, State},
    response::Html,
    Form, Json,
};
use chrono::Utc;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = state.controller.view().await;
    Html(render_page(&TallyForm::default(), &view))
}

pub async fn submit(State(state): State<AppState>, Form(form): Form<TallyForm>) -> Html<String> {
    let view = state.controller.submit(&form).await;
    Html(render_page(&form, &view))
}

pub async fn get_tally(
    State(state): State<AppState>,
    Query(form): Query<TallyForm>,
) -> Result<Json<TallyResponse>, AppError> {
    let tally = state.controller.tally_at(&form, Utc::now()).await?;
    Ok(Json(to_response(tally)))
}

pub async fn health() -> &'static str {
    "ok"
}

fn to_response(tally: Tally) -> TallyResponse {
    let summary = tally.summary;
    TallyResponse {
        username: summary.identity,
        start_date: summary.range.start.to_string(),
        end_date: summary.range.end.to_string(),
        events_fetched: tally.events_fetched,
        commits: summary.counts.commits,
        pull_requests_opened: summary.counts.pull_requests_opened,
        issues_opened: summary.counts.issues_opened,
    }
}
