use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;

use pulse_sentiment::run_analysis;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    query: Option<String>,
    max_tweets: Option<usize>,
}

/// POST `/analyze` — run the full collection and aggregation pipeline.
pub(super) async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let query = body
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::new("bad_request", "query must be a non-empty string"))?
        .to_owned();

    let max_items = body.max_tweets.unwrap_or(state.config.max_items_default);

    tracing::info!(query, max_items, "analysis requested");
    let response = run_analysis(
        &state.client,
        &state.fetch,
        state.config.bucketing,
        &query,
        max_items,
    )
    .await;

    Ok(Json(response))
}
