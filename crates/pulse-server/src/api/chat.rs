use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use pulse_sentiment::types::AggregateReport;
use pulse_sentiment::run_analysis_first_prompt;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ChatRequest {
    message: Option<String>,
    analysis_results: Option<AggregateReport>,
    /// Accepted for wire compatibility; templates answer statelessly.
    #[allow(dead_code)]
    conversation_history: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatResponse {
    response: String,
}

/// POST `/chat` — answer a question about a previously returned report.
pub(super) async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = body
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::new("bad_request", "message must be a non-empty string"))?
        .to_owned();

    let Some(report) = body.analysis_results else {
        return Ok(Json(ChatResponse {
            response: run_analysis_first_prompt(),
        }));
    };

    let response = state.composer.answer(&message, &report).await;
    Ok(Json(ChatResponse { response }))
}
