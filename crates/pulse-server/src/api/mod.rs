mod analyze;
mod chat;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use pulse_core::AppConfig;
use pulse_sentiment::types::FetchConfig;
use pulse_sentiment::Composer;

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: reqwest::Client,
    pub fetch: FetchConfig,
    pub composer: Arc<Composer>,
}

impl AppState {
    /// Derive the adapter configuration and composer strategy from config.
    ///
    /// The LLM composer is selected only when an OpenAI key is present;
    /// everything else uses the deterministic templates.
    #[must_use]
    pub fn from_config(config: Arc<AppConfig>, client: reqwest::Client) -> Self {
        let fetch = FetchConfig {
            user_agent: config.user_agent.clone(),
            timeout: Duration::from_secs(config.fetch_timeout_secs),
            newsapi_key: config.newsapi_key.clone(),
            ..FetchConfig::default()
        };

        let composer = match &config.openai_api_key {
            Some(key) => {
                tracing::info!(model = %config.openai_model, "LLM composer enabled");
                Composer::Llm(pulse_sentiment::LlmClient::new(
                    client.clone(),
                    key,
                    &config.openai_model,
                ))
            }
            None => Composer::Template,
        };

        Self {
            config,
            client,
            fetch,
            composer: Arc::new(composer),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn rate_limited_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze::analyze))
        .route("/chat", post(chat::chat))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(rate_limited_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}
