//! Chat-completions client used by the LLM composer strategy.

use serde::{Deserialize, Serialize};

use crate::error::SentimentError;
use crate::types::AggregateReport;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl LlmClient {
    #[must_use]
    pub fn new(client: reqwest::Client, api_key: &str, model: &str) -> Self {
        Self::with_base_url(client, api_key, model, DEFAULT_BASE_URL)
    }

    /// Custom base URL variant for pointing at a mock server in tests.
    #[must_use]
    pub fn with_base_url(
        client: reqwest::Client,
        api_key: &str,
        model: &str,
        base_url: &str,
    ) -> Self {
        Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Ask the model a question grounded in a digest of the report.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Llm`] on non-success status, missing
    /// choices, or an unparsable body; [`SentimentError::Http`] on network
    /// failure. Callers are expected to fall back to the template composer.
    pub async fn chat(
        &self,
        message: &str,
        report: &AggregateReport,
    ) -> Result<String, SentimentError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "You are a sentiment analysis assistant. Answer questions using \
                              only the analysis context provided; be concise and concrete."
                        .to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!(
                        "Analysis context:\n{}\n\nQuestion: {message}",
                        build_context_digest(report)
                    ),
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SentimentError::Llm(format!(
                "chat completion returned status {}",
                response.status()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::Llm(format!("chat completion parse error: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SentimentError::Llm("chat completion returned no choices".to_string()))
    }
}

/// Textual digest of a report, used as grounding context for the model.
#[must_use]
pub fn build_context_digest(report: &AggregateReport) -> String {
    let platforms: Vec<String> = report
        .platform_breakdown
        .iter()
        .map(|(p, c)| format!("{p}={c}"))
        .collect();

    let samples: Vec<String> = report
        .sample_tweets
        .iter()
        .take(5)
        .map(|item| {
            let snippet: String = item.text.chars().take(120).collect();
            format!("- [{}] ({}) {snippet}", item.sentiment, item.source)
        })
        .collect();

    format!(
        "total items: {}\npositive: {}%\nnegative: {}%\nneutral: {}%\nplatforms: {}\nsamples:\n{}",
        report.total_tweets,
        report.positive_percentage,
        report.negative_percentage,
        report.neutral_percentage,
        platforms.join(", "),
        samples.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_digest_includes_percentages_and_platforms() {
        let mut report = AggregateReport {
            total_tweets: 12,
            positive_percentage: 50,
            negative_percentage: 25,
            neutral_percentage: 25,
            ..AggregateReport::default()
        };
        report.platform_breakdown.insert("reddit".to_string(), 12);

        let digest = build_context_digest(&report);
        assert!(digest.contains("total items: 12"));
        assert!(digest.contains("positive: 50%"));
        assert!(digest.contains("reddit=12"));
    }
}
