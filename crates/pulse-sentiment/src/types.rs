use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentiment class assigned to a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Negative => write!(f, "negative"),
            SentimentLabel::Neutral => write!(f, "neutral"),
        }
    }
}

/// Output of the lexicon scorer for one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    /// Winning accumulator value; 0.0 when neutral.
    pub score: f32,
    /// In `[0.5, 0.95]`. Flat 0.5 when no lexicon word matched.
    pub confidence: f32,
}

/// A single normalized piece of content collected from one source.
///
/// Built by a source adapter at fetch time; immutable afterwards and scoped
/// to a single request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub text: String,
    pub sentiment: SentimentLabel,
    pub platform: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

/// Per-platform tally of the three sentiment labels.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LabelCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

/// Time-bucketed sentiment trend, most recent bucket first (`"now"`/`"Today"`
/// leads when present).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub time: Vec<String>,
    pub positive: Vec<u32>,
    pub negative: Vec<u32>,
    pub neutral: Vec<u32>,
}

/// Aggregated sentiment report for one query, recomputed fresh per request.
///
/// Field names follow the public wire format (`total_tweets` is historical:
/// the original service started out Twitter-only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateReport {
    pub total_tweets: usize,
    pub positive_percentage: u32,
    pub negative_percentage: u32,
    pub neutral_percentage: u32,
    pub timeline: Timeline,
    pub sample_tweets: Vec<ContentItem>,
    pub platform_breakdown: BTreeMap<String, usize>,
    pub source_sentiment_counts: BTreeMap<String, LabelCounts>,
}

/// Full `/analyze` response body: the report plus outcome metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(flatten)]
    pub report: AggregateReport,
    pub success: bool,
    pub message: String,
    pub ai_answer: String,
}

/// Which external sources to query for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Reddit,
    HackerNews,
    NewsApi,
    GoogleNews,
    GitHub,
}

/// Injected adapter configuration: which sources to hit, how, and where.
///
/// Base URLs default to the production endpoints and exist so tests can point
/// adapters at a mock server.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub sources: Vec<SourceKind>,
    pub user_agent: String,
    pub timeout: Duration,
    pub newsapi_key: Option<String>,
    pub reddit_base: String,
    pub hackernews_base: String,
    pub newsapi_base: String,
    pub google_news_base: String,
    pub github_base: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceKind::Reddit,
                SourceKind::HackerNews,
                SourceKind::NewsApi,
                SourceKind::GoogleNews,
                SourceKind::GitHub,
            ],
            user_agent: "pulse/0.1 (topic-sentiment)".to_string(),
            timeout: Duration::from_secs(8),
            newsapi_key: None,
            reddit_base: "https://www.reddit.com".to_string(),
            hackernews_base: "https://hn.algolia.com".to_string(),
            newsapi_base: "https://newsapi.org".to_string(),
            google_news_base: "https://news.google.com".to_string(),
            github_base: "https://api.github.com".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_label_serializes_lowercase() {
        let json = serde_json::to_string(&SentimentLabel::Positive).expect("serialize");
        assert_eq!(json, "\"positive\"");
    }

    #[test]
    fn analysis_response_flattens_report_fields() {
        let response = AnalysisResponse {
            report: AggregateReport {
                total_tweets: 3,
                positive_percentage: 100,
                ..AggregateReport::default()
            },
            success: true,
            message: "ok".to_string(),
            ai_answer: "answer".to_string(),
        };
        let json: serde_json::Value =
            serde_json::to_value(&response).expect("serialize AnalysisResponse");
        assert_eq!(json["total_tweets"].as_u64(), Some(3));
        assert_eq!(json["positive_percentage"].as_u64(), Some(100));
        assert_eq!(json["success"].as_bool(), Some(true));
    }

    #[test]
    fn content_item_round_trips_through_json() {
        let item = ContentItem {
            text: "a great day".to_string(),
            sentiment: SentimentLabel::Positive,
            platform: "reddit".to_string(),
            source: "r/news".to_string(),
            created_at: Utc::now(),
            url: "https://reddit.com/r/news/1".to_string(),
            title: Some("a great day".to_string()),
            score: Some(12),
        };
        let json = serde_json::to_string(&item).expect("serialize");
        let back: ContentItem = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.sentiment, SentimentLabel::Positive);
        assert_eq!(back.url, item.url);
        assert_eq!(back.score, Some(12));
    }
}
