//! NewsAPI adapter (requires an API key; skipped when none is configured).

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::SentimentError;
use crate::scorer::analyze_sentiment;
use crate::types::{ContentItem, FetchConfig};

use super::{clean_text, truncate_text};

const MIN_TEXT_LEN: usize = 20;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// Search recent news articles for a topic.
///
/// Returns an empty list without touching the network when no API key is
/// configured; that case is not an error.
///
/// # Errors
///
/// Returns [`SentimentError::Http`] on network failure or
/// [`SentimentError::Source`] on a non-success status or unparsable body.
pub async fn fetch(
    client: &reqwest::Client,
    config: &FetchConfig,
    query: &str,
    max_items: usize,
) -> Result<Vec<ContentItem>, SentimentError> {
    let Some(api_key) = config.newsapi_key.as_deref() else {
        tracing::debug!("NewsAPI key not configured, skipping source");
        return Ok(Vec::new());
    };

    let url = format!("{}/v2/everything", config.newsapi_base);
    let response = client
        .get(&url)
        .header("User-Agent", &config.user_agent)
        .query(&[
            ("q", query),
            ("language", "en"),
            ("sortBy", "publishedAt"),
            ("pageSize", &max_items.to_string()),
            ("apiKey", api_key),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(SentimentError::Source(format!(
            "NewsAPI returned status {}",
            response.status()
        )));
    }

    let body: EverythingResponse = response
        .json()
        .await
        .map_err(|e| SentimentError::Source(format!("NewsAPI response parse error: {e}")))?;

    Ok(body.articles.iter().filter_map(to_item).collect())
}

fn to_item(article: &Article) -> Option<ContentItem> {
    let title = article.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
    let url = article.url.as_deref().filter(|u| !u.is_empty())?;

    let combined = match article.description.as_deref() {
        Some(desc) if !desc.is_empty() => format!("{title} {desc}"),
        _ => title.to_string(),
    };

    let text = clean_text(&combined);
    if text.chars().count() < MIN_TEXT_LEN {
        return None;
    }

    let created_at = article
        .published_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map_or_else(Utc::now, |dt| dt.with_timezone(&Utc));

    let source_name = article
        .source
        .as_ref()
        .and_then(|s| s.name.as_deref())
        .unwrap_or("News");

    let sentiment = analyze_sentiment(&text);

    Some(ContentItem {
        text: truncate_text(&text),
        sentiment: sentiment.label,
        platform: "news".to_string(),
        source: source_name.to_string(),
        created_at,
        url: url.to_string(),
        title: Some(title.to_string()),
        score: None,
    })
}
