//! GitHub repository search adapter, gated to tech-related queries.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::SentimentError;
use crate::scorer::analyze_sentiment;
use crate::types::{ContentItem, FetchConfig};

use super::{clean_text, truncate_text};

const MIN_TEXT_LEN: usize = 10;

/// A non-tech query skips GitHub entirely to avoid irrelevant calls.
const TECH_KEYWORDS: &[&str] = &[
    "tech",
    "software",
    "programming",
    "ai",
    "machine learning",
    "technology",
    "code",
    "developer",
    "api",
    "framework",
    "library",
    "rust",
    "javascript",
    "python",
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Repo>,
}

#[derive(Debug, Deserialize)]
struct Repo {
    name: Option<String>,
    full_name: Option<String>,
    description: Option<String>,
    html_url: Option<String>,
    updated_at: Option<String>,
    stargazers_count: Option<i64>,
}

pub(crate) fn is_tech_query(query: &str) -> bool {
    let lowered = query.to_lowercase();
    TECH_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Search GitHub repositories for a tech-related topic.
///
/// Non-tech queries return an empty list without a network call.
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
    if !is_tech_query(query) {
        tracing::debug!(query, "query is not tech-related, skipping GitHub");
        return Ok(Vec::new());
    }

    let url = format!("{}/search/repositories", config.github_base);
    let response = client
        .get(&url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "application/vnd.github.v3+json")
        .query(&[
            ("q", query),
            ("sort", "stars"),
            ("order", "desc"),
            ("per_page", &max_items.to_string()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(SentimentError::Source(format!(
            "GitHub search returned status {}",
            response.status()
        )));
    }

    let body: SearchResponse = response
        .json()
        .await
        .map_err(|e| SentimentError::Source(format!("GitHub response parse error: {e}")))?;

    Ok(body.items.iter().filter_map(to_item).collect())
}

fn to_item(repo: &Repo) -> Option<ContentItem> {
    let name = repo.name.as_deref().filter(|n| !n.is_empty())?;
    let url = repo.html_url.as_deref().filter(|u| !u.is_empty())?;

    let combined = match repo.description.as_deref() {
        Some(desc) if !desc.is_empty() => format!("{name}: {desc}"),
        _ => name.to_string(),
    };

    let text = clean_text(&combined);
    if text.chars().count() < MIN_TEXT_LEN {
        return None;
    }

    let created_at = repo
        .updated_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map_or_else(Utc::now, |dt| dt.with_timezone(&Utc));

    let sentiment = analyze_sentiment(&text);

    Some(ContentItem {
        text: truncate_text(&text),
        sentiment: sentiment.label,
        platform: "github".to_string(),
        source: "GitHub".to_string(),
        created_at,
        url: url.to_string(),
        title: repo.full_name.clone(),
        score: repo.stargazers_count,
    })
}
