//! Hacker News adapter backed by the Algolia search API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::SentimentError;
use crate::scorer::analyze_sentiment;
use crate::types::{ContentItem, FetchConfig};

use super::{clean_text, truncate_text};

const MIN_TEXT_LEN: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    title: Option<String>,
    story_text: Option<String>,
    url: Option<String>,
    #[serde(rename = "objectID")]
    object_id: Option<String>,
    created_at_i: Option<i64>,
    points: Option<i64>,
}

/// Search Hacker News stories for a topic.
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
    let url = format!("{}/api/v1/search", config.hackernews_base);
    let response = client
        .get(&url)
        .header("User-Agent", &config.user_agent)
        .query(&[
            ("query", query),
            ("tags", "story"),
            ("hitsPerPage", &max_items.to_string()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(SentimentError::Source(format!(
            "Hacker News search returned status {}",
            response.status()
        )));
    }

    let body: SearchResponse = response
        .json()
        .await
        .map_err(|e| SentimentError::Source(format!("Hacker News response parse error: {e}")))?;

    Ok(body.hits.iter().filter_map(to_item).collect())
}

fn to_item(hit: &Hit) -> Option<ContentItem> {
    let title = hit.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;

    let combined = match hit.story_text.as_deref() {
        Some(body) if !body.is_empty() => format!("{title} {body}"),
        _ => title.to_string(),
    };

    let text = clean_text(&combined);
    if text.chars().count() < MIN_TEXT_LEN {
        return None;
    }

    // Stories without an external URL fall back to the HN item page.
    let url = match hit.url.as_deref().filter(|u| !u.is_empty()) {
        Some(u) => u.to_string(),
        None => {
            let id = hit.object_id.as_deref()?;
            format!("https://news.ycombinator.com/item?id={id}")
        }
    };

    let created_at = hit
        .created_at_i
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    let sentiment = analyze_sentiment(&text);

    Some(ContentItem {
        text: truncate_text(&text),
        sentiment: sentiment.label,
        platform: "hackernews".to_string(),
        source: "Hacker News".to_string(),
        created_at,
        url,
        title: Some(title.to_string()),
        score: hit.points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, url: Option<&str>) -> Hit {
        Hit {
            title: Some(title.to_string()),
            story_text: None,
            url: url.map(String::from),
            object_id: Some("12345".to_string()),
            created_at_i: Some(1_700_000_000),
            points: Some(321),
        }
    }

    #[test]
    fn converts_story_with_external_url() {
        let item = to_item(&hit("An impressive new database engine", Some("https://example.com/db")))
            .expect("item expected");
        assert_eq!(item.platform, "hackernews");
        assert_eq!(item.url, "https://example.com/db");
        assert_eq!(item.score, Some(321));
    }

    #[test]
    fn falls_back_to_hn_item_url() {
        let item = to_item(&hit("Show HN something interesting", None)).expect("item expected");
        assert_eq!(item.url, "https://news.ycombinator.com/item?id=12345");
    }

    #[test]
    fn discards_short_title() {
        assert!(to_item(&hit("tiny", None)).is_none());
    }
}
