//! Reddit public search adapter (no credentials, JSON endpoint).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::SentimentError;
use crate::scorer::analyze_sentiment;
use crate::types::{ContentItem, FetchConfig};

use super::{clean_text, truncate_text};

/// Cleaned text shorter than this is discarded as noise.
const MIN_TEXT_LEN: usize = 20;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: Option<String>,
    selftext: Option<String>,
    subreddit: Option<String>,
    permalink: Option<String>,
    created_utc: Option<f64>,
    score: Option<i64>,
}

/// Search Reddit for a topic across two sort passes (`hot`, then `new`),
/// deduplicating by URL within the adapter.
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
    let mut items = Vec::new();
    let mut seen_urls = HashSet::new();

    for sort in ["hot", "new"] {
        let listing = search(client, config, query, sort, max_items).await?;
        for post in listing.data.children {
            if let Some(item) = to_item(&post.data) {
                if seen_urls.insert(item.url.clone()) {
                    items.push(item);
                }
            }
            if items.len() >= max_items {
                return Ok(items);
            }
        }
    }

    Ok(items)
}

async fn search(
    client: &reqwest::Client,
    config: &FetchConfig,
    query: &str,
    sort: &str,
    limit: usize,
) -> Result<Listing, SentimentError> {
    let url = format!("{}/search.json", config.reddit_base);
    let response = client
        .get(&url)
        .header("User-Agent", &config.user_agent)
        .query(&[
            ("q", query),
            ("sort", sort),
            ("t", "week"),
            ("limit", &limit.to_string()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(SentimentError::Source(format!(
            "Reddit search returned status {}",
            response.status()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| SentimentError::Source(format!("Reddit response parse error: {e}")))
}

fn to_item(post: &PostData) -> Option<ContentItem> {
    let title = post.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
    let permalink = post.permalink.as_deref()?;

    let combined = match post.selftext.as_deref() {
        Some(body) if !body.is_empty() && body != "[deleted]" && body != "[removed]" => {
            format!("{title} {body}")
        }
        _ => title.to_string(),
    };

    let text = clean_text(&combined);
    if text.chars().count() < MIN_TEXT_LEN {
        return None;
    }

    let created_at = post
        .created_utc
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs as i64, 0))
        .unwrap_or_else(Utc::now);

    let subreddit = post.subreddit.as_deref().unwrap_or("unknown");
    let sentiment = analyze_sentiment(&text);

    Some(ContentItem {
        text: truncate_text(&text),
        sentiment: sentiment.label,
        platform: "reddit".to_string(),
        source: format!("r/{subreddit}"),
        created_at,
        url: format!("https://reddit.com{permalink}"),
        title: Some(title.to_string()),
        score: post.score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, selftext: &str) -> PostData {
        PostData {
            title: Some(title.to_string()),
            selftext: Some(selftext.to_string()),
            subreddit: Some("technology".to_string()),
            permalink: Some("/r/technology/comments/abc/post".to_string()),
            created_utc: Some(1_700_000_000.0),
            score: Some(42),
        }
    }

    #[test]
    fn converts_post_with_title_and_body() {
        let item = to_item(&post("A great new framework", "It works really well for me"))
            .expect("item expected");
        assert_eq!(item.platform, "reddit");
        assert_eq!(item.source, "r/technology");
        assert!(item.url.starts_with("https://reddit.com/r/technology"));
        assert_eq!(item.score, Some(42));
    }

    #[test]
    fn discards_short_text() {
        assert!(to_item(&post("short", "")).is_none());
    }

    #[test]
    fn ignores_deleted_body() {
        let item = to_item(&post("A perfectly reasonable headline", "[deleted]"))
            .expect("title alone is long enough");
        assert_eq!(item.text, "A perfectly reasonable headline");
    }

    #[test]
    fn missing_permalink_yields_no_item() {
        let mut p = post("A perfectly reasonable headline", "body text here");
        p.permalink = None;
        assert!(to_item(&p).is_none());
    }
}
