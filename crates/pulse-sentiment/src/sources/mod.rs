//! Source adapters: one module per external content API.
//!
//! Every adapter normalizes its raw response into [`ContentItem`]s, scoring
//! each text with the lexicon scorer on the way through. Adapters never let
//! a network or parse failure escape [`collect_items`]: a failed source
//! contributes zero items and a warning log.

pub mod github;
pub mod google_news;
pub mod hackernews;
pub mod newsapi;
pub mod reddit;

use std::collections::HashSet;

use crate::types::{ContentItem, FetchConfig, SourceKind};

/// Maximum characters of cleaned text kept per item.
const MAX_TEXT_LEN: usize = 500;

/// Collect items from all configured sources concurrently.
///
/// Each adapter runs under the configured timeout; failures and timeouts are
/// logged and contribute an empty list so partial data from the other sources
/// remains usable. The merged list is deduplicated by URL.
pub async fn collect_items(
    client: &reqwest::Client,
    config: &FetchConfig,
    query: &str,
) -> Vec<ContentItem> {
    let fetches = config.sources.iter().map(|kind| fetch_one(client, config, *kind, query));
    let results = futures::future::join_all(fetches).await;

    let mut items = Vec::new();
    for (kind, result) in config.sources.iter().zip(results) {
        match result {
            Ok(source_items) => {
                tracing::debug!(source = ?kind, count = source_items.len(), "collected items");
                items.extend(source_items);
            }
            Err(e) => {
                tracing::warn!(source = ?kind, error = %e, "source fetch failed, skipping");
            }
        }
    }

    // Cross-source URL collisions collapse to the first occurrence.
    let mut seen_urls: HashSet<String> = HashSet::new();
    items.retain(|item| seen_urls.insert(item.url.clone()));

    items
}

async fn fetch_one(
    client: &reqwest::Client,
    config: &FetchConfig,
    kind: SourceKind,
    query: &str,
) -> Result<Vec<ContentItem>, crate::error::SentimentError> {
    let fut = async {
        match kind {
            SourceKind::Reddit => reddit::fetch(client, config, query, 30).await,
            SourceKind::HackerNews => hackernews::fetch(client, config, query, 25).await,
            SourceKind::NewsApi => newsapi::fetch(client, config, query, 20).await,
            SourceKind::GoogleNews => google_news::fetch(client, config, query, 25).await,
            SourceKind::GitHub => github::fetch(client, config, query, 15).await,
        }
    };

    tokio::time::timeout(config.timeout, fut)
        .await
        .map_err(|_| crate::error::SentimentError::Source(format!("{kind:?} timed out")))?
}

/// Strip HTML tags, collapse whitespace, and drop special characters while
/// keeping basic punctuation.
pub(crate) fn clean_text(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => stripped.push(ch),
            _ => {}
        }
    }

    stripped
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || ".,!?'-".contains(*c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to the per-item text budget on a character boundary.
pub(crate) fn truncate_text(text: &str) -> String {
    text.chars().take(MAX_TEXT_LEN).collect()
}
