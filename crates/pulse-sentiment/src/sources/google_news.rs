//! Google News RSS adapter (XML feed, no API key).

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::SentimentError;
use crate::scorer::analyze_sentiment;
use crate::types::{ContentItem, FetchConfig};

use super::{clean_text, truncate_text};

const MIN_TEXT_LEN: usize = 10;

/// Fetch items from the Google News RSS search feed for a topic.
///
/// # Errors
///
/// Returns [`SentimentError::Http`] on network failure,
/// [`SentimentError::Source`] on a non-success status, or
/// [`SentimentError::Xml`] on malformed RSS.
pub async fn fetch(
    client: &reqwest::Client,
    config: &FetchConfig,
    query: &str,
    max_items: usize,
) -> Result<Vec<ContentItem>, SentimentError> {
    let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
    let url = format!(
        "{}/rss/search?q={encoded}&hl=en-US&gl=US&ceid=US:en",
        config.google_news_base
    );

    let response = client
        .get(&url)
        .header("User-Agent", &config.user_agent)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(SentimentError::Source(format!(
            "Google News RSS returned status {}",
            response.status()
        )));
    }

    let body = response.text().await?;
    let mut items = parse_rss_feed(&body)?;
    items.truncate(max_items);
    Ok(items)
}

/// Parse an RSS feed XML body into `ContentItem`s.
///
/// # Errors
///
/// Returns [`SentimentError::Xml`] if the XML is malformed.
pub(crate) fn parse_rss_feed(xml: &str) -> Result<Vec<ContentItem>, SentimentError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current_title = String::new();
    let mut current_link = String::new();
    let mut current_description = String::new();
    let mut current_pub_date = String::new();
    let mut in_item = false;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if name == "item" {
                    in_item = true;
                    current_title.clear();
                    current_link.clear();
                    current_description.clear();
                    current_pub_date.clear();
                } else {
                    current_tag = name;
                }
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                if name == "item" && in_item {
                    in_item = false;
                    if let Some(item) = build_item(
                        &current_title,
                        &current_link,
                        &current_description,
                        &current_pub_date,
                    ) {
                        items.push(item);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    assign_field(
                        &current_tag,
                        text,
                        &mut current_title,
                        &mut current_link,
                        &mut current_description,
                        &mut current_pub_date,
                    );
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    assign_field(
                        &current_tag,
                        text,
                        &mut current_title,
                        &mut current_link,
                        &mut current_description,
                        &mut current_pub_date,
                    );
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SentimentError::Xml(e)),
            _ => {}
        }
    }

    Ok(items)
}

fn assign_field(
    tag: &str,
    text: String,
    title: &mut String,
    link: &mut String,
    description: &mut String,
    pub_date: &mut String,
) {
    match tag {
        "title" => *title = text,
        "link" => *link = text,
        "description" => *description = text,
        "pubDate" => *pub_date = text,
        _ => {}
    }
}

fn build_item(title: &str, link: &str, description: &str, pub_date: &str) -> Option<ContentItem> {
    if link.is_empty() {
        return None;
    }

    let combined = if description.is_empty() {
        title.to_string()
    } else {
        format!("{title} {description}")
    };
    let text = clean_text(&combined);
    if text.chars().count() < MIN_TEXT_LEN {
        return None;
    }

    let created_at = DateTime::parse_from_rfc2822(pub_date)
        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

    let sentiment = analyze_sentiment(&text);

    Some(ContentItem {
        text: truncate_text(&text),
        sentiment: sentiment.label,
        platform: "news".to_string(),
        source: "Google News".to_string(),
        created_at,
        url: link.to_string(),
        title: if title.is_empty() {
            None
        } else {
            Some(clean_text(title))
        },
        score: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Google News</title>
    <item>
      <title>Rust adoption keeps growing in infrastructure teams</title>
      <link>https://example.com/rust-growth</link>
      <description>&lt;a href="x"&gt;More teams&lt;/a&gt; report great results with the language.</description>
      <pubDate>Mon, 24 Aug 2026 09:30:00 GMT</pubDate>
    </item>
    <item>
      <title>Cloud outage causes problems for major providers</title>
      <link>https://example.com/outage</link>
      <description>Service failures were reported across regions.</description>
      <pubDate>Sun, 23 Aug 2026 18:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_items_with_stripped_html() {
        let items = parse_rss_feed(SAMPLE_RSS).expect("should parse valid RSS");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].platform, "news");
        assert_eq!(items[0].source, "Google News");
        assert!(!items[0].text.contains('<'), "HTML should be stripped");
        assert_eq!(items[0].url, "https://example.com/rust-growth");
    }

    #[test]
    fn parses_pub_date_as_rfc2822() {
        let items = parse_rss_feed(SAMPLE_RSS).expect("should parse valid RSS");
        assert_eq!(items[0].created_at.to_rfc3339(), "2026-08-24T09:30:00+00:00");
    }

    #[test]
    fn empty_feed_returns_empty_vec() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel></channel></rss>"#;
        let items = parse_rss_feed(xml).expect("should parse empty RSS");
        assert!(items.is_empty());
    }

    #[test]
    fn item_without_link_is_skipped() {
        let xml = r#"<rss><channel><item><title>Headline without any link element here</title></item></channel></rss>"#;
        let items = parse_rss_feed(xml).expect("should parse");
        assert!(items.is_empty());
    }
}
