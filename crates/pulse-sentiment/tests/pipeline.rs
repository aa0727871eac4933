//! End-to-end pipeline tests: mocked sources through analysis and composition.

use std::time::Duration;

use pulse_core::BucketStrategy;
use pulse_sentiment::types::{AggregateReport, FetchConfig, SourceKind};
use pulse_sentiment::{run_analysis, Composer, LlmClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, sources: Vec<SourceKind>) -> FetchConfig {
    FetchConfig {
        sources,
        timeout: Duration::from_secs(5),
        newsapi_key: Some("test-key".to_string()),
        reddit_base: server.uri(),
        hackernews_base: server.uri(),
        newsapi_base: server.uri(),
        google_news_base: server.uri(),
        github_base: server.uri(),
        ..FetchConfig::default()
    }
}

fn reddit_post(title: &str, permalink: &str) -> serde_json::Value {
    serde_json::json!({
        "data": {
            "title": title,
            "selftext": "",
            "subreddit": "test",
            "permalink": permalink,
            "created_utc": 1_760_000_000.0,
            "score": 10
        }
    })
}

fn hn_hit(title: &str, id: &str, url: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "story_text": null,
        "url": url,
        "objectID": id,
        "created_at_i": 1_760_000_000,
        "points": 50
    })
}

#[tokio::test]
async fn all_positive_items_report_one_hundred_percent() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "data": {
            "children": [
                reddit_post("This release is great and I love it", "/r/test/comments/a/x"),
                reddit_post("Amazing work, the best update so far", "/r/test/comments/b/y"),
                reddit_post("Excellent improvements, works perfect now", "/r/test/comments/c/z")
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let config = config_for(&server, vec![SourceKind::Reddit]);
    let response = run_analysis(&client, &config, BucketStrategy::Daily, "release", 100).await;

    assert!(response.success);
    assert_eq!(response.report.total_tweets, 3);
    assert_eq!(response.report.positive_percentage, 100);
    assert_eq!(response.report.negative_percentage, 0);
    assert_eq!(response.report.neutral_percentage, 0);
    assert_eq!(response.report.platform_breakdown.get("reddit"), Some(&3));
    assert!(!response.ai_answer.is_empty());
}

#[tokio::test]
async fn one_failing_source_does_not_sink_the_analysis() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let body = serde_json::json!({
        "hits": [
            hn_hit("A wonderful improvement to the toolchain", "1", Some("https://example.com/a")),
            hn_hit("Terrible regression breaks the build badly", "2", Some("https://example.com/b"))
        ]
    });
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let config = config_for(&server, vec![SourceKind::Reddit, SourceKind::HackerNews]);
    let response = run_analysis(&client, &config, BucketStrategy::Daily, "toolchain", 100).await;

    assert!(response.success, "surviving sources should still produce a report");
    assert_eq!(response.report.total_tweets, 2);
    assert_eq!(response.report.platform_breakdown.get("hackernews"), Some(&2));
    assert!(response.report.platform_breakdown.get("reddit").is_none());
}

#[tokio::test]
async fn slow_source_times_out_and_contributes_nothing() {
    let server = MockServer::start().await;

    // Reddit responds well past the configured timeout.
    let reddit_body = serde_json::json!({
        "data": {
            "children": [
                reddit_post("A headline that would otherwise be counted", "/r/test/comments/s/x")
            ]
        }
    });
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&reddit_body)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let hn_body = serde_json::json!({
        "hits": [
            hn_hit("A wonderful improvement to the toolchain", "1", Some("https://example.com/a"))
        ]
    });
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&hn_body))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let mut config = config_for(&server, vec![SourceKind::Reddit, SourceKind::HackerNews]);
    config.timeout = Duration::from_millis(100);
    let response = run_analysis(&client, &config, BucketStrategy::Daily, "toolchain", 100).await;

    assert!(response.success);
    assert_eq!(response.report.total_tweets, 1, "timed-out source must contribute zero items");
    assert_eq!(response.report.platform_breakdown.get("hackernews"), Some(&1));
    assert!(response.report.platform_breakdown.get("reddit").is_none());
}

#[tokio::test]
async fn shared_urls_across_sources_are_deduplicated() {
    let server = MockServer::start().await;

    let hn_body = serde_json::json!({
        "hits": [
            hn_hit("Shared headline about the product launch", "1", Some("https://example.com/shared"))
        ]
    });
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&hn_body))
        .mount(&server)
        .await;

    let news_body = serde_json::json!({
        "articles": [
            {
                "title": "Shared headline about the product launch",
                "description": "Same story syndicated elsewhere",
                "url": "https://example.com/shared",
                "publishedAt": "2026-08-20T12:00:00Z",
                "source": { "name": "Example Wire" }
            }
        ]
    });
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&news_body))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let config = config_for(&server, vec![SourceKind::HackerNews, SourceKind::NewsApi]);
    let response = run_analysis(&client, &config, BucketStrategy::Daily, "launch", 100).await;

    assert!(response.success);
    assert_eq!(response.report.total_tweets, 1, "same URL from two sources counts once");
}

#[tokio::test]
async fn empty_collection_reports_failure_with_guidance() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&serde_json::json!({
            "data": { "children": [] }
        })))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let config = config_for(&server, vec![SourceKind::Reddit]);
    let response = run_analysis(&client, &config, BucketStrategy::Daily, "obscurequery", 100).await;

    assert!(!response.success);
    assert_eq!(response.report.total_tweets, 0);
    assert!(response.message.contains("obscurequery"));
    assert!(!response.ai_answer.is_empty());
}

#[tokio::test]
async fn llm_composer_returns_model_answer() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": "Sentiment is broadly positive." } }
        ]
    });
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let llm = LlmClient::with_base_url(reqwest::Client::new(), "sk-test", "gpt-4o-mini", &server.uri());
    let composer = Composer::Llm(llm);
    let report = AggregateReport { total_tweets: 5, positive_percentage: 80, ..AggregateReport::default() };

    let answer = composer.answer("What is the overall mood?", &report).await;
    assert_eq!(answer, "Sentiment is broadly positive.");
}

#[tokio::test]
async fn llm_failure_falls_back_to_template_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let llm = LlmClient::with_base_url(reqwest::Client::new(), "sk-test", "gpt-4o-mini", &server.uri());
    let composer = Composer::Llm(llm);
    let report = AggregateReport { total_tweets: 5, positive_percentage: 80, negative_percentage: 20, ..AggregateReport::default() };

    let answer = composer.answer("What is the overall mood?", &report).await;
    assert!(!answer.is_empty(), "fallback template must still answer");
    assert_ne!(answer, "Sentiment is broadly positive.");
}
