//! Topic sentiment analysis pipeline.
//!
//! Fans out a topic query to several free public APIs (Reddit, Hacker News,
//! NewsAPI, Google News RSS, GitHub), scores each snippet with a keyword
//! lexicon (intensifiers and negation included), aggregates percentages and
//! time-bucketed trends, and composes natural-language answers about the
//! numbers, optionally via an external LLM with a local template fallback.

pub mod aggregate;
pub mod compose;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod scorer;
pub mod sources;
pub mod types;

mod lexicon;

pub use aggregate::aggregate;
pub use compose::{compose_chat_reply, compose_summary, run_analysis_first_prompt, Composer};
pub use error::SentimentError;
pub use llm::LlmClient;
pub use pipeline::run_analysis;
pub use scorer::analyze_sentiment;
pub use types::{
    AggregateReport, AnalysisResponse, ContentItem, FetchConfig, SentimentLabel, SentimentScore,
    SourceKind,
};
