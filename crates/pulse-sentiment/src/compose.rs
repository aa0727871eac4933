//! Turns aggregated numbers into natural-language answers.
//!
//! Two interchangeable strategies: deterministic templates (always available,
//! never touches the network) and delegation to an external LLM with the
//! templates as fallback. The strategy is picked at startup from whether an
//! API key is configured.

use crate::llm::LlmClient;
use crate::types::{AggregateReport, SentimentLabel};

/// Response composition strategy.
pub enum Composer {
    Template,
    Llm(LlmClient),
}

impl Composer {
    /// Answer a chat question about a report.
    ///
    /// The LLM variant falls back to the template answer on any error, so
    /// this never fails and never returns an error string to the user.
    pub async fn answer(&self, message: &str, report: &AggregateReport) -> String {
        match self {
            Composer::Template => compose_chat_reply(message, report),
            Composer::Llm(client) => match client.chat(message, report).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::warn!(error = %e, "LLM call failed, using template fallback");
                    compose_chat_reply(message, report)
                }
            },
        }
    }
}

/// Kinds of question the chat endpoint distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Trends,
    Comparison,
    Causes,
    Impact,
    Recommendations,
    Predictions,
    Sources,
    SentimentDetail,
    Examples,
    Summary,
    General,
}

/// Bucket a free-form question into a response template by keyword.
#[must_use]
pub fn classify_question(message: &str) -> QuestionKind {
    let lowered = message.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| lowered.contains(n));

    if has(&["trend", "over time", "change"]) {
        QuestionKind::Trends
    } else if has(&["compare", "versus", "vs"]) {
        QuestionKind::Comparison
    } else if has(&["why", "cause", "reason"]) {
        QuestionKind::Causes
    } else if has(&["impact", "effect", "affect"]) {
        QuestionKind::Impact
    } else if has(&["recommend", "suggest", "should"]) {
        QuestionKind::Recommendations
    } else if has(&["predict", "future", "expect"]) {
        QuestionKind::Predictions
    } else if has(&["source", "platform", "where"]) {
        QuestionKind::Sources
    } else if has(&["positive", "negative", "neutral"]) {
        QuestionKind::SentimentDetail
    } else if has(&["sample", "example", "show me"]) {
        QuestionKind::Examples
    } else if has(&["summary", "overall", "general"]) {
        QuestionKind::Summary
    } else {
        QuestionKind::General
    }
}

/// Dominant label by percentage, neutral winning ties.
fn dominant_sentiment(report: &AggregateReport) -> SentimentLabel {
    if report.positive_percentage > report.negative_percentage {
        if report.positive_percentage > report.neutral_percentage {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Neutral
        }
    } else if report.negative_percentage > report.neutral_percentage {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

fn top_platforms(report: &AggregateReport, n: usize) -> Vec<String> {
    let mut entries: Vec<(&String, &usize)> = report.platform_breakdown.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries.into_iter().take(n).map(|(p, _)| p.clone()).collect()
}

/// Build the `/analyze` summary for a query from its report.
#[must_use]
pub fn compose_summary(report: &AggregateReport, query: &str) -> String {
    let mut analysis = match dominant_sentiment(report) {
        SentimentLabel::Positive => {
            let mut s = format!(
                "The sentiment around \"{query}\" is predominantly positive ({}%). ",
                report.positive_percentage
            );
            if report.positive_percentage > 70 {
                s.push_str("This indicates strong favorable opinions and enthusiasm in the community. ");
            } else if report.positive_percentage > 50 {
                s.push_str("While generally positive, there's still a mix of perspectives being shared. ");
            }
            s
        }
        SentimentLabel::Negative => {
            let mut s = format!(
                "The sentiment around \"{query}\" leans negative ({}%). ",
                report.negative_percentage
            );
            if report.negative_percentage > 70 {
                s.push_str("There appears to be significant concern or criticism being expressed. ");
            } else if report.negative_percentage > 50 {
                s.push_str("The community shows mixed reactions with notable concerns. ");
            }
            s
        }
        SentimentLabel::Neutral => format!(
            "The sentiment around \"{query}\" is relatively balanced ({}% neutral). \
             This suggests the topic is being discussed factually or opinions are mixed. ",
            report.neutral_percentage
        ),
    };

    let sources = top_platforms(report, 3).join(", ");
    analysis.push_str(&format!(
        "Based on {} items from {sources}. ",
        report.total_tweets
    ));

    if report.positive_percentage > 60 && report.negative_percentage < 20 {
        analysis.push_str("This is a favorable time for engagement with this topic.");
    } else if report.negative_percentage > 60 {
        analysis.push_str("Consider monitoring for potential issues or crises.");
    } else {
        analysis.push_str("The balanced sentiment suggests ongoing debate and diverse viewpoints.");
    }

    analysis
}

/// Answer used when a query matched nothing at all.
#[must_use]
pub fn no_data_answer(query: &str) -> String {
    format!(
        "I couldn't find any recent data about \"{query}\". This might be because:\n\n\
         1. The topic is very niche\n\
         2. The search term needs to be more specific\n\
         3. There's limited recent discussion on this topic\n\n\
         Try searching for a broader or more popular topic."
    )
}

/// Prompt returned by `/chat` when no analysis has been run yet.
#[must_use]
pub fn run_analysis_first_prompt() -> String {
    "I don't have any analysis data to discuss yet. Please run a sentiment \
     analysis first by entering a search query. Then I can help you understand \
     the results!"
        .to_string()
}

/// Template-based chat reply grounded in the report.
#[must_use]
pub fn compose_chat_reply(message: &str, report: &AggregateReport) -> String {
    let kind = classify_question(message);
    let dominant = dominant_sentiment(report);
    let platforms = top_platforms(report, 3);
    let pct = (
        report.positive_percentage,
        report.negative_percentage,
        report.neutral_percentage,
    );

    match kind {
        QuestionKind::Trends => format!(
            "Based on the current analysis of {} items, the sentiment is {dominant} with \
             {}% positive, {}% negative, and {}% neutral. The current snapshot suggests {}. \
             For trend analysis, run this analysis periodically to track how sentiment \
             changes over time.",
            report.total_tweets,
            pct.0,
            pct.1,
            pct.2,
            if pct.0 > 60 {
                "strong positive momentum"
            } else if pct.1 > 60 {
                "concerning negative sentiment that may warrant attention"
            } else {
                "a balanced discussion with mixed perspectives"
            }
        ),
        QuestionKind::Comparison => {
            if platforms.len() > 1 {
                let details: Vec<String> = platforms
                    .iter()
                    .map(|p| format!("{p}: {} items", report.platform_breakdown[p]))
                    .collect();
                format!(
                    "Here's a comparison across platforms: {}. {} is the most active source. \
                     Different platforms often show varying sentiment due to their unique \
                     audiences and content styles.",
                    details.join(", "),
                    platforms[0]
                )
            } else {
                format!(
                    "The data comes primarily from {}. To compare sentiment across platforms, \
                     try a topic discussed in multiple communities.",
                    platforms.first().map_or("various sources", String::as_str)
                )
            }
        }
        QuestionKind::Causes => {
            let mut reply =
                "Based on the analyzed content, here are potential factors driving sentiment: "
                    .to_string();
            if pct.0 > 40 {
                reply.push_str(
                    "positive drivers include content showing enthusiasm, success stories, or \
                     favorable developments. ",
                );
            }
            if pct.1 > 40 {
                reply.push_str(
                    "Negative drivers include content expressing concerns, criticism, or \
                     unfavorable news. ",
                );
            }
            if pct.2 > 40 {
                reply.push_str(
                    "Factual reporting and balanced discussions contribute to neutral sentiment. ",
                );
            }
            reply.push_str("Review the sample items to see the themes behind each category.");
            reply
        }
        QuestionKind::Impact => {
            let assessment = if pct.0 > 60 {
                "favorable public perception, which can support reputation, drive engagement, \
                 and open opportunities for positive narratives"
            } else if pct.1 > 60 {
                "risks to reputation, satisfaction concerns, or emerging issues that need \
                 addressing"
            } else {
                "a topic under active debate, with opportunities to amplify positive narratives \
                 and challenges in managing diverse perspectives"
            };
            format!(
                "The current sentiment distribution ({}% positive, {}% negative, {}% neutral) \
                 across {} items suggests {assessment}. Monitor sentiment shifts to stay ahead \
                 of potential reputation risks or capitalize on positive momentum.",
                pct.0, pct.1, pct.2, report.total_tweets
            )
        }
        QuestionKind::Recommendations => {
            if pct.0 > 60 {
                format!(
                    "With {}% positive sentiment: amplify the positivity, engage with supporters, \
                     document what's driving it, and keep monitoring for shifts. This is a \
                     favorable time for engagement.",
                    pct.0
                )
            } else if pct.1 > 60 {
                format!(
                    "With {}% negative sentiment: investigate root causes, prepare responses to \
                     common criticisms, monitor closely, and engage thoughtfully with legitimate \
                     concerns. Proactive communication can help turn sentiment around.",
                    pct.1
                )
            } else {
                format!(
                    "With balanced sentiment ({}% positive, {}% negative, {}% neutral): amplify \
                     content that resonates, address concerns before they grow, and keep \
                     monitoring for emerging trends.",
                    pct.0, pct.1, pct.2
                )
            }
        }
        QuestionKind::Predictions => format!(
            "Predicting future sentiment is inherently uncertain, but the current data \
             ({} items) shows {dominant} sentiment dominant at {}%. {} Run this analysis \
             regularly to track actual trends rather than relying on predictions.",
            report.total_tweets,
            pct.0.max(pct.1).max(pct.2),
            if pct.0 > 60 {
                "Positive momentum often persists if the underlying factors remain favorable."
            } else if pct.1 > 60 {
                "Negative sentiment may intensify or subside depending on how concerns are \
                 addressed."
            } else {
                "Mixed sentiment can shift either direction based on news, events, or community \
                 discussions."
            }
        ),
        QuestionKind::Sources => {
            let list: Vec<String> = report
                .platform_breakdown
                .iter()
                .map(|(p, c)| format!("{p}: {c} items"))
                .collect();
            format!(
                "Sources in this analysis: {}. Total: {} items. Each platform has its own \
                 audience and content style, contributing different perspectives.",
                list.join(", "),
                report.total_tweets
            )
        }
        QuestionKind::SentimentDetail => format!(
            "Detailed breakdown: positive {}% ({} items), negative {}% ({} items), neutral \
             {}% ({} items). The analysis uses keyword-based sentiment detection with \
             intensity modifiers and negation handling.",
            pct.0,
            report.total_tweets * pct.0 as usize / 100,
            pct.1,
            report.total_tweets * pct.1 as usize / 100,
            pct.2,
            report.total_tweets * pct.2 as usize / 100,
        ),
        QuestionKind::Examples => {
            let examples: Vec<String> = report
                .sample_tweets
                .iter()
                .take(3)
                .map(|item| {
                    let snippet: String = item.text.chars().take(150).collect();
                    format!("[{}] from {}: \"{snippet}\"", item.sentiment, item.source)
                })
                .collect();
            if examples.is_empty() {
                "No sample items are available for this analysis. Try running a new search to \
                 get fresh data."
                    .to_string()
            } else {
                format!(
                    "Here are some example items from the analysis:\n{}",
                    examples.join("\n")
                )
            }
        }
        QuestionKind::Summary | QuestionKind::General => format!(
            "Sentiment analysis summary: based on {} items from {} sources — positive {}%, \
             negative {}%, neutral {}%. Key insight: {} Top sources: {}. Ask me about trends, \
             platform comparisons, causes, recommendations, or specific examples.",
            report.total_tweets,
            report.platform_breakdown.len(),
            pct.0,
            pct.1,
            pct.2,
            match dominant {
                SentimentLabel::Positive =>
                    "strong positive sentiment indicates favorable public perception.",
                SentimentLabel::Negative =>
                    "notable negative sentiment suggests concerns that may need attention.",
                SentimentLabel::Neutral =>
                    "balanced sentiment reflects diverse viewpoints and active discussion.",
            },
            platforms.join(", "),
        ),
    }
}
