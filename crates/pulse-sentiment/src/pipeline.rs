//! Analysis pipeline orchestration: fetch, aggregate, compose.

use pulse_core::BucketStrategy;

use crate::aggregate::aggregate;
use crate::compose::{compose_summary, no_data_answer};
use crate::sources::collect_items;
use crate::types::{AggregateReport, AnalysisResponse, FetchConfig};

/// Run the full analysis pipeline for one query.
///
/// 1. Collect items from all configured sources concurrently (fail-soft:
///    a dead source contributes nothing).
/// 2. Short-circuit with a zeroed `success: false` response when nothing
///    came back; total data absence is an outcome, not an error.
/// 3. Aggregate into percentages, breakdowns, and the bucketed timeline.
/// 4. Compose the summary answer.
pub async fn run_analysis(
    client: &reqwest::Client,
    fetch_config: &FetchConfig,
    bucketing: BucketStrategy,
    query: &str,
    max_items: usize,
) -> AnalysisResponse {
    let items = collect_items(client, fetch_config, query).await;

    if items.is_empty() {
        tracing::info!(query, "no items collected from any source");
        return AnalysisResponse {
            report: AggregateReport::default(),
            success: false,
            message: format!("No data found for \"{query}\". Try a different search term."),
            ai_answer: no_data_answer(query),
        };
    }

    let collected = items.len();
    let report = aggregate(items, max_items, bucketing);
    let ai_answer = compose_summary(&report, query);

    tracing::info!(
        query,
        collected,
        kept = report.total_tweets,
        positive = report.positive_percentage,
        "analysis complete"
    );

    AnalysisResponse {
        message: format!(
            "Analysis complete: {} items from {} sources",
            report.total_tweets,
            report.platform_breakdown.len()
        ),
        ai_answer,
        report,
        success: true,
    }
}
