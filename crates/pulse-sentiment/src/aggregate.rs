//! Merges scored items into percentage breakdowns and a bucketed trend line.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use pulse_core::BucketStrategy;

use crate::types::{AggregateReport, ContentItem, LabelCounts, SentimentLabel, Timeline};

/// How many of the most recent non-empty buckets feed the timeline.
const HOURLY_BUCKET_WINDOW: usize = 4;
const DAILY_BUCKET_WINDOW: usize = 5;

/// Aggregate scored items into a report.
///
/// Sorts descending by recency, truncates to `limit`, then computes rounded
/// label percentages, per-platform counts, per-platform label tallies, and
/// the time-bucketed trend. Empty input yields an all-zero report with an
/// empty timeline.
#[must_use]
pub fn aggregate(items: Vec<ContentItem>, limit: usize, bucketing: BucketStrategy) -> AggregateReport {
    aggregate_at(items, limit, bucketing, Utc::now())
}

/// Same as [`aggregate`] with an explicit "now" so bucketing is testable.
#[must_use]
pub fn aggregate_at(
    mut items: Vec<ContentItem>,
    limit: usize,
    bucketing: BucketStrategy,
    now: DateTime<Utc>,
) -> AggregateReport {
    if items.is_empty() {
        return AggregateReport::default();
    }

    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items.truncate(limit);

    let total = items.len();
    let positive = count_label(&items, SentimentLabel::Positive);
    let negative = count_label(&items, SentimentLabel::Negative);
    let neutral = count_label(&items, SentimentLabel::Neutral);

    let mut platform_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    let mut source_sentiment_counts: BTreeMap<String, LabelCounts> = BTreeMap::new();
    for item in &items {
        *platform_breakdown.entry(item.platform.clone()).or_default() += 1;
        let counts = source_sentiment_counts
            .entry(item.platform.clone())
            .or_default();
        match item.sentiment {
            SentimentLabel::Positive => counts.positive += 1,
            SentimentLabel::Negative => counts.negative += 1,
            SentimentLabel::Neutral => counts.neutral += 1,
        }
    }

    let timeline = build_timeline(&items, bucketing, now);

    AggregateReport {
        total_tweets: total,
        positive_percentage: percentage(positive, total),
        negative_percentage: percentage(negative, total),
        neutral_percentage: percentage(neutral, total),
        timeline,
        sample_tweets: items,
        platform_breakdown,
        source_sentiment_counts,
    }
}

fn count_label(items: &[ContentItem], label: SentimentLabel) -> usize {
    items.iter().filter(|i| i.sentiment == label).count()
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

/// Group items by elapsed time from `now` and report per-label percentages
/// for the most recent non-empty buckets, oldest last.
fn build_timeline(items: &[ContentItem], bucketing: BucketStrategy, now: DateTime<Utc>) -> Timeline {
    let mut buckets: BTreeMap<i64, Vec<&ContentItem>> = BTreeMap::new();
    for item in items {
        let elapsed = now.signed_duration_since(item.created_at);
        let index = match bucketing {
            BucketStrategy::Hourly => elapsed.num_hours(),
            BucketStrategy::Daily => elapsed.num_days(),
        }
        .max(0);
        buckets.entry(index).or_default().push(item);
    }

    let window = match bucketing {
        BucketStrategy::Hourly => HOURLY_BUCKET_WINDOW,
        BucketStrategy::Daily => DAILY_BUCKET_WINDOW,
    };

    let mut timeline = Timeline::default();
    for (&index, bucket) in buckets.iter().take(window) {
        timeline.time.push(bucket_label(index, bucketing));
        let size = bucket.len();
        let pos = bucket
            .iter()
            .filter(|i| i.sentiment == SentimentLabel::Positive)
            .count();
        let neg = bucket
            .iter()
            .filter(|i| i.sentiment == SentimentLabel::Negative)
            .count();
        let neu = bucket
            .iter()
            .filter(|i| i.sentiment == SentimentLabel::Neutral)
            .count();
        timeline.positive.push(percentage(pos, size));
        timeline.negative.push(percentage(neg, size));
        timeline.neutral.push(percentage(neu, size));
    }

    timeline
}

fn bucket_label(index: i64, bucketing: BucketStrategy) -> String {
    match bucketing {
        BucketStrategy::Hourly => match index {
            0 => "now".to_string(),
            h => format!("{h}h ago"),
        },
        BucketStrategy::Daily => match index {
            0 => "Today".to_string(),
            1 => "Yesterday".to_string(),
            d => format!("{d}d ago"),
        },
    }
}
