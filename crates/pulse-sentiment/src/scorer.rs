//! Keyword sentiment scorer with intensifier and negation handling.

use crate::lexicon;
use crate::types::{SentimentLabel, SentimentScore};

/// Label decision band: the winning accumulator must exceed the other by 20%
/// or the text stays neutral, so near-ties do not flip on noise.
const HYSTERESIS: f32 = 1.2;

/// Intensifier weight applied to the next sentiment-bearing word.
const INTENSIFIER_MULTIPLIER: f32 = 1.5;

/// Score a text string into a sentiment label with a confidence value.
///
/// Walks tokens left to right keeping positive/negative accumulators. A
/// negator flips which accumulator the next sentiment word feeds; an
/// intensifier raises its weight to 1.5. Both modifiers persist only until
/// the next sentiment word, then reset. Tokens matching no lexicon are
/// ignored; empty text scores neutral with confidence 0.5.
///
/// Pure function: identical input always yields identical output.
#[must_use]
pub fn analyze_sentiment(text: &str) -> SentimentScore {
    let mut positive_score = 0.0_f32;
    let mut negative_score = 0.0_f32;
    let mut multiplier = 1.0_f32;
    let mut negated = false;

    for raw in text.split_whitespace() {
        let token: String = raw
            .chars()
            .filter(char::is_ascii_alphabetic)
            .collect::<String>()
            .to_ascii_lowercase();

        if lexicon::is_negator(&token) {
            negated = true;
            continue;
        }
        if lexicon::is_intensifier(&token) {
            multiplier = INTENSIFIER_MULTIPLIER;
            continue;
        }

        let is_positive = lexicon::is_positive(&token);
        let is_negative = lexicon::is_negative(&token);

        if is_positive {
            if negated {
                negative_score += multiplier;
            } else {
                positive_score += multiplier;
            }
        } else if is_negative {
            if negated {
                positive_score += multiplier;
            } else {
                negative_score += multiplier;
            }
        }

        // Modifiers apply only to the next sentiment-bearing word.
        if is_positive || is_negative {
            multiplier = 1.0;
            negated = false;
        }
    }

    let total = positive_score + negative_score;
    let confidence = if total > 0.0 {
        (0.5 + total / 10.0).min(0.95)
    } else {
        0.5
    };

    if positive_score > negative_score * HYSTERESIS {
        SentimentScore {
            label: SentimentLabel::Positive,
            score: positive_score,
            confidence,
        }
    } else if negative_score > positive_score * HYSTERESIS {
        SentimentScore {
            label: SentimentLabel::Negative,
            score: negative_score,
            confidence,
        }
    } else {
        SentimentScore {
            label: SentimentLabel::Neutral,
            score: 0.0,
            confidence: 0.5,
        }
    }
}
