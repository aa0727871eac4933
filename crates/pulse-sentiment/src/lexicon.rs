//! Fixed word lists backing the keyword sentiment scorer.
//!
//! All entries are lowercase and matched against whole tokens after the
//! tokenizer strips non-alphabetic characters, so contraction negators are
//! listed in their stripped form (`dont`, not `don't`). Plural and adjective
//! variants are listed explicitly; there is no stemming.

pub(crate) const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "love",
    "like",
    "happy",
    "positive",
    "awesome",
    "fantastic",
    "brilliant",
    "outstanding",
    "perfect",
    "best",
    "favorite",
    "enjoy",
    "beautiful",
    "incredible",
    "superb",
    "terrific",
    "marvelous",
    "splendid",
    "magnificent",
    "glorious",
    "blessed",
    "grateful",
    "thankful",
    "delighted",
    "thrilled",
    "excited",
    "enthusiastic",
    "passionate",
    "innovative",
    "breakthrough",
    "revolutionary",
    "impressive",
    "promising",
    "successful",
    "winning",
    "triumph",
    "victory",
    "achievement",
    "progress",
    "growth",
    "opportunity",
    "potential",
    "optimistic",
    "confident",
    "strong",
    "robust",
    "thriving",
    "flourishing",
    "booming",
    "surging",
    "soaring",
];

pub(crate) const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "horrible",
    "hate",
    "dislike",
    "sad",
    "negative",
    "dreadful",
    "atrocious",
    "abysmal",
    "appalling",
    "disgusting",
    "vile",
    "broken",
    "damaged",
    "ruined",
    "destroyed",
    "failed",
    "failure",
    "disaster",
    "catastrophe",
    "crisis",
    "problem",
    "issue",
    "concern",
    "worry",
    "fear",
    "threat",
    "risk",
    "danger",
    "warning",
    "decline",
    "drop",
    "fall",
    "crash",
    "collapse",
    "plunge",
    "slump",
    "recession",
    "downturn",
    "loss",
    "deficit",
    "struggling",
    "suffering",
    "painful",
    "disappointing",
    "frustrating",
    "annoying",
    "irritating",
    "outrage",
    "scandal",
    "controversy",
    "backlash",
    "criticism",
    "complaint",
    "lawsuit",
    "investigation",
    "fraud",
    "scam",
];

pub(crate) const INTENSIFIERS: &[&str] = &[
    "very",
    "extremely",
    "incredibly",
    "absolutely",
    "totally",
    "completely",
    "highly",
    "really",
];

pub(crate) const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nobody", "nothing", "nowhere", "dont", "doesnt", "didnt",
    "wont", "wouldnt", "cant", "couldnt",
];

pub(crate) fn is_positive(token: &str) -> bool {
    POSITIVE_WORDS.contains(&token)
}

pub(crate) fn is_negative(token: &str) -> bool {
    NEGATIVE_WORDS.contains(&token)
}

pub(crate) fn is_intensifier(token: &str) -> bool {
    INTENSIFIERS.contains(&token)
}

pub(crate) fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_disjoint() {
        for word in POSITIVE_WORDS {
            assert!(!NEGATIVE_WORDS.contains(word), "{word} in both lexicons");
            assert!(!INTENSIFIERS.contains(word), "{word} is also an intensifier");
            assert!(!NEGATORS.contains(word), "{word} is also a negator");
        }
        for word in NEGATIVE_WORDS {
            assert!(!INTENSIFIERS.contains(word), "{word} is also an intensifier");
            assert!(!NEGATORS.contains(word), "{word} is also a negator");
        }
    }

    #[test]
    fn entries_are_lowercase_alphabetic() {
        for word in POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS)
            .chain(INTENSIFIERS)
            .chain(NEGATORS)
        {
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "{word} is not lowercase alphabetic"
            );
        }
    }

    #[test]
    fn stripped_contractions_are_negators() {
        assert!(is_negator("dont"));
        assert!(is_negator("cant"));
        assert!(!is_negator("don't"));
    }
}
