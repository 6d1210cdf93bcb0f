//! Lexicon-based sentiment scoring for macro news text.
//!
//! A rule-based polarity analyzer: word-level polarity lookup with negation
//! flipping and intensifier scaling, averaged over matched terms into a
//! document score in [-1.0, 1.0]. The vocabulary leans toward employment and
//! macro reporting ("beats", "misses", "layoffs", "hiring"), since that is
//! the text this service actually sees.
//!
//! The scorer is total: any input, including empty or missing text, produces
//! a finite score; unanalyzable input maps to 0.0 and is logged as an
//! anomaly, never an error.

use std::collections::HashMap;

/// Word-polarity entries for macro and employment news.
const WORD_SCORES: &[(&str, f64)] = &[
    // Positive
    ("beat", 0.6),
    ("beats", 0.6),
    ("exceed", 0.6),
    ("exceeds", 0.6),
    ("surge", 0.7),
    ("surges", 0.7),
    ("soar", 0.8),
    ("soars", 0.8),
    ("rally", 0.7),
    ("gain", 0.5),
    ("gains", 0.5),
    ("growth", 0.6),
    ("grew", 0.5),
    ("grow", 0.5),
    ("rise", 0.5),
    ("rises", 0.5),
    ("rose", 0.5),
    ("rebound", 0.5),
    ("recovery", 0.5),
    ("strong", 0.5),
    ("stronger", 0.6),
    ("strongly", 0.5),
    ("robust", 0.6),
    ("resilient", 0.5),
    ("record", 0.6),
    ("hiring", 0.4),
    ("expansion", 0.5),
    ("improve", 0.5),
    ("improved", 0.5),
    ("optimistic", 0.6),
    ("upbeat", 0.6),
    ("bullish", 0.8),
    ("positive", 0.5),
    ("boom", 0.7),
    // Negative
    ("miss", -0.6),
    ("misses", -0.6),
    ("missed", -0.6),
    ("fall", -0.5),
    ("falls", -0.5),
    ("fell", -0.5),
    ("drop", -0.6),
    ("drops", -0.6),
    ("plunge", -0.8),
    ("plunges", -0.8),
    ("slump", -0.7),
    ("decline", -0.6),
    ("declines", -0.6),
    ("weak", -0.5),
    ("weaker", -0.6),
    ("weakness", -0.5),
    ("slowdown", -0.5),
    ("slows", -0.4),
    ("layoff", -0.7),
    ("layoffs", -0.7),
    ("cuts", -0.5),
    ("unemployment", -0.4),
    ("jobless", -0.5),
    ("recession", -0.8),
    ("contraction", -0.6),
    ("disappoint", -0.7),
    ("disappoints", -0.7),
    ("disappointing", -0.7),
    ("concern", -0.5),
    ("concerns", -0.5),
    ("fear", -0.6),
    ("fears", -0.6),
    ("worry", -0.5),
    ("worries", -0.5),
    ("bearish", -0.8),
    ("negative", -0.5),
    ("crisis", -0.8),
    ("crash", -0.9),
    ("stagnant", -0.5),
    ("struggling", -0.6),
];

/// Words that flip the sign of the next sentiment-bearing word.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "none", "cannot", "can't", "don't", "doesn't", "didn't",
    "won't", "wouldn't", "shouldn't", "couldn't", "isn't", "aren't", "wasn't", "weren't", "hardly",
    "barely", "scarcely",
];

/// Words that scale the next sentiment-bearing word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("extremely", 2.0),
    ("highly", 1.5),
    ("significantly", 1.5),
    ("substantially", 1.5),
    ("sharply", 1.8),
    ("dramatically", 1.8),
    ("unexpectedly", 1.4),
    ("surprisingly", 1.4),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("marginally", 0.5),
    ("modestly", 0.6),
];

/// Rule-based sentiment scorer with a fixed macro-news lexicon.
pub struct SentimentScorer {
    words: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            words: WORD_SCORES.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    /// Score the polarity of a text field.
    ///
    /// Total function: `None` or empty text returns exactly 0.0 (logged at
    /// warn level as an input anomaly); any other input returns a finite
    /// value in [-1.0, 1.0]. Never returns an error to the caller.
    pub fn score(&self, text: Option<&str>) -> f64 {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            other => {
                tracing::warn!(input = ?other, "Text not analyzable for sentiment, scoring 0.0");
                return 0.0;
            }
        };

        let polarity = self.analyze(text);

        if polarity.is_finite() {
            polarity.clamp(-1.0, 1.0)
        } else {
            tracing::error!(text_len = text.len(), "Sentiment analysis produced a non-finite value");
            0.0
        }
    }

    /// Document-level polarity: mean of matched word scores after negation
    /// and intensifier handling, clamped to [-1.0, 1.0].
    fn analyze(&self, text: &str) -> f64 {
        let mut scores: Vec<f64> = Vec::new();
        let mut negate_next = false;
        let mut intensifier: f64 = 1.0;

        for token in text.split_whitespace() {
            let word: String = token
                .to_lowercase()
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_string();

            if NEGATIONS.contains(&word.as_str()) {
                negate_next = true;
                continue;
            }

            if let Some(mult) = self.intensifiers.get(word.as_str()) {
                intensifier = *mult;
                continue;
            }

            if let Some(base) = self.words.get(word.as_str()) {
                let mut score = *base;
                if negate_next {
                    score = -score;
                    negate_next = false;
                }
                score *= intensifier;
                intensifier = 1.0;
                scores.push(score);
            } else {
                // Modifiers only reach across directly adjacent words
                negate_next = false;
                intensifier = 1.0;
            }
        }

        if scores.is_empty() {
            0.0
        } else {
            (scores.iter().sum::<f64>() / scores.len() as f64).clamp(-1.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_scores_zero() {
        let scorer = SentimentScorer::new();
        assert_eq!(scorer.score(None), 0.0);
    }

    #[test]
    fn test_empty_scores_zero() {
        let scorer = SentimentScorer::new();
        assert_eq!(scorer.score(Some("")), 0.0);
        assert_eq!(scorer.score(Some("   ")), 0.0);
    }

    #[test]
    fn test_positive_text() {
        let scorer = SentimentScorer::new();
        let score = scorer.score(Some("US payrolls beat expectations as hiring surges"));
        assert!(score > 0.0);
    }

    #[test]
    fn test_negative_text() {
        let scorer = SentimentScorer::new();
        let score = scorer.score(Some("Jobs report misses badly, layoffs surge fears grow"));
        assert!(score < 0.0);
    }

    #[test]
    fn test_range_bounded() {
        let scorer = SentimentScorer::new();
        for text in [
            "crash crash crash crisis recession plunge",
            "soar soar boom bullish record surge",
            "extremely sharply dramatically soars",
            "the quick brown fox",
        ] {
            let score = scorer.score(Some(text));
            assert!((-1.0..=1.0).contains(&score), "out of range for {text:?}: {score}");
        }
    }

    #[test]
    fn test_no_lexicon_match_is_neutral() {
        let scorer = SentimentScorer::new();
        assert_eq!(scorer.score(Some("the committee met on tuesday")), 0.0);
    }

    #[test]
    fn test_negation_flips_sign() {
        let scorer = SentimentScorer::new();
        let plain = scorer.score(Some("hiring was strong"));
        let negated = scorer.score(Some("hiring was not strong"));
        assert!(plain > 0.0);
        assert!(negated < plain);
    }

    #[test]
    fn test_intensifier_scales() {
        let scorer = SentimentScorer::new();
        let plain = scorer.score(Some("payrolls fell"));
        let intense = scorer.score(Some("payrolls sharply fell"));
        assert!(intense < plain);
    }

    #[test]
    fn test_deterministic() {
        let scorer = SentimentScorer::new();
        let text = Some("US employment growth beats forecasts");
        assert_eq!(scorer.score(text), scorer.score(text));
    }

    #[test]
    fn test_punctuation_stripped() {
        let scorer = SentimentScorer::new();
        assert!(scorer.score(Some("Payrolls surge!")) > 0.0);
        assert!(scorer.score(Some("\"Recession,\" analysts warn.")) < 0.0);
    }
}
