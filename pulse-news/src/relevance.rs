//! Relevance classification for non-farm payroll news.
//!
//! An article is relevant when its combined text mentions both a U.S.
//! geography indicator and a non-farm payroll / employment-report topic
//! indicator. Matching is plain substring containment against the lowercased
//! concatenation of title, description, and content.

use crate::article::Article;

/// Substrings indicating United States origin.
///
/// Note the trailing space in `"us "`: this is a deliberate substring check,
/// not a word-boundary check, so tokens that merely contain "us" followed by
/// a space ("bonus ", "focus ") match too. Accepted edge case.
const US_INDICATORS: &[&str] = &["united states", "u.s.", "us ", "usa", "america"];

/// Substrings indicating the target employment-report event.
const NFP_KEYWORDS: &[&str] = &[
    "non-farm payroll",
    "nonfarm payroll",
    "non farm payroll",
    "nfp",
    "us employment",
    "u.s. employment",
    "us jobs report",
    "u.s. jobs report",
    "us labor market",
    "u.s. labor market",
];

/// Classifies articles against the target geography and topic.
///
/// Stateless; every call recomputes from the input text alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceClassifier;

impl RelevanceClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Build the lowercased haystack: title, description, and content joined
    /// with single spaces, missing fields treated as empty strings.
    fn search_text(article: &Article) -> String {
        format!(
            "{} {} {}",
            article.title_text(),
            article.description_text(),
            article.content_text()
        )
        .to_lowercase()
    }

    /// True iff the article mentions at least one U.S. indicator and at least
    /// one employment-report keyword.
    pub fn is_relevant(&self, article: &Article) -> bool {
        let text = Self::search_text(article);

        let is_us_related = US_INDICATORS.iter().any(|ind| text.contains(ind));
        let is_nfp_related = NFP_KEYWORDS.iter().any(|kw| text.contains(kw));

        tracing::trace!(is_us_related, is_nfp_related, "Relevance check");

        is_us_related && is_nfp_related
    }
}
