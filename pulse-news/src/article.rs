//! Article data model and NewsAPI response envelope.

use serde::{Deserialize, Serialize};

/// One ingested news item.
///
/// Every text field is optional; NewsAPI regularly returns articles with a
/// null description or truncated content. An article with all three fields
/// absent is a valid (degenerate) input to the pipeline, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    /// Headline
    #[serde(default)]
    pub title: Option<String>,

    /// Short summary / lede
    #[serde(default)]
    pub description: Option<String>,

    /// Body text (often truncated by the source)
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    /// Create an article from plain text parts. Empty strings become `None`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        fn opt(s: String) -> Option<String> {
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        }
        Self {
            title: opt(title.into()),
            description: opt(description.into()),
            content: opt(content.into()),
        }
    }

    /// Title as a plain `&str`, missing field treated as empty.
    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Description as a plain `&str`, missing field treated as empty.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Content as a plain `&str`, missing field treated as empty.
    pub fn content_text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// True when the article carries no usable headline or summary text.
    pub fn is_textless(&self) -> bool {
        self.title_text().is_empty() && self.description_text().is_empty()
    }
}

/// NewsAPI `/v2/everything` response envelope.
#[derive(Debug, Deserialize)]
pub struct ArticlesResponse {
    /// "ok" or "error"
    pub status: String,
    /// Total matches reported by the API (may exceed the returned page)
    #[serde(default, rename = "totalResults")]
    pub total_results: u64,
    /// Returned articles
    #[serde(default)]
    pub articles: Vec<Article>,
    /// Error message, populated when status != "ok"
    #[serde(default)]
    pub message: Option<String>,
}
