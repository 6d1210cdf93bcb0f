//! Error types for the Pulse news signal service.

use thiserror::Error;

/// Result type alias using the Pulse error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Pulse services.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (the only kind that is fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Article source error (retrieval failed or returned an error status)
    #[error("Article source error: {0}")]
    Source(String),

    /// Sentiment analysis error
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Signal sink error (signal could not be written or published)
    #[error("Signal sink error: {0}")]
    Sink(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an error with additional context.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this is a configuration error.
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Get HTTP status code for this error.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Config(_) => 503,
            Self::Source(_) => 502,
            Self::WithContext { source, .. } => source.status_code(),
            _ => 500,
        }
    }
}

/// Extension trait for adding context to any error type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
