//! Article retrieval from NewsAPI.
//!
//! The pipeline depends on the [`ArticleSource`] trait; [`NewsApiSource`] is
//! the production implementation, querying the `/v2/everything` endpoint for
//! a relevance-agnostic topic superset over a bounded recency window.
//! Relevance filtering proper happens downstream in the pipeline.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use pulse_common::config::NewsSourceConfig;
use pulse_common::{Error, Result};

use crate::article::{Article, ArticlesResponse};

/// Supplies a batch of recent articles for one aggregation pass.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch articles for the configured topic superset and recency window.
    async fn fetch_recent(&self) -> Result<Vec<Article>>;
}

/// NewsAPI-backed article source.
pub struct NewsApiSource {
    config: NewsSourceConfig,
    client: reqwest::Client,
}

impl NewsApiSource {
    pub fn new(config: NewsSourceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { config, client }
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    async fn fetch_recent(&self) -> Result<Vec<Article>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("news API key not configured".into()))?;

        let from_date = (Utc::now() - Duration::hours(i64::from(self.config.window_hours)))
            .format("%Y-%m-%d")
            .to_string();
        let page_size = self.config.page_size.to_string();

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("q", self.config.query.as_str()),
                ("language", self.config.language.as_str()),
                ("from", from_date.as_str()),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
            ])
            .header("X-Api-Key", api_key)
            .send()
            .await
            .map_err(|e| Error::Source(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Source(format!("HTTP {}: {}", status, body)));
        }

        let payload: ArticlesResponse = response
            .json()
            .await
            .map_err(|e| Error::Source(format!("malformed response: {}", e)))?;

        if payload.status != "ok" {
            return Err(Error::Source(format!(
                "API error: {}",
                payload.message.unwrap_or_else(|| "unknown".into())
            )));
        }

        tracing::debug!(
            fetched = payload.articles.len(),
            total = payload.total_results,
            from = %from_date,
            "Fetched recent articles"
        );

        Ok(payload.articles)
    }
}
