//! Signal sinks: durable publication of impact scores for downstream
//! consumers.
//!
//! The pipeline depends only on the [`SignalSink`] trait. Two file-backed
//! implementations exist, matching the two shapes a downstream automation
//! system can read:
//!
//! - [`JsonFileSink`] writes a structured record
//!   `{"value": .., "timestamp": .., "key": ..}`.
//! - [`DelimitedFileSink`] writes plain text
//!   `<impact>|<title>|<description>`.
//!
//! Both overwrite the target file on every publish; last successful write
//! wins. Publication is best-effort from the pipeline's point of view: a
//! failed write is logged by the caller and never changes a computed score.

use async_trait::async_trait;
use chrono::Utc;
use pulse_common::config::{SignalConfig, SinkFormat};
use pulse_common::{Error, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Structured signal record consumed by the downstream system.
#[derive(Debug, Serialize)]
struct SignalRecord<'a> {
    value: f64,
    timestamp: String,
    key: &'a str,
}

/// Destination for per-article impact scores and the batch aggregate.
#[async_trait]
pub trait SignalSink: Send + Sync {
    /// Publish one article's impact score together with its text fields.
    async fn publish_article(&self, impact: f64, title: &str, description: &str) -> Result<()>;

    /// Publish the aggregate signal for a completed batch.
    async fn publish_aggregate(&self, value: f64) -> Result<()>;
}

/// Build the sink selected by configuration.
pub fn sink_from_config(config: &SignalConfig) -> Box<dyn SignalSink> {
    match config.sink_format {
        SinkFormat::Json => Box::new(JsonFileSink::new(config.path.clone(), config.key.clone())),
        SinkFormat::Delimited => Box::new(DelimitedFileSink::new(config.path.clone())),
    }
}

// ============================================================================
// JSON file sink
// ============================================================================

/// Writes the structured record form, overwriting prior content.
pub struct JsonFileSink {
    path: PathBuf,
    key: String,
}

impl JsonFileSink {
    pub fn new(path: PathBuf, key: String) -> Self {
        Self { path, key }
    }

    async fn write_value(&self, value: f64) -> Result<()> {
        let record = SignalRecord {
            value,
            timestamp: Utc::now().to_rfc3339(),
            key: &self.key,
        };
        let payload = serde_json::to_string(&record)?;

        tokio::fs::write(&self.path, payload)
            .await
            .map_err(|e| Error::Sink(format!("writing {}: {}", self.path.display(), e)))?;

        tracing::info!(value, path = %self.path.display(), "Signal saved");
        Ok(())
    }
}

#[async_trait]
impl SignalSink for JsonFileSink {
    async fn publish_article(&self, impact: f64, _title: &str, _description: &str) -> Result<()> {
        // The structured form carries only the scalar; titles belong to the
        // delimited form.
        self.write_value(impact).await
    }

    async fn publish_aggregate(&self, value: f64) -> Result<()> {
        self.write_value(value).await
    }
}

// ============================================================================
// Delimited file sink
// ============================================================================

/// Writes `<impact>|<title>|<description>` as plain text, overwriting prior
/// content.
pub struct DelimitedFileSink {
    path: PathBuf,
}

impl DelimitedFileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn write_line(&self, line: String) -> Result<()> {
        tokio::fs::write(&self.path, line)
            .await
            .map_err(|e| Error::Sink(format!("writing {}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl SignalSink for DelimitedFileSink {
    async fn publish_article(&self, impact: f64, title: &str, description: &str) -> Result<()> {
        self.write_line(format!("{}|{}|{}", impact, title, description))
            .await?;
        tracing::info!(impact, path = %self.path.display(), "NFP signal written to file");
        Ok(())
    }

    async fn publish_aggregate(&self, value: f64) -> Result<()> {
        // Aggregate publishes carry no article text.
        self.write_line(format!("{}||", value)).await?;
        tracing::info!(value, path = %self.path.display(), "Aggregate signal written to file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_json_sink_writes_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signal.txt");
        let sink = JsonFileSink::new(path.clone(), "news_signal".into());

        sink.publish_aggregate(-0.45).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["value"], -0.45);
        assert_eq!(parsed["key"], "news_signal");
        assert!(parsed["timestamp"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_json_sink_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signal.txt");
        let sink = JsonFileSink::new(path.clone(), "news_signal".into());

        sink.publish_aggregate(0.2).await.unwrap();
        sink.publish_aggregate(0.9).await.unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["value"], 0.9);
    }

    #[tokio::test]
    async fn test_delimited_sink_article_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signal.txt");
        let sink = DelimitedFileSink::new(path.clone());

        sink.publish_article(0.36, "US NFP beats", "Jobs grew strongly")
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "0.36|US NFP beats|Jobs grew strongly");
    }

    #[tokio::test]
    async fn test_delimited_sink_aggregate_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signal.txt");
        let sink = DelimitedFileSink::new(path.clone());

        sink.publish_aggregate(0.0).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0||");
    }

    #[tokio::test]
    async fn test_sink_error_on_bad_path() {
        let sink = DelimitedFileSink::new(PathBuf::from("/nonexistent-dir/sub/signal.txt"));
        let err = sink.publish_aggregate(0.1).await.unwrap_err();
        assert!(matches!(err, Error::Sink(_)));
    }

    #[test]
    fn test_sink_from_config_selects_format() {
        let mut config = SignalConfig::default();
        config.path = PathBuf::from("/tmp/pulse-test-signal.txt");
        config.sink_format = SinkFormat::Json;
        let _json = sink_from_config(&config);
        config.sink_format = SinkFormat::Delimited;
        let _delimited = sink_from_config(&config);
    }
}
