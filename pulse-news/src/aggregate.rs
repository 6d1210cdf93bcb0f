//! Batch aggregation: reduce a batch of articles to one signal.
//!
//! Every article is scored by the impact evaluator; the score with the
//! largest absolute magnitude wins (strict comparison, so the first article
//! to reach a given magnitude keeps it on ties). The winning scalar is
//! published through the signal sink and returned.
//!
//! This is the outermost error boundary of the pipeline: retrieval and
//! iteration failures are caught here, logged, and mapped to a 0.0 signal.
//! Nothing below this layer propagates an error to the invocation surface.

use pulse_common::config::ImpactWeights;

use crate::article::Article;
use crate::impact::ImpactEvaluator;
use crate::sink::SignalSink;
use crate::source::ArticleSource;

/// Pick the score with the strictly largest absolute magnitude, starting
/// from 0.0. Strict comparison means the first score to reach a given
/// magnitude keeps it on ties.
pub fn select_extreme(scores: impl IntoIterator<Item = f64>) -> f64 {
    let mut max_impact: f64 = 0.0;
    for impact in scores {
        if impact.abs() > max_impact.abs() {
            max_impact = impact;
        }
    }
    max_impact
}

/// Outcome of one aggregation pass, for the invocation surface.
#[derive(Debug, Clone, Copy)]
pub struct PassReport {
    /// The aggregate signal (always valid, 0.0 on any degradation)
    pub signal: f64,
    /// Number of articles the batch contained
    pub articles: usize,
    /// Whether article retrieval itself succeeded
    pub retrieval_ok: bool,
}

/// Reduces article batches into a single aggregate signal.
pub struct BatchAggregator {
    evaluator: ImpactEvaluator,
    sink: Box<dyn SignalSink>,
}

impl BatchAggregator {
    pub fn new(weights: ImpactWeights, sink: Box<dyn SignalSink>) -> Self {
        Self {
            evaluator: ImpactEvaluator::new(weights),
            sink,
        }
    }

    /// Score a batch and return the impact of maximum absolute magnitude.
    ///
    /// An empty batch yields 0.0, which is still published: "no signal" is an
    /// explicit state for the downstream consumer, not a missing one.
    pub async fn process_batch(&self, articles: &[Article]) -> f64 {
        let mut impacts = Vec::with_capacity(articles.len());
        for article in articles {
            impacts.push(self.evaluator.evaluate(article, self.sink.as_ref()).await);
        }

        let max_impact = select_extreme(impacts);

        tracing::info!(
            max_impact,
            articles = articles.len(),
            "Batch aggregation complete"
        );

        self.publish(max_impact).await;
        max_impact
    }

    /// Retrieve a fresh batch from the source and aggregate it.
    ///
    /// Retrieval failure degrades to a 0.0 aggregate, published like any
    /// other result.
    pub async fn run_once(&self, source: &dyn ArticleSource) -> f64 {
        self.run_pass(source).await.signal
    }

    /// Like [`run_once`](Self::run_once), but reports what happened for the
    /// invocation surface (HTTP status payloads, scheduler backoff). The
    /// signal contract is identical: failures inside the pipeline never
    /// escape, they show up as a 0.0 signal with `retrieval_ok == false`.
    pub async fn run_pass(&self, source: &dyn ArticleSource) -> PassReport {
        match source.fetch_recent().await {
            Ok(articles) => PassReport {
                signal: self.process_batch(&articles).await,
                articles: articles.len(),
                retrieval_ok: true,
            },
            Err(e) => {
                tracing::error!(error = %e, "Article retrieval failed, emitting zero signal");
                self.publish(0.0).await;
                PassReport {
                    signal: 0.0,
                    articles: 0,
                    retrieval_ok: false,
                }
            }
        }
    }

    /// Best-effort aggregate publication.
    async fn publish(&self, value: f64) {
        if let Err(e) = self.sink.publish_aggregate(value).await {
            tracing::error!(error = %e, "Failed to publish aggregate signal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::JsonFileSink;
    use async_trait::async_trait;
    use pulse_common::{Error, Result};
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Sink that records every publish in memory.
    struct RecordingSink {
        aggregates: Mutex<Vec<f64>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                aggregates: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SignalSink for RecordingSink {
        async fn publish_article(&self, _impact: f64, _title: &str, _desc: &str) -> Result<()> {
            Ok(())
        }

        async fn publish_aggregate(&self, value: f64) -> Result<()> {
            self.aggregates.lock().unwrap().push(value);
            Ok(())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ArticleSource for FailingSource {
        async fn fetch_recent(&self) -> Result<Vec<Article>> {
            Err(Error::Source("connection refused".into()))
        }
    }

    struct FixedSource(Vec<Article>);

    #[async_trait]
    impl ArticleSource for FixedSource {
        async fn fetch_recent(&self) -> Result<Vec<Article>> {
            Ok(self.0.clone())
        }
    }

    fn aggregator_with_recorder() -> (BatchAggregator, std::sync::Arc<RecordingSink>) {
        // Box a second handle through Arc so the test can observe publishes.
        let recorder = std::sync::Arc::new(RecordingSink::new());
        let sink: Box<dyn SignalSink> = Box::new(ArcSink(recorder.clone()));
        (
            BatchAggregator::new(ImpactWeights::default(), sink),
            recorder,
        )
    }

    struct ArcSink(std::sync::Arc<RecordingSink>);

    #[async_trait]
    impl SignalSink for ArcSink {
        async fn publish_article(&self, impact: f64, title: &str, desc: &str) -> Result<()> {
            self.0.publish_article(impact, title, desc).await
        }

        async fn publish_aggregate(&self, value: f64) -> Result<()> {
            self.0.publish_aggregate(value).await
        }
    }

    #[test]
    fn test_select_extreme_prefers_magnitude() {
        assert_eq!(select_extreme([0.2, -0.5, 0.3]), -0.5);
    }

    #[test]
    fn test_select_extreme_tie_keeps_first() {
        assert_eq!(select_extreme([0.4, -0.4]), 0.4);
        assert_eq!(select_extreme([-0.4, 0.4]), -0.4);
    }

    #[test]
    fn test_select_extreme_empty_is_zero() {
        assert_eq!(select_extreme(Vec::new()), 0.0);
    }

    #[tokio::test]
    async fn test_empty_batch_is_zero_and_published() {
        let (aggregator, recorder) = aggregator_with_recorder();
        let result = aggregator.process_batch(&[]).await;
        assert_eq!(result, 0.0);
        assert_eq!(*recorder.aggregates.lock().unwrap(), vec![0.0]);
    }

    #[tokio::test]
    async fn test_single_relevant_article_wins() {
        let (aggregator, recorder) = aggregator_with_recorder();
        let batch = vec![
            Article::new("Weather today", "Sunny", ""),
            Article::new(
                "US Non-Farm Payroll misses, layoffs mount",
                "Jobs decline sharply",
                "",
            ),
            Article::new("Football results", "", ""),
        ];
        let result = aggregator.process_batch(&batch).await;
        assert!(result < 0.0);
        assert_eq!(*recorder.aggregates.lock().unwrap(), vec![result]);
    }

    #[tokio::test]
    async fn test_retrieval_failure_degrades_to_zero() {
        let (aggregator, recorder) = aggregator_with_recorder();
        let result = aggregator.run_once(&FailingSource).await;
        assert_eq!(result, 0.0);
        assert_eq!(*recorder.aggregates.lock().unwrap(), vec![0.0]);
    }

    #[tokio::test]
    async fn test_run_once_aggregates_fetched_batch() {
        let (aggregator, _recorder) = aggregator_with_recorder();
        let source = FixedSource(vec![Article::new(
            "US Non-Farm Payroll beats expectations",
            "Jobs grew strongly",
            "",
        )]);
        let result = aggregator.run_once(&source).await;
        assert!(result > 0.0);
    }

    #[tokio::test]
    async fn test_run_pass_reports_retrieval_state() {
        let (aggregator, _recorder) = aggregator_with_recorder();

        let failed = aggregator.run_pass(&FailingSource).await;
        assert!(!failed.retrieval_ok);
        assert_eq!(failed.signal, 0.0);

        let ok = aggregator.run_pass(&FixedSource(vec![Article::default()])).await;
        assert!(ok.retrieval_ok);
        assert_eq!(ok.articles, 1);
        assert_eq!(ok.signal, 0.0);
    }

    #[tokio::test]
    async fn test_sink_failure_still_returns_result() {
        let sink = Box::new(JsonFileSink::new(
            PathBuf::from("/nonexistent-dir/sub/signal.txt"),
            "news_signal".into(),
        ));
        let aggregator = BatchAggregator::new(ImpactWeights::default(), sink);
        let batch = vec![Article::new(
            "US Non-Farm Payroll beats expectations",
            "Jobs grew strongly",
            "",
        )];
        let result = aggregator.process_batch(&batch).await;
        assert!(result > 0.0);
    }
}
