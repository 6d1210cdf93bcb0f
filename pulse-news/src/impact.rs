//! Per-article impact evaluation.
//!
//! Combines title and description sentiment into one weighted impact score,
//! gated by relevance classification. Headline sentiment carries more weight
//! than body sentiment (0.6/0.4 by default, taken from configuration).
//!
//! The evaluator never errors to its caller: anomalies degrade to a 0.0
//! score and are logged. The only observable side effect is a best-effort
//! write of `(impact, title, description)` through the signal sink.

use pulse_common::config::ImpactWeights;

use crate::article::Article;
use crate::relevance::RelevanceClassifier;
use crate::sentiment::SentimentScorer;
use crate::sink::SignalSink;

/// Why an article degraded to a zero score.
///
/// Internal visibility only; the public contract collapses every variant to
/// 0.0 at the evaluator boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anomaly {
    /// Article does not concern the target event/geography
    NotRelevant,
    /// Neither title nor description carries text
    NoUsableText,
}

/// Evaluates one article into a weighted impact score.
pub struct ImpactEvaluator {
    classifier: RelevanceClassifier,
    scorer: SentimentScorer,
    weights: ImpactWeights,
}

impl ImpactEvaluator {
    pub fn new(weights: ImpactWeights) -> Self {
        Self {
            classifier: RelevanceClassifier::new(),
            scorer: SentimentScorer::new(),
            weights,
        }
    }

    /// Compute the impact score for one article and publish it through the
    /// sink.
    ///
    /// Returns a value in [-1.0, 1.0]; 0.0 whenever the article is not
    /// relevant or carries no usable text. Sink failures are logged and do
    /// not change the returned value.
    pub async fn evaluate(&self, article: &Article, sink: &dyn SignalSink) -> f64 {
        let impact = match self.compute(article) {
            Ok(impact) => impact,
            Err(Anomaly::NotRelevant) => return 0.0,
            Err(Anomaly::NoUsableText) => {
                tracing::warn!("Relevant article without title or description, scoring 0.0");
                return 0.0;
            }
        };

        // Best-effort persistence; the score stands regardless.
        if let Err(e) = sink
            .publish_article(impact, article.title_text(), article.description_text())
            .await
        {
            tracing::error!(error = %e, "Failed to write per-article signal");
        }

        impact
    }

    /// Pure scoring path, typed anomalies intact.
    fn compute(&self, article: &Article) -> Result<f64, Anomaly> {
        // Short-circuit: the scorer is not consulted for irrelevant articles.
        if !self.classifier.is_relevant(article) {
            return Err(Anomaly::NotRelevant);
        }

        if article.is_textless() {
            return Err(Anomaly::NoUsableText);
        }

        let title_sentiment = self.scorer.score(article.title.as_deref());
        let desc_sentiment = self.scorer.score(article.description.as_deref());

        Ok(title_sentiment * self.weights.title + desc_sentiment * self.weights.description)
    }
}
