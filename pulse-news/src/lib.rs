//! Pulse News Library
//!
//! News-driven signal service: ingests recent macro news, classifies each
//! article for relevance to the U.S. non-farm payroll report, scores
//! sentiment polarity, and reduces the batch to a single aggregate impact
//! signal for downstream consumption.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                    pulse-news (Rust Service)                   │
//! │                           :4450                                │
//! ├────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐  ┌───────────────────────┐  ┌─────────────┐  │
//! │  │  Article     │  │  Pipeline             │  │  Signal     │  │
//! │  │  Source      │─▶│  relevance ▶ polarity │─▶│  Sink       │  │
//! │  │  (NewsAPI)   │  │  ▶ impact ▶ aggregate │  │  (file bus) │  │
//! │  └──────────────┘  └───────────────────────┘  └─────────────┘  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Concepts
//!
//! ## Relevance gate
//! An article counts only when it mentions both a U.S. geography indicator
//! and a non-farm payroll topic indicator (substring match).
//!
//! ## Impact score
//! Weighted blend of title and description polarity (0.6/0.4 by default);
//! headlines are more predictive than ledes.
//!
//! ## Aggregate signal
//! The per-batch impact with the largest absolute magnitude, ties resolved
//! in favor of the first article seen. Published even when it is 0.0: "no
//! signal" is an explicit state.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod aggregate;
pub mod article;
pub mod impact;
pub mod relevance;
pub mod routes;
pub mod scheduler;
pub mod sentiment;
pub mod sink;
pub mod source;

use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use pulse_common::config::Config;

use crate::aggregate::BatchAggregator;
use crate::scheduler::NewsPoller;
use crate::sink::sink_from_config;
use crate::source::{ArticleSource, NewsApiSource};

/// News service state
pub struct NewsState {
    /// Configuration
    pub config: Config,
    /// Article source
    pub source: Arc<dyn ArticleSource>,
    /// Batch aggregator (the pipeline entry point)
    pub aggregator: Arc<BatchAggregator>,
    /// Polling scheduler
    pub poller: Arc<NewsPoller>,
}

impl NewsState {
    /// Create a new news service state
    pub fn new(config: Config) -> Self {
        let source: Arc<dyn ArticleSource> = Arc::new(NewsApiSource::new(config.news.clone()));
        let sink = sink_from_config(&config.signal);
        let aggregator = Arc::new(BatchAggregator::new(config.weights, sink));
        let poller = Arc::new(NewsPoller::new(config.scheduler.clone()));

        Self {
            config,
            source,
            aggregator,
            poller,
        }
    }
}

/// Main news signal service
pub struct NewsService {
    state: Arc<NewsState>,
}

impl NewsService {
    /// Create a new news service
    pub fn new(config: Config) -> Self {
        let state = Arc::new(NewsState::new(config));
        Self { state }
    }

    /// Start the news service
    pub async fn start(self) -> Result<()> {
        let host = self.state.config.service.host.clone();
        let port = self.state.config.service.port;

        // Build HTTP routes; the dashboard consumer calls from any origin
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .route("/health", get(routes::health))
            .route("/api/v1/news/latest", get(routes::process_latest))
            .route("/api/v1/status", get(routes::get_status))
            .layer(cors)
            .with_state(self.state.clone());

        // Start the polling loop
        let poll_state = self.state.clone();
        tokio::spawn(async move {
            poll_state
                .poller
                .run(poll_state.aggregator.clone(), poll_state.source.clone())
                .await;
        });

        // Start HTTP server
        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        tracing::info!(address = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
