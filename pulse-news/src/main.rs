//! Pulse News - News-driven NFP signal service for the Pulse ecosystem.
//!
//! Classifies recent macro news for relevance to the U.S. non-farm payroll
//! report, scores sentiment, and publishes a single aggregate impact signal.

use anyhow::Result;
use pulse_common::config::Config;
use pulse_common::logging::init_logging;
use pulse_news::NewsService;

#[tokio::main]
async fn main() -> Result<()> {
    // Start timing immediately for cold-start measurement
    let startup_start = std::time::Instant::now();

    // Load configuration; a missing news API key aborts startup here
    let config = Config::load()?;

    // Initialize logging
    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    tracing::info!("Pulse News v{}", env!("CARGO_PKG_VERSION"));

    // Start the news signal service
    let service = NewsService::new(config);

    let startup_duration = startup_start.elapsed();
    tracing::info!(
        duration_ms = startup_duration.as_millis() as u64,
        "Service initialized in {:?}",
        startup_duration
    );

    service.start().await
}
