//! Pulse Common - Shared types, utilities, and configuration for the Pulse
//! news signal service.
//!
//! This crate provides:
//! - Configuration types and loading
//! - Error types and handling utilities
//! - Logging setup and structured logging helpers

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;

pub use config::{
    Config, ImpactWeights, NewsSourceConfig, ObservabilityConfig, SchedulerConfig, ServiceConfig,
    SignalConfig, SinkFormat,
};
pub use error::{Error, Result};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ImpactWeights, SinkFormat};
    pub use crate::error::{Error, Result};
    pub use crate::logging::init_logging;
}
