use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::revaluation::{PlanWriteError, PortfolioLoadError};
use thiserror::Error;

/// Failures that abort a whole run. Bad data in a single record never ends up
/// here; it falls back to defaults instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("portfolio error: {0}")]
    Portfolio(#[from] PortfolioLoadError),
    #[error("output error: {0}")]
    Output(#[from] PlanWriteError),
}
