use thiserror::Error;

use spendgrid_config::ConfigError;
use spendgrid_core::ChartError;

/// Failures surfaced by the CLI and the settings bridge.
#[derive(Debug, Error)]
pub enum SpendGridError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SpendGridError>;
