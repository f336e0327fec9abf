//! Error types for the yieldcast-core crate.

use thiserror::Error;

/// Top-level error type for forecast operations.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Factor weight error: {0}")]
    FactorWeights(String),

    #[error("Unknown factor: {0}")]
    UnknownFactor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ForecastError {
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    pub fn factor_weights(msg: impl Into<String>) -> Self {
        Self::FactorWeights(msg.into())
    }

    pub fn unknown_factor(name: impl Into<String>) -> Self {
        Self::UnknownFactor(name.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error happened while building the engine (dataset or weights).
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Dataset(_) | Self::FactorWeights(_))
    }
}

impl From<figment::Error> for ForecastError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}
