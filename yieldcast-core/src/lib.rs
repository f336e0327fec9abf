//! # yieldcast-core: Forecast Adjustment & Accuracy Scoring
//!
//! Backs the accuracy view of the Yieldcast dairy-yield dashboard. A fixed
//! dataset of measured vs. reference-model yields is combined with a
//! caller-chosen set of explanatory factors: each enabled factor pulls a
//! deliberately degraded starting guess toward the reference prediction, and
//! the resulting series is scored with R² and a mean accuracy figure.
//!
//! ## Layout
//!
//! 1. **Data**: [`dataset`], [`registry`], [`sample`], [`selection`]
//! 2. **Engine**: [`blend`], [`scoring`], [`engine`], [`session`]
//! 3. **Surface**: [`config`], [`report`]

// Data
pub mod dataset;
pub mod registry;
pub mod sample;
pub mod selection;

// Engine
pub mod blend;
pub mod engine;
pub mod scoring;
pub mod session;

// Surface
pub mod config;
pub mod error;
pub mod report;

// Re-exports
pub use blend::DerivedRecord;
pub use config::{ForecastConfig, load_config};
pub use dataset::{Dataset, Period, Record, RecordFeatures};
pub use engine::{Evaluation, ForecastEngine};
pub use error::ForecastError;
pub use registry::{FactorRegistry, FactorWeight};
pub use scoring::{AggregateMetrics, FitDiagnostics, RSquared};
pub use selection::FactorSelection;
pub use session::ForecastSession;
