//! Factor weight table.
//!
//! Factors are named explanatory inputs whose presence in a selection gates one
//! blending step each. The table is ordered: blending walks it front to back.
//! Reference weights: fat=0.20, protein=0.20, cell-count=0.10, herd-size=0.30,
//! seasonality=0.20.

use crate::error::ForecastError;
use crate::selection::FactorSelection;
use serde::{Deserialize, Serialize};

pub const FACTOR_FAT: &str = "fat";
pub const FACTOR_PROTEIN: &str = "protein";
pub const FACTOR_CELL_COUNT: &str = "cell-count";
pub const FACTOR_HERD_SIZE: &str = "herd-size";
pub const FACTOR_SEASONALITY: &str = "seasonality";

pub const WEIGHT_FAT: f64 = 0.20;
pub const WEIGHT_PROTEIN: f64 = 0.20;
pub const WEIGHT_CELL_COUNT: f64 = 0.10;
pub const WEIGHT_HERD_SIZE: f64 = 0.30;
pub const WEIGHT_SEASONALITY: f64 = 0.20;

/// Maximum distance of the weight sum from 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Largest sum tolerance a caller may configure.
pub const MAX_WEIGHT_TOLERANCE: f64 = 1e-6;

/// The reference table in iteration order.
pub const REFERENCE_WEIGHTS: [(&str, f64); 5] = [
    (FACTOR_FAT, WEIGHT_FAT),
    (FACTOR_PROTEIN, WEIGHT_PROTEIN),
    (FACTOR_CELL_COUNT, WEIGHT_CELL_COUNT),
    (FACTOR_HERD_SIZE, WEIGHT_HERD_SIZE),
    (FACTOR_SEASONALITY, WEIGHT_SEASONALITY),
];

/// A single named factor and its weight in (0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorWeight {
    pub name: String,
    pub weight: f64,
}

impl FactorWeight {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Validated, ordered factor weight table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorRegistry {
    factors: Vec<FactorWeight>,
    total_weight: f64,
}

impl FactorRegistry {
    /// Build a registry using the default sum tolerance.
    pub fn new(factors: Vec<FactorWeight>) -> Result<Self, ForecastError> {
        Self::with_tolerance(factors, WEIGHT_TOLERANCE)
    }

    /// Build a registry, requiring `|Σw - 1| <= tolerance`.
    ///
    /// `tolerance` must lie in `[0, MAX_WEIGHT_TOLERANCE]`.
    pub fn with_tolerance(factors: Vec<FactorWeight>, tolerance: f64) -> Result<Self, ForecastError> {
        if !(0.0..=MAX_WEIGHT_TOLERANCE).contains(&tolerance) {
            return Err(ForecastError::factor_weights(format!(
                "sum tolerance {tolerance} outside [0, {MAX_WEIGHT_TOLERANCE}]"
            )));
        }
        if factors.is_empty() {
            return Err(ForecastError::factor_weights("factor table is empty"));
        }
        for (i, factor) in factors.iter().enumerate() {
            if factor.name.trim().is_empty() {
                return Err(ForecastError::factor_weights(format!(
                    "factor {i} has an empty name"
                )));
            }
            if !(factor.weight > 0.0 && factor.weight <= 1.0) {
                return Err(ForecastError::factor_weights(format!(
                    "factor '{}' has weight {} outside (0, 1]",
                    factor.name, factor.weight
                )));
            }
            if factors[..i].iter().any(|f| f.name == factor.name) {
                return Err(ForecastError::factor_weights(format!(
                    "factor '{}' is listed twice",
                    factor.name
                )));
            }
        }

        let total_weight: f64 = factors.iter().map(|f| f.weight).sum();
        if (total_weight - 1.0).abs() > tolerance {
            tracing::warn!(total_weight, "Rejected factor table");
            return Err(ForecastError::factor_weights(format!(
                "weights sum to {total_weight}, expected 1.0"
            )));
        }

        Ok(Self {
            factors,
            total_weight,
        })
    }

    /// The dashboard's five-factor table.
    pub fn reference() -> Self {
        let factors: Vec<FactorWeight> = REFERENCE_WEIGHTS
            .iter()
            .map(|(name, weight)| FactorWeight::new(*name, *weight))
            .collect();
        let total_weight = factors.iter().map(|f| f.weight).sum();
        Self {
            factors,
            total_weight,
        }
    }

    pub fn factors(&self) -> &[FactorWeight] {
        &self.factors
    }

    /// `(name, weight)` pairs in iteration order.
    pub fn factor_weights(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.factors.iter().map(|f| (f.name.as_str(), f.weight))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.factors.iter().map(|f| f.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.factors
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.weight)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Resolve a selection into a per-factor enabled mask in iteration order.
    ///
    /// Every name in the selection must exist in the table. Factors the
    /// selection does not mention are disabled.
    pub fn enabled_mask(&self, selection: &FactorSelection) -> Result<Vec<bool>, ForecastError> {
        let unknown: Vec<&str> = selection
            .names()
            .filter(|name| !self.contains(name))
            .collect();
        if !unknown.is_empty() {
            return Err(ForecastError::unknown_factor(unknown.join(", ")));
        }
        Ok(self
            .factors
            .iter()
            .map(|f| selection.is_enabled(&f.name))
            .collect())
    }

    /// Sum of the weights switched on in `mask`.
    pub fn enabled_weight(&self, mask: &[bool]) -> f64 {
        self.factors
            .iter()
            .zip(mask)
            .filter(|(_, on)| **on)
            .map(|(f, _)| f.weight)
            .sum()
    }
}

impl Default for FactorRegistry {
    fn default() -> Self {
        Self::reference()
    }
}
