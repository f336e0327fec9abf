//! Sequential blending of a degraded starting guess toward the reference model.
//!
//! Each record starts at half of its measured outcome ("no model in use"). Every
//! enabled factor, in registry order, then moves the running value by its weight
//! times the distance still left to the reference outcome, so the steps of a
//! partial selection compound rather than add. A complete pass lands on the
//! reference outcome.

use crate::dataset::Record;
use crate::registry::{FactorRegistry, WEIGHT_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Fraction of the measured outcome used as the starting guess.
pub const NO_MODEL_FRACTION: f64 = 0.5;

/// Prediction used when no factor is enabled.
pub fn no_model_prediction(measured_outcome: f64) -> f64 {
    measured_outcome * NO_MODEL_FRACTION
}

/// Adjusted prediction for one record under an enabled mask.
///
/// `mask` is indexed like [`FactorRegistry::factors`]; missing trailing
/// entries count as disabled.
pub fn blend_prediction(
    measured_outcome: f64,
    reference_outcome: f64,
    registry: &FactorRegistry,
    mask: &[bool],
) -> f64 {
    let total = registry.total_weight();
    let mut adjusted = no_model_prediction(measured_outcome);
    let mut contribution = 0.0;

    for (factor, enabled) in registry.factors().iter().zip(mask) {
        if !*enabled {
            continue;
        }
        adjusted += (reference_outcome - adjusted) * factor.weight;
        contribution += factor.weight;
    }

    if contribution == 0.0 {
        adjusted = no_model_prediction(measured_outcome);
    } else if total - contribution <= WEIGHT_TOLERANCE {
        // full factor set enabled
        adjusted = reference_outcome;
    }
    adjusted
}

/// A record together with its adjusted prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    #[serde(flatten)]
    pub record: Record,
    pub adjusted_prediction: f64,
    /// `measured - adjusted`.
    pub adjusted_residual: f64,
    /// `adjusted / measured`.
    pub adjusted_accuracy_ratio: f64,
}

impl DerivedRecord {
    pub fn new(record: &Record, adjusted_prediction: f64) -> Self {
        Self {
            record: record.clone(),
            adjusted_prediction,
            adjusted_residual: record.measured_outcome - adjusted_prediction,
            adjusted_accuracy_ratio: adjusted_prediction / record.measured_outcome,
        }
    }
}

/// Blend every record of a series under the same mask.
pub fn blend_series(records: &[Record], registry: &FactorRegistry, mask: &[bool]) -> Vec<DerivedRecord> {
    records
        .iter()
        .map(|r| {
            let adjusted = blend_prediction(r.measured_outcome, r.reference_outcome, registry, mask);
            DerivedRecord::new(r, adjusted)
        })
        .collect()
}

/// Series that uses the reference outcome unchanged as the prediction.
pub fn reference_series(records: &[Record]) -> Vec<DerivedRecord> {
    records
        .iter()
        .map(|r| DerivedRecord::new(r, r.reference_outcome))
        .collect()
}
