//! Goodness-of-fit statistics over a derived series.

use crate::blend::DerivedRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accuracy figure shown when every factor is enabled.
pub const DEFAULT_FULL_ACCURACY_PERCENT: f64 = 94.0;

/// Coefficient of determination, or the explicit absence of one.
///
/// `Undefined` is produced when the measured outcomes have no variance; it is
/// never encoded as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RSquared {
    Defined(f64),
    Undefined,
}

impl RSquared {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(*v),
            Self::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// Fixed-decimal rendering, or `None` when undefined.
    pub fn format_fixed(&self, decimals: usize) -> Option<String> {
        self.value().map(|v| format!("{v:.decimals$}"))
    }
}

impl fmt::Display for RSquared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(v) => write!(f, "{:.*}", f.precision().unwrap_or(3), v),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

/// `1 - SSE/SST` over paired actual and predicted values.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> RSquared {
    if actual.is_empty() || actual.len() != predicted.len() {
        return RSquared::Undefined;
    }
    // Identical values have SST == 0 even when the rounded mean differs from them.
    if actual.iter().all(|a| *a == actual[0]) {
        return RSquared::Undefined;
    }
    let n = actual.len() as f64;
    let mean = actual.iter().sum::<f64>() / n;
    let sst: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if sst == 0.0 {
        return RSquared::Undefined;
    }
    let sse: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    let r2 = 1.0 - sse / sst;
    if r2.is_finite() {
        RSquared::Defined(r2)
    } else {
        RSquared::Undefined
    }
}

/// Heuristic mean accuracy for a selection.
///
/// The full selection reports `full_accuracy_percent` verbatim; anything less
/// reports it scaled by the enabled share of the total weight, rounded to a
/// whole percent. This is a display figure, not derived from the series.
pub fn mean_accuracy_percent(
    enabled_weight: f64,
    total_weight: f64,
    all_enabled: bool,
    full_accuracy_percent: f64,
) -> f64 {
    if all_enabled {
        return full_accuracy_percent;
    }
    if total_weight <= 0.0 {
        return 0.0;
    }
    (enabled_weight / total_weight * full_accuracy_percent).round()
}

/// The two headline figures of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub r_squared: RSquared,
    pub mean_accuracy_percent: f64,
}

/// Error statistics computed from the series itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitDiagnostics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    /// `100 * mean(adjusted / measured)`.
    pub empirical_accuracy_percent: f64,
}

impl FitDiagnostics {
    pub fn from_series(series: &[DerivedRecord]) -> Self {
        if series.is_empty() {
            return Self {
                mse: 0.0,
                rmse: 0.0,
                mae: 0.0,
                empirical_accuracy_percent: 0.0,
            };
        }
        let n = series.len() as f64;
        let mse = series.iter().map(|d| d.adjusted_residual.powi(2)).sum::<f64>() / n;
        let mae = series.iter().map(|d| d.adjusted_residual.abs()).sum::<f64>() / n;
        let ratio = series.iter().map(|d| d.adjusted_accuracy_ratio).sum::<f64>() / n;
        Self {
            mse,
            rmse: mse.sqrt(),
            mae,
            empirical_accuracy_percent: ratio * 100.0,
        }
    }
}

/// R² of a derived series against its measured outcomes.
pub fn series_r_squared(series: &[DerivedRecord]) -> RSquared {
    let actual: Vec<f64> = series.iter().map(|d| d.record.measured_outcome).collect();
    let predicted: Vec<f64> = series.iter().map(|d| d.adjusted_prediction).collect();
    r_squared(&actual, &predicted)
}
