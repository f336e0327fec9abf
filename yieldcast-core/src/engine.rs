//! Blending and scoring engine.
//!
//! Holds the immutable dataset and factor table, and turns a factor selection
//! into a fully recomputed derived series plus aggregate metrics. The
//! reference-model baseline is computed once at construction.

use crate::blend::{self, DerivedRecord};
use crate::config::ForecastConfig;
use crate::dataset::{Dataset, Record};
use crate::error::ForecastError;
use crate::registry::{FactorRegistry, FactorWeight};
use crate::scoring::{self, AggregateMetrics, DEFAULT_FULL_ACCURACY_PERCENT, FitDiagnostics};
use crate::selection::FactorSelection;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of evaluating one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub selection: FactorSelection,
    /// Sum of the enabled factor weights.
    pub enabled_weight: f64,
    pub all_enabled: bool,
    pub series: Vec<DerivedRecord>,
    pub metrics: AggregateMetrics,
    pub diagnostics: FitDiagnostics,
}

/// The forecast adjustment and accuracy scoring engine.
///
/// Immutable after construction, so a shared reference can be evaluated from
/// several threads at once.
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    dataset: Dataset,
    registry: FactorRegistry,
    full_accuracy_percent: f64,
    baseline: Evaluation,
}

impl ForecastEngine {
    /// Build an engine over a validated dataset and factor table.
    pub fn new(
        dataset: Dataset,
        registry: FactorRegistry,
        full_accuracy_percent: f64,
    ) -> Result<Self, ForecastError> {
        if !full_accuracy_percent.is_finite() || !(0.0..=100.0).contains(&full_accuracy_percent) {
            return Err(ForecastError::config(format!(
                "full accuracy percent {full_accuracy_percent} outside [0, 100]"
            )));
        }
        let baseline = reference_baseline(&dataset, &registry, full_accuracy_percent);
        tracing::info!(
            records = dataset.len(),
            factors = registry.len(),
            baseline_r_squared = %baseline.metrics.r_squared,
            "Forecast engine ready"
        );
        Ok(Self {
            dataset,
            registry,
            full_accuracy_percent,
            baseline,
        })
    }

    /// Validate raw records and weights, then build with the default accuracy figure.
    pub fn from_parts(records: Vec<Record>, factors: Vec<FactorWeight>) -> Result<Self, ForecastError> {
        let dataset = Dataset::new(records)?;
        let registry = FactorRegistry::new(factors)?;
        Self::new(dataset, registry, DEFAULT_FULL_ACCURACY_PERCENT)
    }

    /// Build from configuration, loading the dataset relative to `workspace`.
    pub fn from_config(config: &ForecastConfig, workspace: &Path) -> Result<Self, ForecastError> {
        let registry = config.registry()?;
        let dataset = config.dataset(workspace)?;
        Self::new(dataset, registry, config.engine.full_accuracy_percent)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn registry(&self) -> &FactorRegistry {
        &self.registry
    }

    pub fn full_accuracy_percent(&self) -> f64 {
        self.full_accuracy_percent
    }

    /// Metrics of the unadjusted reference model.
    pub fn baseline(&self) -> &Evaluation {
        &self.baseline
    }

    /// Recompute the adjusted series and metrics for a selection.
    ///
    /// Fails with [`ForecastError::UnknownFactor`] if the selection names a
    /// factor outside the table.
    pub fn evaluate(&self, selection: &FactorSelection) -> Result<Evaluation, ForecastError> {
        let mask = self.registry.enabled_mask(selection).inspect_err(|err| {
            tracing::warn!(error = %err, "Rejected factor selection");
        })?;

        let series = blend::blend_series(self.dataset.records(), &self.registry, &mask);
        let enabled_weight = self.registry.enabled_weight(&mask);
        let all_enabled = mask.iter().all(|on| *on);

        let metrics = AggregateMetrics {
            r_squared: scoring::series_r_squared(&series),
            mean_accuracy_percent: scoring::mean_accuracy_percent(
                enabled_weight,
                self.registry.total_weight(),
                all_enabled,
                self.full_accuracy_percent,
            ),
        };
        let diagnostics = FitDiagnostics::from_series(&series);

        tracing::debug!(
            enabled_weight,
            all_enabled,
            r_squared = %metrics.r_squared,
            mean_accuracy = metrics.mean_accuracy_percent,
            "Evaluated selection"
        );

        Ok(Evaluation {
            selection: selection.clone(),
            enabled_weight,
            all_enabled,
            series,
            metrics,
            diagnostics,
        })
    }
}

fn reference_baseline(
    dataset: &Dataset,
    registry: &FactorRegistry,
    full_accuracy_percent: f64,
) -> Evaluation {
    let series = blend::reference_series(dataset.records());
    let metrics = AggregateMetrics {
        r_squared: scoring::series_r_squared(&series),
        mean_accuracy_percent: full_accuracy_percent,
    };
    let diagnostics = FitDiagnostics::from_series(&series);
    Evaluation {
        selection: FactorSelection::all(registry),
        enabled_weight: registry.total_weight(),
        all_enabled: true,
        series,
        metrics,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::record;
    use crate::registry::{FACTOR_CELL_COUNT, FACTOR_FAT, FACTOR_HERD_SIZE, FACTOR_PROTEIN};
    use crate::sample;
    use crate::scoring::RSquared;
    use chrono::Month;

    fn engine() -> ForecastEngine {
        ForecastEngine::new(sample::sample_dataset(), FactorRegistry::reference(), 94.0).unwrap()
    }

    #[test]
    fn test_full_selection_matches_baseline_predictions() {
        let engine = engine();
        let eval = engine
            .evaluate(&FactorSelection::all(engine.registry()))
            .unwrap();
        assert!(eval.all_enabled);
        assert_eq!(eval.metrics.mean_accuracy_percent, 94.0);
        for (d, b) in eval.series.iter().zip(&engine.baseline().series) {
            assert!((d.adjusted_prediction - b.adjusted_prediction).abs() < 1e-9);
        }
        let r2 = eval.metrics.r_squared.value().unwrap();
        let base = engine.baseline().metrics.r_squared.value().unwrap();
        assert!((r2 - base).abs() < 1e-9);
    }

    #[test]
    fn test_empty_selection_uses_half_of_measured() {
        let engine = engine();
        let eval = engine
            .evaluate(&FactorSelection::none(engine.registry()))
            .unwrap();
        for d in &eval.series {
            assert_eq!(d.adjusted_prediction, d.record.measured_outcome * 0.5);
            assert!((d.adjusted_accuracy_ratio - 0.5).abs() < 1e-12);
        }
        assert_eq!(eval.metrics.mean_accuracy_percent, 0.0);
        assert!(eval.metrics.r_squared.value().unwrap() < 0.0);
    }

    #[test]
    fn test_half_weight_mean_accuracy() {
        let engine = engine();
        let selection = FactorSelection::from_enabled([FACTOR_FAT, FACTOR_PROTEIN, FACTOR_CELL_COUNT]);
        let eval = engine.evaluate(&selection).unwrap();
        assert!((eval.enabled_weight - 0.5).abs() < 1e-12);
        assert_eq!(eval.metrics.mean_accuracy_percent, (0.5_f64 * 94.0).round());
    }

    #[test]
    fn test_unknown_factor_rejected() {
        let engine = engine();
        let selection = FactorSelection::from_enabled(["lactose"]);
        assert!(matches!(
            engine.evaluate(&selection),
            Err(ForecastError::UnknownFactor(_))
        ));
    }

    #[test]
    fn test_single_record_end_to_end() {
        let dataset = Dataset::new(vec![record(2023, Month::March, 71388.0, 49541.0)]).unwrap();
        let engine = ForecastEngine::new(dataset, FactorRegistry::reference(), 94.0).unwrap();
        let eval = engine
            .evaluate(&FactorSelection::from_enabled([FACTOR_HERD_SIZE]))
            .unwrap();
        let d = &eval.series[0];
        assert!((d.adjusted_prediction - 39848.1).abs() < 1e-6);
        assert!((d.adjusted_residual - (71388.0 - 39848.1)).abs() < 1e-6);
        // one record has no variance
        assert_eq!(eval.metrics.r_squared, RSquared::Undefined);
        assert_eq!(eval.metrics.mean_accuracy_percent, 28.0);
    }

    #[test]
    fn test_invalid_accuracy_constant_rejected() {
        let err = ForecastEngine::new(sample::sample_dataset(), FactorRegistry::reference(), f64::NAN)
            .unwrap_err();
        assert!(matches!(err, ForecastError::Config(_)));
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ForecastEngine>();
    }
}
