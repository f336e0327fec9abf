//! Property-based tests for blending and scoring using proptest.

use proptest::prelude::*;

use yieldcast_core::blend::{blend_prediction, no_model_prediction};
use yieldcast_core::registry::{FactorRegistry, FactorWeight};
use yieldcast_core::scoring::{RSquared, mean_accuracy_percent, r_squared};

fn outcome() -> impl Strategy<Value = f64> {
    1.0f64..200_000.0
}

/// Random weight tables that sum to 1.0.
fn weight_table() -> impl Strategy<Value = FactorRegistry> {
    prop::collection::vec(1u32..100, 1..8).prop_map(|raw| {
        let total: u32 = raw.iter().sum();
        let mut factors: Vec<FactorWeight> = raw
            .iter()
            .enumerate()
            .map(|(i, w)| FactorWeight::new(format!("f{i}"), *w as f64 / total as f64))
            .collect();
        // fold rounding drift into the last factor
        let head: f64 = factors[..factors.len() - 1].iter().map(|f| f.weight).sum();
        if let Some(last) = factors.last_mut() {
            last.weight = 1.0 - head;
        }
        FactorRegistry::new(factors).expect("normalized table")
    })
}

// --- Blending properties ---

proptest! {
    #[test]
    fn full_selection_reaches_reference(
        registry in weight_table(),
        measured in outcome(),
        reference in outcome(),
    ) {
        let mask = vec![true; registry.len()];
        let adjusted = blend_prediction(measured, reference, &registry, &mask);
        prop_assert!((adjusted - reference).abs() <= 1e-9 * reference.max(1.0));
    }

    #[test]
    fn empty_selection_is_half_measured(
        registry in weight_table(),
        measured in outcome(),
        reference in outcome(),
    ) {
        let mask = vec![false; registry.len()];
        let adjusted = blend_prediction(measured, reference, &registry, &mask);
        prop_assert_eq!(adjusted, no_model_prediction(measured));
    }

    #[test]
    fn adjusted_stays_between_start_and_reference(
        registry in weight_table(),
        measured in outcome(),
        reference in outcome(),
        bits in any::<u8>(),
    ) {
        let mask: Vec<bool> = (0..registry.len()).map(|i| bits & (1 << (i % 8)) != 0).collect();
        let start = no_model_prediction(measured);
        let adjusted = blend_prediction(measured, reference, &registry, &mask);
        let (lo, hi) = if start < reference { (start, reference) } else { (reference, start) };
        prop_assert!(adjusted >= lo - 1e-6 && adjusted <= hi + 1e-6);
    }

    #[test]
    fn single_factor_moves_by_its_weight(
        registry in weight_table(),
        measured in outcome(),
        reference in outcome(),
        pick in any::<prop::sample::Index>(),
    ) {
        let i = pick.index(registry.len());
        let mut mask = vec![false; registry.len()];
        mask[i] = true;
        let start = no_model_prediction(measured);
        let expected = start + (reference - start) * registry.factors()[i].weight;
        let adjusted = blend_prediction(measured, reference, &registry, &mask);
        prop_assert!((adjusted - expected).abs() <= 1e-6 * reference.max(measured));
    }

    #[test]
    fn partial_selection_compounds_steps(
        registry in weight_table(),
        measured in outcome(),
        reference in outcome(),
        bits in any::<u8>(),
    ) {
        let mask: Vec<bool> = (0..registry.len()).map(|i| bits & (1 << (i % 8)) != 0).collect();
        prop_assume!(mask.iter().any(|m| !m));
        let start = no_model_prediction(measured);
        let untouched: f64 = registry
            .factors()
            .iter()
            .zip(&mask)
            .filter(|(_, enabled)| **enabled)
            .map(|(f, _)| 1.0 - f.weight)
            .product();
        let expected = reference - (reference - start) * untouched;
        let adjusted = blend_prediction(measured, reference, &registry, &mask);
        prop_assert!((adjusted - expected).abs() <= 1e-6 * reference.max(measured));
    }
}

// --- Scoring properties ---

proptest! {
    #[test]
    fn r_squared_never_nan(
        actual in prop::collection::vec(outcome(), 1..40),
        noise in prop::collection::vec(-5000.0f64..5000.0, 40),
    ) {
        let predicted: Vec<f64> = actual.iter().zip(&noise).map(|(a, n)| a + n).collect();
        match r_squared(&actual, &predicted) {
            RSquared::Defined(v) => {
                prop_assert!(v.is_finite() && v <= 1.0 + 1e-12);
            }
            RSquared::Undefined => {}
        }
    }

    #[test]
    fn r_squared_constant_series_is_undefined(value in outcome(), len in 1usize..30) {
        let actual = vec![value; len];
        let predicted = vec![value * 0.9; len];
        prop_assert_eq!(r_squared(&actual, &predicted), RSquared::Undefined);
    }

    #[test]
    fn mean_accuracy_is_bounded_by_constant(
        enabled in 0.0f64..=1.0,
        constant in 0.0f64..=100.0,
    ) {
        let partial = mean_accuracy_percent(enabled, 1.0, false, constant);
        prop_assert!(partial >= 0.0 && partial <= constant.round() + 1e-9);
        prop_assert_eq!(mean_accuracy_percent(enabled, 1.0, true, constant), constant);
    }
}
