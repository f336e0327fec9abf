//! Plain-text rendering of evaluations.

use crate::engine::Evaluation;
use crate::registry::FactorRegistry;
use crate::scoring::RSquared;
use std::fmt::Write;

fn r_squared_cell(r2: RSquared) -> String {
    r2.format_fixed(3).unwrap_or_else(|| "undefined".to_string())
}

/// Summary of an evaluation next to the reference-model baseline.
pub fn render_summary(evaluation: &Evaluation, baseline: &Evaluation, registry: &FactorRegistry) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Factors");
    for (name, weight) in registry.factor_weights() {
        let mark = if evaluation.selection.is_enabled(name) { "x" } else { " " };
        let _ = writeln!(out, "  [{mark}] {name:<12} {weight:.2}");
    }
    let _ = writeln!(
        out,
        "  enabled weight {:.2} of {:.2}",
        evaluation.enabled_weight,
        registry.total_weight()
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<22} {:>12} {:>12}", "", "adjusted", "reference");
    let _ = writeln!(
        out,
        "{:<22} {:>12} {:>12}",
        "R²",
        r_squared_cell(evaluation.metrics.r_squared),
        r_squared_cell(baseline.metrics.r_squared)
    );
    let _ = writeln!(
        out,
        "{:<22} {:>11.0}% {:>11.0}%",
        "Mean accuracy",
        evaluation.metrics.mean_accuracy_percent,
        baseline.metrics.mean_accuracy_percent
    );
    let _ = writeln!(
        out,
        "{:<22} {:>11.1}% {:>11.1}%",
        "Empirical accuracy",
        evaluation.diagnostics.empirical_accuracy_percent,
        baseline.diagnostics.empirical_accuracy_percent
    );
    let _ = writeln!(
        out,
        "{:<22} {:>12.1} {:>12.1}",
        "MAE",
        evaluation.diagnostics.mae,
        baseline.diagnostics.mae
    );
    let _ = writeln!(
        out,
        "{:<22} {:>12.1} {:>12.1}",
        "RMSE",
        evaluation.diagnostics.rmse,
        baseline.diagnostics.rmse
    );

    if !evaluation.metrics.r_squared.is_defined() {
        let _ = writeln!(out);
        let _ = writeln!(out, "R² is undefined: measured outcomes have no variance.");
    }
    out
}

/// Fixed-width table of the derived series.
pub fn render_series(evaluation: &Evaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:>12} {:>12} {:>12} {:>12} {:>8}",
        "period", "measured", "reference", "adjusted", "residual", "ratio"
    );
    for d in &evaluation.series {
        let _ = writeln!(
            out,
            "{:<16} {:>12.1} {:>12.1} {:>12.1} {:>12.1} {:>8.3}",
            d.record.period.to_string(),
            d.record.measured_outcome,
            d.record.reference_outcome,
            d.adjusted_prediction,
            d.adjusted_residual,
            d.adjusted_accuracy_ratio
        );
    }
    out
}
