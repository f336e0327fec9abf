//! Interactive selection state over a shared engine.

use crate::engine::{Evaluation, ForecastEngine};
use crate::error::ForecastError;
use crate::selection::FactorSelection;
use std::sync::Arc;

/// Current selection and its most recent evaluation.
///
/// Every change re-evaluates synchronously. A change that fails leaves both
/// the selection and the cached evaluation as they were.
#[derive(Debug, Clone)]
pub struct ForecastSession {
    engine: Arc<ForecastEngine>,
    selection: FactorSelection,
    current: Evaluation,
}

impl ForecastSession {
    /// Start with every factor enabled.
    pub fn new(engine: Arc<ForecastEngine>) -> Result<Self, ForecastError> {
        let selection = FactorSelection::all(engine.registry());
        Self::with_selection(engine, selection)
    }

    pub fn with_selection(
        engine: Arc<ForecastEngine>,
        selection: FactorSelection,
    ) -> Result<Self, ForecastError> {
        let current = engine.evaluate(&selection)?;
        Ok(Self {
            engine,
            selection,
            current,
        })
    }

    pub fn engine(&self) -> &ForecastEngine {
        &self.engine
    }

    pub fn selection(&self) -> &FactorSelection {
        &self.selection
    }

    pub fn current(&self) -> &Evaluation {
        &self.current
    }

    pub fn baseline(&self) -> &Evaluation {
        self.engine.baseline()
    }

    /// Replace the whole selection.
    pub fn apply(&mut self, selection: FactorSelection) -> Result<&Evaluation, ForecastError> {
        let evaluation = self.engine.evaluate(&selection)?;
        self.selection = selection;
        self.current = evaluation;
        Ok(&self.current)
    }

    pub fn set_factor(&mut self, name: &str, enabled: bool) -> Result<&Evaluation, ForecastError> {
        let next = self.selection.clone().with(name, enabled);
        self.apply(next)
    }

    pub fn toggle(&mut self, name: &str) -> Result<&Evaluation, ForecastError> {
        let mut next = self.selection.clone();
        next.toggle(name);
        self.apply(next)
    }
}
