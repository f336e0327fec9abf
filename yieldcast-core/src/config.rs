//! Configuration system for Yieldcast.
//!
//! Uses `figment` for layered configuration: defaults -> user config -> workspace
//! config -> explicit file -> environment -> overrides. Configuration is read from
//! the platform config dir (`config.toml`) and/or `.yieldcast/config.toml` in the
//! workspace directory.

use crate::dataset::Dataset;
use crate::error::ForecastError;
use crate::registry::{
    FactorRegistry, FactorWeight, MAX_WEIGHT_TOLERANCE, REFERENCE_WEIGHTS, WEIGHT_TOLERANCE,
};
use crate::sample;
use crate::scoring::DEFAULT_FULL_ACCURACY_PERCENT;
use crate::selection::FactorSelection;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Scoring engine settings.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Where records come from.
    #[serde(default)]
    pub data: DataConfig,
    /// Ordered factor weight table.
    #[serde(default = "default_factors")]
    pub factors: Vec<FactorWeight>,
    /// Selection applied when the caller gives none.
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            data: DataConfig::default(),
            factors: default_factors(),
            selection: SelectionConfig::default(),
        }
    }
}

/// Scoring engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Mean accuracy reported when every factor is enabled.
    #[serde(default = "default_full_accuracy")]
    pub full_accuracy_percent: f64,
    /// Allowed distance of the factor weight sum from 1.0, at most 1e-6.
    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            full_accuracy_percent: default_full_accuracy(),
            weight_tolerance: default_weight_tolerance(),
        }
    }
}

fn default_full_accuracy() -> f64 {
    DEFAULT_FULL_ACCURACY_PERCENT
}

fn default_weight_tolerance() -> f64 {
    WEIGHT_TOLERANCE
}

fn default_factors() -> Vec<FactorWeight> {
    REFERENCE_WEIGHTS
        .iter()
        .map(|(name, weight)| FactorWeight::new(*name, *weight))
        .collect()
}

/// Dataset source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON dataset file. The built-in sample is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<PathBuf>,
}

/// Default factor selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Enabled factor names. All factors are enabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<Vec<String>>,
}

impl ForecastConfig {
    /// Validate the configured factor table.
    pub fn registry(&self) -> Result<FactorRegistry, ForecastError> {
        let tolerance = self.engine.weight_tolerance;
        if !(0.0..=MAX_WEIGHT_TOLERANCE).contains(&tolerance) {
            return Err(ForecastError::config(format!(
                "weight_tolerance must lie in [0, {MAX_WEIGHT_TOLERANCE}], got {tolerance}"
            )));
        }
        FactorRegistry::with_tolerance(self.factors.clone(), tolerance)
    }

    /// Load the configured dataset, resolving a relative path against `workspace`.
    pub fn dataset(&self, workspace: &Path) -> Result<Dataset, ForecastError> {
        match &self.data.dataset_path {
            Some(path) if path.is_absolute() => Dataset::from_json_path(path),
            Some(path) => Dataset::from_json_path(&workspace.join(path)),
            None => Ok(sample::sample_dataset()),
        }
    }

    /// The selection to start from.
    pub fn default_selection(&self, registry: &FactorRegistry) -> FactorSelection {
        match &self.selection.enabled {
            Some(names) => FactorSelection::from_enabled(names.iter().cloned()),
            None => FactorSelection::all(registry),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ForecastError> {
        toml::to_string_pretty(self).map_err(|e| ForecastError::config(e.to_string()))
    }
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `YIELDCAST_`)
/// 3. Explicit config file (`config_file`)
/// 4. Workspace-local config (`.yieldcast/config.toml`)
/// 5. User config (`~/.config/yieldcast/config.toml`)
/// 6. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    config_file: Option<&Path>,
    overrides: Option<&ForecastConfig>,
) -> Result<ForecastConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(ForecastConfig::default()));

    // User-level config
    if let Some(config_dir) = directories::ProjectDirs::from("dev", "yieldcast", "yieldcast") {
        let user_config = config_dir.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    // Workspace-level config
    if let Some(ws) = workspace {
        let ws_config = ws.join(".yieldcast").join("config.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    if let Some(path) = config_file {
        figment = figment.merge(Toml::file(path));
    }

    // Environment variables (YIELDCAST_ENGINE__FULL_ACCURACY_PERCENT, etc.)
    figment = figment.merge(Env::prefixed("YIELDCAST_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment.extract().map_err(Box::new)
}
