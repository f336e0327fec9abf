//! CLI subcommand handlers.

use crate::Commands;
use crate::ConfigAction;
use crate::SelectionArgs;
use std::io::Write;
use std::path::Path;
use yieldcast_core::config::{ForecastConfig, load_config};
use yieldcast_core::{FactorSelection, ForecastEngine, report};

/// Handle a CLI subcommand.
pub fn handle_command(
    command: Commands,
    workspace: &Path,
    config_file: Option<&Path>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Commands::Config { action } => handle_config(action, workspace, config_file, out),
        Commands::Factors => {
            let engine = build_engine(workspace, config_file)?.1;
            for (name, weight) in engine.registry().factor_weights() {
                writeln!(out, "{name:<12} {weight:.2}")?;
            }
            writeln!(out, "{:<12} {:.2}", "total", engine.registry().total_weight())?;
            Ok(())
        }
        Commands::Baseline { json } => {
            let engine = build_engine(workspace, config_file)?.1;
            let baseline = engine.baseline();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&baseline.metrics)?)?;
            } else {
                writeln!(out, "R²            {}", baseline.metrics.r_squared)?;
                writeln!(out, "Mean accuracy {:.0}%", baseline.metrics.mean_accuracy_percent)?;
                writeln!(out, "RMSE          {:.1}", baseline.diagnostics.rmse)?;
            }
            Ok(())
        }
        Commands::Evaluate { selection, json } => {
            let (config, engine) = build_engine(workspace, config_file)?;
            let selection = resolve_selection(&selection, &config, &engine);
            let evaluation = engine.evaluate(&selection)?;
            if json {
                let body = serde_json::json!({
                    "selection": evaluation.selection,
                    "enabled_weight": evaluation.enabled_weight,
                    "metrics": evaluation.metrics,
                    "diagnostics": evaluation.diagnostics,
                    "baseline": engine.baseline().metrics,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            } else {
                let text = report::render_summary(&evaluation, engine.baseline(), engine.registry());
                write!(out, "{text}")?;
            }
            Ok(())
        }
        Commands::Series { selection, json } => {
            let (config, engine) = build_engine(workspace, config_file)?;
            let selection = resolve_selection(&selection, &config, &engine);
            let evaluation = engine.evaluate(&selection)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&evaluation.series)?)?;
            } else {
                write!(out, "{}", report::render_series(&evaluation))?;
            }
            Ok(())
        }
    }
}

fn handle_config(
    action: ConfigAction,
    workspace: &Path,
    config_file: Option<&Path>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_dir = workspace.join(".yieldcast");
            std::fs::create_dir_all(&config_dir)?;

            let config_path = config_dir.join("config.toml");
            if config_path.exists() {
                writeln!(
                    out,
                    "Configuration file already exists at: {}",
                    config_path.display()
                )?;
                return Ok(());
            }

            let toml_str = ForecastConfig::default().to_toml_string()?;
            std::fs::write(&config_path, &toml_str)?;
            writeln!(
                out,
                "Created default configuration at: {}",
                config_path.display()
            )?;
            Ok(())
        }
        ConfigAction::Show => {
            let config = load(workspace, config_file)?;
            writeln!(out, "{}", config.to_toml_string()?)?;
            Ok(())
        }
    }
}

fn load(workspace: &Path, config_file: Option<&Path>) -> anyhow::Result<ForecastConfig> {
    load_config(Some(workspace), config_file, None)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
}

fn build_engine(
    workspace: &Path,
    config_file: Option<&Path>,
) -> anyhow::Result<(ForecastConfig, ForecastEngine)> {
    let config = load(workspace, config_file)?;
    let engine = ForecastEngine::from_config(&config, workspace)?;
    Ok((config, engine))
}

/// Turn flags into a selection.
///
/// `--none` or any `--enable` starts from nothing enabled; otherwise the
/// configured default applies. `--disable` is applied last.
fn resolve_selection(
    args: &SelectionArgs,
    config: &ForecastConfig,
    engine: &ForecastEngine,
) -> FactorSelection {
    let mut selection = if args.none || !args.enable.is_empty() {
        FactorSelection::none(engine.registry())
    } else {
        config.default_selection(engine.registry())
    };
    for name in &args.enable {
        selection.set(name.as_str(), true);
    }
    for name in &args.disable {
        selection.set(name.as_str(), false);
    }
    selection
}
