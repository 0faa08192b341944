//! Mixing Predictor - Main Entry Point
//!
//! Loads an ONNX surrogate model, runs one prediction for the given volume
//! and impeller speed, and prints the labeled mixing parameters.

use anyhow::{bail, Context, Result};
use clap::Parser;
use mixing_predictor::{
    config::AppConfig,
    export,
    models::{inference::InferenceEngine, loader::{LoadedModel, ModelLoader}},
    types::{report::MixingReport, sample::MixingInputs},
};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "mixing-predictor",
    about = "Predict mixing parameters with an ONNX surrogate model"
)]
struct Cli {
    /// Working volume of the vessel
    #[arg(long)]
    volume: f64,

    /// Impeller speed
    #[arg(long)]
    impeller_speed: f64,

    /// Path to an ONNX model file; "-" reads model bytes from stdin
    #[arg(long, conflicts_with = "model_name")]
    model: Option<String>,

    /// Catalog entry to use (see config/config.toml)
    #[arg(long)]
    model_name: Option<String>,

    /// Write results as CSV to this path
    #[arg(long)]
    csv: Option<String>,

    /// Print the report as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Configuration file path
    #[arg(long, default_value = "config/config.toml")]
    config: String,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mixing_predictor=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = if Path::new(&cli.config).exists() {
        let config = AppConfig::load_from_path(&cli.config)?;
        info!(path = %cli.config, "Configuration loaded successfully");
        config
    } else {
        warn!(path = %cli.config, "Configuration file not found, using built-in defaults");
        AppConfig::default()
    };

    let loader = ModelLoader::with_threads(config.models.onnx_threads)?;
    let (model, model_label) = select_model(&cli, &config, &loader)?;

    let inputs = MixingInputs::new(cli.volume, cli.impeller_speed);
    let mut engine = InferenceEngine::new(model);
    let result = engine.predict(&inputs)?;

    let report = MixingReport::from_result(&model_label, inputs, &result);

    if cli.json {
        println!("{}", export::render_json(&report)?);
    } else {
        println!("{}", export::render_text(&report));
    }

    if let Some(csv_path) = cli.csv.as_deref().or(config.output.csv_path.as_deref()) {
        export::write_csv(&result, csv_path)?;
    }

    Ok(())
}

/// Resolve the model to run: an explicit path, stdin bytes, or a catalog
/// entry (falling back to the configured default).
fn select_model(
    cli: &Cli,
    config: &AppConfig,
    loader: &ModelLoader,
) -> Result<(LoadedModel, String)> {
    if let Some(path) = cli.model.as_deref() {
        if path == "-" {
            info!("Reading model bytes from stdin");
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read model bytes from stdin")?;
            let model = loader.load_from_bytes(&bytes, "stdin")?;
            return Ok((model, "stdin".to_string()));
        }

        let label = Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("model")
            .to_string();
        let model = loader.load_from_path(path, &label)?;
        return Ok((model, label));
    }

    let name = cli
        .model_name
        .clone()
        .unwrap_or_else(|| config.models.default_model.clone());

    let Some(path) = config.resolve_model(&name) else {
        bail!(
            "Unknown model '{}'; configured models: {:?}",
            name,
            config.catalog_names()
        );
    };

    let model = loader.load_from_path(path, &name)?;
    Ok((model, name))
}
