//! flexdock - command-line front end for the docking layout engine

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;

use flexdock::cli::{CliArgs, Command};
use flexdock::{Action, EngineConfig, Model, Rect};

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };
    flexdock::tracing::init(&config.log_level);

    match args.command {
        Command::Tree { layout, viewport } => {
            let model = load_laid_out(&layout, &config, viewport.rect())?;
            println!("{}", model);
        }
        Command::Normalize { layout } => {
            let model = load_model(&layout, &config)?;
            println!("{}", model.to_json_string()?);
        }
        Command::Apply {
            layout,
            actions,
            viewport,
            tree,
        } => {
            let mut model = load_laid_out(&layout, &config, viewport.rect())?;
            let actions = load_actions(&actions)?;
            tracing::info!(count = actions.len(), "applying actions");
            for (i, action) in actions.into_iter().enumerate() {
                let name = action.name();
                model
                    .dispatch(action)
                    .with_context(|| format!("action #{} ({}) failed", i, name))?;
            }
            if tree {
                println!("{}", model);
            } else {
                println!("{}", model.to_json_string()?);
            }
        }
        Command::New => {
            let model = Model::with_config(&config);
            println!("{}", model.to_json_string()?);
        }
    }

    Ok(())
}

/// Load a layout document, with configured defaults under its `global` section
fn load_model(path: &Path, config: &EngineConfig) -> Result<Model> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut document: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config.apply_defaults(&mut document);
    Model::from_json(&document).with_context(|| format!("Failed to load {}", path.display()))
}

fn load_laid_out(path: &Path, config: &EngineConfig, viewport: Rect) -> Result<Model> {
    let mut model = load_model(path, config)?;
    model
        .set_rect(viewport)
        .with_context(|| format!("Invalid viewport {}", viewport))?;
    Ok(model)
}

fn load_actions(path: &Path) -> Result<Vec<Action>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse actions in {}", path.display()))
}
