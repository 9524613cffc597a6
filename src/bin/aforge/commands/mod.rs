mod ingest;
mod inspect;
mod stages;

use std::fs;

use anyhow::{Context as _, Result};

use admet_forge::pipeline::{self, ConversionConstants};
use admet_forge::{DataLayout, DatasetRegistry};

use crate::cli::{Cli, Command, GlobalOptions};
use crate::display::Context;

pub fn dispatch(cli: Cli, ctx: Context) -> Result<()> {
    let Cli { global, command } = cli;
    let registry = build_registry(&global)?;

    match command {
        Command::Ingest(command) => ingest::run_ingest(command, &registry, ctx),
        Command::Datasets => inspect::run_datasets(&registry),
        Command::Inspect(args) => inspect::run_inspect(args, &registry),
        command => {
            let constants = load_constants(&global)?;
            stages::run_stage(command, &registry, constants, ctx)
        }
    }
}

fn build_registry(global: &GlobalOptions) -> Result<DatasetRegistry> {
    let layout = match &global.home {
        Some(home) => DataLayout::new(home),
        None => DataLayout::from_env()?,
    };
    layout
        .ensure()
        .context("Failed to prepare the data directory")?;
    Ok(DatasetRegistry::new(&layout, global.format.into()))
}

fn load_constants(global: &GlobalOptions) -> Result<ConversionConstants> {
    let Some(path) = &global.constants else {
        return Ok(pipeline::get_default_constants().clone());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read constants file '{}'", path.display()))?;
    let constants = pipeline::load_constants(Some(&text))
        .with_context(|| format!("Invalid constants file '{}'", path.display()))?;
    tracing::debug!(?constants, "loaded conversion constants");
    Ok(constants)
}
