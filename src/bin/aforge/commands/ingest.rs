use anyhow::{Context as _, Result};

use admet_forge::DatasetRegistry;
use admet_forge::pipeline::{CachedCompetition, ingest_competition, ingest_table};

use crate::cli::IngestCommand;
use crate::display::{Context, Progress};

pub fn run_ingest(command: IngestCommand, registry: &DatasetRegistry, ctx: Context) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, 1);

    match command {
        IngestCommand::Competition { dir } => {
            progress.step("Ingesting competition split");
            let source = CachedCompetition::new(&dir);
            let train = registry.competition_train_raw();
            let test = registry.competition_test_raw();
            let (train_rows, test_rows) = ingest_competition(&source, train, test)
                .with_context(|| format!("Failed to ingest '{}'", dir.display()))?;
            progress.complete_step(
                "Ingesting competition split",
                &[
                    format!("{} ← {} rows", train.name(), train_rows),
                    format!("{} ← {} rows", test.name(), test_rows),
                ],
            );
        }

        IngestCommand::Adme { file } => {
            progress.step("Ingesting ADME public set");
            let dataset = registry.adme_raw();
            let rows = ingest_table(&file, dataset)
                .with_context(|| format!("Failed to ingest '{}'", file.display()))?;
            progress.complete_step(
                "Ingesting ADME public set",
                &[format!("{} ← {} rows", dataset.name(), rows)],
            );
        }

        IngestCommand::Lipophilicity { file } => {
            progress.step("Ingesting lipophilicity set");
            let dataset = registry.lipophilicity_raw();
            let rows = ingest_table(&file, dataset)
                .with_context(|| format!("Failed to ingest '{}'", file.display()))?;
            progress.complete_step(
                "Ingesting lipophilicity set",
                &[format!("{} ← {} rows", dataset.name(), rows)],
            );
        }
    }

    progress.finish("Ingest complete");
    Ok(())
}
