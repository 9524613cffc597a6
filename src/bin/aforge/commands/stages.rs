use anyhow::{Context as _, Result, bail};

use admet_forge::DatasetRegistry;
use admet_forge::pipeline::{ConversionConstants, Pipeline, Step};

use crate::cli::Command;
use crate::display::{Context, Progress, print_stage_reports};

pub fn run_stage(
    command: Command,
    registry: &DatasetRegistry,
    constants: ConversionConstants,
    ctx: Context,
) -> Result<()> {
    let (steps, summary) = plan_for(command)?;
    let pipeline = Pipeline::new(registry, constants);

    let mut progress = Progress::new(ctx.interactive, steps.len());
    let mut reports = Vec::new();
    for step in steps {
        let title = step_title(step);
        progress.step(&title);
        let step_reports = pipeline
            .run_step(step)
            .with_context(|| format!("Stage '{step}' failed"))?;
        progress.complete_stage(&title, &step_reports);
        reports.extend(step_reports);
    }
    progress.finish(summary);

    print_stage_reports(&reports);
    Ok(())
}

fn plan_for(command: Command) -> Result<(Vec<Step>, &'static str)> {
    let plan = match command {
        Command::Split => (vec![Step::SplitTargets], "Split complete"),
        Command::SplitExternal => (vec![Step::SplitExternal], "Split complete"),
        Command::Convert(args) => (
            args.resolve().into_iter().map(Step::Convert).collect(),
            "Conversion complete",
        ),
        Command::Combine(args) => (
            args.resolve().into_iter().map(Step::Combine).collect(),
            "Combine complete",
        ),
        Command::Run => (Step::plan(), "Pipeline complete"),
        Command::Ingest(_) | Command::Inspect(_) | Command::Datasets => {
            bail!("not a pipeline stage")
        }
    };
    Ok(plan)
}

fn step_title(step: Step) -> String {
    match step {
        Step::SplitTargets => "Splitting competition targets".to_string(),
        Step::SplitExternal => "Splitting external ADME targets".to_string(),
        Step::Convert(target) => format!("Converting {target}"),
        Step::Combine(target) => format!("Combining {target}"),
    }
}
