use anyhow::Result;

use admet_forge::DatasetRegistry;

use crate::cli::InspectArgs;
use crate::display::{print_dataset_list, print_dataset_summary};

pub fn run_inspect(args: InspectArgs, registry: &DatasetRegistry) -> Result<()> {
    let dataset = registry.get(&args.dataset)?;
    let df = dataset.read(args.limit)?;

    print_dataset_summary(dataset, &df);
    println!("{df}");
    Ok(())
}

pub fn run_datasets(registry: &DatasetRegistry) -> Result<()> {
    print_dataset_list(registry);
    Ok(())
}
