use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use admet_forge::Target;

#[derive(Parser)]
#[command(
    name = "aforge",
    about = "ADME training data preparation",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by all commands.
#[derive(Args)]
pub struct GlobalOptions {
    /// Pipeline root (overrides ADMET_FORGE_HOME)
    #[arg(long, value_name = "DIR", global = true)]
    pub home: Option<PathBuf>,

    /// TOML file overriding the unit conversion constants
    #[arg(long, value_name = "FILE", global = true)]
    pub constants: Option<PathBuf>,

    /// Encoding of derived datasets
    #[arg(long, value_name = "FORMAT", default_value = "csv", global = true)]
    pub format: TableFormat,

    /// Suppress progress output and lower logging to warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Copy source tables into the raw data directory
    #[command(subcommand)]
    Ingest(IngestCommand),

    /// Split the competition training table per target
    Split,

    /// Split the external ADME public set per target
    #[command(name = "split-external")]
    SplitExternal,

    /// Convert external data into competition units
    #[command(visible_alias = "c")]
    Convert(TargetArgs),

    /// Combine external and competition data per target
    Combine(TargetArgs),

    /// Run split, split-external, convert and combine for every target
    Run,

    /// Summarize a dataset: shape, column types, null counts
    Inspect(InspectArgs),

    /// List registered datasets and whether they exist
    #[command(visible_alias = "ls")]
    Datasets,
}

#[derive(Subcommand)]
pub enum IngestCommand {
    /// Competition train/test export directory (train.csv|parquet, test.csv|parquet)
    Competition {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Computational ADME public set (ADME_public_set_3521.csv)
    Adme {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// TDC lipophilicity (AstraZeneca) table with Drug and Y columns
    Lipophilicity {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args)]
pub struct TargetArgs {
    /// Targets to process (all when omitted): HLM, KSOL, LogD, MDR1-MDCKII, MLM
    #[arg(value_name = "TARGET")]
    pub targets: Vec<Target>,
}

impl TargetArgs {
    pub fn resolve(&self) -> Vec<Target> {
        if self.targets.is_empty() {
            Target::ALL.to_vec()
        } else {
            self.targets.clone()
        }
    }
}

#[derive(Args)]
pub struct InspectArgs {
    /// Registered dataset name (see `aforge datasets`)
    #[arg(value_name = "DATASET")]
    pub dataset: String,

    /// Read only the first N rows
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl From<TableFormat> for admet_forge::io::Format {
    fn from(format: TableFormat) -> Self {
        match format {
            TableFormat::Csv => Self::Csv,
            TableFormat::Parquet => Self::Parquet,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn targets_parse_by_name_or_slug() {
        let cli = Cli::try_parse_from(["aforge", "convert", "hlm", "MDR1_MDCKII"]).unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.resolve(), [Target::Hlm, Target::Mdr1Mdckii]);
    }

    #[test]
    fn empty_target_list_means_all() {
        let cli = Cli::try_parse_from(["aforge", "--format", "parquet", "combine"]).unwrap();
        let Command::Combine(args) = cli.command else {
            panic!("expected combine");
        };
        assert_eq!(args.resolve().len(), 5);
        assert!(matches!(cli.global.format, TableFormat::Parquet));
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["aforge", "inspect", "admet_HLM_train", "-n", "5", "-q"]).unwrap();
        assert!(cli.global.quiet);
        let Command::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.limit, Some(5));
    }
}
