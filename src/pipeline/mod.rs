//! Data preparation stages.
//!
//! The stages run in a fixed order:
//!
//! 1. [`split_by_targets`] the competition training table into per-target tables
//! 2. [`split_external`] the external ADME public set likewise
//! 3. [`convert`] each external table into the competition's units
//! 4. [`combine_tables`] external and competition data per target
//!
//! The functions in the submodules are pure transformations over data
//! frames. [`Pipeline`] binds them to the dataset registry, reading each
//! stage's inputs and saving its outputs.

mod combine;
mod constants;
mod convert;
mod error;
mod ingest;
mod report;
mod split;

use std::fmt;

use polars::prelude::DataFrame;
use tracing::info;

use crate::model::target::Target;
use crate::store::DatasetRegistry;

pub use combine::combine_tables;
pub use constants::{
    ClearanceConstants, ConversionConstants, EffluxConstants, SolubilityConstants,
    get_default_constants, load_constants,
};
pub use convert::{
    clearance, convert, convert_hlm, convert_ksol, convert_mdr1_mdckii, convert_mlm,
    permeability, prep_lipophilicity, solubility,
};
pub use error::Error;
pub use ingest::{CachedCompetition, CompetitionSource, ingest_competition, ingest_table};
pub use report::{Stage, StageReport};
pub use split::{EXTERNAL_STRUCTURE_COLUMN, split_by_targets, split_external};

pub(crate) fn require_columns(df: &DataFrame, columns: &[&str], table: &str) -> Result<(), Error> {
    match columns.iter().find(|c| df.get_column_index(c).is_none()) {
        Some(missing) => Err(Error::missing_column(missing, table, df.get_column_names())),
        None => Ok(()),
    }
}

/// One unit of work for [`Pipeline::run_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    SplitTargets,
    SplitExternal,
    Convert(Target),
    Combine(Target),
}

impl Step {
    /// The full pipeline, in execution order.
    pub fn plan() -> Vec<Step> {
        let mut steps = vec![Step::SplitTargets, Step::SplitExternal];
        steps.extend(Target::ALL.map(Step::Convert));
        steps.extend(Target::ALL.map(Step::Combine));
        steps
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::SplitTargets => write!(f, "{}", Stage::Split),
            Step::SplitExternal => write!(f, "{}", Stage::SplitExternal),
            Step::Convert(target) => write!(f, "{} {target}", Stage::Convert),
            Step::Combine(target) => write!(f, "{} {target}", Stage::Combine),
        }
    }
}

/// Stage runner over a dataset registry.
#[derive(Debug, Clone)]
pub struct Pipeline<'a> {
    registry: &'a DatasetRegistry,
    constants: ConversionConstants,
}

impl<'a> Pipeline<'a> {
    pub fn new(registry: &'a DatasetRegistry, constants: ConversionConstants) -> Self {
        Self {
            registry,
            constants,
        }
    }

    pub fn registry(&self) -> &DatasetRegistry {
        self.registry
    }

    pub fn constants(&self) -> &ConversionConstants {
        &self.constants
    }

    /// Splits `asap_train_raw` into `asap_<target>_train` datasets.
    pub fn split_targets(&self) -> Result<Vec<StageReport>, Error> {
        let wide = self.registry.competition_train_raw().read(None)?;
        let tables = split_by_targets(&wide)?;

        let mut reports = Vec::with_capacity(tables.len());
        for (target, mut table) in tables {
            self.registry.competition_target(target).save(&mut table)?;
            let report = StageReport::new(Stage::Split, target, wide.height(), table.height());
            report.log();
            reports.push(report);
        }
        Ok(reports)
    }

    /// Splits the external ADME public set into per-target dirty datasets.
    pub fn split_external(&self) -> Result<Vec<StageReport>, Error> {
        let wide = self.registry.adme_raw().read(None)?;
        let tables = split_external(&wide)?;

        let mut reports = Vec::with_capacity(tables.len());
        for (target, mut table) in tables {
            if let Some(dataset) = self.registry.external_dirty(target) {
                dataset.save(&mut table)?;
            }
            let report =
                StageReport::new(Stage::SplitExternal, target, wide.height(), table.height());
            report.log();
            reports.push(report);
        }
        Ok(reports)
    }

    /// Converts one target's external data into competition units.
    pub fn convert(&self, target: Target) -> Result<StageReport, Error> {
        let input = match self.registry.external_dirty(target) {
            Some(dataset) => dataset,
            None => self.registry.lipophilicity_raw(),
        };
        let raw = input.read(None)?;
        let mut converted = convert(target, &raw, &self.constants)?;
        self.registry
            .external_converted(target)
            .save(&mut converted)?;

        let report = StageReport::new(Stage::Convert, target, raw.height(), converted.height());
        report.log();
        Ok(report)
    }

    /// Combines converted external data with the competition table.
    pub fn combine(&self, target: Target) -> Result<StageReport, Error> {
        let external = self.registry.external_converted(target).read(None)?;
        let competition = self.registry.competition_target(target).read(None)?;
        let rows_in = external.height() + competition.height();

        let mut combined = combine_tables(target, external, &competition)?;
        self.registry.combined(target).save(&mut combined)?;

        let report = StageReport::new(Stage::Combine, target, rows_in, combined.height());
        report.log();
        Ok(report)
    }

    pub fn run_step(&self, step: Step) -> Result<Vec<StageReport>, Error> {
        match step {
            Step::SplitTargets => self.split_targets(),
            Step::SplitExternal => self.split_external(),
            Step::Convert(target) => self.convert(target).map(|r| vec![r]),
            Step::Combine(target) => self.combine(target).map(|r| vec![r]),
        }
    }

    /// Runs [`Step::plan`], stopping at the first failure.
    pub fn run_all(&self) -> Result<Vec<StageReport>, Error> {
        let mut reports = Vec::new();
        for step in Step::plan() {
            reports.extend(self.run_step(step)?);
        }
        info!(stages = reports.len(), "pipeline complete");
        Ok(reports)
    }
}
