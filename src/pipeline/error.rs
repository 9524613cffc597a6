//! Error types for the pipeline stages.
//!
//! Per-row conversion failures are not errors: those rows are dropped and
//! counted in the stage's [`StageReport`](super::StageReport). Everything
//! here aborts the stage.

use polars::prelude::PolarsError;
use thiserror::Error;

use crate::model::target::Target;
use crate::store;

#[derive(Debug, Error)]
pub enum Error {
    /// Reading or saving a dataset failed.
    #[error(transparent)]
    Store(#[from] store::Error),

    /// A dataframe operation failed.
    #[error("table operation failed: {0}")]
    Table(#[from] PolarsError),

    /// A required column is absent from an input table.
    #[error("column '{column}' not found in {table} (available: {})", available.join(", "))]
    MissingColumn {
        column: String,
        table: String,
        available: Vec<String>,
    },

    /// Combine inputs disagree on their column sets.
    #[error(
        "cannot combine {target} tables: external columns [{}] differ from competition columns [{}]",
        external.join(", "),
        competition.join(", ")
    )]
    SchemaMismatch {
        target: Target,
        external: Vec<String>,
        competition: Vec<String>,
    },

    /// The conversion constants document is invalid.
    #[error("failed to parse conversion constants: {0}")]
    Constants(#[from] toml::de::Error),

    /// The competition source could not provide a table.
    #[error("competition source failed: {0}")]
    Source(String),
}

impl Error {
    pub fn missing_column(
        column: &str,
        table: impl Into<String>,
        available: impl IntoIterator<Item = impl ToString>,
    ) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
            table: table.into(),
            available: available.into_iter().map(|c| c.to_string()).collect(),
        }
    }
}
