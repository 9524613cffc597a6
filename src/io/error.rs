use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("table operation failed: {0}")]
    Table(#[from] PolarsError),

    #[error("unsupported file format: '{}' (expected a .csv or .parquet path)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("failed to parse SMILES '{smiles}': {details} (at position {position})")]
    Smiles {
        smiles: String,
        position: usize,
        details: String,
    },
}

impl Error {
    pub fn smiles(smiles: &str, position: usize, details: impl Into<String>) -> Self {
        Self::Smiles {
            smiles: smiles.to_string(),
            position,
            details: details.into(),
        }
    }
}
