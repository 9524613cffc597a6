//! File I/O: tabular datasets (CSV, Parquet) and SMILES line notation.
//!
//! Table encodings are chosen purely by path suffix. The suffix is checked
//! before any file is opened, so an unsupported path never leaves a partial
//! file behind.

use std::fmt;
use std::path::Path;

pub mod error;
pub mod smiles;
mod table;

pub use error::Error;
pub use table::{read_table, write_table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Csv,
    Parquet,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Parquet => "parquet",
        }
    }

    /// Resolves the encoding of `path` from its suffix. Suffixes are
    /// case-sensitive: `table.CSV` is not a CSV path.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("csv") => Ok(Format::Csv),
            Some("parquet") => Ok(Format::Parquet),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Csv => write!(f, "CSV"),
            Format::Parquet => write!(f, "Parquet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_suffix() {
        assert_eq!(Format::from_path(Path::new("a/b.csv")).unwrap(), Format::Csv);
        assert_eq!(
            Format::from_path(Path::new("b.parquet")).unwrap(),
            Format::Parquet
        );
    }

    #[test]
    fn unsupported_suffixes_are_rejected() {
        for path in ["table.json", "table", "table.csv.gz", "table.CSV", "b.Parquet"] {
            let err = Format::from_path(Path::new(path)).unwrap_err();
            assert!(matches!(err, Error::UnsupportedFormat(_)), "{path}");
        }
    }
}
