//! Named dataset store.
//!
//! Every table the pipeline touches has a logical name and a file path,
//! declared once in a [`DatasetRegistry`] built from a [`DataLayout`]. The
//! encoding of each file follows its suffix (see [`crate::io::Format`]).

mod error;
mod layout;
mod registry;

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::info;

use crate::io;

pub use error::Error;
pub use layout::DataLayout;
pub use registry::{
    ASAP_TEST_RAW, ASAP_TRAIN_RAW, COMPUTATIONAL_ADME_RAW, DatasetRegistry,
    TDC_LIPOPHILICITY_CLEAN, TDC_LIPOPHILICITY_RAW,
};

/// A logical dataset name bound to a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDataset {
    name: String,
    path: PathBuf,
}

impl NamedDataset {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Writes `df` to this dataset's path, replacing any previous contents.
    pub fn save(&self, df: &mut DataFrame) -> Result<(), Error> {
        io::write_table(&self.path, df).map_err(|source| Error::Save {
            name: self.name.clone(),
            source,
        })?;
        info!(
            dataset = %self.name,
            path = %self.path.display(),
            rows = df.height(),
            columns = df.width(),
            "saved dataset"
        );
        Ok(())
    }

    /// Reads the dataset, keeping only the first `limit` rows when given.
    pub fn read(&self, limit: Option<usize>) -> Result<DataFrame, Error> {
        // Suffix errors take precedence over a missing file.
        io::Format::from_path(&self.path).map_err(|source| Error::Read {
            name: self.name.clone(),
            source,
        })?;
        if !self.exists() {
            return Err(Error::Missing {
                name: self.name.clone(),
                path: self.path.clone(),
            });
        }

        let df = io::read_table(&self.path, limit).map_err(|source| Error::Read {
            name: self.name.clone(),
            source,
        })?;
        info!(
            dataset = %self.name,
            path = %self.path.display(),
            rows = df.height(),
            columns = df.width(),
            "read dataset"
        );
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_read_with_limit() {
        let dir = tempdir().unwrap();
        let dataset = NamedDataset::new("sample", dir.path().join("sample.parquet"));
        let mut df = df!["CXSMILES" => ["C", "CC", "CCC"], "LogD" => [1.0, 2.0, 3.0]].unwrap();

        dataset.save(&mut df).unwrap();
        assert!(dataset.exists());
        assert_eq!(dataset.read(None).unwrap().height(), 3);
        assert_eq!(dataset.read(Some(1)).unwrap().height(), 1);
    }

    #[test]
    fn missing_file_names_the_dataset() {
        let dir = tempdir().unwrap();
        let dataset = NamedDataset::new("asap_HLM_train", dir.path().join("absent.csv"));

        match dataset.read(None) {
            Err(Error::Missing { name, .. }) => assert_eq!(name, "asap_HLM_train"),
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_suffix_fails_without_creating_a_file() {
        let dir = tempdir().unwrap();
        let dataset = NamedDataset::new("bad", dir.path().join("bad.json"));
        let mut df = df!["CXSMILES" => ["C"]].unwrap();

        assert!(matches!(dataset.save(&mut df), Err(Error::Save { .. })));
        assert!(!dataset.path().exists());
        assert!(matches!(dataset.read(None), Err(Error::Read { .. })));
    }
}
