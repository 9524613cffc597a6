use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::info;

use super::error::Error;
use super::require_columns;
use crate::io::{self, Format};
use crate::model::target::STRUCTURE_COLUMN;
use crate::store::NamedDataset;

/// Provider of the competition's labeled train/test split.
pub trait CompetitionSource {
    /// Wide training table: structure column plus one column per target.
    fn train(&self) -> Result<DataFrame, Error>;

    /// Test table; only its structure column is kept on ingestion.
    fn test(&self) -> Result<DataFrame, Error>;
}

/// A directory holding `train.{csv,parquet}` and `test.{csv,parquet}` as
/// exported by the competition client.
#[derive(Debug, Clone)]
pub struct CachedCompetition {
    dir: PathBuf,
}

impl CachedCompetition {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn locate(&self, stem: &str) -> Result<PathBuf, Error> {
        [Format::Parquet, Format::Csv]
            .iter()
            .map(|format| self.dir.join(format!("{stem}.{}", format.extension())))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                Error::Source(format!(
                    "no {stem}.csv or {stem}.parquet in '{}'",
                    self.dir.display()
                ))
            })
    }

    fn load(&self, stem: &str) -> Result<DataFrame, Error> {
        let path = self.locate(stem)?;
        io::read_table(&path, None)
            .map_err(|e| Error::Source(format!("failed to read '{}': {e}", path.display())))
    }
}

impl CompetitionSource for CachedCompetition {
    fn train(&self) -> Result<DataFrame, Error> {
        self.load("train")
    }

    fn test(&self) -> Result<DataFrame, Error> {
        self.load("test")
    }
}

/// Saves the source's train table and the structure column of its test
/// table. Returns the row counts of both.
pub fn ingest_competition(
    source: &impl CompetitionSource,
    train: &NamedDataset,
    test: &NamedDataset,
) -> Result<(usize, usize), Error> {
    let mut train_df = source.train()?;
    require_columns(&train_df, &[STRUCTURE_COLUMN], "competition training table")?;
    train.save(&mut train_df)?;

    let test_df = source.test()?;
    require_columns(&test_df, &[STRUCTURE_COLUMN], "competition test table")?;
    let mut test_df = test_df.select([STRUCTURE_COLUMN])?;
    test.save(&mut test_df)?;

    info!(
        train = train_df.height(),
        test = test_df.height(),
        "ingested competition split"
    );
    Ok((train_df.height(), test_df.height()))
}

/// Copies an external table from `path` into its raw dataset, re-encoding
/// it if the suffixes differ.
pub fn ingest_table(path: &Path, dataset: &NamedDataset) -> Result<usize, Error> {
    let mut df = io::read_table(path, None).map_err(|e| {
        Error::Source(format!("failed to read '{}': {e}", path.display()))
    })?;
    dataset.save(&mut df)?;
    Ok(df.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct InMemory;

    impl CompetitionSource for InMemory {
        fn train(&self) -> Result<DataFrame, Error> {
            Ok(df!["CXSMILES" => ["CCO", "CCN"], "HLM" => [Some(1.0), None]]?)
        }

        fn test(&self) -> Result<DataFrame, Error> {
            Ok(df!["CXSMILES" => ["CCC"], "Set" => ["test"]]?)
        }
    }

    #[test]
    fn test_table_is_reduced_to_structures() {
        let dir = tempdir().unwrap();
        let train = NamedDataset::new("asap_train_raw", dir.path().join("train.csv"));
        let test = NamedDataset::new("asap_test_raw", dir.path().join("test.csv"));

        let counts = ingest_competition(&InMemory, &train, &test).unwrap();
        assert_eq!(counts, (2, 1));

        let saved = test.read(None).unwrap();
        assert_eq!(saved.width(), 1);
        assert_eq!(saved.get_column_names()[0].as_str(), "CXSMILES");
        assert_eq!(train.read(None).unwrap().width(), 2);
    }

    #[test]
    fn cached_competition_prefers_parquet_and_reports_absence() {
        let dir = tempdir().unwrap();
        let source = CachedCompetition::new(dir.path());
        assert!(matches!(source.train(), Err(Error::Source(_))));

        let mut df = df!["CXSMILES" => ["C"], "LogD" => [0.3]].unwrap();
        io::write_table(&dir.path().join("train.csv"), &mut df).unwrap();
        let mut df = df!["CXSMILES" => ["C", "CC"], "LogD" => [0.3, 0.4]].unwrap();
        io::write_table(&dir.path().join("train.parquet"), &mut df).unwrap();

        assert_eq!(source.train().unwrap().height(), 2);
    }

    #[test]
    fn external_table_is_copied() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lipo.csv");
        let mut df = df!["Drug" => ["CCO"], "Y" => [1.1]].unwrap();
        io::write_table(&input, &mut df).unwrap();

        let dataset = NamedDataset::new("tdc_lipophilicity_az_raw", dir.path().join("raw.parquet"));
        assert_eq!(ingest_table(&input, &dataset).unwrap(), 1);
        assert!(dataset.exists());
    }
}
