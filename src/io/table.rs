use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use super::{Error, Format};

/// Reads a table, keeping only the first `limit` rows when given.
pub fn read_table(path: &Path, limit: Option<usize>) -> Result<DataFrame, Error> {
    match Format::from_path(path)? {
        Format::Csv => read_csv(path, limit),
        Format::Parquet => read_parquet(path, limit),
    }
}

/// Writes `df` to `path`, replacing any existing file.
pub fn write_table(path: &Path, df: &mut DataFrame) -> Result<(), Error> {
    let format = Format::from_path(path)?;
    let mut file = File::create(path)?;
    match format {
        Format::Csv => {
            CsvWriter::new(&mut file).include_header(true).finish(df)?;
        }
        Format::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
    }
    Ok(())
}

fn read_csv(path: &Path, limit: Option<usize>) -> Result<DataFrame, Error> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_n_rows(limit)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

fn read_parquet(path: &Path, limit: Option<usize>) -> Result<DataFrame, Error> {
    let file = File::open(path)?;
    let df = ParquetReader::new(file).finish()?;
    Ok(match limit {
        Some(n) => df.head(Some(n)),
        None => df,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> DataFrame {
        df![
            "CXSMILES" => ["CCO", "c1ccccc1", "CCO"],
            "HLM" => [Some(6.25), None, Some(12.5)],
        ]
        .unwrap()
    }

    fn assert_round_trip(name: &str) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(name);
        let mut df = sample();

        write_table(&path, &mut df).unwrap();
        let back = read_table(&path, None).unwrap();

        assert_eq!(back.get_column_names(), df.get_column_names());
        assert_eq!(back.height(), df.height());
        assert_eq!(back.column("HLM").unwrap().null_count(), 1);
    }

    #[test]
    fn csv_round_trip_keeps_columns_and_rows() {
        assert_round_trip("t.csv");
    }

    #[test]
    fn parquet_round_trip_keeps_columns_and_rows() {
        assert_round_trip("t.parquet");
    }

    #[test]
    fn limit_truncates_rows() {
        let dir = tempdir().unwrap();
        for name in ["t.csv", "t.parquet"] {
            let path = dir.path().join(name);
            write_table(&path, &mut sample()).unwrap();
            assert_eq!(read_table(&path, Some(2)).unwrap().height(), 2, "{name}");
        }
    }

    #[test]
    fn unsupported_suffix_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.json");

        let err = write_table(&path, &mut sample()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        assert!(!path.exists());

        let err = read_table(&path, None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
