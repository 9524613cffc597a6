use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_pipeline_hints(err);
        collector.collect_store_hints(err);
        collector.collect_io_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_pipeline_hints(&mut self, err: &Error) {
        use admet_forge::PipelineError;

        let Some(pipeline_err) = err.downcast_ref::<PipelineError>() else {
            return;
        };

        match pipeline_err {
            PipelineError::Store(store_err) => {
                self.mark_typed();
                self.store_hints(store_err);
            }

            PipelineError::Table(_) => {
                self.mark_typed();
                self.add("A dataframe operation failed on one of the stage inputs");
                self.add("Run `aforge inspect <DATASET>` to check column types");
            }

            PipelineError::MissingColumn { column, table, .. } => {
                self.mark_typed();
                self.add(format!("The {table} has no '{column}' column"));
                self.add("Check that the right file was ingested for this source");
            }

            PipelineError::SchemaMismatch { target, .. } => {
                self.mark_typed();
                self.add(format!(
                    "Both {target} inputs must have the same columns after renaming"
                ));
                self.add(format!(
                    "Re-run `aforge split` and `aforge convert {target}` to regenerate them"
                ));
            }

            PipelineError::Constants(_) => {
                self.mark_typed();
                self.add("The --constants file is not valid TOML for conversion constants");
                self.add("Expected sections: [clearance], [solubility], [efflux]");
                self.add("Omitted keys fall back to their defaults");
            }

            PipelineError::Source(_) => {
                self.mark_typed();
                self.add("The competition export directory must contain train and test tables");
                self.add("Accepted names: train.csv, train.parquet, test.csv, test.parquet");
            }
        }
    }

    fn collect_store_hints(&mut self, err: &Error) {
        if let Some(store_err) = err.downcast_ref::<admet_forge::StoreError>() {
            self.mark_typed();
            self.store_hints(store_err);
        }
    }

    fn store_hints(&mut self, err: &admet_forge::StoreError) {
        use admet_forge::StoreError;

        match err {
            StoreError::Missing { name, .. } => {
                self.add(format!("Dataset '{name}' has not been produced yet"));
                self.add(upstream_hint(name));
            }

            StoreError::Read { source, .. } | StoreError::Save { source, .. } => {
                self.io_hints(source);
            }

            StoreError::UnknownDataset(_) => {
                self.add("Run `aforge datasets` to list registered names");
            }

            StoreError::CreateDir { source, .. } => {
                self.collect_std_io_hints(source);
            }

            StoreError::MissingHome { key, .. } => {
                self.add(format!("Export {key}=/path/to/pipeline or pass --home"));
                self.add("Data is kept under <home>/data/{raw,clean,dirty,combined}");
            }
        }
    }

    fn collect_io_hints(&mut self, err: &Error) {
        if let Some(io_err) = err.downcast_ref::<admet_forge::io::Error>() {
            self.mark_typed();
            self.io_hints(io_err);
        }
    }

    fn io_hints(&mut self, err: &admet_forge::io::Error) {
        use admet_forge::io::Error as IoError;

        match err {
            IoError::Io { source } => self.collect_std_io_hints(source),

            IoError::Table(_) => {
                self.add("The table could not be decoded or encoded");
                self.add("Verify the file is a CSV with a header row or a Parquet file");
            }

            IoError::UnsupportedFormat(_) => {
                self.add("Only .csv and .parquet paths are supported");
            }

            IoError::Smiles { position, .. } => {
                self.add(format!("The structure is malformed near character {position}"));
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("File contains invalid or corrupt data");
                self.add("Verify the file is not truncated or corrupted");
            }

            ErrorKind::WriteZero | ErrorKind::StorageFull => {
                self.add("Failed to write data (disk full?)");
                self.add("Check available disk space");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
            self.add("Ensure you have the required access rights");
        }
    }
}

/// Names the command that produces a dataset.
fn upstream_hint(name: &str) -> String {
    let command = if name == "asap_train_raw" || name == "asap_test_raw" {
        "aforge ingest competition <DIR>"
    } else if name == "computational_adme_raw" {
        "aforge ingest adme <FILE>"
    } else if name == "tdc_lipophilicity_az_raw" {
        "aforge ingest lipophilicity <FILE>"
    } else if name.starts_with("asap_") {
        "aforge split"
    } else if name.ends_with("_dirty") {
        "aforge split-external"
    } else if name.ends_with("_converted") || name.ends_with("_clean") {
        "aforge convert"
    } else {
        "aforge combine"
    };
    format!("Run `{command}` first, or `aforge run` for every stage")
}

fn error_chain_text(err: &Error) -> String {
    let mut text = String::new();

    text.push_str(&err.to_string());

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}
