//! Error types for the dataset store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating, reading or saving named datasets.
#[derive(Debug, Error)]
pub enum Error {
    /// The dataset's file does not exist yet.
    ///
    /// Usually means the stage that produces it has not been run.
    #[error("dataset '{name}' not found at '{}'", path.display())]
    Missing {
        /// Registry name of the dataset.
        name: String,
        /// Expected file location.
        path: PathBuf,
    },

    /// Reading an existing dataset failed.
    #[error("failed to read dataset '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: crate::io::Error,
    },

    /// Writing a dataset failed.
    #[error("failed to save dataset '{name}': {source}")]
    Save {
        name: String,
        #[source]
        source: crate::io::Error,
    },

    /// No dataset with this name is registered.
    #[error("unknown dataset '{0}'")]
    UnknownDataset(String),

    /// A data directory could not be created.
    #[error("failed to create directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The root directory was neither given nor set in the environment.
    #[error("environment variable {key} is not set: {message}")]
    MissingHome {
        key: &'static str,
        message: &'static str,
    },
}
