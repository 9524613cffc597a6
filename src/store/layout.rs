use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::Error;

/// On-disk layout of the pipeline's data directory.
///
/// ```text
/// <home>/data/
///     raw/       exports and public sets as ingested
///     dirty/     per-target slices of external data, before and after conversion
///     clean/     per-target competition tables and prepared lipophilicity data
///     combined/  training tables handed to the model trainer
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    data: PathBuf,
}

impl DataLayout {
    /// Environment variable naming the pipeline root.
    pub const HOME_VAR: &'static str = "ADMET_FORGE_HOME";

    pub fn new(home: impl AsRef<Path>) -> Self {
        Self {
            data: home.as_ref().join("data"),
        }
    }

    /// Layout rooted at `$ADMET_FORGE_HOME`.
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var_os(Self::HOME_VAR) {
            Some(home) if !home.is_empty() => Ok(Self::new(PathBuf::from(home))),
            _ => Err(Error::MissingHome {
                key: Self::HOME_VAR,
                message: "set it to the pipeline root directory or pass --home",
            }),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.data.join("raw")
    }

    pub fn clean_dir(&self) -> PathBuf {
        self.data.join("clean")
    }

    pub fn dirty_dir(&self) -> PathBuf {
        self.data.join("dirty")
    }

    pub fn combined_dir(&self) -> PathBuf {
        self.data.join("combined")
    }

    /// Creates the four stage directories if they are absent.
    pub fn ensure(&self) -> Result<(), Error> {
        for dir in [
            self.raw_dir(),
            self.clean_dir(),
            self.dirty_dir(),
            self.combined_dir(),
        ] {
            fs::create_dir_all(&dir).map_err(|source| Error::CreateDir {
                path: dir.clone(),
                source,
            })?;
            debug!(path = %dir.display(), "data directory ready");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn ensure_creates_stage_directories() {
        let home = tempdir().unwrap();
        let layout = DataLayout::new(home.path());
        layout.ensure().unwrap();

        for dir in ["raw", "clean", "dirty", "combined"] {
            assert!(home.path().join("data").join(dir).is_dir(), "{dir}");
        }
        // Idempotent.
        layout.ensure().unwrap();
    }

    #[test]
    fn stage_directories_live_under_data() {
        let layout = DataLayout::new("/srv/admet");
        assert_eq!(layout.data_dir(), Path::new("/srv/admet/data"));
        assert_eq!(layout.combined_dir(), PathBuf::from("/srv/admet/data/combined"));
    }
}
