use std::collections::BTreeMap;
use std::path::PathBuf;

use super::NamedDataset;
use super::error::Error;
use super::layout::DataLayout;
use crate::io::Format;
use crate::model::target::Target;

pub const ASAP_TRAIN_RAW: &str = "asap_train_raw";
pub const ASAP_TEST_RAW: &str = "asap_test_raw";
pub const COMPUTATIONAL_ADME_RAW: &str = "computational_adme_raw";
pub const TDC_LIPOPHILICITY_RAW: &str = "tdc_lipophilicity_az_raw";
pub const TDC_LIPOPHILICITY_CLEAN: &str = "tdc_lipophilicity_az_clean";

/// Every dataset the pipeline reads or writes, declared once.
///
/// Raw datasets are always CSV, matching how the sources are distributed.
/// Derived datasets use the encoding chosen at construction.
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    layout: DataLayout,
    format: Format,
    datasets: BTreeMap<String, NamedDataset>,
}

impl DatasetRegistry {
    pub fn new(layout: &DataLayout, format: Format) -> Self {
        let mut registry = Self {
            layout: layout.clone(),
            format,
            datasets: BTreeMap::new(),
        };

        let raw = layout.raw_dir();
        registry.insert(ASAP_TRAIN_RAW, raw.join("asap_train_raw.csv"));
        registry.insert(ASAP_TEST_RAW, raw.join("asap_test_raw.csv"));
        registry.insert(COMPUTATIONAL_ADME_RAW, raw.join("ADME_public_set_3521.csv"));
        registry.insert(TDC_LIPOPHILICITY_RAW, raw.join("tdc_lipophilicity_az.csv"));

        let clean = registry.derived(layout.clean_dir(), "tdc_lipophilicity_az");
        registry.insert(TDC_LIPOPHILICITY_CLEAN, clean);

        for target in Target::ALL {
            let slug = target.slug();
            if target.external_columns().is_some() {
                for stage in ["dirty", "converted"] {
                    let name = format!("computational_adme_{slug}_{stage}");
                    let path = registry.derived(layout.dirty_dir(), &name);
                    registry.insert(&name, path);
                }
            }

            let name = format!("asap_{slug}_train");
            let path = registry.derived(layout.clean_dir(), &name);
            registry.insert(&name, path);

            let name = format!("admet_{slug}_train");
            let path = registry.derived(layout.combined_dir(), &name);
            registry.insert(&name, path);
        }

        registry
    }

    fn derived(&self, dir: PathBuf, stem: &str) -> PathBuf {
        dir.join(format!("{stem}.{}", self.format.extension()))
    }

    fn insert(&mut self, name: &str, path: PathBuf) {
        self.datasets
            .insert(name.to_string(), NamedDataset::new(name, path));
    }

    fn lookup(&self, name: &str) -> &NamedDataset {
        // Only called with names registered in `new`.
        &self.datasets[name]
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn get(&self, name: &str) -> Result<&NamedDataset, Error> {
        self.datasets
            .get(name)
            .ok_or_else(|| Error::UnknownDataset(name.to_string()))
    }

    /// All datasets, ordered by name.
    pub fn all(&self) -> impl Iterator<Item = &NamedDataset> {
        self.datasets.values()
    }

    pub fn competition_train_raw(&self) -> &NamedDataset {
        self.lookup(ASAP_TRAIN_RAW)
    }

    pub fn competition_test_raw(&self) -> &NamedDataset {
        self.lookup(ASAP_TEST_RAW)
    }

    pub fn adme_raw(&self) -> &NamedDataset {
        self.lookup(COMPUTATIONAL_ADME_RAW)
    }

    pub fn lipophilicity_raw(&self) -> &NamedDataset {
        self.lookup(TDC_LIPOPHILICITY_RAW)
    }

    /// Competition per-target training table (`asap_<slug>_train`).
    pub fn competition_target(&self, target: Target) -> &NamedDataset {
        self.lookup(&format!("asap_{}_train", target.slug()))
    }

    /// External per-target slice before conversion. `None` for LogD, whose
    /// raw source is already per-target.
    pub fn external_dirty(&self, target: Target) -> Option<&NamedDataset> {
        target
            .external_columns()
            .map(|_| self.lookup(&format!("computational_adme_{}_dirty", target.slug())))
    }

    /// External per-target table after unit conversion.
    pub fn external_converted(&self, target: Target) -> &NamedDataset {
        match target.external_columns() {
            Some(_) => self.lookup(&format!("computational_adme_{}_converted", target.slug())),
            None => self.lookup(TDC_LIPOPHILICITY_CLEAN),
        }
    }

    /// Combined training table (`admet_<slug>_train`).
    pub fn combined(&self, target: Target) -> &NamedDataset {
        self.lookup(&format!("admet_{}_train", target.slug()))
    }
}
