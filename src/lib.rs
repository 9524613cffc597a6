//! Data preparation for ADME property prediction.
//! It gathers labeled molecules from a competition export and from public
//! ADME datasets, harmonizes their units, and produces one training table
//! per assay target for an external model trainer.
//!
//! # Features
//!
//! - **Named datasets** — Every table has a registry name and a path; CSV or
//!   Parquet is chosen by file suffix
//! - **Target splitting** — Wide tables are split into null-free
//!   `{CXSMILES, <target>}` tables
//! - **Unit conversion** — Clearance, solubility and permeability are brought
//!   into the competition's units with configurable constants
//! - **Combination** — External and competition data are stacked per target
//! - **Molecular weight** — A built-in SMILES reader supplies the molar masses
//!   needed for solubility conversion
//!
//! # Quick Start
//!
//! The converters are pure functions over [`polars`] data frames:
//!
//! ```
//! use admet_forge::pipeline::{convert_hlm, get_default_constants};
//! use polars::prelude::*;
//!
//! let external = df![
//!     "CXSMILES" => ["CCO"],
//!     "LOG_HLM_CLint" => [1.0],
//! ]?;
//!
//! let converted = convert_hlm(&external, get_default_constants())?;
//! let hlm = converted
//!     .column("HLM_uL_min_mg")?
//!     .as_materialized_series()
//!     .f64()?
//!     .get(0);
//! assert!((hlm.unwrap_or_default() - 6.25).abs() < 1e-9);
//!
//! let ethanol = admet_forge::io::smiles::molecular_weight("CCO")?;
//! assert!((ethanol - 46.069).abs() < 1e-2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! To run the whole pipeline against a data directory, build a
//! [`DatasetRegistry`] from a [`DataLayout`] and hand it to a
//! [`Pipeline`](pipeline::Pipeline).
//!
//! # Module Organization
//!
//! - [`io`] — Table files (CSV, Parquet) and SMILES line notation
//! - [`store`] — Data directory layout and the dataset registry
//! - [`pipeline`] — Split, convert and combine stages
//!
//! # Data Types
//!
//! - [`Target`] — The five assay endpoints
//! - [`Molecule`] — Molecular graph read from SMILES
//! - [`Atom`], [`Bond`] — Graph members
//! - [`Element`] — Chemical element (H through Og) with average mass
//! - [`BondOrder`] — Single, Double, Triple, Quadruple or Aromatic

mod model;

pub mod io;
pub mod pipeline;
pub mod store;

pub use model::atom::Atom;
pub use model::molecule::{Bond, Molecule};
pub use model::target::{ExternalColumns, ParseTargetError, STRUCTURE_COLUMN, Target};
pub use model::types::{BondOrder, Element, ParseElementError};

pub use store::{DataLayout, DatasetRegistry, NamedDataset};

pub use pipeline::Error as PipelineError;
pub use store::Error as StoreError;
