//! Core data structures shared by the chemistry and table layers.
//!
//! - [`atom`] – Atom with element, aromaticity, isotope, charge and written hydrogens.
//! - [`types`] – Periodic table elements and bond order classifications.
//! - [`molecule`] – Molecular graph with implicit-hydrogen perception and molecular weight.
//! - [`target`] – The closed set of assay targets and their column names per source.

pub mod atom;
pub mod molecule;
pub mod target;
pub mod types;
