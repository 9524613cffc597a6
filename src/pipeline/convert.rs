//! Unit converters for external per-target tables.
//!
//! Each converter maps a `{CXSMILES, <dirty column>}` table to
//! `{CXSMILES, <converted column>}`. Rows whose input is null, whose
//! structure cannot be read, or whose result is not finite are dropped.

use polars::prelude::*;
use rayon::prelude::*;
use tracing::debug;

use super::constants::ConversionConstants;
use super::error::Error;
use super::require_columns;
use crate::io::smiles;
use crate::model::target::{STRUCTURE_COLUMN, Target};

/// Structure and value columns of the TDC lipophilicity set.
pub const LIPOPHILICITY_STRUCTURE_COLUMN: &str = "Drug";
pub const LIPOPHILICITY_VALUE_COLUMN: &str = "Y";

/// Intrinsic clearance, log mL/min/kg to uL/min/mg microsomal protein.
pub fn clearance(log_clint: f64, microsomal_protein_mg_per_kg: f64, scaling: f64) -> f64 {
    10f64.powf(log_clint) * 1000.0 / microsomal_protein_mg_per_kg * scaling
}

/// Solubility, log ug/mL to uM given a molar mass in g/mol.
pub fn solubility(log_s: f64, molar_mass: f64, molar_mass_scale: f64) -> f64 {
    10f64.powf(log_s) / (molar_mass * molar_mass_scale)
}

/// MDR1-MDCK efflux ratio to permeability in 10^-6 cm/s.
pub fn permeability(efflux: f64, unit_scale: f64, scaling: f64) -> f64 {
    efflux.log10() * unit_scale * scaling
}

pub fn convert_hlm(df: &DataFrame, constants: &ConversionConstants) -> Result<DataFrame, Error> {
    let c = &constants.clearance;
    map_values(df, Target::Hlm, |x| {
        clearance(x, c.microsomal_protein_mg_per_kg, c.hlm_scaling_factor)
    })
}

pub fn convert_mlm(df: &DataFrame, constants: &ConversionConstants) -> Result<DataFrame, Error> {
    let c = &constants.clearance;
    map_values(df, Target::Mlm, |x| {
        clearance(x, c.microsomal_protein_mg_per_kg, c.mlm_scaling_factor)
    })
}

pub fn convert_mdr1_mdckii(
    df: &DataFrame,
    constants: &ConversionConstants,
) -> Result<DataFrame, Error> {
    let c = &constants.efflux;
    map_values(df, Target::Mdr1Mdckii, |x| {
        permeability(x, c.unit_scale, c.scaling_factor)
    })
}

/// Solubility needs each row's molar mass, computed from its structure on
/// the rayon pool.
pub fn convert_ksol(df: &DataFrame, constants: &ConversionConstants) -> Result<DataFrame, Error> {
    let (input, output) = columns(Target::Ksol);
    require_columns(df, &[STRUCTURE_COLUMN, input], "KSOL table")?;

    let structures = df.column(STRUCTURE_COLUMN)?.cast(&DataType::String)?;
    let structures: Vec<Option<&str>> = structures.as_materialized_series().str()?.into_iter().collect();
    let values = float_values(df, input)?;
    let scale = constants.solubility.molar_mass_scale;

    let converted: Vec<Option<f64>> = structures
        .par_iter()
        .zip(values.par_iter())
        .map(|(structure, value)| {
            let (structure, log_s) = ((*structure)?, (*value)?);
            match smiles::molecular_weight(structure) {
                Ok(mw) => Some(solubility(log_s, mw, scale)),
                Err(e) => {
                    debug!(error = %e, "no molar mass; dropping row");
                    None
                }
            }
        })
        .collect();

    assemble(df, output, converted)
}

/// Renames the TDC `Drug`/`Y` columns to `CXSMILES`/`LogD`. Values are
/// already in the competition's units.
pub fn prep_lipophilicity(df: &DataFrame) -> Result<DataFrame, Error> {
    require_columns(
        df,
        &[LIPOPHILICITY_STRUCTURE_COLUMN, LIPOPHILICITY_VALUE_COLUMN],
        "lipophilicity table",
    )?;
    let value = Target::LogD.column();
    let prepared = df
        .clone()
        .lazy()
        .select([
            col(LIPOPHILICITY_STRUCTURE_COLUMN).alias(STRUCTURE_COLUMN),
            col(LIPOPHILICITY_VALUE_COLUMN)
                .cast(DataType::Float64)
                .alias(value),
        ])
        .filter(col(value).is_not_null())
        .collect()?;
    Ok(prepared)
}

/// Applies the converter for `target`.
pub fn convert(
    target: Target,
    df: &DataFrame,
    constants: &ConversionConstants,
) -> Result<DataFrame, Error> {
    match target {
        Target::Hlm => convert_hlm(df, constants),
        Target::Ksol => convert_ksol(df, constants),
        Target::LogD => prep_lipophilicity(df),
        Target::Mdr1Mdckii => convert_mdr1_mdckii(df, constants),
        Target::Mlm => convert_mlm(df, constants),
    }
}

fn columns(target: Target) -> (&'static str, &'static str) {
    match target.external_columns() {
        Some(cols) => (cols.dirty, cols.converted),
        None => (target.column(), target.column()),
    }
}

fn float_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>, Error> {
    let values = df.column(column)?.cast(&DataType::Float64)?;
    Ok(values.as_materialized_series().f64()?.into_iter().collect())
}

fn map_values(df: &DataFrame, target: Target, f: impl Fn(f64) -> f64) -> Result<DataFrame, Error> {
    let (input, output) = columns(target);
    require_columns(df, &[STRUCTURE_COLUMN, input], &format!("{target} table"))?;

    let converted = float_values(df, input)?
        .into_iter()
        .map(|value| value.map(&f))
        .collect();
    assemble(df, output, converted)
}

/// Pairs converted values with their structures by position and keeps the
/// finite ones.
fn assemble(df: &DataFrame, output: &str, converted: Vec<Option<f64>>) -> Result<DataFrame, Error> {
    let values: Float64Chunked = converted
        .into_iter()
        .map(|value| value.filter(|v| v.is_finite()))
        .collect();
    let values = values.with_name(output.into()).into_series();
    let keep = values.is_not_null();

    let structures = df.column(STRUCTURE_COLUMN)?.clone();
    let table = DataFrame::new(vec![structures, values.into()])?;
    Ok(table.filter(&keep)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::constants::get_default_constants;

    fn value_column(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0), "{a} != {b}");
    }

    #[test]
    fn hlm_reference_value() {
        let df = df!["CXSMILES" => ["CCO"], "LOG_HLM_CLint" => [1.0]].unwrap();
        let out = convert_hlm(&df, get_default_constants()).unwrap();

        let names: Vec<&str> = out.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["CXSMILES", "HLM_uL_min_mg"]);
        assert_close(value_column(&out, "HLM_uL_min_mg")[0], 6.25);
    }

    #[test]
    fn clearance_is_strictly_increasing() {
        let xs: Vec<f64> = (-20..=30).map(|i| f64::from(i) * 0.1).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| clearance(x, 800.0, 0.5)).collect();
        assert!(ys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn mlm_uses_its_own_scaling() {
        let mut constants = get_default_constants().clone();
        constants.clearance.mlm_scaling_factor = 1.0;
        let df = df!["CXSMILES" => ["C"], "LOG_RLM_CLint" => [2.0]].unwrap();

        let out = convert_mlm(&df, &constants).unwrap();
        assert_close(value_column(&out, "MLM_uL_min_mg")[0], 100.0 * 1000.0 / 800.0);
    }

    #[test]
    fn null_inputs_are_dropped() {
        let df = df![
            "CXSMILES" => ["C", "CC", "CCC"],
            "LOG_HLM_CLint" => [Some(0.0), None, Some(1.0)],
        ]
        .unwrap();
        let out = convert_hlm(&df, get_default_constants()).unwrap();
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn ksol_uses_molar_mass() {
        let df = df!["CXSMILES" => ["CCO", "c1ccccc1"], "logS_ug_mL" => [1.0, 2.0]].unwrap();
        let constants = get_default_constants();
        let out = convert_ksol(&df, constants).unwrap();

        let values = value_column(&out, "KSOL_uM");
        let ethanol = smiles::molecular_weight("CCO").unwrap();
        let benzene = smiles::molecular_weight("c1ccccc1").unwrap();
        assert_close(values[0], solubility(1.0, ethanol, 1e-6));
        assert_close(values[1], 100.0 / (benzene * 1e-6));
    }

    #[test]
    fn unparseable_structures_are_dropped_in_order() {
        let df = df![
            "CXSMILES" => ["CCO", "not a smiles(", "C1CC", "c1ccccc1"],
            "logS_ug_mL" => [1.0, 1.0, 1.0, 1.0],
        ]
        .unwrap();
        let out = convert_ksol(&df, get_default_constants()).unwrap();

        assert_eq!(out.height(), 2);
        let kept: Vec<&str> = out
            .column("CXSMILES")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(kept, ["CCO", "c1ccccc1"]);
    }

    #[test]
    fn non_positive_efflux_is_dropped() {
        let df = df![
            "CXSMILES" => ["C", "CC", "CCC"],
            "efflux" => [10.0, 0.0, -1.0],
        ]
        .unwrap();
        let out = convert_mdr1_mdckii(&df, get_default_constants()).unwrap();

        assert_eq!(out.height(), 1);
        assert_close(value_column(&out, "MDR1_MDCKII_10-6_cm_s")[0], 1e-5);
    }

    #[test]
    fn lipophilicity_is_renamed() {
        let df = df!["Drug_ID" => ["a", "b"], "Drug" => ["CCO", "CCN"], "Y" => [Some(1.2), None]].unwrap();
        let out = convert(Target::LogD, &df, get_default_constants()).unwrap();

        let names: Vec<&str> = out.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["CXSMILES", "LogD"]);
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn missing_input_column_is_an_error() {
        let df = df!["CXSMILES" => ["C"], "HLM" => [1.0]].unwrap();
        assert!(matches!(
            convert(Target::Hlm, &df, get_default_constants()),
            Err(Error::MissingColumn { .. })
        ));
    }
}
