use super::error::Error;
use serde::Deserialize;
use std::sync::OnceLock;

const DEFAULT_CONSTANTS_TOML: &str = include_str!("../../resources/default.constants.toml");

static DEFAULT_CONSTANTS: OnceLock<ConversionConstants> = OnceLock::new();

/// Scaling constants used by the unit converters.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct ConversionConstants {
    #[serde(default)]
    pub clearance: ClearanceConstants,
    #[serde(default)]
    pub solubility: SolubilityConstants,
    #[serde(default)]
    pub efflux: EffluxConstants,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClearanceConstants {
    /// Microsomal protein per kilogram of body weight (mg/kg).
    #[serde(default = "default_microsomal_protein")]
    pub microsomal_protein_mg_per_kg: f64,
    #[serde(default = "default_clearance_scaling")]
    pub hlm_scaling_factor: f64,
    #[serde(default = "default_clearance_scaling")]
    pub mlm_scaling_factor: f64,
}

fn default_microsomal_protein() -> f64 {
    800.0
}
fn default_clearance_scaling() -> f64 {
    0.5
}

impl Default for ClearanceConstants {
    fn default() -> Self {
        Self {
            microsomal_protein_mg_per_kg: default_microsomal_protein(),
            hlm_scaling_factor: default_clearance_scaling(),
            mlm_scaling_factor: default_clearance_scaling(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SolubilityConstants {
    #[serde(default = "default_molar_mass_scale")]
    pub molar_mass_scale: f64,
}

fn default_molar_mass_scale() -> f64 {
    1e-6
}

impl Default for SolubilityConstants {
    fn default() -> Self {
        Self {
            molar_mass_scale: default_molar_mass_scale(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EffluxConstants {
    #[serde(default = "default_efflux_unit_scale")]
    pub unit_scale: f64,
    #[serde(default = "default_efflux_scaling")]
    pub scaling_factor: f64,
}

fn default_efflux_unit_scale() -> f64 {
    1e-6
}
fn default_efflux_scaling() -> f64 {
    10.0
}

impl Default for EffluxConstants {
    fn default() -> Self {
        Self {
            unit_scale: default_efflux_unit_scale(),
            scaling_factor: default_efflux_scaling(),
        }
    }
}

/// Parses an override document, falling back to the embedded defaults when
/// none is given. Keys absent from the override keep their default values.
pub fn load_constants(custom_toml: Option<&str>) -> Result<ConversionConstants, Error> {
    match custom_toml {
        Some(toml) => {
            let constants: ConversionConstants = toml::from_str(toml)?;
            Ok(constants)
        }
        None => Ok(get_default_constants().clone()),
    }
}

pub fn get_default_constants() -> &'static ConversionConstants {
    DEFAULT_CONSTANTS.get_or_init(|| {
        toml::from_str(DEFAULT_CONSTANTS_TOML).unwrap_or_else(|_| ConversionConstants::default())
    })
}
