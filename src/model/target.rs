use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of the structure column shared by every table in the pipeline.
pub const STRUCTURE_COLUMN: &str = "CXSMILES";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown assay target '{0}' (expected one of HLM, KSOL, LogD, MDR1-MDCKII, MLM)")]
pub struct ParseTargetError(String);

/// One of the five assay endpoints scored by the competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// Human liver microsomal clearance (uL/min/mg).
    Hlm,
    /// Kinetic solubility (uM).
    Ksol,
    /// Lipophilicity.
    LogD,
    /// MDR1-MDCKII permeability (10^-6 cm/s).
    Mdr1Mdckii,
    /// Mouse liver microsomal clearance (uL/min/mg).
    Mlm,
}

/// Where a target's values live in the external ADME public set, and what
/// they are called once split out and once converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalColumns {
    pub raw: &'static str,
    pub dirty: &'static str,
    pub converted: &'static str,
}

impl Target {
    pub const ALL: [Target; 5] = [
        Target::Hlm,
        Target::Ksol,
        Target::LogD,
        Target::Mdr1Mdckii,
        Target::Mlm,
    ];

    /// Canonical column name, identical to the competition's identifier.
    pub fn column(&self) -> &'static str {
        match self {
            Target::Hlm => "HLM",
            Target::Ksol => "KSOL",
            Target::LogD => "LogD",
            Target::Mdr1Mdckii => "MDR1-MDCKII",
            Target::Mlm => "MLM",
        }
    }

    /// File-safe form used in dataset names.
    pub fn slug(&self) -> &'static str {
        match self {
            Target::Mdr1Mdckii => "MDR1_MDCKII",
            other => other.column(),
        }
    }

    /// Columns in the computational ADME public set. `LogD` comes from the
    /// TDC lipophilicity set instead and has none.
    pub fn external_columns(&self) -> Option<ExternalColumns> {
        match self {
            Target::Hlm => Some(ExternalColumns {
                raw: "LOG HLM_CLint (mL/min/kg)",
                dirty: "LOG_HLM_CLint",
                converted: "HLM_uL_min_mg",
            }),
            Target::Ksol => Some(ExternalColumns {
                raw: "LOG SOLUBILITY PH 6.8 (ug/mL)",
                dirty: "logS_ug_mL",
                converted: "KSOL_uM",
            }),
            Target::LogD => None,
            Target::Mdr1Mdckii => Some(ExternalColumns {
                raw: "LOG MDR1-MDCK ER (B-A/A-B)",
                dirty: "efflux",
                converted: "MDR1_MDCKII_10-6_cm_s",
            }),
            Target::Mlm => Some(ExternalColumns {
                raw: "LOG RLM_CLint (mL/min/kg)",
                dirty: "LOG_RLM_CLint",
                converted: "MLM_uL_min_mg",
            }),
        }
    }

    /// Value column of the converted external table.
    pub fn converted_column(&self) -> &'static str {
        self.external_columns()
            .map(|cols| cols.converted)
            .unwrap_or_else(|| self.column())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Target {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|t| t.column().eq_ignore_ascii_case(s) || t.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseTargetError(s.to_string()))
    }
}
