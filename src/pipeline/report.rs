use std::fmt;

use tracing::{info, warn};

use crate::model::target::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Split,
    SplitExternal,
    Convert,
    Combine,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Split => write!(f, "split"),
            Stage::SplitExternal => write!(f, "split-external"),
            Stage::Convert => write!(f, "convert"),
            Stage::Combine => write!(f, "combine"),
        }
    }
}

/// Row accounting for one stage applied to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub target: Target,
    pub rows_in: usize,
    pub rows_out: usize,
}

impl StageReport {
    pub fn new(stage: Stage, target: Target, rows_in: usize, rows_out: usize) -> Self {
        Self {
            stage,
            target,
            rows_in,
            rows_out,
        }
    }

    pub fn dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }

    /// Emits the summary; drops are a warning.
    pub fn log(&self) {
        match self.dropped() {
            0 => info!(
                stage = %self.stage,
                target = %self.target,
                rows = self.rows_out,
                "stage complete"
            ),
            dropped => warn!(
                stage = %self.stage,
                target = %self.target,
                rows_in = self.rows_in,
                rows_out = self.rows_out,
                dropped,
                "stage dropped rows"
            ),
        }
    }
}
