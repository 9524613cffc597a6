use std::collections::BTreeMap;

use polars::prelude::*;
use tracing::{debug, warn};

use super::error::Error;
use super::require_columns;
use crate::model::target::{STRUCTURE_COLUMN, Target};

/// Structure column of the computational ADME public set.
pub const EXTERNAL_STRUCTURE_COLUMN: &str = "SMILES";

/// Splits the wide competition table into `{CXSMILES, <target>}` tables,
/// one per target column present, each free of nulls in the target column.
///
/// Targets whose column is absent produce no table.
pub fn split_by_targets(wide: &DataFrame) -> Result<BTreeMap<Target, DataFrame>, Error> {
    require_columns(wide, &[STRUCTURE_COLUMN], "competition training table")?;

    let mut tables = BTreeMap::new();
    for target in Target::ALL {
        let column = target.column();
        if wide.get_column_index(column).is_none() {
            warn!(target = %target, "target column absent from competition table; skipping");
            continue;
        }

        let narrow = select_non_null(wide, [col(STRUCTURE_COLUMN), col(column)], column)?;
        debug!(target = %target, rows = narrow.height(), "split competition target");
        tables.insert(target, narrow);
    }
    Ok(tables)
}

/// Splits the wide external ADME table into per-target tables named
/// `{CXSMILES, <dirty column>}`, dropping rows without a measurement.
///
/// LogD is not part of this source and never appears in the result.
pub fn split_external(wide: &DataFrame) -> Result<BTreeMap<Target, DataFrame>, Error> {
    require_columns(wide, &[EXTERNAL_STRUCTURE_COLUMN], "external ADME table")?;

    let mut tables = BTreeMap::new();
    for target in Target::ALL {
        let Some(columns) = target.external_columns() else {
            continue;
        };
        require_columns(wide, &[columns.raw], "external ADME table")?;

        let narrow = select_non_null(
            wide,
            [
                col(EXTERNAL_STRUCTURE_COLUMN).alias(STRUCTURE_COLUMN),
                col(columns.raw).alias(columns.dirty),
            ],
            columns.dirty,
        )?;
        debug!(target = %target, rows = narrow.height(), "split external target");
        tables.insert(target, narrow);
    }
    Ok(tables)
}

fn select_non_null<E: AsRef<[Expr]>>(
    df: &DataFrame,
    exprs: E,
    value_column: &str,
) -> Result<DataFrame, Error> {
    let narrow = df
        .clone()
        .lazy()
        .select(exprs)
        .filter(col(value_column).is_not_null())
        .collect()?;
    Ok(narrow)
}
