use polars::prelude::*;

use super::error::Error;
use crate::model::target::Target;

/// Stacks the converted external table on top of the competition table.
///
/// The external value column is renamed to the target's canonical name
/// first. Both tables must then have the same column set; the external one
/// is reordered to the competition's column order. No deduplication: the
/// result has `external.height() + competition.height()` rows.
pub fn combine_tables(
    target: Target,
    mut external: DataFrame,
    competition: &DataFrame,
) -> Result<DataFrame, Error> {
    let canonical = target.column();
    let converted = target.converted_column();
    if converted != canonical && external.get_column_index(converted).is_some() {
        external.rename(converted, canonical.into())?;
    }

    let external_columns = column_names(&external);
    let competition_columns = column_names(competition);

    let mut lhs = external_columns.clone();
    let mut rhs = competition_columns.clone();
    lhs.sort();
    rhs.sort();
    if lhs != rhs {
        return Err(Error::SchemaMismatch {
            target,
            external: external_columns,
            competition: competition_columns,
        });
    }

    let mut combined = with_float_values(external.select(competition_columns)?, canonical)?;
    let competition = with_float_values(competition.clone(), canonical)?;
    combined.vstack_mut(&competition)?;
    Ok(combined)
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

fn with_float_values(mut df: DataFrame, column: &str) -> Result<DataFrame, Error> {
    let values = df.column(column)?.cast(&DataType::Float64)?;
    df.with_column(values)?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_every_row_including_duplicates() {
        let external = df!["CXSMILES" => ["CCO", "CCN"], "HLM_uL_min_mg" => [6.25, 1.0]].unwrap();
        let competition = df!["CXSMILES" => ["CCO", "CCO", "CCC"], "HLM" => [7.0, 8.0, 9.0]].unwrap();

        let combined = combine_tables(Target::Hlm, external, &competition).unwrap();
        assert_eq!(combined.height(), 5);

        let names: Vec<&str> = combined.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["CXSMILES", "HLM"]);

        let first: Vec<f64> = combined
            .column("HLM")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(first, [6.25, 1.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn reorders_external_columns() {
        let external = df!["LogD" => [1.5], "CXSMILES" => ["CCO"]].unwrap();
        let competition = df!["CXSMILES" => ["CCN"], "LogD" => [2.5]].unwrap();

        let combined = combine_tables(Target::LogD, external, &competition).unwrap();
        assert_eq!(combined.height(), 2);
        assert_eq!(combined.get_column_names()[0].as_str(), "CXSMILES");
    }

    #[test]
    fn integer_values_are_widened() {
        let external = df!["CXSMILES" => ["C"], "KSOL_uM" => [12.5]].unwrap();
        let competition = df!["CXSMILES" => ["CC"], "KSOL" => [300i64]].unwrap();

        let combined = combine_tables(Target::Ksol, external, &competition).unwrap();
        assert_eq!(combined.column("KSOL").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        let external = df!["CXSMILES" => ["C"], "HLM_uL_min_mg" => [1.0], "extra" => [0]].unwrap();
        let competition = df!["CXSMILES" => ["CC"], "HLM" => [2.0]].unwrap();

        match combine_tables(Target::Hlm, external, &competition) {
            Err(Error::SchemaMismatch {
                external,
                competition,
                ..
            }) => {
                assert_eq!(external, ["CXSMILES", "HLM", "extra"]);
                assert_eq!(competition, ["CXSMILES", "HLM"]);
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }
}
