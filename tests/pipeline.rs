use std::fs;
use std::path::Path;

use admet_forge::io::Format;
use admet_forge::pipeline::{
    CachedCompetition, Pipeline, Stage, get_default_constants, ingest_competition, ingest_table,
};
use admet_forge::{DataLayout, DatasetRegistry, StoreError, Target};
use polars::prelude::*;
use tempfile::tempdir;

fn write(path: &Path, text: &str) {
    fs::write(path, text).unwrap();
}

fn stage_sources(dir: &Path) {
    write(
        &dir.join("train.csv"),
        "CXSMILES,HLM,KSOL,LogD,MDR1-MDCKII,MLM\n\
         CCO,10.0,150.0,0.5,2.0,30.0\n\
         c1ccccc1,,90.0,2.1,,12.0\n\
         CC(=O)Nc1ccc(O)cc1,25.0,,0.9,1.5,\n",
    );
    write(
        &dir.join("test.csv"),
        "CXSMILES,Split\nCCN,test\nCCCl,test\n",
    );
    write(
        &dir.join("adme.csv"),
        "Internal ID,Vendor ID,SMILES,CollectionName,LOG HLM_CLint (mL/min/kg),LOG MDR1-MDCK ER (B-A/A-B),LOG SOLUBILITY PH 6.8 (ug/mL),LOG PLASMA PROTEIN BINDING (HUMAN) (% unbound),LOG PLASMA PROTEIN BINDING (RAT) (% unbound),LOG RLM_CLint (mL/min/kg)\n\
         a1,v1,CCOC(=O)C,emolecules,1.0,0.5,1.2,0.1,0.2,2.0\n\
         a2,v2,c1ccncc1,emolecules,,1.2,,,,1.5\n\
         a3,v3,C1CC,emolecules,0.8,-0.1,2.0,,,\n",
    );
    write(
        &dir.join("lipo.csv"),
        "Drug_ID,Drug,Y\nCHEMBL1,CCOc1ccccc1,2.3\nCHEMBL2,CN,\nCHEMBL3,OCCO,-1.1\n",
    );
}

#[test]
fn full_pipeline_produces_combined_tables() {
    let home = tempdir().unwrap();
    let sources = tempdir().unwrap();
    stage_sources(sources.path());

    let layout = DataLayout::new(home.path());
    layout.ensure().unwrap();
    let registry = DatasetRegistry::new(&layout, Format::Parquet);

    let competition = CachedCompetition::new(sources.path());
    let (train, test) = ingest_competition(
        &competition,
        registry.competition_train_raw(),
        registry.competition_test_raw(),
    )
    .unwrap();
    assert_eq!((train, test), (3, 2));
    ingest_table(&sources.path().join("adme.csv"), registry.adme_raw()).unwrap();
    ingest_table(&sources.path().join("lipo.csv"), registry.lipophilicity_raw()).unwrap();

    let pipeline = Pipeline::new(&registry, get_default_constants().clone());
    let reports = pipeline.run_all().unwrap();

    // 5 splits, 4 external splits, 5 conversions, 5 combines.
    assert_eq!(reports.len(), 19);

    let report = |stage: Stage, target: Target| {
        reports
            .iter()
            .find(|r| r.stage == stage && r.target == target)
            .unwrap()
            .clone()
    };

    assert_eq!(report(Stage::Split, Target::Hlm).rows_out, 2);
    assert_eq!(report(Stage::Split, Target::LogD).rows_out, 3);

    // KSOL: one external row is null, one has an unreadable structure.
    assert_eq!(report(Stage::SplitExternal, Target::Ksol).rows_out, 2);
    let ksol = report(Stage::Convert, Target::Ksol);
    assert_eq!((ksol.rows_in, ksol.rows_out), (2, 1));

    // MDR1: log10 of a negative log-ratio is not finite.
    let mdr1 = report(Stage::Convert, Target::Mdr1Mdckii);
    assert_eq!((mdr1.rows_in, mdr1.rows_out), (3, 2));

    // LogD from the lipophilicity set drops its null measurement.
    assert_eq!(report(Stage::Convert, Target::LogD).rows_out, 2);

    for target in Target::ALL {
        let combine = report(Stage::Combine, target);
        assert_eq!(combine.dropped(), 0, "{target}");

        let combined = registry.combined(target).read(None).unwrap();
        assert_eq!(combined.height(), combine.rows_out);
        let names: Vec<&str> = combined
            .get_column_names()
            .iter()
            .map(|c| c.as_str())
            .collect();
        assert_eq!(names, ["CXSMILES", target.column()]);
        assert_eq!(combined.column(target.column()).unwrap().null_count(), 0);
    }

    let hlm = registry.combined(Target::Hlm).read(None).unwrap();
    let values: Vec<f64> = hlm
        .column("HLM")
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    // External rows first, in competition units; then competition rows.
    assert_eq!(values.len(), 4);
    assert!((values[0] - 6.25).abs() < 1e-9);
    assert_eq!(&values[2..], [10.0, 25.0]);

    let test_table = registry.competition_test_raw().read(None).unwrap();
    assert_eq!(test_table.width(), 1);
}

#[test]
fn stages_fail_cleanly_without_inputs() {
    let home = tempdir().unwrap();
    let layout = DataLayout::new(home.path());
    layout.ensure().unwrap();
    let registry = DatasetRegistry::new(&layout, Format::Csv);
    let pipeline = Pipeline::new(&registry, get_default_constants().clone());

    let err = pipeline.split_targets().unwrap_err();
    assert!(matches!(
        err,
        admet_forge::PipelineError::Store(StoreError::Missing { ref name, .. }) if name == "asap_train_raw"
    ));
    assert!(pipeline.convert(Target::LogD).is_err());
    assert!(!registry.external_converted(Target::LogD).exists());
}

#[test]
fn combine_rejects_mismatched_competition_table() {
    let home = tempdir().unwrap();
    let layout = DataLayout::new(home.path());
    layout.ensure().unwrap();
    let registry = DatasetRegistry::new(&layout, Format::Csv);

    let mut external = df!["CXSMILES" => ["CCO"], "MLM_uL_min_mg" => [1.0]].unwrap();
    registry
        .external_converted(Target::Mlm)
        .save(&mut external)
        .unwrap();
    let mut competition =
        df!["CXSMILES" => ["CCN"], "MLM" => [2.0], "Molecule Name" => ["x"]].unwrap();
    registry
        .competition_target(Target::Mlm)
        .save(&mut competition)
        .unwrap();

    let pipeline = Pipeline::new(&registry, get_default_constants().clone());
    assert!(matches!(
        pipeline.combine(Target::Mlm),
        Err(admet_forge::PipelineError::SchemaMismatch { .. })
    ));
    assert!(!registry.combined(Target::Mlm).exists());
}
