use std::fs;

use mdplot::data::category::MetricCategory;
use mdplot::workdir::{
    category_dir, ensure_category_dirs, has_results, list_category_files, logical_name,
    stage_comparison, validate_folder, WorkdirError,
};

#[test]
fn logical_name_stops_at_first_dot() {
    assert_eq!(logical_name("RMSD/apo.xvg".as_ref()), "apo");
    assert_eq!(logical_name("RMSD/run.v2.xvg".as_ref()), "run");
}

#[test]
fn lists_xvg_files_sorted_with_indices() {
    let dir = tempfile::tempdir().unwrap();
    let rmsd = category_dir(dir.path(), MetricCategory::Rmsd);
    fs::create_dir_all(&rmsd).unwrap();
    for name in ["zeta.xvg", "alpha.xvg", "notes.txt", "mid.xvg"] {
        fs::write(rmsd.join(name), "0 1\n").unwrap();
    }
    fs::create_dir(rmsd.join("nested.xvg")).unwrap();

    let files = list_category_files(dir.path(), MetricCategory::Rmsd);
    let names: Vec<&str> = files.iter().map(|f| f.logical_name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    let indices: Vec<usize> = files.iter().map(|f| f.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn missing_category_folder_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    assert!(list_category_files(dir.path(), MetricCategory::Sasa).is_empty());
}

#[test]
fn validator_reports_missing_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let status = validate_folder(dir.path());
    assert!(!status.is_valid());
    assert_eq!(status.missing, vec!["step5_1.tpr", "step5_1.xtc"]);

    fs::write(dir.path().join("step5_1.tpr"), b"").unwrap();
    assert_eq!(validate_folder(dir.path()).missing, vec!["step5_1.xtc"]);

    fs::write(dir.path().join("step5_1.xtc"), b"").unwrap();
    assert!(validate_folder(dir.path()).is_valid());
}

#[test]
fn results_are_detected_by_the_rmsd_folder() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!has_results(dir.path()));
    ensure_category_dirs(dir.path()).unwrap();
    assert!(has_results(dir.path()));
    for category in MetricCategory::ALL {
        assert!(category_dir(dir.path(), category).is_dir());
    }
}

#[test]
fn staging_renames_by_folder_and_skips_missing() {
    let root = tempfile::tempdir().unwrap();
    let apo = root.path().join("apo");
    let holo = root.path().join("holo");
    for (folder, with_sasa) in [(&apo, true), (&holo, false)] {
        ensure_category_dirs(folder).unwrap();
        fs::write(
            category_dir(folder, MetricCategory::Rmsd).join("rmsd.xvg"),
            "0 1\n",
        )
        .unwrap();
        if with_sasa {
            fs::write(
                category_dir(folder, MetricCategory::Sasa).join("sasa.xvg"),
                "0 5\n",
            )
            .unwrap();
        }
    }
    let staging = root.path().join("comparison_temp");
    fs::create_dir_all(staging.join("stale")).unwrap();

    let out = stage_comparison(&[apo, holo], &staging).unwrap();
    assert_eq!(out, staging);
    assert!(!staging.join("stale").exists());

    let rmsd: Vec<String> = list_category_files(&staging, MetricCategory::Rmsd)
        .into_iter()
        .map(|f| f.logical_name)
        .collect();
    assert_eq!(rmsd, vec!["apo", "holo"]);

    let sasa: Vec<String> = list_category_files(&staging, MetricCategory::Sasa)
        .into_iter()
        .map(|f| f.logical_name)
        .collect();
    assert_eq!(sasa, vec!["apo"]);
    assert!(list_category_files(&staging, MetricCategory::HydrogenBonds).is_empty());
}

#[test]
fn staging_rejects_missing_source_folder() {
    let root = tempfile::tempdir().unwrap();
    let err = stage_comparison(&[root.path().join("nope")], &root.path().join("stage"))
        .unwrap_err();
    assert!(matches!(err, WorkdirError::MissingFolder(_)));
}

fn simulation_folder(root: &std::path::Path, name: &str) -> std::path::PathBuf {
    let folder = root.join(name);
    fs::create_dir_all(category_dir(&folder, MetricCategory::Rmsd)).unwrap();
    fs::write(folder.join("step5_1.tpr"), "tpr").unwrap();
    fs::write(
        category_dir(&folder, MetricCategory::Rmsd).join("rmsd.xvg"),
        "0 1\n",
    )
    .unwrap();
    folder
}

#[test]
fn staging_into_a_source_folder_is_refused() {
    let root = tempfile::tempdir().unwrap();
    let run1 = simulation_folder(root.path(), "run1");
    let run2 = simulation_folder(root.path(), "run2");

    let err = stage_comparison(&[run1.clone(), run2], &run1).unwrap_err();
    assert!(matches!(err, WorkdirError::UnsafeStaging { .. }));
    assert!(run1.join("step5_1.tpr").is_file());
    assert!(run1.join("RMSD").join("rmsd.xvg").is_file());
}

#[test]
fn staging_above_a_source_folder_is_refused() {
    let root = tempfile::tempdir().unwrap();
    let run1 = simulation_folder(root.path(), "run1");
    let run2 = simulation_folder(root.path(), "run2");

    // same folder spelled through `..`
    let err = stage_comparison(&[run1.clone(), run2.clone()], &run2.join("..")).unwrap_err();
    assert!(matches!(err, WorkdirError::UnsafeStaging { .. }));
    assert!(run1.join("step5_1.tpr").is_file());
    assert!(run2.join("RMSD").join("rmsd.xvg").is_file());
}

#[test]
fn missing_source_leaves_old_staging_alone() {
    let root = tempfile::tempdir().unwrap();
    let run1 = simulation_folder(root.path(), "run1");
    let staging = root.path().join("stage");
    fs::create_dir_all(staging.join("keep")).unwrap();

    let err = stage_comparison(&[run1, root.path().join("gone")], &staging).unwrap_err();
    assert!(matches!(err, WorkdirError::MissingFolder(_)));
    assert!(staging.join("keep").is_dir());
}
