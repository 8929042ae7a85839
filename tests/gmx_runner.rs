use std::path::{Path, PathBuf};

use mdplot::data::category::MetricCategory;
use mdplot::gmx::{GmxRunner, GmxStep, StepExecutor, StepStatus};
use mdplot::workdir::category_dir;

/// Records every step and fails the ones whose label is listed.
#[derive(Default)]
struct FakeExecutor {
    fail: Vec<&'static str>,
    seen: Vec<(PathBuf, PathBuf, GmxStep)>,
}

impl StepExecutor for FakeExecutor {
    fn execute(&mut self, gmx: &Path, workdir: &Path, step: &GmxStep) -> StepStatus {
        self.seen
            .push((gmx.to_path_buf(), workdir.to_path_buf(), step.clone()));
        if self.fail.contains(&step.label) {
            StepStatus::Failed { code: Some(1) }
        } else {
            StepStatus::Success
        }
    }
}

#[test]
fn eight_steps_in_order() {
    let runner = GmxRunner::new("gmx");
    let steps = runner.steps();
    let labels: Vec<&str> = steps.iter().map(|s| s.label).collect();
    assert_eq!(
        labels,
        vec![
            "Converting trajectory",
            "RMSD",
            "RMSD Protein-Ligand",
            "RMSF Atom",
            "RMSF Residue",
            "Radius of Gyration",
            "SASA",
            "Hydrogen Bonds",
        ]
    );
    assert_eq!(
        steps[0].args,
        vec![
            "trjconv", "-s", "step5_1.tpr", "-f", "step5_1.xtc", "-o", "analisis.xtc", "-pbc",
            "mol", "-ur", "compact"
        ]
    );
    assert_eq!(steps[0].stdin, "0\n");
    assert_eq!(
        steps[2].args,
        vec![
            "rms", "-s", "step5_1.tpr", "-f", "analisis.xtc", "-o",
            "rmsd_pro_lig/rmsd_pro_lig.xvg", "-tu", "ns"
        ]
    );
    assert_eq!(steps[2].stdin, "1\n13\n");
    assert!(steps[4].args.contains(&"-res".to_string()));
    assert_eq!(steps[7].args[5], "-num");
    assert_eq!(steps[7].category, Some(MetricCategory::HydrogenBonds));
}

#[test]
fn every_step_writes_into_its_category_folder() {
    let runner = GmxRunner::new("gmx");
    for step in runner.steps().iter().skip(1) {
        let category = step.category.unwrap();
        let expected = format!("{}/{}", category.subdir(), category.file_name());
        assert!(step.args.contains(&expected), "{} misses {}", step.label, expected);
    }
}

#[test]
fn runs_all_steps_and_creates_folders() {
    let dir = tempfile::tempdir().unwrap();
    let runner = GmxRunner::new("/opt/gromacs/bin/gmx");
    let mut exec = FakeExecutor::default();
    let report = runner.run_with(dir.path(), &mut exec).unwrap();

    assert!(report.is_success());
    assert_eq!(report.steps.len(), 8);
    assert_eq!(exec.seen.len(), 8);
    assert!(exec
        .seen
        .iter()
        .all(|(gmx, wd, _)| gmx == Path::new("/opt/gromacs/bin/gmx") && wd == dir.path()));
    for category in MetricCategory::ALL {
        assert!(category_dir(dir.path(), category).is_dir());
    }
    assert_eq!(report.summary(), "all 8 analysis steps succeeded");
}

#[test]
fn failures_do_not_stop_the_run_and_are_named() {
    let dir = tempfile::tempdir().unwrap();
    let runner = GmxRunner::new("gmx");
    let mut exec = FakeExecutor {
        fail: vec!["RMSD", "SASA"],
        ..Default::default()
    };
    let report = runner.run_with(dir.path(), &mut exec).unwrap();

    assert!(!report.is_success());
    assert_eq!(exec.seen.len(), 8);
    let failed: Vec<&str> = report.failures().map(|s| s.label).collect();
    assert_eq!(failed, vec!["RMSD", "SASA"]);
    assert_eq!(
        report.summary(),
        "2 of 8 analysis steps failed: RMSD (exit 1), SASA (exit 1)"
    );
}

#[test]
fn missing_binary_is_a_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let runner = GmxRunner::new(dir.path().join("no-such-gmx"));
    let report = runner.run(dir.path()).unwrap();
    assert_eq!(report.steps.len(), 8);
    assert!(report
        .steps
        .iter()
        .all(|s| matches!(s.status, StepStatus::SpawnError(_))));
}
