//! Synchronous driver for the eight `gmx` analysis commands.
//!
//! Every command reads the group selection from stdin and writes one `.xvg`
//! file into its category subdirectory. All eight steps always run; the
//! [`RunReport`] records the outcome of each one.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::data::category::MetricCategory;
use crate::workdir::{category_dir, ensure_category_dirs, WorkdirError};

const TPR: &str = "step5_1.tpr";
const XTC: &str = "step5_1.xtc";
/// Trajectory written by the first step and read by the RMS/RMSF steps.
const CENTERED_XTC: &str = "analisis.xtc";

/// One `gmx` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmxStep {
    pub label: &'static str,
    pub args: Vec<String>,
    /// Group selection piped to stdin.
    pub stdin: &'static str,
    pub category: Option<MetricCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Success,
    Failed { code: Option<i32> },
    SpawnError(String),
}

impl StepStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, StepStatus::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub label: &'static str,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub steps: Vec<StepOutcome>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.steps.iter().all(|s| s.status.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| !s.status.is_success())
    }

    /// One-line summary naming every failed step.
    pub fn summary(&self) -> String {
        let failed: Vec<String> = self
            .failures()
            .map(|s| match &s.status {
                StepStatus::Failed { code: Some(code) } => format!("{} (exit {})", s.label, code),
                StepStatus::Failed { code: None } => format!("{} (killed)", s.label),
                StepStatus::SpawnError(e) => format!("{} ({})", s.label, e),
                StepStatus::Success => s.label.to_string(),
            })
            .collect();
        if failed.is_empty() {
            format!("all {} analysis steps succeeded", self.steps.len())
        } else {
            format!(
                "{} of {} analysis steps failed: {}",
                failed.len(),
                self.steps.len(),
                failed.join(", ")
            )
        }
    }
}

/// Runs one step. The process-backed implementation is [`ProcessExecutor`].
pub trait StepExecutor {
    fn execute(&mut self, gmx: &Path, workdir: &Path, step: &GmxStep) -> StepStatus;
}

/// Spawns the real `gmx` binary and waits for it.
#[derive(Debug, Default)]
pub struct ProcessExecutor;

impl StepExecutor for ProcessExecutor {
    fn execute(&mut self, gmx: &Path, workdir: &Path, step: &GmxStep) -> StepStatus {
        let child = Command::new(gmx)
            .args(&step.args)
            .current_dir(workdir)
            .stdin(Stdio::piped())
            .spawn();
        let mut child = match child {
            Ok(child) => child,
            Err(e) => return StepStatus::SpawnError(e.to_string()),
        };
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(step.stdin.as_bytes()) {
                log::warn!("{}: could not write group selection: {}", step.label, e);
            }
        }
        match child.wait() {
            Ok(status) if status.success() => StepStatus::Success,
            Ok(status) => StepStatus::Failed {
                code: status.code(),
            },
            Err(e) => StepStatus::SpawnError(e.to_string()),
        }
    }
}

/// The analysis pipeline for one working folder.
#[derive(Debug, Clone)]
pub struct GmxRunner {
    pub gmx: PathBuf,
}

impl GmxRunner {
    pub fn new(gmx: impl Into<PathBuf>) -> Self {
        Self { gmx: gmx.into() }
    }

    /// The eight steps in execution order. Paths are relative to `workdir`.
    pub fn steps(&self) -> Vec<GmxStep> {
        fn out(category: MetricCategory) -> String {
            format!("{}/{}", category.subdir(), category.file_name())
        }
        fn args(parts: &[&str]) -> Vec<String> {
            parts.iter().map(|s| s.to_string()).collect()
        }
        let rmsd = out(MetricCategory::Rmsd);
        let rmsd_lig = out(MetricCategory::RmsdProteinLigand);
        let rmsf_atom = out(MetricCategory::RmsfAtom);
        let rmsf_res = out(MetricCategory::RmsfResidue);
        let gyration = out(MetricCategory::Gyration);
        let sasa = out(MetricCategory::Sasa);
        let hbond = out(MetricCategory::HydrogenBonds);

        vec![
            GmxStep {
                label: "Converting trajectory",
                args: args(&[
                    "trjconv", "-s", TPR, "-f", XTC, "-o", CENTERED_XTC, "-pbc", "mol", "-ur",
                    "compact",
                ]),
                stdin: "0\n",
                category: None,
            },
            GmxStep {
                label: "RMSD",
                args: args(&["rms", "-s", TPR, "-f", CENTERED_XTC, "-o", rmsd.as_str(), "-tu", "ns"]),
                stdin: "4\n4\n",
                category: Some(MetricCategory::Rmsd),
            },
            GmxStep {
                label: "RMSD Protein-Ligand",
                args: args(&["rms", "-s", TPR, "-f", CENTERED_XTC, "-o", rmsd_lig.as_str(), "-tu", "ns"]),
                stdin: "1\n13\n",
                category: Some(MetricCategory::RmsdProteinLigand),
            },
            GmxStep {
                label: "RMSF Atom",
                args: args(&["rmsf", "-s", TPR, "-f", CENTERED_XTC, "-o", rmsf_atom.as_str()]),
                stdin: "4\n",
                category: Some(MetricCategory::RmsfAtom),
            },
            GmxStep {
                label: "RMSF Residue",
                args: args(&["rmsf", "-s", TPR, "-f", CENTERED_XTC, "-res", "-o", rmsf_res.as_str()]),
                stdin: "4\n",
                category: Some(MetricCategory::RmsfResidue),
            },
            GmxStep {
                label: "Radius of Gyration",
                args: args(&["gyrate", "-s", TPR, "-f", XTC, "-o", gyration.as_str()]),
                stdin: "4\n",
                category: Some(MetricCategory::Gyration),
            },
            GmxStep {
                label: "SASA",
                args: args(&["sasa", "-s", TPR, "-f", XTC, "-o", sasa.as_str()]),
                stdin: "4\n",
                category: Some(MetricCategory::Sasa),
            },
            GmxStep {
                label: "Hydrogen Bonds",
                args: args(&["hbond", "-s", TPR, "-f", XTC, "-num", hbond.as_str()]),
                stdin: "1\n13\n",
                category: Some(MetricCategory::HydrogenBonds),
            },
        ]
    }

    /// Run every step in `workdir` with the real `gmx` binary.
    pub fn run(&self, workdir: &Path) -> Result<RunReport, WorkdirError> {
        self.run_with(workdir, &mut ProcessExecutor)
    }

    /// Run every step through `executor`, blocking until the last one finishes.
    pub fn run_with(
        &self,
        workdir: &Path,
        executor: &mut dyn StepExecutor,
    ) -> Result<RunReport, WorkdirError> {
        ensure_category_dirs(workdir)?;
        let steps = self.steps();
        let total = steps.len();
        let mut report = RunReport::default();
        for (i, step) in steps.iter().enumerate() {
            log::info!("[{}/{}] {}", i + 1, total, step.label);
            let status = executor.execute(&self.gmx, workdir, step);
            match &status {
                StepStatus::Success => {
                    if let Some(category) = step.category {
                        log::debug!(
                            "wrote {}",
                            category_dir(workdir, category)
                                .join(category.file_name())
                                .display()
                        );
                    }
                }
                other => log::warn!("{} failed: {:?}", step.label, other),
            }
            report.steps.push(StepOutcome {
                label: step.label,
                status,
            });
        }
        log::info!("{}", report.summary());
        Ok(report)
    }
}
