//! The seven metric categories produced by the `gmx` analysis run.

use serde::{Deserialize, Serialize};

/// One fixed kind of trajectory metric.
///
/// Every category carries its chart metadata (title and axis labels), the
/// subdirectory it lives in under a working folder, and the file name the
/// analysis run writes there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricCategory {
    Rmsd,
    Gyration,
    HydrogenBonds,
    Sasa,
    RmsdProteinLigand,
    RmsfAtom,
    RmsfResidue,
}

/// Title and axis labels for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMeta {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

impl AxisMeta {
    /// Metadata used when no category could be inferred.
    pub const UNRESOLVED: AxisMeta = AxisMeta {
        title: "",
        x_label: "",
        y_label: "",
    };
}

/// Comment-line markers in detection priority order.
///
/// Labels overlap (`"rmsd.xvg"` is a suffix of `"rmsd_pro_lig.xvg"`), so the more
/// specific markers come first.
pub const CATEGORY_MARKERS: [(&str, MetricCategory); 7] = [
    (
        "Radius of gyration (total and around axes)",
        MetricCategory::Gyration,
    ),
    ("Hydrogen bonds", MetricCategory::HydrogenBonds),
    ("Solvent Accessible Surface", MetricCategory::Sasa),
    ("rmsf_rec.xvg", MetricCategory::RmsfResidue),
    ("rmsf_atom.xvg", MetricCategory::RmsfAtom),
    ("rmsd_pro_lig.xvg", MetricCategory::RmsdProteinLigand),
    ("rmsd.xvg", MetricCategory::Rmsd),
];

impl MetricCategory {
    pub const ALL: [MetricCategory; 7] = [
        MetricCategory::Rmsd,
        MetricCategory::Gyration,
        MetricCategory::HydrogenBonds,
        MetricCategory::Sasa,
        MetricCategory::RmsdProteinLigand,
        MetricCategory::RmsfAtom,
        MetricCategory::RmsfResidue,
    ];

    pub fn axis_meta(self) -> AxisMeta {
        match self {
            MetricCategory::Rmsd => AxisMeta {
                title: "RMSD",
                x_label: "Time (ns)",
                y_label: "RMSD (nm)",
            },
            MetricCategory::Gyration => AxisMeta {
                title: "Radius of gyration (total and around axes)",
                x_label: "Time (ps)",
                y_label: "Radius of gyration/Rg (nm)",
            },
            MetricCategory::HydrogenBonds => AxisMeta {
                title: "Number of hydrogen bonds",
                x_label: "Time (ps)",
                y_label: "Hbonds",
            },
            MetricCategory::Sasa => AxisMeta {
                title: "Solvent Accessible Surface",
                x_label: "Time (ps)",
                y_label: "Area (nm²)",
            },
            MetricCategory::RmsdProteinLigand => AxisMeta {
                title: "RMSD Protein-Ligand",
                x_label: "Time (ns)",
                y_label: "RMSD (nm)",
            },
            MetricCategory::RmsfAtom => AxisMeta {
                title: "RMS fluctuation Atom",
                x_label: "Atom",
                y_label: "RMSF (nm)",
            },
            MetricCategory::RmsfResidue => AxisMeta {
                title: "RMS fluctuation Residue",
                x_label: "Residue",
                y_label: "RMSF (nm)",
            },
        }
    }

    /// Subdirectory under a working folder holding this category's files.
    pub fn subdir(self) -> &'static str {
        match self {
            MetricCategory::Rmsd => "RMSD",
            MetricCategory::Gyration => "gyration",
            MetricCategory::HydrogenBonds => "hbond",
            MetricCategory::Sasa => "sasa",
            MetricCategory::RmsdProteinLigand => "rmsd_pro_lig",
            MetricCategory::RmsfAtom => "rmsf_atom",
            MetricCategory::RmsfResidue => "rmsf_rec",
        }
    }

    /// File name written by the analysis run inside [`subdir`](Self::subdir).
    pub fn file_name(self) -> &'static str {
        match self {
            MetricCategory::Rmsd => "rmsd.xvg",
            MetricCategory::Gyration => "gyration.xvg",
            MetricCategory::HydrogenBonds => "hbond.xvg",
            MetricCategory::Sasa => "sasa.xvg",
            MetricCategory::RmsdProteinLigand => "rmsd_pro_lig.xvg",
            MetricCategory::RmsfAtom => "rmsf_atom.xvg",
            MetricCategory::RmsfResidue => "rmsf_rec.xvg",
        }
    }

    /// Label shown in the category selector.
    pub fn display_name(self) -> &'static str {
        match self {
            MetricCategory::Rmsd => "RMSD",
            MetricCategory::Gyration => "Radius of gyration (total and around axes)",
            MetricCategory::HydrogenBonds => "Hydrogen Bonds",
            MetricCategory::Sasa => "Solvent Accessible Surface Area (SASA)",
            MetricCategory::RmsdProteinLigand => "RMSD Protein-Ligand",
            MetricCategory::RmsfAtom => "RMS fluctuation Atom (RMSF atom)",
            MetricCategory::RmsfResidue => "RMS fluctuation Residue (RMSF Residue)",
        }
    }

    /// Match one metadata line against the marker list. First match wins.
    pub fn from_marker_line(line: &str) -> Option<MetricCategory> {
        CATEGORY_MARKERS
            .iter()
            .find(|(marker, _)| line.contains(marker))
            .map(|(_, cat)| *cat)
    }

    /// Look up a category by its subdirectory name (used by the CLI).
    pub fn from_subdir(name: &str) -> Option<MetricCategory> {
        Self::ALL
            .into_iter()
            .find(|c| c.subdir().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
