//! Layout of a simulation working folder.
//!
//! A working folder holds the simulation inputs (`step5_1.tpr`, `step5_1.xtc`)
//! and, once analysed, one subdirectory per metric category with `.xvg` files.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::category::MetricCategory;

/// Simulation inputs the analysis run needs.
pub const REQUIRED_INPUTS: [&str; 2] = ["step5_1.tpr", "step5_1.xtc"];

pub const XVG_EXTENSION: &str = "xvg";

#[derive(Debug, Error)]
pub enum WorkdirError {
    #[error("folder {0} does not exist")]
    MissingFolder(PathBuf),
    #[error("staging folder {staging} is or contains the source folder {folder}")]
    UnsafeStaging { staging: PathBuf, folder: PathBuf },
    #[error("failed to prepare {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One input file of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    pub path: PathBuf,
    pub logical_name: String,
    /// Position in the category's un-filtered file list.
    pub index: usize,
}

/// Logical sample name: the file name up to its first `.`.
pub fn logical_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .and_then(|n| n.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

pub fn category_dir(workdir: &Path, category: MetricCategory) -> PathBuf {
    workdir.join(category.subdir())
}

/// `.xvg` files of `category`, sorted by file name.
///
/// A missing subdirectory yields an empty list.
pub fn list_category_files(workdir: &Path, category: MetricCategory) -> Vec<DataFile> {
    let dir = category_dir(workdir, category);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == XVG_EXTENSION))
        .collect();
    paths.sort();
    paths
        .into_iter()
        .enumerate()
        .map(|(index, path)| DataFile {
            logical_name: logical_name(&path),
            path,
            index,
        })
        .collect()
}

/// Presence of the simulation inputs in a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderStatus {
    pub folder: PathBuf,
    pub missing: Vec<&'static str>,
}

impl FolderStatus {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn validate_folder(folder: &Path) -> FolderStatus {
    let missing = REQUIRED_INPUTS
        .into_iter()
        .filter(|name| !folder.join(name).is_file())
        .collect();
    FolderStatus {
        folder: folder.to_path_buf(),
        missing,
    }
}

/// Whether the analysis run has already produced results in `workdir`.
pub fn has_results(workdir: &Path) -> bool {
    category_dir(workdir, MetricCategory::Rmsd).is_dir()
}

/// Create every category subdirectory that does not exist yet.
pub fn ensure_category_dirs(workdir: &Path) -> Result<(), WorkdirError> {
    for category in MetricCategory::ALL {
        let dir = category_dir(workdir, category);
        fs::create_dir_all(&dir).map_err(|source| WorkdirError::Io { path: dir, source })?;
    }
    Ok(())
}

/// Collect the results of several working folders into one staging folder.
///
/// The staging folder is recreated from scratch. For every source folder and
/// category, `<src>/<subdir>/<file>` is copied to `<staging>/<subdir>/<src name>.xvg`
/// so that each sample is named after its folder. Missing results are skipped;
/// failed copies are logged and skipped.
///
/// Nothing is removed when a source folder is missing, or when `staging` is one
/// of the source folders or an ancestor of one.
pub fn stage_comparison(folders: &[PathBuf], staging: &Path) -> Result<PathBuf, WorkdirError> {
    for folder in folders {
        if !folder.is_dir() {
            return Err(WorkdirError::MissingFolder(folder.clone()));
        }
    }
    check_staging(folders, staging)?;

    if staging.exists() {
        if let Err(e) = fs::remove_dir_all(staging) {
            log::warn!("could not remove old staging folder {}: {}", staging.display(), e);
        }
    }
    ensure_category_dirs(staging)?;

    for folder in folders {
        let sample = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| folder.display().to_string());
        for category in MetricCategory::ALL {
            let src = category_dir(folder, category).join(category.file_name());
            if !src.is_file() {
                log::debug!("{} has no {}", folder.display(), category.file_name());
                continue;
            }
            let dst = category_dir(staging, category).join(format!("{sample}.{XVG_EXTENSION}"));
            match fs::copy(&src, &dst) {
                Ok(_) => log::debug!("staged {} -> {}", src.display(), dst.display()),
                Err(e) => log::warn!("failed to copy {}: {}", src.display(), e),
            }
        }
    }
    log::info!(
        "staged {} folder(s) for comparison in {}",
        folders.len(),
        staging.display()
    );
    Ok(staging.to_path_buf())
}

/// Refuse a staging folder that resolves to a source folder or one of its
/// ancestors. A staging folder that does not exist yet cannot contain one.
fn check_staging(folders: &[PathBuf], staging: &Path) -> Result<(), WorkdirError> {
    if !staging.exists() {
        return Ok(());
    }
    let resolved = canonical(staging)?;
    for folder in folders {
        if canonical(folder)?.starts_with(&resolved) {
            return Err(WorkdirError::UnsafeStaging {
                staging: staging.to_path_buf(),
                folder: folder.clone(),
            });
        }
    }
    Ok(())
}

fn canonical(path: &Path) -> Result<PathBuf, WorkdirError> {
    fs::canonicalize(path).map_err(|source| WorkdirError::Io {
        path: path.to_path_buf(),
        source,
    })
}
