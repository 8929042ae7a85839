//! View state of one analysis session and the commands that change it.
//!
//! A [`Session`] owns everything that outlives a single plot request: the
//! working folder, the selected category and its file list, the visibility
//! flags and the style overrides. Parsed series are never stored; each call to
//! [`Session::compose`] reads the files again.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::category::MetricCategory;
use super::trace_look::{StyleBook, StyleError, StyleSpec};
use super::visibility::VisibilitySet;
use super::xvg::{parse_file, ParseError, ParseOutcome};
use crate::export::{self, ExportError, ExportFormat, ExportSettings};
use crate::plot::{compose, ComposedPlot, LoadedSeries};
use crate::workdir::{list_category_files, DataFile};

/// A user action on the view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    SelectCategory(MetricCategory),
    ToggleVisibility(String),
    SetVisible(String, bool),
    /// Show or hide every sample of the current category.
    SetAllVisible(bool),
    SetStyle(String, StyleSpec),
    ClearStyle(String),
    Export {
        path: PathBuf,
        format: Option<ExportFormat>,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// A visible file left out of the plot because it failed to parse.
#[derive(Debug)]
pub struct SkippedFile {
    pub file: DataFile,
    pub error: ParseError,
}

impl fmt::Display for SkippedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .file
            .path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.file.logical_name.as_str().into());
        write!(f, "skipped {}: {}", name, self.error)
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    workdir: PathBuf,
    category: MetricCategory,
    files: Vec<DataFile>,
    pub visibility: VisibilitySet,
    pub styles: StyleBook,
    pub export_settings: ExportSettings,
}

impl Session {
    /// Open `workdir` with the RMSD category selected.
    pub fn open(workdir: impl Into<PathBuf>) -> Self {
        let mut session = Self {
            workdir: workdir.into(),
            category: MetricCategory::Rmsd,
            files: Vec::new(),
            visibility: VisibilitySet::new(),
            styles: StyleBook::new(),
            export_settings: ExportSettings::default(),
        };
        session.select_category(MetricCategory::Rmsd);
        session
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn category(&self) -> MetricCategory {
        self.category
    }

    /// Files of the current category in plot order.
    pub fn files(&self) -> &[DataFile] {
        &self.files
    }

    /// Logical names of the current category, in file order.
    pub fn sample_names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.logical_name.clone()).collect()
    }

    /// Re-list the files of the current category, e.g. after an analysis run.
    pub fn refresh(&mut self) {
        self.select_category(self.category);
    }

    fn select_category(&mut self, category: MetricCategory) {
        self.category = category;
        self.files = list_category_files(&self.workdir, category);
        self.visibility
            .ensure_known(self.files.iter().map(|f| f.logical_name.as_str()));
        log::debug!(
            "selected {} with {} file(s)",
            category.subdir(),
            self.files.len()
        );
    }

    /// Apply one command.
    pub fn apply(&mut self, command: ViewCommand) -> Result<(), SessionError> {
        match command {
            ViewCommand::SelectCategory(category) => self.select_category(category),
            ViewCommand::ToggleVisibility(name) => {
                self.visibility.toggle(&name);
            }
            ViewCommand::SetVisible(name, visible) => self.visibility.set_visible(&name, visible),
            ViewCommand::SetAllVisible(visible) => {
                for file in &self.files {
                    self.visibility.set_visible(&file.logical_name, visible);
                }
            }
            ViewCommand::SetStyle(name, spec) => self.styles.set_override(&name, spec)?,
            ViewCommand::ClearStyle(name) => {
                self.styles.clear_override(&name);
            }
            ViewCommand::Export { path, format } => {
                let plot = self.compose();
                export::save(&plot, &path, format, &self.export_settings)?;
            }
        }
        Ok(())
    }

    /// Parse the visible files of the current category.
    ///
    /// Missing and empty files are dropped silently. Malformed ones are
    /// returned next to the parsed series so the caller can report them.
    pub fn load_visible(&self) -> (Vec<LoadedSeries>, Vec<SkippedFile>) {
        let mut loaded = Vec::new();
        let mut skipped = Vec::new();
        for file in &self.files {
            if !file.path.exists() {
                log::debug!("{} disappeared, skipping", file.path.display());
                continue;
            }
            if !self.visibility.is_visible(&file.logical_name) {
                continue;
            }
            match parse_file(&file.path) {
                Ok(ParseOutcome::Series(series)) => loaded.push(LoadedSeries {
                    file: file.clone(),
                    series,
                }),
                Ok(ParseOutcome::Empty { .. }) => {
                    log::debug!("{} has no data rows, skipping", file.path.display());
                }
                Err(error) => {
                    log::warn!("skipping {}: {}", file.path.display(), error);
                    skipped.push(SkippedFile {
                        file: file.clone(),
                        error,
                    });
                }
            }
        }
        (loaded, skipped)
    }

    /// Build the plot for the current view state.
    pub fn compose(&self) -> ComposedPlot {
        self.compose_with_skipped().0
    }

    /// Like [`Session::compose`], also returning the files that failed to parse.
    pub fn compose_with_skipped(&self) -> (ComposedPlot, Vec<SkippedFile>) {
        let (loaded, skipped) = self.load_visible();
        (compose(&loaded, &self.styles, &self.visibility), skipped)
    }
}
