//! View-state persistence: save and load the selected category, the visibility
//! flags and the style overrides as JSON.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::category::MetricCategory;
use crate::data::session::{Session, ViewCommand};
use crate::data::trace_look::StyleSpec;

pub const DEFAULT_STATE_FILE: &str = "mdplot_view.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid view state: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything about a view that survives a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewStateSerde {
    pub category: MetricCategory,
    #[serde(default)]
    pub visibility: BTreeMap<String, bool>,
    #[serde(default)]
    pub styles: BTreeMap<String, StyleSpec>,
}

impl Default for ViewStateSerde {
    fn default() -> Self {
        Self {
            category: MetricCategory::Rmsd,
            visibility: BTreeMap::new(),
            styles: BTreeMap::new(),
        }
    }
}

impl ViewStateSerde {
    pub fn capture(session: &Session) -> Self {
        Self {
            category: session.category(),
            visibility: session
                .visibility
                .iter()
                .map(|(name, visible)| (name.to_string(), visible))
                .collect(),
            styles: session
                .styles
                .overrides()
                .map(|(name, spec)| (name.clone(), spec.clone()))
                .collect(),
        }
    }

    /// Replay the stored state onto `session` through its command interface.
    ///
    /// Overrides with an unknown color are dropped with a warning.
    pub fn apply_to(self, session: &mut Session) {
        for (name, visible) in self.visibility {
            session.visibility.set_visible(&name, visible);
        }
        for (name, spec) in self.styles {
            if let Err(e) = session.apply(ViewCommand::SetStyle(name.clone(), spec)) {
                log::warn!("dropping stored style for {}: {}", name, e);
            }
        }
        if let Err(e) = session.apply(ViewCommand::SelectCategory(self.category)) {
            log::warn!("could not restore category: {}", e);
        }
    }
}

// ---------- Public API ----------

pub fn state_to_json(state: &ViewStateSerde) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub fn state_from_json(json: &str) -> Result<ViewStateSerde, PersistenceError> {
    Ok(serde_json::from_str(json)?)
}

pub fn save_state_to_path(state: &ViewStateSerde, path: &Path) -> Result<(), PersistenceError> {
    let txt = state_to_json(state)?;
    std::fs::write(path, txt).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_state_from_path(path: &Path) -> Result<ViewStateSerde, PersistenceError> {
    let txt = std::fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    state_from_json(&txt)
}
