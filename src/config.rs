//! Viewer configuration, optionally loaded from a YAML file.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```yaml
//! title: "Docking run 3"
//! export:
//!   dpi: 300
//! gmx_path: /opt/gromacs/bin/gmx
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::ExportSettings;

pub const DEFAULT_TITLE: &str = "MD Plot";
/// Folder name used for staged multi-folder comparisons.
pub const DEFAULT_STAGING_DIR: &str = "comparison_temp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub window_size: [f32; 2],
    /// Figure size and DPI of exported images.
    pub export: ExportSettings,
    /// `gmx` binary used by the analysis run.
    pub gmx_path: PathBuf,
    pub staging_dir: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            window_size: [1200.0, 800.0],
            export: ExportSettings::default(),
            gmx_path: default_gmx_path(),
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
        }
    }
}

impl ViewerConfig {
    pub fn from_yaml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_yaml(&text, path)?;
        log::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// The bundled `gromacs/bin/gmx` next to the executable, or plain `gmx` from
/// `PATH` when the executable location is unknown.
pub fn default_gmx_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .map(|dir| dir.join("gromacs").join("bin").join("gmx"))
        .unwrap_or_else(|| PathBuf::from("gmx"))
}
