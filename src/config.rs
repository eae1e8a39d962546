//! Artifact layout configuration (`.bmad-viewer.toml`).
//!
//! Every path is relative to the artifact root. The file is optional and
//! each key falls back to the standard layout:
//! ```toml
//! index = "index.md"
//! prd = "planning-artifacts/prd.md"
//! epics = "planning-artifacts/epics.md"
//! capabilities = "planning-artifacts/capabilities.yaml"
//! sprint_status = "implementation-artifacts/sprint-status.yaml"
//! stories_dir = "implementation-artifacts/stories"
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Name of the config file looked up in the artifact root
pub const CONFIG_FILENAME: &str = ".bmad-viewer.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Artifact root; not read from the file
    #[serde(skip)]
    pub root: PathBuf,
    pub index: PathBuf,
    pub prd: PathBuf,
    pub epics: PathBuf,
    pub capabilities: PathBuf,
    pub sprint_status: PathBuf,
    pub stories_dir: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            index: PathBuf::from("index.md"),
            prd: PathBuf::from("planning-artifacts/prd.md"),
            epics: PathBuf::from("planning-artifacts/epics.md"),
            capabilities: PathBuf::from("planning-artifacts/capabilities.yaml"),
            sprint_status: PathBuf::from("implementation-artifacts/sprint-status.yaml"),
            stories_dir: PathBuf::from("implementation-artifacts/stories"),
        }
    }
}

impl ViewerConfig {
    /// Loads the layout for `root`.
    ///
    /// An explicit `config_path` must exist; otherwise `<root>/.bmad-viewer.toml`
    /// is used when present and the defaults when not.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let content = match config_path {
            Some(path) => Some(fs::read_to_string(path)?),
            None => match fs::read_to_string(root.join(CONFIG_FILENAME)) {
                Ok(content) => Some(content),
                Err(e) if e.kind() == ErrorKind::NotFound => None,
                Err(e) => return Err(e.into()),
            },
        };

        let mut config = match content {
            Some(content) => Self::parse(&content)?,
            None => {
                tracing::debug!("No {} in {}; using defaults", CONFIG_FILENAME, root.display());
                Self::default()
            }
        };
        config.root = root.to_path_buf();
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index)
    }

    pub fn prd_path(&self) -> PathBuf {
        self.root.join(&self.prd)
    }

    pub fn epics_path(&self) -> PathBuf {
        self.root.join(&self.epics)
    }

    pub fn capabilities_path(&self) -> PathBuf {
        self.root.join(&self.capabilities)
    }

    pub fn sprint_status_path(&self) -> PathBuf {
        self.root.join(&self.sprint_status)
    }

    /// Path of the story document for a sprint key.
    pub fn story_path(&self, key: &str) -> PathBuf {
        self.root.join(&self.stories_dir).join(format!("{}.md", key))
    }
}
