//! Reads the artifact documents from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};

/// Raw text of every artifact; `None` for documents that could not be read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    pub index: Option<String>,
    pub prd: Option<String>,
    pub epics: Option<String>,
    pub capabilities: Option<String>,
    pub sprint_status: Option<String>,
}

impl Artifacts {
    /// Reads every configured document. Missing or unreadable files become `None`.
    pub fn load(config: &ViewerConfig) -> Self {
        Self {
            index: read_optional(&config.index_path()),
            prd: read_optional(&config.prd_path()),
            epics: read_optional(&config.epics_path()),
            capabilities: read_optional(&config.capabilities_path()),
            sprint_status: read_optional(&config.sprint_status_path()),
        }
    }
}

fn read_optional(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Artifact not found: {}", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

/// Raw markdown of the story document for a sprint key.
pub fn load_story(config: &ViewerConfig, key: &str) -> Result<String> {
    if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
        return Err(ViewerError::NotFound(format!("story {}", key)));
    }

    let path = config.story_path(key);
    match fs::read_to_string(&path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(ViewerError::NotFound(format!("story {} ({})", key, path.display())))
        }
        Err(e) => Err(e.into()),
    }
}
