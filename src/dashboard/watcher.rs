use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};

use crate::error::{Result, ViewerError};

const DEBOUNCE: Duration = Duration::from_millis(500);

/// Debounced recursive watcher over the artifact root
pub struct ArtifactWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    receiver: Receiver<std::result::Result<Vec<DebouncedEvent>, notify::Error>>,
}

impl ArtifactWatcher {
    pub fn new(root: &Path) -> Result<Self> {
        let (tx, rx) = channel();

        let mut debouncer =
            new_debouncer(DEBOUNCE, tx).map_err(|e| ViewerError::Watcher(e.to_string()))?;

        debouncer
            .watcher()
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| ViewerError::Watcher(e.to_string()))?;

        Ok(Self {
            _debouncer: debouncer,
            receiver: rx,
        })
    }

    /// Blocks until the next batch of changes.
    ///
    /// Returns the changed paths, an empty batch for watcher errors, or `None`
    /// once the watcher has shut down.
    pub fn recv(&self) -> Option<Vec<PathBuf>> {
        match self.receiver.recv() {
            Ok(Ok(events)) => Some(events.into_iter().map(|e| e.path).collect()),
            Ok(Err(e)) => {
                tracing::warn!("Watch error: {}", e);
                Some(Vec::new())
            }
            Err(_) => None,
        }
    }
}
