//! Capability progress aggregation
//!
//! Combines the normalized roadmap with the sprint status mapping. Story keys
//! follow the `<epic>-<seq>-<slug>` convention, so a capability's stories are
//! found by the number prefix of each linked epic.

pub mod board;
pub mod sprint;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extract::Capability;
use crate::status::WorkStatus;
use crate::vocabulary::IN_PROGRESS_MARKERS;

pub use board::{rollup_status, Board, BoardColumn, BoardItem, GroupBy, KanbanColumn};
pub use sprint::{epic_number, is_epic_key, SprintStatus, StatusEntry};

/// Derived progress of one capability
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityProgress {
    pub total: usize,
    pub done: usize,
    pub in_progress: usize,
    /// `done`, `in-progress` or `backlog`
    pub status: WorkStatus,
}

impl CapabilityProgress {
    /// Derives the status from the counters.
    pub fn from_counts(total: usize, done: usize, in_progress: usize) -> Self {
        let status = if total == 0 {
            WorkStatus::Backlog
        } else if done == total {
            WorkStatus::Done
        } else if done > 0 || in_progress > 0 {
            WorkStatus::InProgress
        } else {
            WorkStatus::Backlog
        };

        Self {
            total,
            done,
            in_progress,
            status,
        }
    }

    pub fn percent(&self) -> u32 {
        percent(self.done, self.total)
    }
}

/// Counts the sprint stories of every epic linked from `capability`.
///
/// An epic linked twice is counted twice.
pub fn capability_progress(capability: &Capability, sprint: &SprintStatus) -> CapabilityProgress {
    let mut total = 0;
    let mut done = 0;
    let mut in_progress = 0;

    for epic_key in &capability.links.epics {
        for story in sprint.stories_for_epic(epic_key) {
            total += 1;
            let status = story.status.to_lowercase();
            if status == "done" {
                done += 1;
            } else if IN_PROGRESS_MARKERS.iter().any(|m| status.contains(m)) {
                in_progress += 1;
            }
        }
    }

    CapabilityProgress::from_counts(total, done, in_progress)
}

/// Progress of every capability, keyed by capability id.
pub fn compute_progress(
    capabilities: &[Capability],
    sprint: &SprintStatus,
) -> BTreeMap<String, CapabilityProgress> {
    capabilities
        .iter()
        .map(|cap| (cap.id.clone(), capability_progress(cap, sprint)))
        .collect()
}

/// `done / total` as a whole percentage, rounded half up; 0 when `total` is 0.
pub fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * done + total) / (2 * total)) as u32
}
