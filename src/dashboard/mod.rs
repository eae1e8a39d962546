//! Dashboard assembly
//!
//! Runs every extractor over a set of loaded [`Artifacts`] and derives the
//! summary, epic and board views shown by the viewer.

pub mod loader;
pub mod watcher;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extract::{
    extract_doc_list, extract_epics_lists, extract_epics_metrics, extract_functional_requirements,
    extract_non_functional_requirements, extract_requirement_metrics, extract_themes, load_yaml,
    normalize_roadmap, scalar_string, DocumentLink, EpicsLists, EpicsMetrics, Extracted,
    RequirementMetrics, RoadmapDigest, Theme,
};
use crate::progress::{
    compute_progress, epic_number, percent, rollup_status, Board, CapabilityProgress, GroupBy,
    SprintStatus, StatusEntry,
};
use crate::requirements::RequirementLists;
use crate::status::WorkStatus;

pub use loader::{load_story, Artifacts};
pub use watcher::ArtifactWatcher;

/// Everything extracted from one set of artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub docs: Vec<DocumentLink>,
    pub requirement_metrics: RequirementMetrics,
    pub functional: RequirementLists,
    pub non_functional: RequirementLists,
    pub epics_metrics: EpicsMetrics,
    pub epics: EpicsLists,
    pub roadmap: RoadmapDigest,
    pub themes: Vec<Theme>,
    pub sprint: SprintStatus,
    /// Derived progress per capability id
    pub progress: BTreeMap<String, CapabilityProgress>,
    /// Roadmap `updated` value
    pub roadmap_updated: Option<String>,
    /// Names of the extractors that returned their fallback
    pub defaulted: Vec<String>,
}

/// `done` out of `total`, with the rounded percentage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub done: usize,
    pub total: usize,
    pub percent: u32,
}

impl Tally {
    pub fn new(done: usize, total: usize) -> Self {
        Self {
            done,
            total,
            percent: percent(done, total),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub project: Option<String>,
    /// Sprint status timestamp, else the roadmap `updated` date
    pub generated: Option<String>,
    pub theme_count: usize,
    /// Mean completion percent over all themes
    pub theme_percent: u32,
    pub capabilities: Tally,
    pub epics: Tally,
    pub stories: Tally,
    pub requirements: RequirementMetrics,
    pub declared: EpicsMetrics,
}

/// One epic of the development sequence with its sprint stories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpicView {
    pub key: String,
    pub title: Option<String>,
    pub status: WorkStatus,
    pub stories: Vec<StatusEntry>,
    pub progress: Tally,
    /// Ids of the capabilities linking this epic
    pub capabilities: Vec<String>,
}

struct RoadmapParts {
    digest: Extracted<RoadmapDigest>,
    themes: Extracted<Vec<Theme>>,
    updated: Option<String>,
}

fn read_roadmap(text: Option<&str>) -> RoadmapParts {
    let root = load_yaml(text);
    let digest = match &root {
        Some(root) => normalize_roadmap(root),
        None => Extracted::Defaulted(RoadmapDigest::default()),
    };
    let updated = root.as_ref().and_then(|r| r.get("updated")).and_then(scalar_string);

    RoadmapParts {
        digest,
        themes: extract_themes(text),
        updated,
    }
}

impl Dashboard {
    /// Runs all extractors; independent documents are processed in parallel.
    pub fn from_artifacts(artifacts: &Artifacts) -> Self {
        let index = artifacts.index.as_deref();
        let prd = artifacts.prd.as_deref();
        let epics = artifacts.epics.as_deref();
        let capabilities = artifacts.capabilities.as_deref();
        let sprint = artifacts.sprint_status.as_deref();

        let ((docs, (metrics, (functional, non_functional))), ((epics_metrics, epic_lists), (roadmap, sprint))) =
            rayon::join(
                || {
                    rayon::join(
                        || extract_doc_list(index),
                        || {
                            rayon::join(
                                || extract_requirement_metrics(prd),
                                || {
                                    rayon::join(
                                        || extract_functional_requirements(prd),
                                        || extract_non_functional_requirements(prd),
                                    )
                                },
                            )
                        },
                    )
                },
                || {
                    rayon::join(
                        || rayon::join(|| extract_epics_metrics(epics), || extract_epics_lists(epics)),
                        || rayon::join(|| read_roadmap(capabilities), || SprintStatus::parse(sprint)),
                    )
                },
            );

        let mut defaulted = Vec::new();
        let mut take = |name: &str, defaulted_flag: bool| {
            if defaulted_flag {
                defaulted.push(name.to_string());
            }
        };
        take("docs", docs.is_defaulted());
        take("requirementMetrics", metrics.is_defaulted());
        take("functional", functional.is_defaulted());
        take("nonFunctional", non_functional.is_defaulted());
        take("epicsMetrics", epics_metrics.is_defaulted());
        take("epics", epic_lists.is_defaulted());
        take("roadmap", roadmap.digest.is_defaulted());
        take("themes", roadmap.themes.is_defaulted());
        take("sprint", sprint.is_defaulted());

        let roadmap_digest = roadmap.digest.into_inner();
        let sprint = sprint.into_inner();
        let progress = compute_progress(&roadmap_digest.capabilities, &sprint);

        if !defaulted.is_empty() {
            tracing::debug!("Using fallbacks for: {}", defaulted.join(", "));
        }

        Self {
            docs: docs.into_inner(),
            requirement_metrics: metrics.into_inner(),
            functional: functional.into_inner(),
            non_functional: non_functional.into_inner(),
            epics_metrics: epics_metrics.into_inner(),
            epics: epic_lists.into_inner(),
            roadmap: roadmap_digest,
            themes: roadmap.themes.into_inner(),
            sprint,
            progress,
            roadmap_updated: roadmap.updated,
            defaulted,
        }
    }

    fn capability_status(&self, id: &str) -> Option<&WorkStatus> {
        self.progress.get(id).map(|p| &p.status)
    }

    /// Story completion of a theme, summed over its capabilities that have stories.
    pub fn theme_percent(&self, theme: &Theme) -> u32 {
        let (done, total) = theme
            .capability_ids
            .iter()
            .filter_map(|id| self.progress.get(id))
            .filter(|p| p.total > 0)
            .fold((0, 0), |(done, total), p| (done + p.done, total + p.total));
        percent(done, total)
    }

    pub fn summary(&self) -> DashboardSummary {
        let capabilities_done = self
            .roadmap
            .capabilities
            .iter()
            .filter(|c| self.capability_status(&c.id).is_some_and(WorkStatus::is_done))
            .count();

        let epics_total = self.sprint.epics().count();
        let epics_done = self.sprint.epics().filter(|e| e.work_status().is_done()).count();
        let stories_total = self.sprint.stories().count();
        let stories_done = self.sprint.stories().filter(|e| e.work_status().is_done()).count();

        let theme_count = self.themes.len();
        let theme_sum: u32 = self.themes.iter().map(|t| self.theme_percent(t)).sum();
        let theme_percent = if theme_count == 0 {
            0
        } else {
            (2 * theme_sum + theme_count as u32) / (2 * theme_count as u32)
        };

        DashboardSummary {
            project: self.sprint.project.clone(),
            generated: self
                .sprint
                .generated
                .clone()
                .or_else(|| self.roadmap_updated.clone()),
            theme_count,
            theme_percent,
            capabilities: Tally::new(capabilities_done, self.roadmap.capabilities.len()),
            epics: Tally::new(epics_done, epics_total),
            stories: Tally::new(stories_done, stories_total),
            requirements: self.requirement_metrics,
            declared: self.epics_metrics,
        }
    }

    /// Title of an epic key from the narrative document.
    pub fn epic_title(&self, epic_key: &str) -> Option<&str> {
        let id = epic_number(epic_key).parse().ok()?;
        self.epics.epic_title(id)
    }

    /// Title of a story key (`<epic>-<seq>-<slug>`) from the narrative document.
    pub fn story_title(&self, story_key: &str) -> Option<&str> {
        let mut parts = story_key.splitn(3, '-');
        let epic: u32 = parts.next()?.parse().ok()?;
        let seq: u32 = parts.next()?.parse().ok()?;
        let id = format!("{}.{}", epic, seq);
        self.epics
            .stories
            .iter()
            .find(|s| s.epic_id == epic && s.id == id)
            .map(|s| s.title.as_str())
    }

    /// Epic keys in development order; the recorded epics when no sequence is given.
    fn epic_keys(&self) -> Vec<&str> {
        if self.sprint.development_sequence.is_empty() {
            self.sprint.epics().map(|e| e.key.as_str()).collect()
        } else {
            self.sprint.development_sequence.iter().map(String::as_str).collect()
        }
    }

    pub fn epic_views(&self) -> Vec<EpicView> {
        self.epic_keys()
            .into_iter()
            .map(|key| {
                let stories: Vec<StatusEntry> = self.sprint.stories_for_epic(key).cloned().collect();
                let done = stories.iter().filter(|s| s.work_status().is_done()).count();
                let number = epic_number(key);
                let capabilities = self
                    .roadmap
                    .capabilities
                    .iter()
                    .filter(|c| c.links.epics.iter().any(|e| epic_number(e) == number))
                    .map(|c| c.id.clone())
                    .collect();

                EpicView {
                    key: key.to_string(),
                    title: self.epic_title(key).map(str::to_string),
                    status: self.sprint.epic_status(key),
                    progress: Tally::new(done, stories.len()),
                    stories,
                    capabilities,
                }
            })
            .collect()
    }

    pub fn board(&self, group_by: GroupBy) -> Board {
        let mut board = Board::new(group_by);

        match group_by {
            GroupBy::Stories => {
                for story in self.sprint.stories() {
                    let label = self.story_title(&story.key).unwrap_or(&story.key);
                    board.place(&story.work_status(), &story.key, label);
                }
            }
            GroupBy::Epics => {
                for key in self.epic_keys() {
                    let label = self.epic_title(key).unwrap_or(key);
                    board.place(&self.sprint.epic_status(key), key, label);
                }
            }
            GroupBy::Capabilities => {
                for cap in &self.roadmap.capabilities {
                    let status = self.capability_status(&cap.id).cloned().unwrap_or_default();
                    let label = if cap.title.is_empty() { &cap.id } else { &cap.title };
                    board.place(&status, &cap.id, label);
                }
            }
            GroupBy::Themes => {
                for theme in &self.themes {
                    let status = rollup_status(
                        theme
                            .capability_ids
                            .iter()
                            .filter_map(|id| self.capability_status(id)),
                    );
                    board.place(&status, &theme.name, &theme.name);
                }
            }
        }

        board
    }
}
