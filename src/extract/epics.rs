//! Epic and story extraction from the narrative epics document

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scan::lines_with_offsets;
use crate::vocabulary::{DEFAULT_EPIC_COUNT, DEFAULT_STORY_COUNT};

use super::{present, Extracted};

static RE_TOTAL_EPICS: Lazy<Regex> = Lazy::new(|| Regex::new(r"totalEpics:\s*([0-9]+)").unwrap());
static RE_TOTAL_STORIES: Lazy<Regex> = Lazy::new(|| Regex::new(r"totalStories:\s*([0-9]+)").unwrap());

static RE_EPIC_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^### Épico ([0-9]+):\s*(.+)$").unwrap());
static RE_STORY_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#### História ([0-9]+)\.([0-9]+):\s*(.+)$").unwrap());

/// Epic and story counts declared in the document front matter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpicsMetrics {
    pub epic_count: u32,
    pub story_count: u32,
}

impl Default for EpicsMetrics {
    fn default() -> Self {
        Self {
            epic_count: DEFAULT_EPIC_COUNT,
            story_count: DEFAULT_STORY_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpicRecord {
    pub id: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    /// `<epic>.<sequence>` exactly as written in the heading
    pub id: String,
    pub epic_id: u32,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpicsLists {
    pub epics: Vec<EpicRecord>,
    pub stories: Vec<StoryRecord>,
}

impl EpicsLists {
    /// Title of epic `id`, if the document declares it.
    pub fn epic_title(&self, id: u32) -> Option<&str> {
        self.epics.iter().find(|e| e.id == id).map(|e| e.title.as_str())
    }
}

/// Reads the `totalEpics:` / `totalStories:` tokens; missing or zero counts keep defaults.
pub fn extract_epics_metrics(text: Option<&str>) -> Extracted<EpicsMetrics> {
    let Some(text) = present(text) else {
        return Extracted::absent("epics");
    };

    let epics = first_count(&RE_TOTAL_EPICS, text);
    let stories = first_count(&RE_TOTAL_STORIES, text);
    let defaults = EpicsMetrics::default();
    let metrics = EpicsMetrics {
        epic_count: epics.unwrap_or(defaults.epic_count),
        story_count: stories.unwrap_or(defaults.story_count),
    };

    if epics.is_none() && stories.is_none() {
        return Extracted::Defaulted(metrics);
    }
    Extracted::Parsed(metrics)
}

fn first_count(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|n| *n != 0)
}

/// Collects `### Épico N: Title` and `#### História N.M: Title` headings in document order.
pub fn extract_epics_lists(text: Option<&str>) -> Extracted<EpicsLists> {
    let Some(text) = present(text) else {
        return Extracted::absent("epics");
    };

    let mut lists = EpicsLists::default();

    for (_, line) in lines_with_offsets(text) {
        if let Some(caps) = RE_EPIC_HEADING.captures(line) {
            if let Ok(id) = caps[1].parse() {
                lists.epics.push(EpicRecord {
                    id,
                    title: caps[2].trim().to_string(),
                });
            }
            continue;
        }

        if let Some(caps) = RE_STORY_HEADING.captures(line) {
            if let Ok(epic_id) = caps[1].parse() {
                lists.stories.push(StoryRecord {
                    id: format!("{}.{}", &caps[1], &caps[2]),
                    epic_id,
                    title: caps[3].trim().to_string(),
                });
            }
        }
    }

    Extracted::Parsed(lists)
}
