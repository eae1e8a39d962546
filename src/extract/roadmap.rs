//! Capability roadmap normalization
//!
//! The roadmap YAML is loosely maintained by hand. Every field is coerced to
//! its expected type, falling back to an empty or positional default.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::status::WorkStatus;

use super::{number_i64, scalar_string, truthy_string, Extracted};

static NULL: Value = Value::Null;

/// Ids a capability links to in the other artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityLinks {
    pub frs: Vec<String>,
    pub rnfs: Vec<String>,
    pub epics: Vec<String>,
    pub stories: Vec<String>,
}

/// Progress counters as written in the roadmap file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityProgressCounters {
    pub stories_total: i64,
    pub stories_done: i64,
    pub stories_in_progress: i64,
}

/// A business-level deliverable grouping one or more epics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    pub id: String,
    pub title: String,
    pub description: String,
    pub value_proposition: String,
    pub priority: i64,
    pub status: WorkStatus,
    pub depends_on: Vec<String>,
    pub links: CapabilityLinks,
    pub progress: CapabilityProgressCounters,
}

/// Provenance of a generated roadmap; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_prd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_epics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_sprint_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability_count: Option<i64>,
    /// Present (possibly empty) whenever the source had a metadata mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapDigest {
    pub capabilities: Vec<Capability>,
    pub sync_metadata: SyncMetadata,
}

/// Normalizes an already-deserialized roadmap document.
///
/// Returns the empty digest when `capabilities` is not a sequence.
pub fn normalize_roadmap(root: &Value) -> Extracted<RoadmapDigest> {
    let Some(entries) = root.get("capabilities").and_then(Value::as_sequence) else {
        tracing::debug!("Roadmap has no capabilities sequence; using empty digest");
        return Extracted::Defaulted(RoadmapDigest::default());
    };

    let capabilities = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.is_mapping())
        .map(|(i, entry)| normalize_capability(entry, i))
        .collect();

    let sync_metadata = root
        .get("sync_metadata")
        .filter(|v| v.is_mapping())
        .map(normalize_sync_metadata)
        .unwrap_or_default();

    Extracted::Parsed(RoadmapDigest {
        capabilities,
        sync_metadata,
    })
}

fn normalize_capability(entry: &Value, position: usize) -> Capability {
    let field = |key: &str| entry.get(key).unwrap_or(&NULL);
    let links = field("links");
    let progress = field("progress");

    Capability {
        id: truthy_string(field("id")).unwrap_or_default(),
        title: truthy_string(field("title")).unwrap_or_default(),
        description: field("description").as_str().unwrap_or_default().to_string(),
        value_proposition: truthy_string(field("value_proposition")).unwrap_or_default(),
        priority: number_i64(field("priority")).unwrap_or(position as i64 + 1),
        status: truthy_string(field("status"))
            .map(|s| WorkStatus::parse(&s))
            .unwrap_or_default(),
        depends_on: string_list(field("depends_on")),
        links: CapabilityLinks {
            frs: string_list(nested(links, "frs")),
            rnfs: string_list(nested(links, "rnfs")),
            epics: string_list(nested(links, "epics")),
            stories: string_list(nested(links, "stories")),
        },
        progress: CapabilityProgressCounters {
            stories_total: number_i64(nested(progress, "stories_total")).unwrap_or(0),
            stories_done: number_i64(nested(progress, "stories_done")).unwrap_or(0),
            stories_in_progress: number_i64(nested(progress, "stories_in_progress")).unwrap_or(0),
        },
    }
}

fn normalize_sync_metadata(meta: &Value) -> SyncMetadata {
    let field = |key: &str| meta.get(key).and_then(scalar_string);

    SyncMetadata {
        source_prd: field("source_prd"),
        source_epics: field("source_epics"),
        source_sprint_status: field("source_sprint_status"),
        capability_count: meta.get("capability_count").and_then(number_i64),
        strategy: Some(meta.get("strategy").and_then(truthy_string).unwrap_or_default()),
    }
}

fn nested<'a>(parent: &'a Value, key: &str) -> &'a Value {
    parent.get(key).unwrap_or(&NULL)
}

/// Scalar elements of a sequence, stringified; anything else is dropped.
fn string_list(value: &Value) -> Vec<String> {
    value
        .as_sequence()
        .map(|seq| seq.iter().filter_map(scalar_string).collect())
        .unwrap_or_default()
}
