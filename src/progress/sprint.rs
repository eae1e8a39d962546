//! Sprint status document (`sprint-status.yaml`)
//!
//! ```yaml
//! generated: 2026-02-01T10:30:00
//! project: clinic
//! development_sequence: [epic-1, epic-2]
//! development_status:
//!   epic-1: in-progress
//!   1-1-comparecimento: done
//!   1-2-evolucao: review
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::extract::{load_yaml, scalar_string, Extracted};
use crate::status::WorkStatus;
use crate::vocabulary::RESERVED_STATUS_KEYS;

static RE_EPIC_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^epic-[0-9]+$").unwrap());

/// True for epic keys (`epic-3`), false for story keys (`3-1-login`).
pub fn is_epic_key(key: &str) -> bool {
    RE_EPIC_KEY.is_match(key)
}

/// Epic number of an epic key, accepting bare numbers too (`epic-3` and `3` give `3`).
pub fn epic_number(key: &str) -> &str {
    key.strip_prefix("epic-").unwrap_or(key)
}

/// One `development_status` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub key: String,
    pub status: String,
}

impl StatusEntry {
    pub fn work_status(&self) -> WorkStatus {
        WorkStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintStatus {
    pub generated: Option<String>,
    pub project: Option<String>,
    /// Epic keys in planned development order
    pub development_sequence: Vec<String>,
    /// Status entries in file order
    pub development_status: Vec<StatusEntry>,
}

impl SprintStatus {
    /// Reads a sprint status tree; anything that is not a mapping gives the empty status.
    pub fn from_value(root: &Value) -> Self {
        let development_status = root
            .get("development_status")
            .and_then(Value::as_mapping)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| {
                        Some(StatusEntry {
                            key: scalar_string(k)?,
                            status: scalar_string(v).unwrap_or_default(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let development_sequence = root
            .get("development_sequence")
            .and_then(Value::as_sequence)
            .map(|seq| seq.iter().filter_map(scalar_string).collect())
            .unwrap_or_default();

        Self {
            generated: root.get("generated").and_then(scalar_string),
            project: root.get("project").and_then(scalar_string),
            development_sequence,
            development_status,
        }
    }

    /// Parses sprint status YAML text.
    pub fn parse(text: Option<&str>) -> Extracted<Self> {
        match load_yaml(text) {
            Some(root) if root.is_mapping() => Extracted::Parsed(Self::from_value(&root)),
            _ => Extracted::absent("sprint status"),
        }
    }

    /// Status string recorded for `key`.
    pub fn status_of(&self, key: &str) -> Option<&str> {
        self.development_status
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.status.as_str())
    }

    /// Status of an epic key, `backlog` when unrecorded.
    pub fn epic_status(&self, epic_key: &str) -> WorkStatus {
        self.status_of(epic_key)
            .map(WorkStatus::parse)
            .unwrap_or_default()
    }

    /// Entries keyed by epic (`epic-N`).
    pub fn epics(&self) -> impl Iterator<Item = &StatusEntry> {
        self.development_status.iter().filter(|e| is_epic_key(&e.key))
    }

    /// Entries keyed by story: neither epic keys nor reserved metadata keys.
    pub fn stories(&self) -> impl Iterator<Item = &StatusEntry> {
        self.development_status.iter().filter(|e| {
            !is_epic_key(&e.key) && !RESERVED_STATUS_KEYS.contains(&e.key.as_str())
        })
    }

    /// Stories of an epic, matched by the `<N>-` key prefix.
    pub fn stories_for_epic<'a>(&'a self, epic_key: &str) -> impl Iterator<Item = &'a StatusEntry> {
        let prefix = format!("{}-", epic_number(epic_key));
        self.stories().filter(move |e| e.key.starts_with(&prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPRINT: &str = r#"
generated: 2026-02-01T10:30:00
project: clinic
development_sequence: [epic-1, epic-2, epic-10]
development_status:
  epic-1: in-progress
  1-1-comparecimento: done
  1-2-evolucao: review
  epic-2: backlog
  2-1-resumo: ready-for-dev
  10-1-agenda: done
  generated: ignored
"#;

    #[test]
    fn test_parse() {
        let sprint = SprintStatus::parse(Some(SPRINT));
        assert!(!sprint.is_defaulted());
        let sprint = sprint.into_inner();

        assert_eq!(sprint.generated.as_deref(), Some("2026-02-01T10:30:00"));
        assert_eq!(sprint.development_sequence, vec!["epic-1", "epic-2", "epic-10"]);
        assert_eq!(sprint.epics().count(), 2);
        assert_eq!(sprint.stories().count(), 4);
        assert_eq!(sprint.epic_status("epic-1"), WorkStatus::InProgress);
        assert_eq!(sprint.epic_status("epic-10"), WorkStatus::Backlog);
    }

    #[test]
    fn test_stories_for_epic_uses_full_number() {
        let sprint = SprintStatus::parse(Some(SPRINT)).into_inner();

        let epic_one: Vec<_> = sprint.stories_for_epic("epic-1").map(|e| e.key.as_str()).collect();
        assert_eq!(epic_one, vec!["1-1-comparecimento", "1-2-evolucao"]);

        let epic_ten: Vec<_> = sprint.stories_for_epic("10").map(|e| e.key.as_str()).collect();
        assert_eq!(epic_ten, vec!["10-1-agenda"]);
    }

    #[test]
    fn test_epic_key() {
        assert!(is_epic_key("epic-12"));
        assert!(!is_epic_key("epic-"));
        assert!(!is_epic_key("12-1-epic"));
        assert!(!is_epic_key("epic-١"));
        assert_eq!(epic_number("epic-4"), "4");
        assert_eq!(epic_number("4"), "4");
    }

    #[test]
    fn test_fallbacks() {
        assert!(SprintStatus::parse(None).is_defaulted());
        assert!(SprintStatus::parse(Some("- a\n- b")).is_defaulted());
        assert!(SprintStatus::parse(Some("development_status: [a")).is_defaulted());

        let odd = SprintStatus::from_value(&serde_yaml::from_str("development_status: [a]").unwrap());
        assert!(odd.development_status.is_empty());
    }
}
