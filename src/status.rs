//! Work status vocabulary shared by capabilities, epics and stories.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum WorkStatus {
    #[default]
    Backlog,
    ReadyForDev,
    InProgress,
    Review,
    QaReview,
    Done,
    /// Any status outside the known set, kept verbatim
    Other(String),
}

impl WorkStatus {
    /// Parses a status string; unknown values are kept as [`WorkStatus::Other`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "backlog" => WorkStatus::Backlog,
            "ready-for-dev" => WorkStatus::ReadyForDev,
            "in-progress" => WorkStatus::InProgress,
            "review" => WorkStatus::Review,
            "qa-review" => WorkStatus::QaReview,
            "done" => WorkStatus::Done,
            _ => WorkStatus::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WorkStatus::Backlog => "backlog",
            WorkStatus::ReadyForDev => "ready-for-dev",
            WorkStatus::InProgress => "in-progress",
            WorkStatus::Review => "review",
            WorkStatus::QaReview => "qa-review",
            WorkStatus::Done => "done",
            WorkStatus::Other(s) => s,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, WorkStatus::Done)
    }
}

impl std::fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WorkStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WorkStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(WorkStatus::parse(&s))
    }
}
