pub mod config;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod progress;
pub mod requirements;
pub mod scan;
pub mod status;
pub mod vocabulary;

pub use config::ViewerConfig;
pub use dashboard::{load_story, Artifacts, Dashboard, DashboardSummary, EpicView, Tally};
pub use error::{Result, ViewerError};
pub use extract::{
    extract_doc_list, extract_epics_lists, extract_epics_metrics, extract_functional_requirements,
    extract_non_functional_requirements, extract_requirement_metrics, extract_themes, load_yaml,
    normalize_roadmap, parse_yaml, Capability, CapabilityLinks, DocumentLink, EpicRecord,
    EpicsLists, EpicsMetrics, Extracted, RequirementMetrics, RoadmapDigest, StoryRecord,
    SyncMetadata, Theme,
};
pub use progress::{
    capability_progress, compute_progress, Board, CapabilityProgress, GroupBy, KanbanColumn,
    SprintStatus,
};
pub use requirements::{RequirementItem, RequirementLists};
pub use status::WorkStatus;
pub use vocabulary::Persona;
