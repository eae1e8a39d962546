//! Product requirements document extraction
//!
//! Summary counts come from the bold "Total" rows of the summary table;
//! requirement lists come from the RF/RNF tables.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::requirements::{interpret, RequirementLists, TableSchema};
use crate::vocabulary::{
    DEFAULT_IMPLEMENTED_FUNCTIONAL, DEFAULT_IMPLEMENTED_NON_FUNCTIONAL,
    DEFAULT_PLANNED_FUNCTIONAL, DEFAULT_PLANNED_NON_FUNCTIONAL,
};

use super::{present, Extracted};

static RE_TOTAL_RF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*Total RFs\*\*\s*\|\s*\*\*([0-9]+)\*\*\s*\|\s*\*\*([0-9]+)\*\*\s*\|\s*\*\*([0-9]+)\*\*")
        .unwrap()
});

static RE_TOTAL_RNF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*Total RNFs\*\*\s*\|\s*\*\*([0-9]+)\*\*\s*\|\s*\*\*([0-9]+)\*\*").unwrap()
});

/// Requirement counts from the summary table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementMetrics {
    pub implemented_functional: u32,
    pub planned_functional: u32,
    pub implemented_non_functional: u32,
    pub planned_non_functional: u32,
}

impl Default for RequirementMetrics {
    fn default() -> Self {
        Self {
            implemented_functional: DEFAULT_IMPLEMENTED_FUNCTIONAL,
            planned_functional: DEFAULT_PLANNED_FUNCTIONAL,
            implemented_non_functional: DEFAULT_IMPLEMENTED_NON_FUNCTIONAL,
            planned_non_functional: DEFAULT_PLANNED_NON_FUNCTIONAL,
        }
    }
}

/// Reads the `**Total RFs**` / `**Total RNFs**` summary rows.
///
/// A row that is missing, or a count of zero, keeps the default for that field.
pub fn extract_requirement_metrics(text: Option<&str>) -> Extracted<RequirementMetrics> {
    let Some(text) = present(text) else {
        return Extracted::absent("requirements");
    };

    let mut metrics = RequirementMetrics::default();
    let rf = RE_TOTAL_RF.captures(text);
    let rnf = RE_TOTAL_RNF.captures(text);

    if let Some(caps) = &rf {
        metrics.implemented_functional = count_or(caps, 1, metrics.implemented_functional);
        metrics.planned_functional = count_or(caps, 2, metrics.planned_functional);
    }
    if let Some(caps) = &rnf {
        metrics.implemented_non_functional = count_or(caps, 1, metrics.implemented_non_functional);
        metrics.planned_non_functional = count_or(caps, 2, metrics.planned_non_functional);
    }

    if rf.is_none() && rnf.is_none() {
        tracing::debug!("No requirement summary rows found; using default counts");
        return Extracted::Defaulted(metrics);
    }
    Extracted::Parsed(metrics)
}

fn count_or(caps: &Captures<'_>, group: usize, default: u32) -> u32 {
    caps[group]
        .parse::<u32>()
        .ok()
        .filter(|n| *n != 0)
        .unwrap_or(default)
}

/// Functional requirements (`RF-###`) split by status.
pub fn extract_functional_requirements(text: Option<&str>) -> Extracted<RequirementLists> {
    match present(text) {
        Some(text) => Extracted::Parsed(interpret(text, &TableSchema::functional())),
        None => Extracted::absent("requirements"),
    }
}

/// Non-functional requirements (`RNF-###`) split by status.
pub fn extract_non_functional_requirements(text: Option<&str>) -> Extracted<RequirementLists> {
    match present(text) {
        Some(text) => Extracted::Parsed(interpret(text, &TableSchema::non_functional())),
        None => Extracted::absent("requirements"),
    }
}
