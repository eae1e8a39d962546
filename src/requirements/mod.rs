//! Requirement table interpretation
//!
//! Turns the pipe tables of a product requirements document into typed
//! implemented/planned requirement lists.

pub mod interpreter;
pub mod priority;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::vocabulary::{
    Persona, FUNCTIONAL_ID_HEADER, IMPLEMENTED_KEYWORD, NON_FUNCTIONAL_ID_HEADER,
    PLANNED_KEYWORD,
};

pub use interpreter::interpret;
pub use priority::parse_priority;

static RE_FUNCTIONAL_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^RF-[0-9]+$").unwrap());
static RE_NON_FUNCTIONAL_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^RNF-[0-9]+$").unwrap());

/// One row of a requirements table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementItem {
    /// Requirement id (e.g. `RF-001`)
    pub id: String,
    /// Capability column text
    pub capability: String,
    /// Level-3 heading the row appeared under (empty before the first one)
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
    /// Rank among planned items; never set on implemented items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

/// Requirements split by lifecycle status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementLists {
    pub implemented: Vec<RequirementItem>,
    /// Sorted ascending by priority, table order among ties
    pub planned: Vec<RequirementItem>,
}

impl RequirementLists {
    pub fn is_empty(&self) -> bool {
        self.implemented.is_empty() && self.planned.is_empty()
    }
}

/// Which table a row belongs to and how its status is spelled
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub id_header: &'static str,
    pub id_pattern: &'static Regex,
    pub implemented_keyword: &'static str,
    pub planned_keyword: &'static str,
}

impl TableSchema {
    /// Functional requirements (`RF-###`).
    pub fn functional() -> Self {
        Self {
            id_header: FUNCTIONAL_ID_HEADER,
            id_pattern: &RE_FUNCTIONAL_ID,
            implemented_keyword: IMPLEMENTED_KEYWORD,
            planned_keyword: PLANNED_KEYWORD,
        }
    }

    /// Non-functional requirements (`RNF-###`).
    pub fn non_functional() -> Self {
        Self {
            id_header: NON_FUNCTIONAL_ID_HEADER,
            id_pattern: &RE_NON_FUNCTIONAL_ID,
            implemented_keyword: IMPLEMENTED_KEYWORD,
            planned_keyword: PLANNED_KEYWORD,
        }
    }
}
