//! Document extractors
//!
//! Each extractor is total: whatever it is given, it returns a well-typed
//! record. The [`Extracted`] wrapper records whether the value came from the
//! input or from the documented fallback.

pub mod epics;
pub mod index;
pub mod prd;
pub mod roadmap;
pub mod themes;

use serde_yaml::Value;

use crate::error::Result;

pub use epics::{extract_epics_lists, extract_epics_metrics, EpicRecord, EpicsLists, EpicsMetrics, StoryRecord};
pub use index::{extract_doc_list, DocumentLink};
pub use prd::{
    extract_functional_requirements, extract_non_functional_requirements,
    extract_requirement_metrics, RequirementMetrics,
};
pub use roadmap::{
    normalize_roadmap, Capability, CapabilityLinks, CapabilityProgressCounters, RoadmapDigest,
    SyncMetadata,
};
pub use themes::{extract_themes, Theme};

/// Result of an extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<T> {
    /// Value derived from the input
    Parsed(T),
    /// Input was absent or unusable; value is the declared fallback
    Defaulted(T),
}

impl<T> Extracted<T> {
    pub fn into_inner(self) -> T {
        match self {
            Extracted::Parsed(v) | Extracted::Defaulted(v) => v,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Extracted::Parsed(v) | Extracted::Defaulted(v) => v,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Extracted::Defaulted(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extracted<U> {
        match self {
            Extracted::Parsed(v) => Extracted::Parsed(f(v)),
            Extracted::Defaulted(v) => Extracted::Defaulted(f(v)),
        }
    }
}

impl<T: Default> Extracted<T> {
    /// Fallback for a missing or blank document.
    pub(crate) fn absent(what: &str) -> Self {
        tracing::debug!("No {} text; using fallback", what);
        Extracted::Defaulted(T::default())
    }
}

/// Returns the text if it has any non-whitespace content.
pub(crate) fn present(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// Deserializes YAML text into a generic tree.
pub fn parse_yaml(text: &str) -> Result<Value> {
    Ok(serde_yaml::from_str(text)?)
}

/// Like [`parse_yaml`], but `None` when absent or invalid.
pub fn load_yaml(text: Option<&str>) -> Option<Value> {
    let text = present(text)?;
    match parse_yaml(text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Invalid YAML document: {}", e);
            None
        }
    }
}

/// Stringifies a YAML scalar; sequences, mappings and null yield `None`.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Like [`scalar_string`] but treats `""`, `0` and `false` as missing.
pub(crate) fn truthy_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => scalar_string(other),
    }
}

/// Integer view of a YAML number; finite floats are truncated.
pub(crate) fn number_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::Tagged(tagged) => number_i64(&tagged.value),
        _ => None,
    }
}
