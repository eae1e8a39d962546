//! ATX heading scanner

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::lines_with_offsets;

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

/// A heading line in a markdown document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-6)
    pub level: u8,
    /// Heading text, trimmed
    pub title: String,
    /// Byte offset of the start of the heading line
    pub offset: usize,
}

/// Returns every heading of exactly `level`, in document order.
pub fn headings(text: &str, level: u8) -> Vec<Heading> {
    let mut out = Vec::new();

    for (offset, line) in lines_with_offsets(text) {
        let Some(caps) = RE_HEADING.captures(line) else {
            continue;
        };
        if caps[1].len() == level as usize {
            out.push(Heading {
                level,
                title: caps[2].trim().to_string(),
                offset,
            });
        }
    }

    out
}
