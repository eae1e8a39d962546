//! Inline markdown link scanner

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::vocabulary::DOC_EXTENSION;

static RE_DOC_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\]\((\./)?([^)]+\.md)\)").unwrap());

/// Returns the `.md` targets of `[text](target)` links in `span`.
///
/// Leading `./` markers are stripped, duplicates are dropped, first-seen order is kept.
pub fn document_links(span: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for caps in RE_DOC_LINK.captures_iter(span) {
        let path = caps[2].trim_start_matches("./");
        if path.ends_with(DOC_EXTENSION) && seen.insert(path.to_string()) {
            out.push(path.to_string());
        }
    }

    out
}
