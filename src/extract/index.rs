//! Document list extraction from an index document

use serde::{Deserialize, Serialize};

use crate::scan::{document_links, headings};
use crate::vocabulary::UNSECTIONED;

use super::{present, Extracted};

/// A markdown document referenced from the index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentLink {
    /// Level-3 heading the link appeared under, or `"Outros"`
    pub section: String,
    /// Relative document path, always ending in `.md`
    pub path: String,
}

/// Lists the documents linked from an index, grouped by level-3 heading.
///
/// A level-3 section runs until the next level-3 heading; headings of any
/// other level do not split it. Links before the first level-3 heading are
/// collected into a final `"Outros"` group.
pub fn extract_doc_list(raw: Option<&str>) -> Extracted<Vec<DocumentLink>> {
    let Some(text) = present(raw) else {
        return Extracted::absent("index");
    };

    let sections = headings(text, 3);
    let mut list = Vec::new();

    for (i, heading) in sections.iter().enumerate() {
        let end = sections.get(i + 1).map_or(text.len(), |h| h.offset);
        let block = &text[heading.offset..end];

        list.extend(document_links(block).into_iter().map(|path| DocumentLink {
            section: heading.title.clone(),
            path,
        }));
    }

    let first = sections.first().map_or(text.len(), |h| h.offset);
    list.extend(document_links(&text[..first]).into_iter().map(|path| DocumentLink {
        section: UNSECTIONED.to_string(),
        path,
    }));

    Extracted::Parsed(list)
}
