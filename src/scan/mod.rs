//! Line-oriented text scanners
//!
//! Recognize headings, pipe-table rows, and inline document links. Every
//! scanner works on plain `&str` input and reports byte offsets so callers can
//! relate the results of different scanners to each other.

pub mod heading;
pub mod link;
pub mod table;

pub use heading::{headings, Heading};
pub use link::document_links;
pub use table::{table_rows, TableRow};

/// Iterates `(offset, line)` pairs, splitting on `\n` and dropping a trailing `\r`.
pub(crate) fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, line.strip_suffix('\r').unwrap_or(line))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_with_offsets() {
        let lines: Vec<_> = lines_with_offsets("a\r\nbc\n\nd").collect();
        assert_eq!(lines, vec![(0, "a"), (3, "bc"), (6, ""), (7, "d")]);
    }
}
