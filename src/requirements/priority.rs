use once_cell::sync::Lazy;
use regex::Regex;

static RE_PRIORITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^P?([0-9]+)$").unwrap());

/// Parses a priority cell: a bare integer or `P<integer>`, case-insensitive.
pub fn parse_priority(cell: &str) -> Option<u32> {
    let token = cell.trim().to_uppercase();
    RE_PRIORITY
        .captures(&token)
        .and_then(|caps| caps[1].parse().ok())
}
