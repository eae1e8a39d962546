//! Theme grouping from roadmap YAML comments
//!
//! Themes are not part of the YAML data; they are written as comments above
//! the capabilities they group:
//!
//! ```yaml
//! capabilities:
//!   # TEMA: 🏥 Clínico
//!   - id: cap-prontuario
//!   - id: cap-receita
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scan::lines_with_offsets;

use super::{present, Extracted};

static RE_THEME_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\s*TEMA:\s*(.+)$").unwrap());
static RE_CAPABILITY_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^  - id:\s*(\S+)$").unwrap());

/// Decorative emoji used in theme comments.
const THEME_EMOJI: &[char] = &[
    '🏥', '💰', '🤖', '🚀', '👥', '📊', '🔌', '⚙', '📜', '🔬', '\u{fe0f}',
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub capability_ids: Vec<String>,
}

/// Groups capability ids under the most recent `# TEMA:` comment.
///
/// Ids seen before any theme comment are not grouped. A theme name that
/// appears again later keeps accumulating into its first group.
pub fn extract_themes(raw: Option<&str>) -> Extracted<Vec<Theme>> {
    let Some(text) = present(raw) else {
        return Extracted::absent("roadmap");
    };

    let mut themes: Vec<Theme> = Vec::new();
    let mut current: Option<String> = None;

    for (_, line) in lines_with_offsets(text) {
        if let Some(caps) = RE_THEME_COMMENT.captures(line) {
            current = Some(clean_theme_name(&caps[1]));
        }

        let (Some(theme), Some(caps)) = (&current, RE_CAPABILITY_ID.captures(line)) else {
            continue;
        };
        let id = caps[1].to_string();
        match themes.iter_mut().find(|t| &t.name == theme) {
            Some(existing) => existing.capability_ids.push(id),
            None => themes.push(Theme {
                name: theme.clone(),
                capability_ids: vec![id],
            }),
        }
    }

    Extracted::Parsed(themes)
}

fn clean_theme_name(raw: &str) -> String {
    raw.replace(THEME_EMOJI, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_ids_under_themes() {
        let text = r#"updated: 2026-01-10
capabilities:
  - id: cap-orfa
  # TEMA: 🏥 Clínico
  - id: cap-prontuario
    title: Prontuário
  - id: cap-receita
  # TEMA: ⚙️  Plataforma   Base
  - id: cap-infra
  # TEMA: 🏥 Clínico
  - id: cap-tele
"#;
        let themes = extract_themes(Some(text)).into_inner();

        assert_eq!(themes.len(), 2);
        assert_eq!(themes[0].name, "Clínico");
        assert_eq!(
            themes[0].capability_ids,
            vec!["cap-prontuario", "cap-receita", "cap-tele"]
        );
        assert_eq!(themes[1].name, "Plataforma Base");
        assert_eq!(themes[1].capability_ids, vec!["cap-infra"]);
    }

    #[test]
    fn test_nested_ids_are_ignored() {
        let text = "# TEMA: Clínico\n    - id: nested\n- id: top-level\n  - id: ok\n";
        let themes = extract_themes(Some(text)).into_inner();
        assert_eq!(themes[0].capability_ids, vec!["ok"]);
    }

    #[test]
    fn test_fallback() {
        assert!(extract_themes(None).is_defaulted());
        assert!(extract_themes(Some("capabilities: []")).into_inner().is_empty());
    }
}
