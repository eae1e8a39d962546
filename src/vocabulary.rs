//! Fixed document vocabulary
//!
//! Status keywords, persona tokens, section names and fallback numbers used by
//! the extractors. Bump [`VOCABULARY_VERSION`] when a convention changes.

use serde::{Deserialize, Serialize};

/// Version of the document conventions recognized by this crate.
pub const VOCABULARY_VERSION: u32 = 1;

/// Extension every indexed document path ends with.
pub const DOC_EXTENSION: &str = ".md";

/// Section assigned to links that appear under no level-3 heading.
pub const UNSECTIONED: &str = "Outros";

/// Status substring marking an implemented requirement row.
pub const IMPLEMENTED_KEYWORD: &str = "IMPLEMENTADO";

/// Status substring marking a planned requirement row.
pub const PLANNED_KEYWORD: &str = "PLANEJADO";

/// Header label of the functional requirements id column.
pub const FUNCTIONAL_ID_HEADER: &str = "RF";

/// Header label of the non-functional requirements id column.
pub const NON_FUNCTIONAL_ID_HEADER: &str = "RNF";

/// Sprint status substrings counted as work in progress.
pub const IN_PROGRESS_MARKERS: [&str; 3] = ["in-progress", "review", "qa-review"];

/// Sprint status keys that are metadata rather than stories.
pub const RESERVED_STATUS_KEYS: [&str; 2] = ["generated", "project"];

pub const DEFAULT_IMPLEMENTED_FUNCTIONAL: u32 = 50;
pub const DEFAULT_PLANNED_FUNCTIONAL: u32 = 36;
pub const DEFAULT_IMPLEMENTED_NON_FUNCTIONAL: u32 = 25;
pub const DEFAULT_PLANNED_NON_FUNCTIONAL: u32 = 2;
pub const DEFAULT_EPIC_COUNT: u32 = 14;
pub const DEFAULT_STORY_COUNT: u32 = 64;

/// User role a requirement serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    #[serde(rename = "Paciente")]
    Paciente,
    #[serde(rename = "Médico")]
    Medico,
    #[serde(rename = "Secretária")]
    Secretaria,
    #[serde(rename = "Interno")]
    Interno,
}

impl Persona {
    pub const ALL: [Persona; 4] = [
        Persona::Paciente,
        Persona::Medico,
        Persona::Secretaria,
        Persona::Interno,
    ];

    /// Canonical display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Paciente => "Paciente",
            Persona::Medico => "Médico",
            Persona::Secretaria => "Secretária",
            Persona::Interno => "Interno",
        }
    }

    /// Lower-case, accent-free token the persona is matched by.
    fn token(&self) -> &'static str {
        match self {
            Persona::Paciente => "paciente",
            Persona::Medico => "medico",
            Persona::Secretaria => "secretaria",
            Persona::Interno => "interno",
        }
    }

    /// Matches a table cell case- and accent-insensitively.
    pub fn from_cell(cell: &str) -> Option<Self> {
        let folded = fold_accents(&cell.trim().to_lowercase());
        Self::ALL.into_iter().find(|p| p.token() == folded)
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strips diacritics from the Latin-1 letters Portuguese text uses.
pub fn fold_accents(s: &str) -> String {
    s.chars()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}
