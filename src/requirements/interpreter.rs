//! Row-by-row interpretation of requirement tables.
//!
//! Column numbers are 1-based positions in [`TableRow::cells`], which keeps
//! the empty segment before the leading pipe: column 2 is the id, column 3
//! the capability.

use crate::scan::{headings, table_rows, TableRow};
use crate::vocabulary::Persona;

use super::priority::parse_priority;
use super::{RequirementItem, RequirementLists, TableSchema};

const ID_COLUMN: usize = 2;
const CAPABILITY_COLUMN: usize = 3;
const OPTIONAL_COLUMN: usize = 4;
const EXPLICIT_PRIORITY_COLUMN: usize = 5;
const MIN_CELLS: usize = 4;

enum Lifecycle {
    Implemented,
    Planned,
}

/// Splits the requirement rows of `text` into implemented and planned lists.
pub fn interpret(text: &str, schema: &TableSchema) -> RequirementLists {
    let sections = headings(text, 3);
    let mut next_section = 0;
    let mut current_section = "";
    let mut lists = RequirementLists::default();

    for row in table_rows(text) {
        while next_section < sections.len() && sections[next_section].offset < row.offset {
            current_section = sections[next_section].title.as_str();
            next_section += 1;
        }

        if row.len() < MIN_CELLS {
            continue;
        }
        let id = row.column(ID_COLUMN);
        if id == schema.id_header || !schema.id_pattern.is_match(id) {
            continue;
        }

        let status = status_cell(&row);
        let lifecycle = if status.contains(schema.implemented_keyword) {
            Lifecycle::Implemented
        } else if status.contains(schema.planned_keyword) {
            Lifecycle::Planned
        } else {
            continue;
        };

        let (persona, explicit_priority) = persona_and_priority(&row);
        let mut item = RequirementItem {
            id: id.to_string(),
            capability: row.column(CAPABILITY_COLUMN).to_string(),
            section: current_section.to_string(),
            persona,
            priority: None,
        };

        match lifecycle {
            Lifecycle::Implemented => lists.implemented.push(item),
            Lifecycle::Planned => {
                // Fallback rank is the running position, not a final re-rank.
                let rank = lists.planned.len() as u32 + 1;
                item.priority = Some(explicit_priority.unwrap_or(rank));
                lists.planned.push(item);
            }
        }
    }

    lists.planned.sort_by_key(|item| sort_key(item.priority));
    lists
}

/// A priority of 0 reads as unranked and sorts after every positive priority.
fn sort_key(priority: Option<u32>) -> u32 {
    match priority {
        Some(0) | None => u32::MAX,
        Some(p) => p,
    }
}

/// Last non-empty cell scanning backward down to the capability column,
/// whitespace-collapsed and upper-cased.
fn status_cell(row: &TableRow) -> String {
    row.cells[CAPABILITY_COLUMN - 1..]
        .iter()
        .rev()
        .find(|cell| !cell.is_empty())
        .map(|cell| cell.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase())
        .unwrap_or_default()
}

fn persona_and_priority(row: &TableRow) -> (Option<Persona>, Option<u32>) {
    let optional = row.column(OPTIONAL_COLUMN);
    match row.len() {
        n if n >= 7 => (
            Persona::from_cell(optional),
            parse_priority(row.column(EXPLICIT_PRIORITY_COLUMN)),
        ),
        6 => match Persona::from_cell(optional) {
            Some(persona) => (Some(persona), None),
            None => (None, parse_priority(optional)),
        },
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn functional(text: &str) -> RequirementLists {
        interpret(text, &TableSchema::functional())
    }

    #[test]
    fn test_implemented_and_planned() {
        let text = r#"
### Agenda

| RF     | Capacidade | Status       |
| ------ | ---------- | ------------ |
| RF-001 | Agendar    | IMPLEMENTADO |
| RF-002 | Remarcar   | PLANEJADO    |
"#;
        let lists = functional(text);

        assert_eq!(lists.implemented.len(), 1);
        assert_eq!(lists.implemented[0].id, "RF-001");
        assert_eq!(lists.implemented[0].section, "Agenda");
        assert_eq!(lists.implemented[0].priority, None);
        assert_eq!(lists.planned.len(), 1);
        assert_eq!(lists.planned[0].id, "RF-002");
        assert_eq!(lists.planned[0].priority, Some(1));
    }

    #[test]
    fn test_explicit_priority_column_sorts() {
        let text = r#"
| RF     | Capacidade | Prioridade | Status    |
| ------ | ---------- | ---------- | --------- |
| RF-010 | Segundo    | 2          | PLANEJADO |
| RF-020 | Primeiro   | P1         | PLANEJADO |
"#;
        let lists = functional(text);

        let ids: Vec<_> = lists.planned.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["RF-020", "RF-010"]);
        assert_eq!(lists.planned[0].priority, Some(1));
        assert_eq!(lists.planned[1].priority, Some(2));
    }

    #[test]
    fn test_six_cells_persona_column() {
        let text = r#"
| RF     | Capacidade | Persona    | Status    |
| RF-001 | Receita    | Médico     | PLANEJADO |
| RF-002 | Cadastro   | secretaria | PLANEJADO |
"#;
        let lists = functional(text);

        assert_eq!(lists.planned[0].persona, Some(Persona::Medico));
        assert_eq!(lists.planned[0].priority, Some(1));
        assert_eq!(lists.planned[1].persona, Some(Persona::Secretaria));
        assert_eq!(lists.planned[1].priority, Some(2));
    }

    #[test]
    fn test_seven_cells_persona_and_priority() {
        let text = r#"
| RF     | Capacidade | Persona  | Prioridade | Status    |
| RF-001 | Consulta   | Paciente | P2         | PLANEJADO |
| RF-002 | Laudo      | Interno  | 1          | PLANEJADO |
| RF-003 | Login      | Paciente | -          | IMPLEMENTADO |
"#;
        let lists = functional(text);

        assert_eq!(lists.planned[0].id, "RF-002");
        assert_eq!(lists.planned[0].persona, Some(Persona::Interno));
        assert_eq!(lists.planned[1].id, "RF-001");
        assert_eq!(lists.planned[1].persona, Some(Persona::Paciente));
        assert_eq!(lists.implemented[0].persona, Some(Persona::Paciente));
        assert_eq!(lists.implemented[0].priority, None);
    }

    #[test]
    fn test_mixed_explicit_and_fallback_ranks_interleave() {
        let text = r#"
| RF     | Capacidade | Prioridade | Status    |
| RF-001 | A          | 3          | PLANEJADO |
| RF-002 | B          | -          | PLANEJADO |
| RF-003 | C          | 1          | PLANEJADO |
| RF-004 | D          |            | PLANEJADO |
"#;
        let lists = functional(text);

        // RF-002 ranks 2 (second planned row), RF-004 ranks 4
        let ranked: Vec<_> = lists
            .planned
            .iter()
            .map(|i| (i.id.as_str(), i.priority.unwrap()))
            .collect();
        assert_eq!(ranked, vec![("RF-003", 1), ("RF-002", 2), ("RF-001", 3), ("RF-004", 4)]);
    }

    #[test]
    fn test_equal_priorities_keep_table_order() {
        let text = r#"
| RF     | Capacidade | Prioridade | Status    |
| RF-005 | A          | 1          | PLANEJADO |
| RF-001 | B          | 1          | PLANEJADO |
"#;
        let ids: Vec<_> = functional(text).planned.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["RF-005", "RF-001"]);
    }

    #[test]
    fn test_zero_priority_sorts_last() {
        let text = r#"
| RF     | Capacidade | Prioridade | Status    |
| RF-001 | A          | 0          | PLANEJADO |
| RF-002 | B          | 5          | PLANEJADO |
| RF-003 | C          | 1          | PLANEJADO |
"#;
        let lists = functional(text);

        let ranked: Vec<_> = lists
            .planned
            .iter()
            .map(|i| (i.id.as_str(), i.priority.unwrap()))
            .collect();
        assert_eq!(ranked, vec![("RF-003", 1), ("RF-002", 5), ("RF-001", 0)]);
    }

    #[test]
    fn test_status_scan_skips_trailing_empty_cells() {
        let text = "| RF-001 | Login | IMPLEMENTADO | | |\n| RF-002 | Busca | em   andamento |\n";
        let lists = functional(text);

        assert_eq!(lists.implemented.len(), 1);
        assert!(lists.planned.is_empty());
    }

    #[test]
    fn test_status_is_case_insensitive_substring() {
        let text = "| RF-001 | Login | implementado (v1) |\n| RF-002 | Busca | Planejado - Q3 |\n";
        let lists = functional(text);

        assert_eq!(lists.implemented.len(), 1);
        assert_eq!(lists.planned.len(), 1);
    }

    #[test]
    fn test_sections_follow_headings() {
        let text = r#"
| RF-000 | Antes | PLANEJADO |
### Agenda
| RF-001 | A | PLANEJADO |
#### Detalhe
| RF-002 | B | PLANEJADO |
### Financeiro
| RF-003 | C | IMPLEMENTADO |
"#;
        let lists = functional(text);

        let sections: Vec<_> = lists.planned.iter().map(|i| i.section.as_str()).collect();
        assert_eq!(sections, vec!["", "Agenda", "Agenda"]);
        assert_eq!(lists.implemented[0].section, "Financeiro");
    }

    #[test]
    fn test_skips_header_foreign_ids_and_short_rows() {
        let text = r#"
| RF | Capacidade | Status |
| RNF-001 | Desempenho | PLANEJADO |
| RF-001 |
| Total | 3 | PLANEJADO |
| RF-١٢ | Agenda | PLANEJADO |
"#;
        assert!(functional(text).is_empty());
    }

    #[test]
    fn test_non_functional_schema() {
        let text = r#"
| RNF     | Requisito  | Status       |
| RNF-001 | Latência   | IMPLEMENTADO |
| RNF-002 | LGPD       | PLANEJADO    |
| RF-001  | Login      | PLANEJADO    |
"#;
        let lists = interpret(text, &TableSchema::non_functional());

        assert_eq!(lists.implemented[0].id, "RNF-001");
        assert_eq!(lists.planned.len(), 1);
        assert_eq!(lists.planned[0].id, "RNF-002");
    }
}
