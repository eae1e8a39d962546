//! Integration tests for artifact loading and the dashboard views.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use bmad_viewer::{
    load_story, Artifacts, Dashboard, GroupBy, KanbanColumn, Tally, ViewerConfig, ViewerError,
    WorkStatus,
};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path).expect("Failed to read fixture")
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Lays out the fixtures in the default artifact structure.
fn artifact_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path();
    write(root, "index.md", &fixture("index-sample.md"));
    write(root, "planning-artifacts/prd.md", &fixture("prd-sample.md"));
    write(root, "planning-artifacts/epics.md", &fixture("epics-sample.md"));
    write(root, "planning-artifacts/capabilities.yaml", &fixture("capabilities.yaml"));
    write(
        root,
        "implementation-artifacts/sprint-status.yaml",
        &fixture("sprint-status.yaml"),
    );
    write(
        root,
        "implementation-artifacts/stories/1-1-comparecimento.md",
        "# História 1.1: Comparecimento\n",
    );
    dir
}

fn load(dir: &TempDir) -> Dashboard {
    let config = ViewerConfig::load(dir.path(), None).unwrap();
    Dashboard::from_artifacts(&Artifacts::load(&config))
}

mod loading {
    use super::*;

    #[test]
    fn test_full_layout_has_no_fallbacks() {
        let dir = artifact_dir();
        let dashboard = load(&dir);

        assert!(dashboard.defaulted.is_empty(), "{:?}", dashboard.defaulted);
        assert_eq!(dashboard.docs.len(), 4);
        assert_eq!(dashboard.functional.planned[0].id, "RF-002");
        assert_eq!(dashboard.epics.epics.len(), 2);
        assert_eq!(dashboard.roadmap.capabilities.len(), 2);
        assert_eq!(dashboard.sprint.project.as_deref(), Some("clinica"));
    }

    #[test]
    fn test_missing_artifacts_fall_back() {
        let dir = TempDir::new().unwrap();
        let dashboard = load(&dir);

        assert_eq!(dashboard.defaulted.len(), 9);
        assert_eq!(dashboard.epics_metrics.epic_count, 14);
        assert!(dashboard.roadmap.capabilities.is_empty());
        assert!(dashboard.progress.is_empty());
    }

    #[test]
    fn test_custom_layout_from_config() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "docs/roadmap.yaml", &fixture("capabilities.yaml"));
        write(
            dir.path(),
            ".bmad-viewer.toml",
            "capabilities = \"docs/roadmap.yaml\"\n",
        );

        let dashboard = load(&dir);
        assert_eq!(dashboard.roadmap.capabilities.len(), 2);
        assert!(dashboard.defaulted.contains(&"sprint".to_string()));
    }

    #[test]
    fn test_invalid_yaml_is_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "planning-artifacts/capabilities.yaml",
            "capabilities: [unclosed",
        );

        let dashboard = load(&dir);
        assert!(dashboard.defaulted.contains(&"roadmap".to_string()));
        assert!(dashboard.roadmap.capabilities.is_empty());
    }

    #[test]
    fn test_story_lookup() {
        let dir = artifact_dir();
        let config = ViewerConfig::load(dir.path(), None).unwrap();

        let story = load_story(&config, "1-1-comparecimento").unwrap();
        assert!(story.starts_with("# História 1.1"));
        assert!(matches!(
            load_story(&config, "2-1-lembrete-de-consulta"),
            Err(ViewerError::NotFound(_))
        ));
    }
}

mod views {
    use super::*;

    #[test]
    fn test_progress() {
        let dashboard = load(&artifact_dir());

        let prontuario = &dashboard.progress["cap-prontuario"];
        assert_eq!((prontuario.total, prontuario.done), (2, 2));
        assert_eq!(prontuario.status, WorkStatus::Done);

        let agenda = &dashboard.progress["cap-agenda"];
        assert_eq!((agenda.total, agenda.done, agenda.in_progress), (1, 0, 1));
        assert_eq!(agenda.status, WorkStatus::InProgress);
    }

    #[test]
    fn test_summary() {
        let summary = load(&artifact_dir()).summary();

        assert_eq!(summary.generated.as_deref(), Some("2026-02-01T10:30:00"));
        assert_eq!(summary.capabilities, Tally::new(1, 2));
        assert_eq!(summary.epics, Tally::new(1, 2));
        assert_eq!(summary.stories, Tally { done: 2, total: 3, percent: 67 });
        assert_eq!(summary.theme_count, 2);
        assert_eq!(summary.theme_percent, 50);
        assert_eq!(summary.requirements.planned_non_functional, 1);
    }

    #[test]
    fn test_theme_percent_counts_stories() {
        let dir = artifact_dir();
        write(
            dir.path(),
            "planning-artifacts/capabilities.yaml",
            "capabilities:\n  # TEMA: Clínico\n  - id: cap-prontuario\n    links: {epics: [epic-1]}\n  - id: cap-agenda\n    links: {epics: [epic-2]}\n",
        );
        let dashboard = load(&dir);

        // 2 of 3 stories done across both capabilities
        assert_eq!(dashboard.theme_percent(&dashboard.themes[0]), 67);
        assert_eq!(dashboard.summary().theme_percent, 67);
    }

    #[test]
    fn test_summary_json_is_camel_case() {
        let summary = load(&artifact_dir()).summary();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["themeCount"], 2);
        assert_eq!(json["stories"]["percent"], 67);
        assert_eq!(json["requirements"]["plannedFunctional"], 1);
    }

    #[test]
    fn test_epic_views() {
        let views = load(&artifact_dir()).epic_views();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].key, "epic-1");
        assert_eq!(views[0].title.as_deref(), Some("Prontuário Eletrônico"));
        assert_eq!(views[0].status, WorkStatus::Done);
        assert_eq!(views[0].progress, Tally::new(2, 2));
        assert_eq!(views[1].capabilities, vec!["cap-agenda"]);
    }

    #[test]
    fn test_story_board() {
        let board = load(&artifact_dir()).board(GroupBy::Stories);

        let done: Vec<&str> = board
            .column(KanbanColumn::Done)
            .iter()
            .map(|i| i.label.as_str())
            .collect();
        assert_eq!(done, vec!["Comparecimento", "Evolução clínica"]);
        assert_eq!(
            board.column(KanbanColumn::Review)[0].id,
            "2-1-lembrete-de-consulta"
        );
    }

    #[test]
    fn test_theme_and_epic_boards() {
        let dashboard = load(&artifact_dir());

        let themes = dashboard.board(GroupBy::Themes);
        assert_eq!(themes.column(KanbanColumn::Done)[0].id, "Clínico");
        assert_eq!(themes.column(KanbanColumn::InProgress)[0].id, "Plataforma");

        let epics = dashboard.board(GroupBy::Epics);
        assert_eq!(epics.column(KanbanColumn::Done)[0].label, "Prontuário Eletrônico");
        assert_eq!(epics.column(KanbanColumn::InProgress)[0].label, "Agenda");
    }
}
