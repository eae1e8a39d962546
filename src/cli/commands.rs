use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use bmad_viewer::config::ViewerConfig;
use bmad_viewer::dashboard::{load_story, Artifacts, ArtifactWatcher, Dashboard, DashboardSummary};
use bmad_viewer::error::Result;
use bmad_viewer::extract::{
    extract_doc_list, extract_epics_lists, extract_epics_metrics, extract_functional_requirements,
    extract_non_functional_requirements, extract_requirement_metrics, DocumentLink,
};
use bmad_viewer::progress::GroupBy;
use bmad_viewer::requirements::{RequirementItem, RequirementLists};

#[derive(Parser)]
#[command(name = "bmad-viewer")]
#[command(about = "Read-only viewer for BMAD planning and sprint artifacts")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Summary of the artifacts in the current directory
    bmad-viewer dashboard

    # Re-render the summary on every change
    bmad-viewer --root ./_bmad-output dashboard --watch

    # Planned functional requirements as JSON
    bmad-viewer requirements --kind functional --format json

    # Kanban board of capabilities
    bmad-viewer board --group-by capabilities

    # Print a story document
    bmad-viewer story 1-1-comparecimento
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Artifact root directory
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Layout config file (default: <root>/.bmad-viewer.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the documents linked from the index
    Docs {
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show implemented and planned requirements
    Requirements {
        /// Which requirement table to read
        #[arg(long, value_enum, default_value = "functional")]
        kind: RequirementKind,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List epics and stories from the epics document
    Epics {
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show capabilities with their derived progress
    Roadmap {
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the project summary
    Dashboard {
        /// Re-render whenever an artifact changes
        #[arg(long)]
        watch: bool,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show a kanban board
    Board {
        /// What the cards represent
        #[arg(long, value_enum, default_value = "stories")]
        group_by: GroupBy,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print a story document
    Story {
        /// Sprint status key, e.g. 1-1-comparecimento
        key: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RequirementKind {
    Functional,
    NonFunctional,
}

fn read_artifacts(root: &Path, config: Option<&Path>) -> Result<Artifacts> {
    let config = ViewerConfig::load(root, config)?;
    Ok(Artifacts::load(&config))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn docs(root: &Path, config: Option<&Path>, format: &str) -> Result<()> {
    let artifacts = read_artifacts(root, config)?;
    let docs = extract_doc_list(artifacts.index.as_deref()).into_inner();

    if format == "json" {
        return print_json(&docs);
    }

    if docs.is_empty() {
        println!("No documents found");
        return Ok(());
    }

    let mut section: Option<&str> = None;
    for DocumentLink { section: s, path } in &docs {
        if section != Some(s.as_str()) {
            println!("{}", s);
            section = Some(s.as_str());
        }
        println!("  {}", path);
    }

    Ok(())
}

pub fn requirements(root: &Path, config: Option<&Path>, kind: RequirementKind, format: &str) -> Result<()> {
    let artifacts = read_artifacts(root, config)?;
    let prd = artifacts.prd.as_deref();
    let lists = match kind {
        RequirementKind::Functional => extract_functional_requirements(prd),
        RequirementKind::NonFunctional => extract_non_functional_requirements(prd),
    }
    .into_inner();

    if format == "json" {
        return print_json(&lists);
    }

    let metrics = extract_requirement_metrics(prd).into_inner();
    let (implemented, planned) = match kind {
        RequirementKind::Functional => (metrics.implemented_functional, metrics.planned_functional),
        RequirementKind::NonFunctional => {
            (metrics.implemented_non_functional, metrics.planned_non_functional)
        }
    };
    println!("Declared: {} implemented, {} planned", implemented, planned);
    print_requirement_lists(&lists);

    Ok(())
}

fn print_requirement_lists(lists: &RequirementLists) {
    println!("\nImplemented ({}):", lists.implemented.len());
    for item in &lists.implemented {
        println!("  {}", requirement_line(item));
    }

    println!("\nPlanned ({}):", lists.planned.len());
    for item in &lists.planned {
        match item.priority {
            Some(p) => println!("  P{} {}", p, requirement_line(item)),
            None => println!("  {}", requirement_line(item)),
        }
    }
}

fn requirement_line(item: &RequirementItem) -> String {
    let mut line = format!("{} {} [{}]", item.id, item.capability, item.section);
    if let Some(persona) = item.persona {
        line.push_str(&format!(" ({})", persona));
    }
    line
}

pub fn epics(root: &Path, config: Option<&Path>, format: &str) -> Result<()> {
    let artifacts = read_artifacts(root, config)?;
    let text = artifacts.epics.as_deref();
    let lists = extract_epics_lists(text).into_inner();

    if format == "json" {
        return print_json(&lists);
    }

    let metrics = extract_epics_metrics(text).into_inner();
    println!(
        "Declared: {} epics, {} stories",
        metrics.epic_count, metrics.story_count
    );

    for epic in &lists.epics {
        println!("\nEpic {}: {}", epic.id, epic.title);
        for story in lists.stories.iter().filter(|s| s.epic_id == epic.id) {
            println!("  {} {}", story.id, story.title);
        }
    }

    Ok(())
}

pub fn roadmap(root: &Path, config: Option<&Path>, format: &str) -> Result<()> {
    let artifacts = read_artifacts(root, config)?;
    let dashboard = Dashboard::from_artifacts(&artifacts);

    if format == "json" {
        return print_json(&serde_json::json!({
            "roadmap": dashboard.roadmap,
            "themes": dashboard.themes,
            "progress": dashboard.progress,
        }));
    }

    if dashboard.roadmap.capabilities.is_empty() {
        println!("No capabilities found");
        return Ok(());
    }

    for cap in &dashboard.roadmap.capabilities {
        let progress = dashboard.progress.get(&cap.id).cloned().unwrap_or_default();
        println!(
            "P{} {} {} [{}] {}/{} stories ({}%)",
            cap.priority,
            cap.id,
            cap.title,
            progress.status,
            progress.done,
            progress.total,
            progress.percent()
        );
    }

    if !dashboard.themes.is_empty() {
        println!("\nThemes:");
        for theme in &dashboard.themes {
            println!(
                "  {} ({} capabilities, {}%)",
                theme.name,
                theme.capability_ids.len(),
                dashboard.theme_percent(theme)
            );
        }
    }

    Ok(())
}

pub fn dashboard(root: &Path, config: Option<&Path>, watch: bool, format: &str) -> Result<()> {
    let config = ViewerConfig::load(root, config)?;
    render_dashboard(&config, format)?;

    if watch {
        eprintln!("Watching {} for changes...", config.root.display());
        let watcher = ArtifactWatcher::new(&config.root)?;

        while let Some(paths) = watcher.recv() {
            if paths.is_empty() {
                continue;
            }
            tracing::debug!("{} paths changed", paths.len());
            render_dashboard(&config, format)?;
        }
    }

    Ok(())
}

fn render_dashboard(config: &ViewerConfig, format: &str) -> Result<()> {
    let dashboard = Dashboard::from_artifacts(&Artifacts::load(config));
    let summary = dashboard.summary();

    if format == "json" {
        return print_json(&summary);
    }

    print_summary(&summary);
    let epics = dashboard.epic_views();
    if !epics.is_empty() {
        println!("\nEpics:");
        for epic in &epics {
            println!(
                "  {} {} [{}] {}/{}",
                epic.key,
                epic.title.as_deref().unwrap_or(""),
                epic.status,
                epic.progress.done,
                epic.progress.total
            );
        }
    }

    Ok(())
}

fn print_summary(summary: &DashboardSummary) {
    if let Some(ref project) = summary.project {
        println!("Project: {}", project);
    }
    if let Some(ref generated) = summary.generated {
        println!("Generated: {}", generated);
    }
    println!(
        "Capabilities: {}/{} ({}%)",
        summary.capabilities.done, summary.capabilities.total, summary.capabilities.percent
    );
    println!(
        "Epics: {}/{} ({}%)",
        summary.epics.done, summary.epics.total, summary.epics.percent
    );
    println!(
        "Stories: {}/{} ({}%)",
        summary.stories.done, summary.stories.total, summary.stories.percent
    );
    println!("Themes: {} ({}% average)", summary.theme_count, summary.theme_percent);
    println!(
        "Requirements: {} + {} functional, {} + {} non-functional (implemented + planned)",
        summary.requirements.implemented_functional,
        summary.requirements.planned_functional,
        summary.requirements.implemented_non_functional,
        summary.requirements.planned_non_functional
    );
}

pub fn board(root: &Path, config: Option<&Path>, group_by: GroupBy, format: &str) -> Result<()> {
    let artifacts = read_artifacts(root, config)?;
    let board = Dashboard::from_artifacts(&artifacts).board(group_by);

    if format == "json" {
        return print_json(&board);
    }

    for column in &board.columns {
        println!("{} ({})", column.column.label(), column.items.len());
        for item in &column.items {
            if item.label == item.id {
                println!("  {}", item.id);
            } else {
                println!("  {} {}", item.id, item.label);
            }
        }
    }

    Ok(())
}

pub fn story(root: &Path, config: Option<&Path>, key: &str) -> Result<()> {
    let config = ViewerConfig::load(root, config)?;
    print!("{}", load_story(&config, key)?);
    Ok(())
}
