mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bmad_viewer=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Docs { format } => {
            cli::docs(&cli.root, config, &format)?;
        }
        Commands::Requirements { kind, format } => {
            cli::requirements(&cli.root, config, kind, &format)?;
        }
        Commands::Epics { format } => {
            cli::epics(&cli.root, config, &format)?;
        }
        Commands::Roadmap { format } => {
            cli::roadmap(&cli.root, config, &format)?;
        }
        Commands::Dashboard { watch, format } => {
            cli::dashboard(&cli.root, config, watch, &format)?;
        }
        Commands::Board { group_by, format } => {
            cli::board(&cli.root, config, group_by, &format)?;
        }
        Commands::Story { key } => {
            cli::story(&cli.root, config, &key)?;
        }
    }

    Ok(())
}
