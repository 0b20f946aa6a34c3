use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;

#[derive(Parser)]
#[command(name = "calendme", version, about = "CalendME schedule builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Event(commands::events::EventAction),
    /// Export the schedule
    Export {
        #[command(subcommand)]
        action: commands::export::ExportAction,
    },
    /// Import a schedule file or spreadsheet
    Import {
        #[command(subcommand)]
        action: commands::import::ImportAction,
    },
    /// Appearance preference
    Theme {
        #[command(subcommand)]
        action: Option<commands::theme::ThemeAction>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Event(action) => commands::events::run(action),
        Commands::Export { action } => commands::export::run(action),
        Commands::Import { action } => commands::import::run(action),
        Commands::Theme { action } => commands::theme::run(action.unwrap_or_default()),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
