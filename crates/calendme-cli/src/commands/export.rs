use std::path::PathBuf;

use calendme_core::render::event_count_label;
use clap::Subcommand;

use crate::context;

#[derive(Subcommand)]
pub enum ExportAction {
    /// Render the schedule as an ICS calendar file via the backend
    Ics {
        /// Output path (default: export.ics_filename from config)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Save the schedule as a JSON file that `import json` can read back
    Json {
        /// Output path; stdout when omitted
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

pub fn run(action: ExportAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = context::load_config();
    let planner = context::open_planner(&config)?;

    match action {
        ExportAction::Ics { out } => {
            let bytes = context::block_on(planner.export_ics())??;
            let path = out.unwrap_or_else(|| PathBuf::from(&config.export.ics_filename));
            std::fs::write(&path, bytes)?;
            println!(
                "Exported {} to {}",
                event_count_label(planner.events().len()),
                path.display()
            );
        }
        ExportAction::Json { out } => {
            let json = planner.export_json()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!(
                        "Saved {} to {}",
                        event_count_label(planner.events().len()),
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}
