use std::path::PathBuf;

use calendme_core::render::event_count_label;
use calendme_core::{ColumnMapping, ColumnRole, Priority};
use clap::Subcommand;

use crate::context;

#[derive(Subcommand)]
pub enum ImportAction {
    /// Replace the schedule with a saved JSON schedule file
    Json {
        /// Schedule file written by `export json`
        file: PathBuf,
    },
    /// Import rows of a spreadsheet (xlsx, csv) through the backend
    Table {
        /// Spreadsheet file
        file: PathBuf,
        /// Zero-based column holding the course
        #[arg(long)]
        course_col: Option<usize>,
        /// Zero-based column holding the title
        #[arg(long)]
        title_col: Option<usize>,
        /// Zero-based column holding the date
        #[arg(long)]
        date_col: usize,
        /// Zero-based column holding the start time
        #[arg(long)]
        time_col: usize,
        /// Zero-based column holding the location
        #[arg(long)]
        location_col: Option<usize>,
        /// Comma-separated terms; only rows matching one are kept
        #[arg(long, default_value = "")]
        filters: String,
        /// Priority label for imported events
        #[arg(long)]
        priority: Option<String>,
    },
}

pub fn run(action: ImportAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = context::load_config();
    let mut planner = context::open_planner(&config)?;

    match action {
        ImportAction::Json { file } => {
            let text = std::fs::read_to_string(&file)?;
            let count = planner.import_json(&text)?;
            println!("Loaded {} from {}", event_count_label(count), file.display());
        }
        ImportAction::Table {
            file,
            course_col,
            title_col,
            date_col,
            time_col,
            location_col,
            filters,
            priority,
        } => {
            let mut mapping = ColumnMapping::new()
                .with(ColumnRole::Date, date_col)
                .with(ColumnRole::Time, time_col);
            for (role, column) in [
                (ColumnRole::Course, course_col),
                (ColumnRole::Title, title_col),
                (ColumnRole::Location, location_col),
            ] {
                if let Some(column) = column {
                    mapping = mapping.with(role, column);
                }
            }

            let filename = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| format!("not a file: {}", file.display()))?;
            let bytes = std::fs::read(&file)?;
            let priority = priority
                .map(Priority::from)
                .unwrap_or_else(|| config.default_priority());

            let report = context::block_on(planner.import_table(
                &filename, bytes, &mapping, &filters, priority,
            ))??;
            println!("Imported {}", event_count_label(report.added));
            for (row, reason) in &report.skipped {
                eprintln!("skipped \"{}\": {reason}", row.display_title());
            }
        }
    }
    Ok(())
}
