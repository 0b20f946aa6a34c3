use calendme_core::Theme;
use clap::Subcommand;

use crate::context;

#[derive(Subcommand, Default)]
pub enum ThemeAction {
    /// Show the current theme
    #[default]
    Show,
    /// Switch to the next theme (light, dark, ambient)
    Cycle,
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = context::load_config();
    let mut storage = context::open_storage(&config)?;

    let theme = match action {
        ThemeAction::Show => Theme::load(&storage)?,
        ThemeAction::Cycle => Theme::cycle(&mut storage)?,
    };
    println!("{theme}");
    Ok(())
}
