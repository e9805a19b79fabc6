use std::path::Path;

use anyhow::Result;
use datepick_core::config::PickerConfig;
use owo_colors::OwoColorize;

pub fn run(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config file '{}' already exists", path.display());
    }

    PickerConfig::create_default_config(path)?;
    println!("{}", format!("Created {}", path.display()).green());

    Ok(())
}
