use std::path::Path;

use anyhow::Result;
use daybook_core::DaybookConfig;
use owo_colors::OwoColorize;

pub fn run(config: &DaybookConfig, file_override: Option<&Path>) -> Result<()> {
    let config_path = DaybookConfig::config_path()?;
    let events_path = file_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.events_path());

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Events:  {}", events_path.display());

    println!("{}", "Settings".bold());
    println!("  Strict load:  {}", config.strict_load);

    Ok(())
}
