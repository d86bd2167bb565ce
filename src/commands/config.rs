use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::{self, Config};

/// Show where configuration lives and what is in effect.
pub fn run(config_path: Option<&Path>, config: &Config) -> Result<()> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };

    println!("{}", "Paths".bold());
    println!("  Config:     {}", path.display());
    println!("  Output:     {}", config.output_dir().display());
    println!("{}", "Events".bold());
    println!("  UID domain: {}", config.uid_domain);
    println!("  Save as:    {}", config.save_as);

    Ok(())
}

/// Write a commented default config file.
pub fn init(config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };

    if path.exists() {
        anyhow::bail!("Config file already exists at {}", path.display());
    }

    config::create_default_config(&path)?;
    println!("{}", format!("  Created: {}", path.display()).green());

    Ok(())
}
