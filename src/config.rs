//! shepherd-sync configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shepherd_sync_core::LocatorRules;
use shepherd_sync_core::ics::DEFAULT_UID_DOMAIN;

static DEFAULT_OUTPUT_DIR: &str = ".";

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

/// Configuration at ~/.config/shepherd-sync/config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where downloaded .ics files are written
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Ask for the file location on every download
    #[serde(default)]
    pub save_as: bool,

    /// Domain suffix of event UIDs
    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,

    /// Overrides for the form field selectors
    #[serde(default)]
    pub selectors: LocatorRules,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: default_output_dir(),
            save_as: false,
            uid_domain: default_uid_domain(),
            selectors: LocatorRules::default(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_path()?,
        };

        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        Ok(config)
    }

    pub fn output_dir(&self) -> PathBuf {
        expand_path(&self.output_dir)
    }
}

/// Get the config directory path (~/.config/shepherd-sync)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("shepherd-sync");
    Ok(config_dir)
}

/// Get the config file path (~/.config/shepherd-sync/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Create a default config file with all options commented out.
pub fn create_default_config(path: &Path) -> Result<()> {
    let contents = format!(
        "\
# shepherd-sync configuration

# Where downloaded .ics files are written:
# output_dir = \"{}\"

# Ask for the file location on every download:
# save_as = false

# Domain suffix of event UIDs:
# uid_domain = \"{}\"

# Override any form field selector, e.g.:
# [selectors]
# date = '[data-test-id=\"appointment-form-date-input\"]'
",
        DEFAULT_OUTPUT_DIR, DEFAULT_UID_DOMAIN
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create config directory {}", parent.display()))?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Could not write config file {}", path.display()))?;

    Ok(())
}

/// Expand ~ in paths to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.uid_domain, "shepherd.vet");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "save_as = true\n\n[selectors]\ndate = \"#start\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(config.save_as);
        assert_eq!(config.output_dir, ".");
        assert_eq!(config.selectors.date, "#start");
        assert_eq!(config.selectors.form, LocatorRules::default().form);
    }

    #[test]
    fn default_config_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        create_default_config(&path).unwrap();

        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "save_as = \"sometimes\"").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn expand_path_leaves_relative_paths() {
        assert_eq!(expand_path("out/ics"), PathBuf::from("out/ics"));
    }

    #[test]
    fn expand_path_replaces_leading_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_path("~/calendar"), home.join("calendar"));
        assert_eq!(expand_path("~"), home);
        assert_eq!(expand_path("out/~/ics"), PathBuf::from("out/~/ics"));
    }
}
