use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Well-known Homebrew install locations, Apple Silicon first.
const BREW_LOCATIONS: [&str; 3] = [
    "/opt/homebrew/bin/brew",
    "/usr/local/bin/brew",
    "/home/linuxbrew/.linuxbrew/bin/brew",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub brew_path: Option<PathBuf>,
}

impl Config {
    /// Reads the config file if one exists. The file is never created.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config = Self::parse(&content)?;
            tracing::debug!(path = %config_path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Picks the brew executable: explicit override, then the config file,
    /// then the first well-known location that exists.
    pub fn resolve_brew_path(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_override {
            return path.to_path_buf();
        }
        if let Some(path) = &self.brew_path {
            return path.clone();
        }
        find_brew_path()
    }

    fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")?;
        Ok(PathBuf::from(home).join(".config").join("brewgui").join("config.json"))
    }
}

fn find_brew_path() -> PathBuf {
    for path in &BREW_LOCATIONS {
        if Path::new(path).exists() {
            return PathBuf::from(path);
        }
    }
    PathBuf::from(BREW_LOCATIONS[0])
}
