use std::path::{Path, PathBuf};

use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use serde::{Deserialize, Serialize};

use crate::collections::DEFAULT_GRAPH_NAME;

const APP_DIR: &str = "music-graph";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    database_path: String,
    pub graph_name: String,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl Default for Config {
    fn default() -> Self {
        let database_path = dirs::data_dir()
            .map(|dir| dir.join(APP_DIR).join("musicdb.sqlite"))
            .unwrap_or_else(|| PathBuf::from("musicdb.sqlite"));

        Self {
            database_path: database_path.to_string_lossy().to_string(),
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .context(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Default location of the config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join(APP_DIR).join("config.toml"))
    }

    /// Load the config from its default location, falling back to defaults when
    /// there is no file there
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_or_default(&path),
            None => {
                log::debug!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Write the default config to `path`, or to its default location when none is
    /// given, unless a file already exists there
    pub fn create_default(path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path().ok_or(eyre!("Could not determine config directory"))?,
        };
        Self::default().write_if_missing(&path)?;
        Ok(path)
    }

    fn write_if_missing(&self, path: &Path) -> Result<bool> {
        if path.exists() {
            log::info!("Config already exists at {}", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context(format!(
                "Failed to create config directory: {}",
                parent.display()
            ))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .context(format!("Failed to write config file: {}", path.display()))?;
        log::info!("Wrote default config to {}", path.display());
        Ok(true)
    }

    /// Expand ~ to home directory
    fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        PathBuf::from(path)
    }

    /// Get expanded database path
    pub fn database_path(&self) -> PathBuf {
        Self::expand_path(&self.database_path)
    }

    pub fn set_database_path(&mut self, path: &Path) {
        self.database_path = path.to_string_lossy().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "graph_name = \"otherGraph\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.graph_name, "otherGraph");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database_path(), Config::default().database_path());
    }

    #[test]
    fn test_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "database_path = \"/tmp/music.sqlite\"\ngraph_name = \"musicGraph\"\n\n[server]\nport = 9001\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/music.sqlite"));
        assert_eq!(config.server.port, 9001);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = \"eight thousand\"\n").unwrap();

        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_write_if_missing_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.server.port = 8123;
        assert!(config.write_if_missing(&path).unwrap());
        assert!(!Config::default().write_if_missing(&path).unwrap());

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_create_default_at_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom").join("music-graph.toml");

        let written = Config::create_default(Some(&path)).unwrap();
        assert_eq!(written, path);
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                Config::expand_path("~/music/db.sqlite"),
                home.join("music/db.sqlite")
            );
        }
        assert_eq!(Config::expand_path("/abs/db"), PathBuf::from("/abs/db"));
    }
}
