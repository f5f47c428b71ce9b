use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use toml::Table;

use crate::error::CoreError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level helper configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub anilist: AniListConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AniListConfig {
    pub endpoint: String,
    pub username: String,
    pub timeout_secs: u64,
    /// Overrides the default credential location.
    pub token_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: bool,
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::config_path())
    }

    /// Like [`AppConfig::load`], reading the user file from `path`.
    ///
    /// Keys missing from the user file keep their default value.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let mut merged: Table = parse_table(DEFAULT_CONFIG)?;

        if path.exists() {
            let user_str = std::fs::read_to_string(path)?;
            merge(&mut merged, parse_table(&user_str)?);
            tracing::debug!(path = %path.display(), "loaded user config");
        }

        let config = toml::Value::Table(merged)
            .try_into::<AppConfig>()
            .map_err(|e| CoreError::Config(e.to_string()))?;

        // reqwest treats a zero timeout as "fail immediately".
        if config.anilist.timeout_secs == 0 {
            return Err(CoreError::Config(
                "anilist.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(config)
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Directory for the optional log file.
    pub fn log_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.anilist.timeout_secs)
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "tsumugi")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

fn parse_table(content: &str) -> Result<Table, CoreError> {
    content
        .parse::<Table>()
        .map_err(|e| CoreError::Config(e.to_string()))
}

/// Recursively overlay `overlay` onto `base`; nested tables merge key by key.
fn merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                merge(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.anilist.endpoint, "https://graphql.anilist.co");
        assert_eq!(config.anilist.username, "tormented");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.anilist.token_path.is_none());
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.file);
    }

    #[test]
    fn test_missing_user_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_user_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[anilist]\nusername = \"someone\"\ntoken_path = \"/tmp/key.txt\"\n\n[logging]\nfile = true\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.anilist.username, "someone");
        assert_eq!(config.anilist.token_path, Some(PathBuf::from("/tmp/key.txt")));
        assert_eq!(config.anilist.endpoint, "https://graphql.anilist.co");
        assert_eq!(config.anilist.timeout_secs, 10);
        assert!(config.logging.file);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_user_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[anilist]\ntimeout_secs = \"soon\"\n").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(CoreError::Config(_))));

        std::fs::write(&path, "not toml at all [").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[anilist]\ntimeout_secs = 0\n").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(ref msg) if msg.contains("timeout_secs")));

        std::fs::write(&path, "[anilist]\ntimeout_secs = 1\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }
}
