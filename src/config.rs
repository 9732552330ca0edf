use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WiloConfig {
    pub general: GeneralConfig,
    pub storage: StorageConfig,
    pub undo: UndoConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UndoConfig {
    /// How many undo entries are kept; older ones are discarded.
    pub max_entries: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    /// Markers shown by `wilo list` without `--all`.
    pub home_marker_limit: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_wilo_dir()
            .join("wilo.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self { max_entries: 20 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            home_marker_limit: 8,
        }
    }
}

/// Returns `~/.wilo/`, or `./.wilo/` when no home directory is known.
pub fn default_wilo_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".wilo")
}

/// Returns the default config file path: `~/.wilo/config.toml`
pub fn default_config_path() -> PathBuf {
    default_wilo_dir().join("config.toml")
}

impl WiloConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            WiloConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (WILO_DB, WILO_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("WILO_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("WILO_LOG_LEVEL") {
            self.general.log_level = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = WiloConfig::default();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.undo.max_entries, 20);
        assert_eq!(config.display.home_marker_limit, 8);
        assert!(config.storage.db_path.ends_with("wilo.db"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[general]
log_level = "debug"

[storage]
db_path = "/tmp/test.db"

[undo]
max_entries = 5
"#;
        let config: WiloConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.storage.db_path, "/tmp/test.db");
        assert_eq!(config.undo.max_entries, 5);
        // defaults still apply for unset sections
        assert_eq!(config.display.home_marker_limit, 8);
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = WiloConfig::load_from(dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.undo.max_entries, 20);
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nhome_marker_limit = 3\n").unwrap();
        let config = WiloConfig::load_from(&path).unwrap();
        assert_eq!(config.display.home_marker_limit, 3);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = WiloConfig::default();
        std::env::set_var("WILO_DB", "/tmp/override.db");
        std::env::set_var("WILO_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.general.log_level, "trace");

        // Clean up
        std::env::remove_var("WILO_DB");
        std::env::remove_var("WILO_LOG_LEVEL");
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/var/wilo.db"), PathBuf::from("/var/wilo.db"));
    }
}
