//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "SHELFWISE";

/// Loads, saves and resolves the Shelfwise configuration
///
/// The default location follows the platform conventions:
/// - Linux: `~/.config/shelfwise/config.toml`
/// - macOS: `~/Library/Application Support/shelfwise/config.toml`
/// - Windows: `%APPDATA%\shelfwise\config\config.toml`
pub struct ConfigManager {
    persistence: ConfigPersistence,
}

impl ConfigManager {
    /// Creates a manager for the platform config directory
    pub fn new() -> ConfigResult<Self> {
        let dirs = project_dirs()?;
        Self::with_directory(dirs.config_dir().to_path_buf())
    }

    /// Creates a manager for `config.toml` inside `config_dir`
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        Self::with_file(config_dir.join(CONFIG_FILE))
    }

    /// Creates a manager for an explicit config file path
    pub fn with_file(config_path: PathBuf) -> ConfigResult<Self> {
        if config_path.file_name().is_none() {
            return Err(ConfigError::BadPath {
                reason: format!("{} does not name a file", config_path.display()),
            });
        }
        Ok(Self {
            persistence: ConfigPersistence::new(config_path),
        })
    }

    /// Returns the config file path
    pub fn config_path(&self) -> &Path {
        self.persistence.path()
    }

    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the config, falling back to defaults on any error
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Validates and writes the config atomically
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Loads, edits and saves the config in one step
    ///
    /// ```rust,no_run
    /// # use shelfwise_config::ConfigManager;
    /// # let manager = ConfigManager::new().unwrap();
    /// manager.update(|config| {
    ///     config.ui.theme = "nord".to_string();
    /// }).expect("Failed to update config");
    /// ```
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes a default config file if none exists
    ///
    /// Returns `Ok(true)` when a file was created.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.save(&Config::default())?;
        Ok(true)
    }

    /// Overwrites the config file with defaults
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Returns the validation problems of the stored config as messages
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let config = self.load()?;

        match config.validate() {
            Ok(()) => Ok(Vec::new()),
            Err(errors) => Ok(errors.iter().map(|e| e.to_string()).collect()),
        }
    }

    /// Loads the config and applies `SHELFWISE_<SECTION>_<FIELD>` overrides
    /// from the process environment
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings after env overrides: {:?}",
                errors
            );
        }

        Ok(config)
    }

    /// Resolves the directory that holds the library data files
    ///
    /// `app.data_dir` wins when set, otherwise the platform data dir is used
    /// (`~/.local/share/shelfwise` on Linux).
    pub fn data_dir(config: &Config) -> ConfigResult<PathBuf> {
        match config.app.data_dir_override() {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }
}

fn project_dirs() -> ConfigResult<ProjectDirs> {
    ProjectDirs::from("", "", "shelfwise").ok_or_else(|| ConfigError::BadPath {
        reason: "Could not determine the user home directory".to_string(),
    })
}

/// Applies overrides looked up through `lookup`
///
/// Unparsable numbers and log levels are rejected rather than ignored.
pub(crate) fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |suffix: &str| {
        let name = format!("{}_{}", ENV_PREFIX, suffix);
        lookup(&name).map(|value| (name, value))
    };

    if let Some((_, dir)) = var("APP_DATA_DIR") {
        config.app.data_dir = PathBuf::from(dir);
    }

    if let Some((name, level)) = var("APP_LOG_LEVEL") {
        config.app.log_level = LogLevel::from_str(&level).map_err(|_| ConfigError::EnvOverride {
            var: name,
            value: level,
        })?;
    }

    if let Some((_, url)) = var("CATALOG_SEARCH_URL") {
        config.catalog.search_url = url;
    }

    if let Some((_, url)) = var("CATALOG_WORKS_URL") {
        config.catalog.works_url = url;
    }

    if let Some((name, secs)) = var("CATALOG_TIMEOUT_SECS") {
        config.catalog.timeout_secs = secs
            .trim()
            .parse()
            .map_err(|_| ConfigError::EnvOverride {
                var: name,
                value: secs,
            })?;
    }

    if let Some((_, theme)) = var("UI_THEME") {
        config.ui.theme = theme;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn setup_test_manager() -> (TempDir, ConfigManager) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())
            .expect("Failed to create manager");
        (temp_dir, manager)
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_load_or_default_with_missing_file() {
        let (_temp_dir, manager) = setup_test_manager();
        assert_eq!(manager.load_or_default(), Config::default());
    }

    #[test]
    fn test_load_or_default_with_corrupt_file() {
        let (_temp_dir, manager) = setup_test_manager();
        std::fs::write(manager.config_path(), "[[[").unwrap();
        assert_eq!(manager.load_or_default(), Config::default());
    }

    #[test]
    fn test_update() {
        let (_temp_dir, manager) = setup_test_manager();

        manager
            .update(|config| config.catalog.timeout_secs = 10)
            .expect("Should update");

        assert_eq!(manager.load().unwrap().catalog.timeout_secs, 10);
    }

    #[test]
    fn test_initialize_only_once() {
        let (_temp_dir, manager) = setup_test_manager();

        assert!(manager.initialize().unwrap());
        assert!(manager.config_path().exists());
        assert!(!manager.initialize().unwrap());
    }

    #[test]
    fn test_reset() {
        let (_temp_dir, manager) = setup_test_manager();
        manager.update(|config| config.ui.notice_secs = 9).unwrap();

        manager.reset().unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn test_validate_reports_hand_edited_values() {
        let (_temp_dir, manager) = setup_test_manager();
        std::fs::write(manager.config_path(), "[ui]\ntheme = \"neon\"\n").unwrap();

        let problems = manager.validate().unwrap();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("ui.theme"));
    }

    #[test]
    fn test_with_file_uses_given_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        let manager = ConfigManager::with_file(path.clone()).unwrap();
        assert_eq!(manager.config_path(), path.as_path());
    }

    #[test]
    fn test_data_dir_prefers_configured_value() {
        let mut config = Config::default();
        config.app.data_dir = PathBuf::from("/srv/books");
        assert_eq!(
            ConfigManager::data_dir(&config).unwrap(),
            PathBuf::from("/srv/books")
        );
    }

    #[test]
    fn test_env_overrides_apply() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("SHELFWISE_APP_LOG_LEVEL", "debug"),
                ("SHELFWISE_CATALOG_SEARCH_URL", "http://localhost:9000/search.json"),
                ("SHELFWISE_CATALOG_TIMEOUT_SECS", "5"),
                ("SHELFWISE_UI_THEME", "dracula"),
            ]),
        )
        .unwrap();

        assert_eq!(config.app.log_level, LogLevel::Debug);
        assert_eq!(config.catalog.search_url, "http://localhost:9000/search.json");
        assert_eq!(config.catalog.timeout_secs, 5);
        assert_eq!(config.ui.theme, "dracula");
        assert_eq!(config.catalog.works_url, Config::default().catalog.works_url);
    }

    #[test]
    fn test_env_override_rejects_bad_number() {
        let mut config = Config::default();
        let err = apply_env_overrides(
            &mut config,
            env(&[("SHELFWISE_CATALOG_TIMEOUT_SECS", "soon")]),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::EnvOverride { ref var, .. } if var == "SHELFWISE_CATALOG_TIMEOUT_SECS"
        ));
    }
}
