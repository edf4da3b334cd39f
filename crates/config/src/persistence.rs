//! Reading and writing the config file
//!
//! Writes go through a temp file in the target directory followed by a
//! rename, and the previous file is copied to `config.toml.backup` first.

use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Config file on disk
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the config file
    ///
    /// A missing file yields defaults. An empty or unparsable file is an
    /// error. Out-of-range values are only logged so a hand-edited file can
    /// still be opened and fixed.
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            log::debug!(
                "No config file at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.config_path).map_err(|source| {
            ConfigError::Read {
                path: self.config_path.clone(),
                source,
            }
        })?;

        if contents.trim().is_empty() {
            return Err(ConfigError::Read {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Config file is empty",
                ),
            });
        }

        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: self.config_path.clone(),
            source,
        })?;

        if config.version > CONFIG_VERSION {
            log::warn!(
                "Config file version {} is newer than supported version {}; unknown keys are ignored",
                config.version,
                CONFIG_VERSION
            );
        }

        if let Err(errors) = config.validate() {
            log::warn!("Config validation warnings: {}", join_errors(&errors));
        }

        Ok(config)
    }

    /// Validates and writes the config atomically
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        if let Err(errors) = config.validate() {
            return Err(ConfigError::Invalid(join_errors(&errors)));
        }

        let dir = self
            .config_path
            .parent()
            .ok_or_else(|| ConfigError::BadPath {
                reason: "Config path has no parent directory".to_string(),
            })?;
        ensure_directory(dir)?;

        if self.config_path.exists() {
            let backup_path = self.config_path.with_extension("toml.backup");
            fs::copy(&self.config_path, &backup_path)
                .map_err(|source| ConfigError::Backup { source })?;
            log::debug!("Backed up config to {}", backup_path.display());
        }

        let rendered = toml::to_string_pretty(config)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(rendered.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.config_path)
            .map_err(|e| ConfigError::Write {
                path: self.config_path.clone(),
                source: e.error,
            })?;

        log::info!("Config saved to {}", self.config_path.display());
        Ok(())
    }
}

fn ensure_directory(path: &Path) -> ConfigResult<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| ConfigError::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Created config directory: {}", path.display());
    }
    Ok(())
}

fn join_errors(errors: &[crate::ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ConfigPersistence) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let persistence = ConfigPersistence::new(temp_dir.path().join("config.toml"));
        (temp_dir, persistence)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let (_dir, persistence) = setup();
        assert_eq!(persistence.load().unwrap(), Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let (_dir, persistence) = setup();

        let mut config = Config::default();
        config.catalog.page_size = 12;
        config.ui.theme = "nord".to_string();

        persistence.save(&config).unwrap();
        let loaded = persistence.load().unwrap();

        assert_eq!(loaded.catalog.page_size, 12);
        assert_eq!(loaded.ui.theme, "nord");
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let persistence = ConfigPersistence::new(path.clone());

        persistence.save(&Config::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_overwrite_keeps_backup() {
        let (_dir, persistence) = setup();

        persistence.save(&Config::default()).unwrap();
        persistence.save(&Config::default()).unwrap();

        assert!(persistence.path().with_extension("toml.backup").exists());
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let (_dir, persistence) = setup();
        fs::write(persistence.path(), "  \n").unwrap();

        assert!(matches!(
            persistence.load(),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_garbage_file_is_a_parse_error() {
        let (_dir, persistence) = setup();
        fs::write(persistence.path(), "this is not [[ toml").unwrap();

        assert!(matches!(
            persistence.load(),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_values_load_but_do_not_save() {
        let (_dir, persistence) = setup();
        fs::write(persistence.path(), "[catalog]\npage_size = 50\n").unwrap();

        let loaded = persistence.load().unwrap();
        assert_eq!(loaded.catalog.page_size, 50);

        assert!(matches!(
            persistence.save(&loaded),
            Err(ConfigError::Invalid(_))
        ));
    }
}
