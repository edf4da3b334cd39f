//! Shelfwise configuration
//!
//! Settings live in a single TOML file. Every section implements
//! [`ConfigSection`] so it can validate itself and take part in override
//! chains (defaults < file < environment).
//!
//! - **Graceful degradation**: a missing file yields defaults, and
//!   [`ConfigManager::load_or_default`] never fails
//! - **Atomic writes**: the file is written to a temp file and renamed
//!
//! # Example
//!
//! ```rust,no_run
//! use shelfwise_config::{Config, ConfigManager};
//!
//! let manager = ConfigManager::new().expect("Failed to initialize config");
//! let config = manager.load_or_default();
//! println!("Search endpoint: {}", config.catalog.search_url);
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

pub mod app_config;
mod catalog_config;
mod ui_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::ConfigManager;
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, LogLevel};
pub use catalog_config::CatalogConfig;
pub use ui_config::{UiConfig, THEME_NAMES};

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// Remote catalog endpoints and paging
    pub catalog: CatalogConfig,

    /// Terminal UI preferences
    pub ui: UiConfig,
}

impl Config {
    /// Every field error across all sections
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            self.app.validate(),
            self.catalog.validate(),
            self.ui.validate(),
        ]
        .into_iter()
        .filter_map(Result::err)
        .flatten()
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Merges this config with another, preferring values from `other`
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.catalog.merge(other.catalog);
        self.ui.merge(other.ui);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            catalog: CatalogConfig::default(),
            ui: UiConfig::default(),
        }
    }
}
