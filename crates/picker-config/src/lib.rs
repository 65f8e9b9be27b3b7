//! # picker-config
//!
//! Layered configuration loading for the element picker using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PICKER_*` prefix, `__` as separator)
//! 2. Project-level `.picker/config.toml`
//! 3. User-level `~/.config/picker/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `PICKER_EXTRACT__TAB_WIDTH` -> `extract.tab_width` and
//! `PICKER_LIMITS__MAX_INPUT_BYTES` -> `limits.max_input_bytes`.
//!
//! ```no_run
//! use picker_config::PickerConfig;
//!
//! let config = PickerConfig::load().expect("config");
//! println!("tab width: {}", config.extract.tab_width);
//! ```

mod error;
mod extract;
mod limits;
mod picker;

pub use error::ConfigError;
pub use extract::{ExtractConfig, MAX_TAB_WIDTH};
pub use limits::LimitsConfig;
pub use picker::ListConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".picker/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PickerConfig {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub picker: ListConfig,
}

impl PickerConfig {
    /// Load and validate configuration from all sources.
    ///
    /// # Errors
    /// Returns [`ConfigError::Figment`] for unreadable or mistyped sources
    /// and [`ConfigError::InvalidValue`] for out-of-range values.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract and validate from an already-built figment.
    ///
    /// # Errors
    /// Same as [`PickerConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PICKER_").split("__"))
    }

    /// # Errors
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extract.validate()?;
        self.limits.validate()
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("picker").join("config.toml"))
    }
}
