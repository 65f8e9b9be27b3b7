//! Extraction tunables.

use picker_parser::{DEFAULT_TAB_WIDTH, ExtractOptions};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Largest accepted tab width.
pub const MAX_TAB_WIDTH: u32 = 16;

const fn default_tab_width() -> u32 {
    DEFAULT_TAB_WIDTH
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractConfig {
    /// Columns a tab advances to when measuring indentation.
    #[serde(default = "default_tab_width")]
    pub tab_width: u32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
        }
    }
}

impl ExtractConfig {
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] when `tab_width` is outside `1..=16`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (1..=MAX_TAB_WIDTH).contains(&self.tab_width) {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                field: "extract.tab_width".to_string(),
                reason: format!("must be between 1 and {MAX_TAB_WIDTH}, got {}", self.tab_width),
            })
        }
    }

    #[must_use]
    pub const fn options(&self) -> ExtractOptions {
        ExtractOptions {
            tab_width: self.tab_width,
        }
    }
}
