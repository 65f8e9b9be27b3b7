//! Input size limits enforced before extraction.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default cap on the size of one input file: 4 MiB.
const fn default_max_input_bytes() -> u64 {
    4 * 1024 * 1024
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Files larger than this are refused.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

impl LimitsConfig {
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for a zero limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "limits.max_input_bytes".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn allows(&self, len: u64) -> bool {
        len <= self.max_input_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = LimitsConfig::default();
        assert_eq!(config.max_input_bytes, 4_194_304);
        assert!(config.allows(4_194_304));
        assert!(!config.allows(4_194_305));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let config = LimitsConfig { max_input_bytes: 0 };
        assert!(config.validate().is_err());
    }
}
