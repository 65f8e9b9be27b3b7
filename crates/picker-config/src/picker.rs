//! Element list presentation.

use serde::{Deserialize, Serialize};

const fn default_include_fields() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ListConfig {
    /// Whether module and class fields are listed.
    #[serde(default = "default_include_fields")]
    pub include_fields: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            include_fields: default_include_fields(),
        }
    }
}
