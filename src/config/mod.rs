//! Configuration loading and management
//!
//! [`Settings`] gathers the engine-wide knobs: the text of the reserved
//! messages and whether collections enforce their item count strictly. Every
//! node starts from `Settings::default()`; a tree can be switched to another
//! configuration with `InputFilter::apply_settings`, which walks the whole
//! tree, collection templates included.
//!
//! ```yaml
//! required_message: "This field is mandatory"
//! count_mismatch_message: "Wrong number of items"
//! strict_collection_count: true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Engine-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Text of the `isEmpty` message (missing required value, empty required collection)
    pub required_message: String,

    /// Text of the `countMismatch` message of strict collections
    pub count_mismatch_message: String,

    /// Text of the `notArray` message of array inputs
    pub not_array_message: String,

    /// Whether collections reject payloads whose length differs from their count
    pub strict_collection_count: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            required_message: "Value is required and can't be empty".to_string(),
            count_mismatch_message: "The items count does not match the expected count"
                .to_string(),
            not_array_message: "Value must be an array".to_string(),
            strict_collection_count: false,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("invalid settings file '{}'", path))
    }

    /// Load settings from a YAML string
    ///
    /// Missing keys keep their default value.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        tracing::debug!(
            strict_collection_count = settings.strict_collection_count,
            "settings loaded"
        );
        Ok(settings)
    }
}
