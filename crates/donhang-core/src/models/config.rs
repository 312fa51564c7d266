//! Configuration for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::order::Policy;

/// Tunable settings for an [`crate::order::OrderParser`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Extraction policy preset.
    pub policy: Policy,

    /// Reject a bare weight match when the preceding characters look like an
    /// address fragment (`P.`, `Q.`, `H.`, `/`, `\`). Off by default.
    pub weight_prefix_guard: bool,

    /// Upstream input-length cap in characters; `None` disables the cap.
    pub max_input_len: Option<usize>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Basic,
            weight_prefix_guard: false,
            max_input_len: Some(10_000),
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
