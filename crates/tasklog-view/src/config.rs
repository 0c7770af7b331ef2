//! Viewer configuration.
//!
//! These options shape presentation only; parsing and filtering never read
//! them.

use serde::{Deserialize, Serialize};

/// Recognized viewer options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Initial line-wrap display state.
    pub default_wrap: bool,
    /// Whether to offer the external log-viewer redirect button.
    pub show_external_log_redirect: bool,
    /// Display label for the external log service.
    pub external_log_name: Option<String>,
    /// Base URL template for the external redirect.
    pub log_url: Option<String>,
}

/// Config text could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid viewer config: {0}")]
pub struct ViewerConfigError(#[from] toml::de::Error);

impl ViewerConfig {
    /// Parse a TOML config snippet; absent keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ViewerConfigError> {
        Ok(toml::from_str(text)?)
    }
}
