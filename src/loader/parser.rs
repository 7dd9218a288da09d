//! Settings file parser
//!
//! Reads button settings from YAML or JSON. Files ending in `.json` are parsed
//! as JSON, everything else as YAML.

use crate::error::{Error, Result};
use crate::request::RequestSettings;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Syntax of a settings document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSyntax {
    Yaml,
    Json,
}

impl SettingsSyntax {
    /// Pick the syntax from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SettingsSyntax::Json,
            _ => SettingsSyntax::Yaml,
        }
    }
}

/// Load settings from a file
pub fn load_settings(path: impl AsRef<Path>) -> Result<RequestSettings> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read settings file '{}': {}",
            path.display(),
            e
        ))
    })?;

    debug!("Loading settings from {}", path.display());
    load_settings_from_str(&content, SettingsSyntax::from_path(path))
}

/// Load settings from a string
pub fn load_settings_from_str(content: &str, syntax: SettingsSyntax) -> Result<RequestSettings> {
    let settings: RequestSettings = match syntax {
        SettingsSyntax::Json => serde_json::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse settings JSON: {e}")))?,
        SettingsSyntax::Yaml => serde_yaml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse settings YAML: {e}")))?,
    };

    settings.validate()?;
    Ok(settings)
}
