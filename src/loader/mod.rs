//! Settings loader module
//!
//! Parse button settings from YAML or JSON files.
//!
//! # Overview
//!
//! Missing fields take the host's defaults, then the result is validated.

mod parser;

pub use parser::{load_settings, load_settings_from_str, SettingsSyntax};
