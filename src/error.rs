//! Error types for button-request
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Converters only ever produce [`Error::Decode`] or [`Error::InvalidKey`].
//! A key that does not resolve is not an error, it is `Ok(None)`.

use crate::types::FormatTag;
use thiserror::Error;

/// The main error type for button-request
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Conversion Errors
    // ============================================================================
    #[error("Failed to decode {format} response: {source}")]
    Decode {
        format: FormatTag,
        #[source]
        source: DecodeCause,
    },

    #[error("Unknown format: '{tag}'")]
    UnknownFormat { tag: String },

    #[error("Invalid key expression '{key}': {message}")]
    InvalidKey { key: String, message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid headers: {message}")]
    InvalidHeaders { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Underlying parse failure carried by [`Error::Decode`]
#[derive(Error, Debug)]
pub enum DecodeCause {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    /// Structural problems the XML reader lets through (unclosed root, junk after it)
    #[error("{0}")]
    Structure(String),
}

impl Error {
    /// Create a decode error for a format
    pub fn decode(format: FormatTag, source: impl Into<DecodeCause>) -> Self {
        Self::Decode {
            format,
            source: source.into(),
        }
    }

    /// Create an unknown format error
    pub fn unknown_format(tag: impl Into<String>) -> Self {
        Self::UnknownFormat { tag: tag.into() }
    }

    /// Create an invalid key expression error
    pub fn invalid_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid headers error
    pub fn invalid_headers(message: impl Into<String>) -> Self {
        Self::InvalidHeaders {
            message: message.into(),
        }
    }

    /// Whether the body failed to parse in its declared format
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }
}

/// Result type alias for button-request
pub type Result<T> = std::result::Result<T, Error>;
