//! Common types used throughout button-request
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// Request headers with lower-cased names, kept in a stable order
pub type HeaderMap = BTreeMap<String, String>;

// ============================================================================
// Format Tag
// ============================================================================

/// Content format of a request body or a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatTag {
    /// JSON document, keys are dot paths
    #[default]
    Json,
    /// XML document, keys are element paths
    Xml,
    /// Raw text, no keys
    PlainText,
    /// Reply is discarded
    Ignore,
}

impl FormatTag {
    /// Every tag, in registry order
    pub const ALL: [FormatTag; 4] = [
        FormatTag::Json,
        FormatTag::Xml,
        FormatTag::PlainText,
        FormatTag::Ignore,
    ];

    /// Tags that can describe a reply
    pub const REPLY: [FormatTag; 4] = Self::ALL;

    /// Tags that can describe an outgoing body
    pub const BODY: [FormatTag; 3] = [FormatTag::Json, FormatTag::Xml, FormatTag::PlainText];

    /// The persisted identifier
    pub fn as_str(self) -> &'static str {
        match self {
            FormatTag::Json => "json",
            FormatTag::Xml => "xml",
            FormatTag::PlainText => "plain_text",
            FormatTag::Ignore => "ignore",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| Error::unknown_format(s))
    }
}

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
}

impl Method {
    /// Methods whose requests carry the configured body
    pub fn supports_body(self) -> bool {
        matches!(self, Method::POST | Method::PUT)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::HEAD => reqwest::Method::HEAD,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}
