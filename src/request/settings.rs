//! Per-button request settings
//!
//! The shape matches what the host persists for a button, with the host's
//! defaults filled in for missing fields.

use crate::convert::KeyProvider;
use crate::error::{Error, Result};
use crate::types::{FormatTag, HeaderMap, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Longest auto-fetch interval the host offers, in seconds
pub const MAX_AUTO_FETCH_SECS: u32 = 3600;

/// Settings of one request button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    /// Target URL
    pub url: String,
    /// HTTP method
    pub http_method: Method,
    /// Headers as JSON object text
    pub headers: String,
    /// Raw request body, only sent for POST and PUT
    pub body: Option<String>,
    /// Format of the request body, decides the default content-type
    pub body_type: FormatTag,
    /// Format of the reply, selects the converter
    pub reply_type: FormatTag,
    /// Key expression handed to the reply converter
    pub keys: String,
    /// Re-fire interval in seconds, 0 disables
    pub auto_fetch: u32,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            http_method: Method::GET,
            headers: "{}".to_string(),
            body: None,
            body_type: FormatTag::Json,
            reply_type: FormatTag::Json,
            keys: String::new(),
            auto_fetch: 0,
        }
    }
}

impl RequestSettings {
    /// Settings for a GET request to `url`
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the method
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.http_method = method;
        self
    }

    /// Set the headers JSON text
    #[must_use]
    pub fn with_headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = headers.into();
        self
    }

    /// Set the body and its format
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>, body_type: FormatTag) -> Self {
        self.body = Some(body.into());
        self.body_type = body_type;
        self
    }

    /// Set the reply format and key expression
    #[must_use]
    pub fn with_reply(mut self, reply_type: FormatTag, keys: impl Into<String>) -> Self {
        self.reply_type = reply_type;
        self.keys = keys.into();
        self
    }

    /// Set the auto-fetch interval
    #[must_use]
    pub fn with_auto_fetch(mut self, secs: u32) -> Self {
        self.auto_fetch = secs;
        self
    }

    /// Check values a file may carry but the host never produces.
    ///
    /// An empty URL passes: it is reported when the button fires.
    pub fn validate(&self) -> Result<()> {
        if !self.url.is_empty() {
            url::Url::parse(&self.url)?;
        }
        if self.auto_fetch > MAX_AUTO_FETCH_SECS {
            return Err(Error::config(format!(
                "auto_fetch must be between 0 and {MAX_AUTO_FETCH_SECS} seconds, got {}",
                self.auto_fetch
            )));
        }
        if self.body.is_some() && self.body_type == FormatTag::Ignore {
            return Err(Error::config("body_type 'ignore' is only valid for replies"));
        }
        Ok(())
    }

    /// Parse the headers text into a map with lower-cased names
    pub fn parsed_headers(&self) -> Result<HeaderMap> {
        parse_headers(&self.headers)
    }

    /// The trimmed body, when the method carries one and it is not empty
    pub fn effective_body(&self) -> Option<&str> {
        if !self.http_method.supports_body() {
            return None;
        }
        self.body
            .as_deref()
            .map(str::trim)
            .filter(|body| !body.is_empty())
    }
}

impl KeyProvider for RequestSettings {
    fn keys(&self) -> &str {
        &self.keys
    }
}

/// Parse a JSON object of headers.
///
/// Blank text means no headers. Names are lower-cased; non-string values are
/// sent as their JSON text.
pub fn parse_headers(text: &str) -> Result<HeaderMap> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(HeaderMap::new());
    }

    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::invalid_headers(format!("not valid JSON: {e}")))?;
    let Value::Object(map) = value else {
        return Err(Error::invalid_headers("expected a JSON object"));
    };

    Ok(map
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (name.to_lowercase(), value)
        })
        .collect())
}
