//! Converter implementations
//!
//! Each converter handles a specific reply format. [`Converter`] is the closed
//! set the registry hands out.

use super::types::{ContentConverter, KeyProvider, ResponseText};
use super::xml::{Document, ElementPath};
use crate::error::{Error, Result};
use crate::types::FormatTag;
use serde_json::Value;
use tracing::debug;

// ============================================================================
// JSON Converter
// ============================================================================

/// JSON replies, keys are dot-separated member names (`data.user.name`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonConverter;

impl JsonConverter {
    /// Walk a dot path through nested objects.
    ///
    /// A falsy value (null, false, 0, "", [], {}) anywhere along the way,
    /// including the root and the leaf, resolves to `None`, as does a missing
    /// member or a non-object with segments left.
    pub fn get_value<'a>(root: &'a Value, keys: &str) -> Option<&'a Value> {
        if !is_truthy(root) {
            return None;
        }

        let mut current = root;
        for key in keys.split('.') {
            current = current.as_object()?.get(key)?;
            if !is_truthy(current) {
                return None;
            }
        }
        Some(current)
    }
}

impl ContentConverter for JsonConverter {
    fn supports_keys(&self) -> bool {
        true
    }

    fn mime_type(&self) -> Option<&'static str> {
        Some("application/json")
    }

    fn get_button_text(
        &self,
        provider: &dyn KeyProvider,
        response: &dyn ResponseText,
    ) -> Result<Option<String>> {
        let value: Value = serde_json::from_str(response.text())
            .map_err(|e| Error::decode(FormatTag::Json, e))?;

        let keys = provider.keys();
        let found = Self::get_value(&value, keys).map(render_scalar);
        if found.is_none() {
            debug!("No JSON value at '{}'", keys);
        }
        Ok(found)
    }
}

/// Truthiness of a JSON value: empty, zero and null are false
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(arr) => !arr.is_empty(),
        Value::Object(obj) => !obj.is_empty(),
    }
}

/// Strings verbatim, everything else as compact JSON
fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// XML Converter
// ============================================================================

/// XML replies, keys are element paths evaluated from the document element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmlConverter;

impl ContentConverter for XmlConverter {
    fn supports_keys(&self) -> bool {
        true
    }

    fn mime_type(&self) -> Option<&'static str> {
        Some("application/xml")
    }

    fn get_button_text(
        &self,
        provider: &dyn KeyProvider,
        response: &dyn ResponseText,
    ) -> Result<Option<String>> {
        let document = Document::parse(response.text())?;
        let keys = provider.keys();
        let path = ElementPath::parse(keys)?;

        match document.find(&path) {
            None => {
                debug!("No XML element at '{}'", keys);
                Ok(None)
            }
            Some(element) => match element.text() {
                Some(text) if !text.is_empty() => Ok(Some(text.to_string())),
                _ => {
                    debug!("XML element at '{}' has no text", keys);
                    Ok(None)
                }
            },
        }
    }
}

// ============================================================================
// Plain Text Converter
// ============================================================================

/// Plain text replies, the trimmed body is the value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainTextConverter;

impl ContentConverter for PlainTextConverter {
    fn supports_keys(&self) -> bool {
        false
    }

    fn mime_type(&self) -> Option<&'static str> {
        Some("text/plain")
    }

    fn get_button_text(
        &self,
        _provider: &dyn KeyProvider,
        response: &dyn ResponseText,
    ) -> Result<Option<String>> {
        let text = response.text().trim();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }
}

// ============================================================================
// Ignore Converter
// ============================================================================

/// Discards the reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IgnoreConverter;

impl ContentConverter for IgnoreConverter {
    fn supports_keys(&self) -> bool {
        false
    }

    fn mime_type(&self) -> Option<&'static str> {
        None
    }

    fn get_button_text(
        &self,
        _provider: &dyn KeyProvider,
        _response: &dyn ResponseText,
    ) -> Result<Option<String>> {
        Ok(None)
    }
}

// ============================================================================
// Converter
// ============================================================================

/// One converter per format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    Json(JsonConverter),
    Xml(XmlConverter),
    PlainText(PlainTextConverter),
    Ignore(IgnoreConverter),
}

impl Converter {
    /// The converter for a format tag
    pub fn for_format(format: FormatTag) -> Self {
        match format {
            FormatTag::Json => Converter::Json(JsonConverter),
            FormatTag::Xml => Converter::Xml(XmlConverter),
            FormatTag::PlainText => Converter::PlainText(PlainTextConverter),
            FormatTag::Ignore => Converter::Ignore(IgnoreConverter),
        }
    }

    /// The format tag this converter handles
    pub fn format(&self) -> FormatTag {
        match self {
            Converter::Json(_) => FormatTag::Json,
            Converter::Xml(_) => FormatTag::Xml,
            Converter::PlainText(_) => FormatTag::PlainText,
            Converter::Ignore(_) => FormatTag::Ignore,
        }
    }

    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Converter::Json(_) => "JsonConverter",
            Converter::Xml(_) => "XmlConverter",
            Converter::PlainText(_) => "PlainTextConverter",
            Converter::Ignore(_) => "IgnoreConverter",
        }
    }

    fn inner(&self) -> &dyn ContentConverter {
        match self {
            Converter::Json(c) => c,
            Converter::Xml(c) => c,
            Converter::PlainText(c) => c,
            Converter::Ignore(c) => c,
        }
    }
}

impl ContentConverter for Converter {
    fn supports_keys(&self) -> bool {
        self.inner().supports_keys()
    }

    fn mime_type(&self) -> Option<&'static str> {
        self.inner().mime_type()
    }

    fn get_button_text(
        &self,
        provider: &dyn KeyProvider,
        response: &dyn ResponseText,
    ) -> Result<Option<String>> {
        self.inner().get_button_text(provider, response)
    }
}
