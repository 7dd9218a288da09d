//! Converter registry
//!
//! A fixed mapping from every [`FormatTag`] to its [`Converter`]. Built once
//! and shared read-only; lookups by tag cannot miss.

use super::converters::Converter;
use super::types::ContentConverter;
use crate::error::Result;
use crate::types::FormatTag;

/// Total, immutable map of format tag to converter
#[derive(Debug, Clone)]
pub struct ConverterRegistry {
    converters: [Converter; 4],
}

impl ConverterRegistry {
    /// Build the registry with one converter per format tag
    pub fn new() -> Self {
        Self {
            converters: FormatTag::ALL.map(Converter::for_format),
        }
    }

    /// Converter for a tag
    pub fn get(&self, format: FormatTag) -> &Converter {
        let index = match format {
            FormatTag::Json => 0,
            FormatTag::Xml => 1,
            FormatTag::PlainText => 2,
            FormatTag::Ignore => 3,
        };
        &self.converters[index]
    }

    /// Converter for a persisted tag string
    pub fn get_by_name(&self, tag: &str) -> Result<&Converter> {
        Ok(self.get(tag.parse()?))
    }

    /// Whether the key entry applies to a reply format
    pub fn keys_visible(&self, reply_format: FormatTag) -> bool {
        self.get(reply_format).supports_keys()
    }

    /// Formats offered for replies
    pub fn reply_formats(&self) -> &'static [FormatTag] {
        &FormatTag::REPLY
    }

    /// Formats offered for request bodies
    pub fn body_formats(&self) -> &'static [FormatTag] {
        &FormatTag::BODY
    }

    /// All converters in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Converter> {
        self.converters.iter()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
