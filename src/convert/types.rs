//! Converter types and traits
//!
//! Defines the core conversion abstractions: what a converter reads
//! ([`KeyProvider`], [`ResponseText`]) and what it exposes ([`ContentConverter`]).

use crate::error::Result;

/// Supplies the user-configured key expression at call time
pub trait KeyProvider {
    /// The current key expression (dot path for JSON, element path for XML)
    fn keys(&self) -> &str;
}

impl KeyProvider for &str {
    fn keys(&self) -> &str {
        self
    }
}

impl KeyProvider for String {
    fn keys(&self) -> &str {
        self
    }
}

/// A response whose body can be read as text
pub trait ResponseText {
    /// The raw body; an absent body is the empty string
    fn text(&self) -> &str;
}

impl ResponseText for &str {
    fn text(&self) -> &str {
        self
    }
}

impl ResponseText for String {
    fn text(&self) -> &str {
        self
    }
}

/// Decode-and-extract for one content format
pub trait ContentConverter: Send + Sync {
    /// Whether a key expression narrows the extracted value
    fn supports_keys(&self) -> bool;

    /// MIME type declared for outgoing bodies in this format
    fn mime_type(&self) -> Option<&'static str>;

    /// Extract the display value from a response.
    ///
    /// Returns `Ok(None)` when the document has no value at the key path,
    /// and [`Error::Decode`](crate::Error::Decode) when the body does not
    /// parse in this format.
    fn get_button_text(
        &self,
        provider: &dyn KeyProvider,
        response: &dyn ResponseText,
    ) -> Result<Option<String>>;
}
