//! Response converter module
//!
//! Supports: JSON, XML, plain text, ignore
//!
//! # Overview
//!
//! A converter decodes a reply body in one format and narrows it with a key
//! expression to the single value shown on the button. A key that does not
//! resolve gives `Ok(None)`; only a body that fails to parse is an error.

mod converters;
mod registry;
mod types;
pub mod xml;

pub use converters::{Converter, IgnoreConverter, JsonConverter, PlainTextConverter, XmlConverter};
pub use registry::ConverterRegistry;
pub use types::{ContentConverter, KeyProvider, ResponseText};
