//! # button-request
//!
//! Fire an HTTP request for a button and pick the one value its label shows.
//!
//! ## Features
//!
//! - **Reply formats**: JSON (dot paths), XML (element paths), plain text, ignore
//! - **Hardened XML**: no DTD entities, no external resources
//! - **Request building**: JSON headers, body with a default content-type
//! - **Auto-fetch**: re-fire on a per-button interval
//!
//! ## Quick Start
//!
//! ```rust
//! use button_request::convert::{ContentConverter, ConverterRegistry};
//! use button_request::FormatTag;
//!
//! let registry = ConverterRegistry::new();
//! let converter = registry.get(FormatTag::Json);
//!
//! let body = r#"{"sensor": {"temp": 21.5}}"#;
//! let text = converter.get_button_text(&"sensor.temp", &body).unwrap();
//! assert_eq!(text.as_deref(), Some("21.5"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  RequestAction: settings → request → reply → Outcome     │
//! └──────────────────────────────────────────────────────────┘
//!          │                   │                    │
//! ┌────────┴──────┐   ┌────────┴───────┐   ┌────────┴────────┐
//! │   Settings    │   │   HttpClient   │   │   Converters    │
//! ├───────────────┤   ├────────────────┤   ├─────────────────┤
//! │ YAML / JSON   │   │ reqwest        │   │ json  xml       │
//! │ headers JSON  │   │ timeout        │   │ plain_text      │
//! │ auto_fetch    │   │                │   │ ignore          │
//! └───────────────┘   └────────────────┘   └─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Reply converters (JSON, XML, plain text, ignore)
pub mod convert;

/// HTTP client
pub mod http;

/// Request settings, action and auto-fetch
pub mod request;

/// Settings file loader
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{FormatTag, Method};

pub use convert::{ContentConverter, Converter, ConverterRegistry, KeyProvider, ResponseText};
pub use request::{Outcome, RequestAction, RequestSettings};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
