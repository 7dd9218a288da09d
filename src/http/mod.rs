//! HTTP client module
//!
//! Sends the request a button fires and reads back the reply text that the
//! converters work on.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, OutgoingRequest, Reply};

#[cfg(test)]
mod tests;
