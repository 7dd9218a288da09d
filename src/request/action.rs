//! The request action behind a button
//!
//! Builds the outgoing request from [`RequestSettings`], fires it, and runs
//! the reply through the converter selected by `reply_type`. Every failure
//! ends up as [`Outcome::Failed`], which the host shows as a short error
//! indicator.

use super::settings::RequestSettings;
use crate::convert::{ContentConverter, ConverterRegistry};
use crate::error::{Error, Result};
use crate::http::{HttpClient, OutgoingRequest};
use std::sync::Arc;
use tracing::{debug, error};

/// What a fired request does to the button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Show this text as the label
    Label(String),
    /// Leave the label as it is
    Unchanged,
    /// Flash the error indicator; the message is for logs
    Failed(String),
}

impl Outcome {
    /// Whether the request failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Fires requests for buttons, sharing one client and registry
#[derive(Debug, Clone)]
pub struct RequestAction {
    client: HttpClient,
    registry: Arc<ConverterRegistry>,
}

impl RequestAction {
    /// Create an action from a client and a shared registry
    pub fn new(client: HttpClient, registry: Arc<ConverterRegistry>) -> Self {
        Self { client, registry }
    }

    /// The registry used to look up converters
    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Turn settings into the request that would be sent.
    ///
    /// When a body is sent without an explicit `content-type` header, the
    /// body format's MIME type is used.
    pub fn prepare(&self, settings: &RequestSettings) -> Result<OutgoingRequest> {
        if settings.url.is_empty() {
            return Err(Error::config("url is empty"));
        }

        let mut headers = settings.parsed_headers()?;
        debug!("headers: {:?}", headers);

        let body = settings.effective_body().map(|body| {
            if !headers.contains_key("content-type") {
                if let Some(mime) = self.registry.get(settings.body_type).mime_type() {
                    headers.insert("content-type".to_string(), mime.to_string());
                }
            }
            body.to_string()
        });

        Ok(OutgoingRequest {
            method: settings.http_method,
            url: settings.url.clone(),
            headers,
            body,
        })
    }

    /// Fire the request and extract the display value, propagating errors
    pub async fn fire(&self, settings: &RequestSettings) -> Result<Option<String>> {
        let request = self.prepare(settings)?;
        let converter = self.registry.get(settings.reply_type);
        let reply = self.client.send(&request).await?;

        converter.get_button_text(settings, &reply).map_err(|e| {
            if let Error::Decode { source, .. } = &e {
                error!(
                    "could not convert response with {} ({})! {}",
                    converter.name(),
                    reply.summary(),
                    source
                );
            }
            e
        })
    }

    /// Fire the request and map the result to a button outcome
    pub async fn send(&self, settings: &RequestSettings) -> Outcome {
        match self.fire(settings).await {
            Ok(Some(text)) => Outcome::Label(text),
            Ok(None) => Outcome::Unchanged,
            Err(e) => {
                if !e.is_decode() {
                    error!("request failed: {e}");
                }
                Outcome::Failed(e.to_string())
            }
        }
    }
}
