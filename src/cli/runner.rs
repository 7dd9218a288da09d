//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::convert::{ContentConverter, ConverterRegistry};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::loader::load_settings;
use crate::request::{AutoFetch, Outcome, RequestAction, RequestSettings};
use crate::types::FormatTag;
use serde_json::json;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
    registry: Arc<ConverterRegistry>,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            registry: Arc::new(ConverterRegistry::new()),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fire => self.fire().await,
            Commands::Watch { ticks } => self.watch(*ticks).await.map(|_| ()),
            Commands::Extract {
                format,
                keys,
                input,
            } => self.extract(*format, keys, input.as_deref()),
            Commands::Formats { json } => {
                self.formats(*json);
                Ok(())
            }
        }
    }

    /// Load settings from the `-s` file
    fn load_settings(&self) -> Result<RequestSettings> {
        let path = self
            .cli
            .settings
            .as_ref()
            .ok_or_else(|| Error::config("Settings file not specified (use -s flag)"))?;
        load_settings(path)
    }

    fn build_action(&self) -> Result<RequestAction> {
        let config = HttpClientConfig::builder()
            .timeout(Duration::from_millis(self.cli.timeout_ms))
            .build();
        let client = HttpClient::with_config(config)?;
        Ok(RequestAction::new(client, Arc::clone(&self.registry)))
    }

    /// Fire once
    async fn fire(&self) -> Result<()> {
        let settings = self.load_settings()?;
        let action = self.build_action()?;

        if let Some(text) = action.fire(&settings).await? {
            println!("{text}");
        }
        Ok(())
    }

    /// Fire on the auto-fetch schedule until the tick limit or Ctrl-C.
    ///
    /// Returns the last label shown.
    async fn watch(&self, max_ticks: Option<u64>) -> Result<Option<String>> {
        let settings = Arc::new(self.load_settings()?);
        if settings.auto_fetch == 0 {
            return Err(Error::config(
                "auto_fetch is 0 in the settings file, nothing to watch",
            ));
        }
        let action = Arc::new(self.build_action()?);

        info!(
            "Watching {} every {}s",
            settings.url, settings.auto_fetch
        );

        let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        let mut auto_fetch = AutoFetch::new();
        let mut ticks: u64 = 0;
        let mut label: Option<String> = None;
        let mut interrupted = false;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if max_ticks.is_some_and(|max| ticks >= max) {
                        break;
                    }
                    ticks += 1;
                    if auto_fetch.tick(settings.auto_fetch) {
                        let action = Arc::clone(&action);
                        let settings = Arc::clone(&settings);
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let outcome = action.send(&settings).await;
                            let _ = tx.send(outcome);
                        });
                    }
                }
                Some(outcome) = rx.recv() => report(outcome, &mut label),
                _ = tokio::signal::ctrl_c() => {
                    interrupted = true;
                    break;
                }
            }
        }

        // Fires still in flight are bounded by the request timeout
        if !interrupted {
            drop(tx);
            while let Some(outcome) = rx.recv().await {
                report(outcome, &mut label);
            }
        }

        Ok(label)
    }

    /// Convert a local body
    fn extract(&self, format: FormatTag, keys: &str, input: Option<&Path>) -> Result<()> {
        let body = match input {
            Some(path) if path != Path::new("-") => fs::read_to_string(path)?,
            _ => {
                let mut body = String::new();
                std::io::stdin().read_to_string(&mut body)?;
                body
            }
        };

        let converter = self.registry.get(format);
        if !keys.is_empty() && !converter.supports_keys() {
            warn!("{} ignores keys", format);
        }
        if let Some(text) = converter.get_button_text(&keys, &body)? {
            println!("{text}");
        }
        Ok(())
    }

    /// Print the format table
    fn formats(&self, as_json: bool) {
        if as_json {
            let rows: Vec<_> = self
                .registry
                .iter()
                .map(|c| {
                    json!({
                        "format": c.format(),
                        "supports_keys": c.supports_keys(),
                        "mime_type": c.mime_type(),
                        "body": self.registry.body_formats().contains(&c.format()),
                    })
                })
                .collect();
            println!("{}", serde_json::Value::Array(rows));
            return;
        }

        println!("{:<12} {:<6} {:<18} BODY", "FORMAT", "KEYS", "MIME");
        for converter in self.registry.iter() {
            let format = converter.format();
            println!(
                "{:<12} {:<6} {:<18} {}",
                format,
                if converter.supports_keys() { "yes" } else { "no" },
                converter.mime_type().unwrap_or("-"),
                if self.registry.body_formats().contains(&format) {
                    "yes"
                } else {
                    "no"
                }
            );
        }
    }
}

/// Print label changes; failures go to the log
fn report(outcome: Outcome, label: &mut Option<String>) {
    match outcome {
        Outcome::Label(text) => {
            if label.as_deref() != Some(text.as_str()) {
                println!("{text}");
                *label = Some(text);
            }
        }
        Outcome::Unchanged => {}
        Outcome::Failed(message) => warn!("request failed: {message}"),
    }
}
