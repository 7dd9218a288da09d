//! CLI commands and argument parsing

use crate::types::FormatTag;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fire HTTP requests and show one value from the reply
#[derive(Parser, Debug)]
#[command(name = "button-request")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Button settings file (YAML, or JSON by extension)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long, global = true, default_value = "2000")]
    pub timeout_ms: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fire the request once and print the extracted value
    Fire,

    /// Fire on the auto-fetch schedule and print label changes
    Watch {
        /// Stop after this many one-second ticks
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Run a converter on a local body instead of a reply
    Extract {
        /// Reply format: json, xml, plain_text or ignore
        #[arg(short, long, default_value = "json")]
        format: FormatTag,

        /// Key expression
        #[arg(short, long, default_value = "")]
        keys: String,

        /// Body file, `-` or nothing for stdin
        input: Option<PathBuf>,
    },

    /// List supported formats
    Formats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
