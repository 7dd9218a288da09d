//! CLI module
//!
//! Command-line interface for firing button requests.
//!
//! # Commands
//!
//! - `fire` - Fire the request once and print the value
//! - `watch` - Fire on the auto-fetch schedule
//! - `extract` - Convert a local body
//! - `formats` - List supported formats

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
