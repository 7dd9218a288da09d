//! Request module
//!
//! Everything between a button press and its label: settings, the request
//! action and the auto-fetch counter.

mod action;
mod poll;
mod settings;

pub use action::{Outcome, RequestAction};
pub use poll::AutoFetch;
pub use settings::{parse_headers, RequestSettings, MAX_AUTO_FETCH_SECS};

#[cfg(test)]
mod tests;
