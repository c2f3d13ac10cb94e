//! Search client module
//!
//! Builds query requests from stored preferences plus call-time overrides,
//! issues them, and normalizes the JSON response.

mod client;
mod models;

pub use client::SearchClient;
pub use models::*;
