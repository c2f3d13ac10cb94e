//! HTTP networking module
//!
//! Provides the HTTP client used for the search and autocomplete endpoints.

mod client;
mod user_agent;

pub use client::{HttpClient, JsonResponse};
pub use user_agent::client_user_agent;
