//! Result types for normalized backend responses

mod types;

pub use types::*;
