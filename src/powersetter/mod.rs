//! PowerSetter-specific modules for the HTTP client, page parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;
pub mod utilities;

pub use client::{PowerSetterClient, RateFetch};
pub use models::{RateRecord, RateResults};
pub use parser::Parser;
